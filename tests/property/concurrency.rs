//! Registration from many threads lands on the same aggregate as a
//! sequential run.

use std::thread;

use proptest::prelude::*;
use safecast::ConstrainedTypeSystem;

use super::common::{world_shape_strategy, World};

const THREADS: usize = 4;

/// Every registration duplicated across `THREADS` scoped threads, each
/// walking the world at a different offset.
fn register_concurrently(world: &World) -> ConstrainedTypeSystem<usize> {
    let system = ConstrainedTypeSystem::new();
    thread::scope(|scope| {
        for worker in 0..THREADS {
            let system = &system;
            scope.spawn(move || {
                let n = world.concrete.len().max(1);
                for k in 0..world.concrete.len() {
                    system.add_concrete_type(world.concrete[(k + worker) % n].clone());
                }
                for &(f, t) in &world.rules {
                    system.add_implication(world.interfaces[f].clone(), world.interfaces[t].clone());
                }
            });
        }
        // Casts are not deduplicated, so only one thread per cast.
        for (site, (from, to)) in world.casts.iter().enumerate() {
            let system = &system;
            scope.spawn(move || {
                system.add_cast(from.clone(), to.clone(), site);
            });
        }
    });
    system
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn concurrent_registration_matches_sequential(shape in world_shape_strategy()) {
        let world = shape.build();
        let sequential = world.system();
        let concurrent = register_concurrently(&world);

        prop_assert_eq!(concurrent.type_count(), sequential.type_count());
        prop_assert_eq!(concurrent.implication_count(), sequential.implication_count());
        prop_assert_eq!(concurrent.cast_count(), sequential.cast_count());

        prop_assert_eq!(
            concurrent.check_implication_constraints(),
            sequential.check_implication_constraints()
        );

        // Cast order follows arrival, so compare as sets.
        let mut a: Vec<usize> = concurrent.find_unsafe_casts().iter().map(|c| c.site).collect();
        let mut b: Vec<usize> = sequential.find_unsafe_casts().iter().map(|c| c.site).collect();
        a.sort_unstable();
        b.sort_unstable();
        prop_assert_eq!(a, b);
    }
}

#[test]
fn finalize_queries_may_run_together() {
    let world = safecast::testing::shapes();
    let system: ConstrainedTypeSystem<u32> = ConstrainedTypeSystem::new();
    system.add_concrete_type(world.get("Square"));
    system.add_implication(world.get("IShape"), world.get("IDrawing"));
    system.add_cast(world.get("IShape"), world.get("INotImplemented"), 3);

    let (violations, unsafe_casts) = thread::scope(|scope| {
        let v = scope.spawn(|| system.check_implication_constraints());
        let c = scope.spawn(|| system.find_unsafe_casts());
        (v.join().unwrap(), c.join().unwrap())
    });
    assert_eq!(violations.len(), 1);
    assert_eq!(unsafe_casts.len(), 1);
}
