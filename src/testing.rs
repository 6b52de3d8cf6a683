//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical ways to build type symbols without going through the
//! host's hierarchy resolver.

#![doc(hidden)]

use std::collections::{BTreeSet, HashMap};

use crate::types::{TypeId, TypeKind, TypeRef, TypeSymbol};

/// Builds symbols with correctly flattened interface sets.
///
/// Each new symbol's set is the union of the listed interfaces and everything
/// they already extend, so fixtures stay closed by construction.
#[derive(Debug, Default)]
pub struct TypeFixture {
    next_id: u32,
    by_name: HashMap<String, TypeRef>,
}

impl TypeFixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// An interface extending `extends`.
    pub fn interface(&mut self, name: &str, extends: &[&TypeRef]) -> TypeRef {
        self.make(name, TypeKind::Interface, true, extends)
    }

    /// A non-abstract class implementing `implements`.
    pub fn class(&mut self, name: &str, implements: &[&TypeRef]) -> TypeRef {
        self.make(name, TypeKind::Class, false, implements)
    }

    pub fn abstract_class(&mut self, name: &str, implements: &[&TypeRef]) -> TypeRef {
        self.make(name, TypeKind::Class, true, implements)
    }

    pub fn structure(&mut self, name: &str, implements: &[&TypeRef]) -> TypeRef {
        self.make(name, TypeKind::Struct, false, implements)
    }

    /// Look up a symbol created earlier.
    pub fn get(&self, name: &str) -> TypeRef {
        self.by_name
            .get(name)
            .cloned()
            .unwrap_or_else(|| panic!("fixture has no type named {}", name))
    }

    pub fn all(&self) -> Vec<TypeRef> {
        let mut all: Vec<TypeRef> = self.by_name.values().cloned().collect();
        all.sort_by_key(|t| t.id());
        all
    }

    fn make(
        &mut self,
        name: &str,
        kind: TypeKind,
        is_abstract: bool,
        direct: &[&TypeRef],
    ) -> TypeRef {
        let closed: BTreeSet<TypeId> = direct
            .iter()
            .flat_map(|iface| std::iter::once(iface.id()).chain(iface.all_interfaces().iter().copied()))
            .collect();
        let sym = TypeSymbol::new(TypeId(self.next_id), name, kind, is_abstract, closed).into_ref();
        self.next_id += 1;
        self.by_name.insert(name.to_string(), sym.clone());
        sym
    }
}

/// The shapes used throughout the acceptance scenarios.
///
/// `IShape`, `IGeometry`, `IDrawing`, `INotImplemented`; `Circle` implements
/// the first three, `Square` misses `IDrawing`.
pub fn shapes() -> TypeFixture {
    let mut fx = TypeFixture::new();
    let ishape = fx.interface("IShape", &[]);
    let igeometry = fx.interface("IGeometry", &[]);
    let idrawing = fx.interface("IDrawing", &[]);
    fx.interface("INotImplemented", &[]);
    fx.class("Circle", &[&ishape, &igeometry, &idrawing]);
    fx.class("Square", &[&ishape, &igeometry]);
    fx
}
