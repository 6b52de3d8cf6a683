// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hierarchy resolution: names to symbols, direct edges to flattened sets.
//!
//! The engine assumes every interface set it sees is already closed. This is
//! where that closure is computed, once per compilation, before anything is
//! registered:
//!
//! ```text
//!   all(I)  = ⋃ { {J} ∪ all(J) | J ∈ extends(I) }
//!   all(C)  = ⋃ { {J} ∪ all(J) | J ∈ implements(C) } ∪ all(base(C))
//! ```
//!
//! Cycles are rejected rather than tolerated; no real compiler accepts them.

use std::collections::{BTreeSet, HashMap};

use crate::diagnostics::Location;
use crate::error::{Error, Result};
use crate::host::model::{TypeDecl, Unit};
use crate::types::{TypeId, TypeKind, TypeRef, TypeSymbol};
use crate::verify::{contracts, ClosedHierarchy};

/// Every declared type in a compilation, resolved and flattened.
#[derive(Debug, Clone, Default)]
pub struct TypeTable {
    by_name: HashMap<String, TypeRef>,
    locations: HashMap<TypeId, Location>,
    hierarchy: ClosedHierarchy,
}

impl TypeTable {
    /// Resolve all type declarations across `units`.
    ///
    /// Ids are assigned in declaration order (unit order, then position in
    /// the unit).
    pub fn resolve(units: &[Unit]) -> Result<Self> {
        let mut decls: Vec<(&TypeDecl, &str)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for unit in units {
            for decl in &unit.types {
                if index.insert(decl.name.as_str(), decls.len()).is_some() {
                    return Err(Error::DuplicateType {
                        name: decl.name.clone(),
                    });
                }
                decls.push((decl, unit.path.as_str()));
            }
        }

        let edges = decls
            .iter()
            .map(|(decl, unit)| Edges::resolve(decl, unit, &decls, &index))
            .collect::<Result<Vec<_>>>()?;

        let mut flattener = Flattener::new(&decls, &edges);
        let symbols: Vec<TypeRef> = (0..decls.len())
            .map(|i| {
                let closed = flattener.closure(i)?;
                let (decl, _) = decls[i];
                Ok(TypeSymbol::new(
                    TypeId(i as u32),
                    decl.name.clone(),
                    decl.kind,
                    decl.is_abstract,
                    closed.into_iter().map(|j| TypeId(j as u32)),
                )
                .into_ref())
            })
            .collect::<Result<_>>()?;

        let hierarchy = ClosedHierarchy::new(symbols.iter().cloned())?;
        for sym in &symbols {
            contracts::check_interface_set_closed(sym, hierarchy.as_map());
        }

        let locations = decls
            .iter()
            .enumerate()
            .map(|(i, (decl, unit))| (TypeId(i as u32), decl.location.at(unit)))
            .collect();
        let by_name = symbols
            .into_iter()
            .map(|sym| (sym.name().to_string(), sym))
            .collect();

        Ok(Self {
            by_name,
            locations,
            hierarchy,
        })
    }

    pub fn get(&self, name: &str) -> Option<&TypeRef> {
        self.by_name.get(name)
    }

    /// Declaration site of a type.
    pub fn location(&self, id: TypeId) -> Option<&Location> {
        self.locations.get(&id)
    }

    pub fn hierarchy(&self) -> &ClosedHierarchy {
        &self.hierarchy
    }

    pub fn len(&self) -> usize {
        self.hierarchy.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hierarchy.is_empty()
    }

    /// Resolve every id in a symbol's interface set back to its name.
    pub fn interface_names(&self, ty: &TypeSymbol) -> Vec<&str> {
        ty.all_interfaces()
            .iter()
            .filter_map(|id| self.hierarchy.get(*id))
            .map(|iface| iface.name())
            .collect()
    }
}

/// Direct edges of one declaration, as indices into the declaration list.
struct Edges {
    base: Option<usize>,
    interfaces: Vec<usize>,
}

impl Edges {
    fn resolve(
        decl: &TypeDecl,
        unit: &str,
        decls: &[(&TypeDecl, &str)],
        index: &HashMap<&str, usize>,
    ) -> Result<Self> {
        let lookup = |name: &str| {
            index.get(name).copied().ok_or_else(|| Error::UnknownType {
                name: name.to_string(),
                unit: unit.to_string(),
            })
        };

        let base = match &decl.base {
            None => None,
            Some(_) if decl.kind != TypeKind::Class => {
                return Err(Error::InvalidHierarchy {
                    ty: decl.name.clone(),
                    reason: format!("a {} cannot have a base class", decl.kind),
                });
            }
            Some(name) => {
                let b = lookup(name)?;
                if decls[b].0.kind != TypeKind::Class {
                    return Err(Error::InvalidHierarchy {
                        ty: decl.name.clone(),
                        reason: format!("base {} is a {}, not a class", name, decls[b].0.kind),
                    });
                }
                Some(b)
            }
        };

        let interfaces = decl
            .interfaces
            .iter()
            .map(|name| {
                let i = lookup(name)?;
                if decls[i].0.kind != TypeKind::Interface {
                    return Err(Error::InvalidHierarchy {
                        ty: decl.name.clone(),
                        reason: format!("{} is a {}, not an interface", name, decls[i].0.kind),
                    });
                }
                Ok(i)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { base, interfaces })
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    Pending,
    InProgress,
    Done,
}

/// Memoized DFS over direct edges, driven by an explicit stack so deep
/// inheritance chains cannot exhaust the call stack.
struct Flattener<'a> {
    decls: &'a [(&'a TypeDecl, &'a str)],
    edges: &'a [Edges],
    state: Vec<Visit>,
    closed: Vec<BTreeSet<usize>>,
}

/// A stack entry: visit the node, or combine its already-closed children.
#[derive(Clone, Copy)]
enum Step {
    Enter(usize),
    Combine(usize),
}

impl<'a> Flattener<'a> {
    fn new(decls: &'a [(&'a TypeDecl, &'a str)], edges: &'a [Edges]) -> Self {
        Self {
            decls,
            edges,
            state: vec![Visit::Pending; decls.len()],
            closed: vec![BTreeSet::new(); decls.len()],
        }
    }

    fn closure(&mut self, root: usize) -> Result<BTreeSet<usize>> {
        let mut stack = vec![Step::Enter(root)];
        while let Some(step) = stack.pop() {
            match step {
                Step::Enter(i) => match self.state[i] {
                    Visit::Done => {}
                    Visit::InProgress => return Err(self.cycle(i)),
                    Visit::Pending => {
                        self.state[i] = Visit::InProgress;
                        stack.push(Step::Combine(i));
                        let edges = &self.edges[i];
                        for &j in edges.interfaces.iter().chain(edges.base.iter()) {
                            match self.state[j] {
                                Visit::Done => {}
                                Visit::InProgress => return Err(self.cycle(j)),
                                Visit::Pending => stack.push(Step::Enter(j)),
                            }
                        }
                    }
                },
                Step::Combine(i) => {
                    let edges = &self.edges[i];
                    let mut set = BTreeSet::new();
                    for &j in &edges.interfaces {
                        set.insert(j);
                        set.extend(self.closed[j].iter().copied());
                    }
                    if let Some(b) = edges.base {
                        set.extend(self.closed[b].iter().copied());
                    }
                    self.closed[i] = set;
                    self.state[i] = Visit::Done;
                }
            }
        }
        Ok(self.closed[root].clone())
    }

    fn cycle(&self, i: usize) -> Error {
        Error::InheritanceCycle {
            name: self.decls[i].0.name.clone(),
        }
    }
}
