// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The serialized program model the host reads.
//!
//! A compilation is a set of units, one per source file. A unit carries
//! what a front end has already parsed and resolved: type declarations,
//! attribute applications, and invocations with the static types of their
//! arguments.

use serde::Deserialize;

use crate::diagnostics::Location;
use crate::types::TypeKind;

/// Manifest format version this host understands.
pub const MANIFEST_VERSION: u32 = 1;

#[derive(Deserialize, Clone, Debug)]
pub struct Manifest {
    pub version: u32,
    pub units: Vec<String>,
}

/// One source file's worth of facts.
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct Unit {
    /// Source path used in diagnostics. Filled from the unit file name when absent.
    pub path: String,
    pub types: Vec<TypeDecl>,
    pub attributes: Vec<AttributeDecl>,
    pub invocations: Vec<InvocationDecl>,
}

#[derive(Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Position {
    #[serde(default = "one")]
    pub line: u32,
    #[serde(default = "one")]
    pub column: u32,
}

fn one() -> u32 {
    1
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl Position {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn at(self, path: &str) -> Location {
        Location::new(path, self.line, self.column)
    }
}

#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct TypeDecl {
    pub name: String,
    pub kind: TypeKind,
    #[serde(default, rename = "abstract")]
    pub is_abstract: bool,
    /// Base class, for classes only.
    #[serde(default)]
    pub base: Option<String>,
    /// Directly implemented interfaces, or for an interface, the ones it extends.
    #[serde(default)]
    pub interfaces: Vec<String>,
    #[serde(default)]
    pub location: Position,
}

/// An attribute application such as `[module: Constraint.Implies(typeof(A), typeof(B))]`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDecl {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<AttributeArgument>,
    #[serde(default)]
    pub location: Position,
    /// Position of each argument, parallel to `arguments`. May be shorter or empty.
    #[serde(default)]
    pub argument_locations: Vec<Position>,
}

impl AttributeDecl {
    /// Where argument `index` sits, or the attribute itself when unknown.
    pub fn argument_location(&self, index: usize) -> Position {
        self.argument_locations
            .get(index)
            .copied()
            .unwrap_or(self.location)
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq, Eq)]
pub enum AttributeArgument {
    /// `typeof(Name)`
    #[serde(rename = "typeof")]
    TypeOf(String),
    /// Any other expression, kept as source text.
    #[serde(rename = "literal")]
    Literal(String),
}

/// A call such as `To<IDrawing>.Safely(s1)`.
#[derive(Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct InvocationDecl {
    /// Name of the type the method is called on, without type arguments.
    pub receiver: String,
    #[serde(default)]
    pub type_arguments: Vec<String>,
    pub method: String,
    /// Static type of each argument expression; `None` when the front end
    /// could not type it.
    #[serde(default)]
    pub arguments: Vec<Option<String>>,
    #[serde(default)]
    pub location: Position,
    /// Position of the `<...>` type argument list.
    #[serde(default)]
    pub type_arguments_location: Option<Position>,
    /// Position of each argument expression, parallel to `arguments`.
    #[serde(default)]
    pub argument_locations: Vec<Position>,
}

impl InvocationDecl {
    pub fn type_arguments_position(&self) -> Position {
        self.type_arguments_location.unwrap_or(self.location)
    }

    pub fn argument_location(&self, index: usize) -> Position {
        self.argument_locations
            .get(index)
            .copied()
            .unwrap_or(self.location)
    }
}
