// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Recognition of rule attributes and cast calls in one unit.
//!
//! Shape errors (a concrete type where an interface belongs) are reported
//! here and keep the offending attribute or call out of the engine. What
//! survives is registered as an implication or a cast request.

use tracing::{debug, warn};

use crate::config::HostConfig;
use crate::diagnostics::{Diagnostic, Location};
use crate::host::hierarchy::TypeTable;
use crate::host::model::{AttributeArgument, AttributeDecl, InvocationDecl, Unit};
use crate::system::ConstrainedTypeSystem;
use crate::types::{CastRequest, Implication, TypeRef};

/// Matches unit contents against the configured attribute and call names.
#[derive(Debug, Clone, Copy)]
pub struct Recognizer<'a> {
    config: &'a HostConfig,
    table: &'a TypeTable,
}

impl<'a> Recognizer<'a> {
    pub fn new(config: &'a HostConfig, table: &'a TypeTable) -> Self {
        Self { config, table }
    }

    /// Recognize everything in `unit`, registering survivors into `system`.
    ///
    /// Safe to call for many units at once against the same system.
    pub fn unit(&self, unit: &Unit, system: &ConstrainedTypeSystem<Location>) -> Vec<Diagnostic> {
        let mut diagnostics = Vec::new();

        for attr in &unit.attributes {
            if let Some(rule) = self.attribute(attr, &unit.path, &mut diagnostics) {
                system.add_implication(rule.from, rule.to);
            }
        }
        for call in &unit.invocations {
            if let Some(cast) = self.invocation(call, &unit.path, &mut diagnostics) {
                system.add_cast(cast.from, cast.to, cast.site);
            }
        }

        debug!(
            unit = unit.path.as_str(),
            diagnostics = diagnostics.len(),
            "recognized unit"
        );
        diagnostics
    }

    /// An implication declared by `attr`, if it is a well-formed rule attribute.
    ///
    /// Both arguments are checked before giving up, so a rule with two bad
    /// endpoints reports both.
    pub fn attribute(
        &self,
        attr: &AttributeDecl,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<Implication> {
        if attr.name != self.config.implies_attribute {
            return None;
        }
        let [first, second] = attr.arguments.as_slice() else {
            return None;
        };

        let from_at = attr.argument_location(0).at(path);
        let to_at = attr.argument_location(1).at(path);
        let from = self.interface_argument(first, &from_at, diagnostics);
        let to = self.interface_argument(second, &to_at, diagnostics);
        Some(Implication::new(from?, to?))
    }

    fn interface_argument(
        &self,
        arg: &AttributeArgument,
        location: &Location,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeRef> {
        let AttributeArgument::TypeOf(name) = arg else {
            return None;
        };
        let ty = self.resolve(name, location, diagnostics)?;
        if !ty.is_interface() {
            diagnostics.push(Diagnostic::implies_not_interface(location.clone()));
            return None;
        }
        Some(ty.clone())
    }

    /// A cast request for `call`, if it is an error-free cast call.
    pub fn invocation(
        &self,
        call: &InvocationDecl,
        path: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<CastRequest<Location>> {
        if call.method != self.config.cast_method || call.receiver != self.config.cast_type {
            return None;
        }
        let [target] = call.type_arguments.as_slice() else {
            return None;
        };

        let target_at = call.type_arguments_position().at(path);
        let to = self.resolve(target, &target_at, diagnostics)?;
        let mut shape_error = false;
        if !to.is_interface() {
            shape_error = true;
            diagnostics.push(Diagnostic::cast_target_not_interface(to.name(), target_at));
        }

        // An untyped argument leaves nothing to check.
        let [Some(argument)] = call.arguments.as_slice() else {
            return None;
        };
        let argument_at = call.argument_location(0).at(path);
        let from = self.resolve(argument, &argument_at, diagnostics)?;
        if !from.is_interface() {
            shape_error = true;
            diagnostics.push(Diagnostic::cast_source_not_interface(from.name(), argument_at));
        }

        if shape_error {
            return None;
        }
        Some(CastRequest::new(from.clone(), to.clone(), call.location.at(path)))
    }

    fn resolve(
        &self,
        name: &str,
        location: &Location,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<&'a TypeRef> {
        let found = self.table.get(name);
        if found.is_none() {
            warn!(ty = name, at = %location, "unresolved type");
            diagnostics.push(Diagnostic::unresolved_type(name, location.clone()));
        }
        found
    }
}
