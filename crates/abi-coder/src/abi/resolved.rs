// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Normalised view of one type occurrence.
//!
//! Resolution substitutes generic type parameters with the concrete type
//! arguments of the referencing argument, recursively, so that every
//! component of a [`ResolvedAbiType`] points at a concrete declaration.
//! Parameters may be explicit (`typeParameters`) or implicit (components
//! that reference a `generic T` declaration without the owner listing it).
//!
//! Nesting is bounded by [`MAX_NESTING_DEPTH`], which turns self-referential
//! declarations into an `InvalidComponent` error.

use super::{find_declaration, AbiArgument, TypeLookup, TypeShape};
use crate::constants::MAX_NESTING_DEPTH;
use crate::error::{AbiError, AbiResult};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

/// A type occurrence with generics substituted and components resolved.
///
/// Borrows the schema for its lifetime; meant to be discarded once the
/// coder tree has been built.
#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedAbiType<'a> {
    #[serde(skip)]
    abi: &'a dyn TypeLookup,
    #[serde(skip)]
    depth: usize,
    /// Name of the argument this type was reached through.
    pub name: String,
    /// Canonical type string of the declaration.
    #[serde(rename = "type")]
    pub type_field: String,
    /// Type arguments exactly as written on the argument.
    pub original_type_arguments: Option<Vec<AbiArgument>>,
    /// Resolved components, in declaration order.
    pub components: Option<Vec<ResolvedAbiType<'a>>>,
}

/// Generic parameter id -> concrete argument (None when not supplied).
type GenericMap = HashMap<usize, Option<AbiArgument>>;

impl<'a> ResolvedAbiType<'a> {
    /// Resolve `argument` against `abi`.
    pub fn new(abi: &'a dyn TypeLookup, argument: &AbiArgument) -> AbiResult<Self> {
        Self::nested(abi, argument, 0)
    }

    /// Resolve `argument` as a type found `depth` levels below a root.
    pub(crate) fn nested(
        abi: &'a dyn TypeLookup,
        argument: &AbiArgument,
        depth: usize,
    ) -> AbiResult<Self> {
        let decl = find_declaration(abi, argument)?;
        if depth > MAX_NESTING_DEPTH {
            return Err(AbiError::InvalidComponent(format!(
                "The provided {} type nests deeper than {MAX_NESTING_DEPTH} levels; \
                 it is likely self-referential.",
                decl.type_field
            )));
        }

        let type_parameters = match &decl.type_parameters {
            Some(params) => Some(params.clone()),
            None => implicit_type_parameters(abi, decl.components.as_deref())?,
        };

        let components = match &decl.components {
            None => None,
            Some(components) => Some(resolve_components(
                abi,
                argument,
                &decl.type_field,
                components,
                type_parameters.as_deref().unwrap_or_default(),
                depth + 1,
            )?),
        };

        Ok(Self {
            abi,
            depth,
            name: argument.name.clone(),
            type_field: decl.type_field.clone(),
            original_type_arguments: argument.type_arguments.clone(),
            components,
        })
    }

    /// The schema this type was resolved against.
    pub fn abi(&self) -> &'a dyn TypeLookup {
        self.abi
    }

    /// Levels between this type and the root it was resolved from.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Structural shape of the type string.
    pub fn shape(&self) -> TypeShape {
        TypeShape::parse(&self.type_field)
    }

    /// Components, or an empty slice when the type has none.
    pub fn components(&self) -> &[ResolvedAbiType<'a>] {
        self.components.as_deref().unwrap_or_default()
    }

    /// JSON dump used in diagnostics.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| self.type_field.clone())
    }
}

impl fmt::Debug for ResolvedAbiType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedAbiType")
            .field("name", &self.name)
            .field("type", &self.type_field)
            .field("original_type_arguments", &self.original_type_arguments)
            .field("components", &self.components)
            .finish()
    }
}

fn resolve_components<'a>(
    abi: &'a dyn TypeLookup,
    argument: &AbiArgument,
    owner: &str,
    components: &[AbiArgument],
    type_parameters: &[usize],
    depth: usize,
) -> AbiResult<Vec<ResolvedAbiType<'a>>> {
    if type_parameters.is_empty() {
        return components
            .iter()
            .map(|c| ResolvedAbiType::nested(abi, c, depth))
            .collect();
    }

    let generics: GenericMap = type_parameters
        .iter()
        .enumerate()
        .map(|(idx, param)| {
            let arg = argument
                .type_arguments
                .as_ref()
                .and_then(|args| args.get(idx))
                .cloned();
            (*param, arg)
        })
        .collect();

    substitute(abi, components, &generics, owner)?
        .iter()
        .map(|c| ResolvedAbiType::nested(abi, c, depth))
        .collect()
}

/// Replace every reference to a generic parameter in `args` by its argument.
fn substitute(
    abi: &dyn TypeLookup,
    args: &[AbiArgument],
    generics: &GenericMap,
    owner: &str,
) -> AbiResult<Vec<AbiArgument>> {
    args.iter()
        .map(|arg| -> AbiResult<AbiArgument> {
            if let Some(bound) = generics.get(&arg.type_id) {
                let concrete = bound
                    .as_ref()
                    .ok_or_else(|| missing_argument(abi, arg.type_id, owner))?;
                return Ok(AbiArgument {
                    name: arg.name.clone(),
                    ..concrete.clone()
                });
            }

            if let Some(type_args) = &arg.type_arguments {
                return Ok(AbiArgument {
                    type_arguments: Some(substitute(abi, type_args, generics, owner)?),
                    ..arg.clone()
                });
            }

            let decl = find_declaration(abi, arg)?;
            match implicit_type_parameters(abi, decl.components.as_deref())? {
                Some(implicit) => {
                    let type_args = implicit
                        .iter()
                        .map(|param| {
                            generics
                                .get(param)
                                .cloned()
                                .flatten()
                                .ok_or_else(|| missing_argument(abi, *param, owner))
                        })
                        .collect::<AbiResult<Vec<_>>>()?;
                    Ok(AbiArgument {
                        type_arguments: Some(type_args),
                        ..arg.clone()
                    })
                }
                None => Ok(arg.clone()),
            }
        })
        .collect()
}

/// Generic declarations referenced by `args` (directly or through type
/// arguments), in first-seen order.
fn implicit_type_parameters(
    abi: &dyn TypeLookup,
    args: Option<&[AbiArgument]>,
) -> AbiResult<Option<Vec<usize>>> {
    fn walk(abi: &dyn TypeLookup, args: &[AbiArgument], out: &mut Vec<usize>) -> AbiResult<()> {
        for arg in args {
            let decl = find_declaration(abi, arg)?;
            if TypeShape::parse(&decl.type_field).is_generic() {
                if !out.contains(&decl.type_id) {
                    out.push(decl.type_id);
                }
                continue;
            }
            if let Some(type_args) = &arg.type_arguments {
                walk(abi, type_args, out)?;
            }
        }
        Ok(())
    }

    let Some(args) = args else {
        return Ok(None);
    };
    let mut found = Vec::new();
    walk(abi, args, &mut found)?;
    Ok((!found.is_empty()).then_some(found))
}

fn missing_argument(abi: &dyn TypeLookup, param: usize, owner: &str) -> AbiError {
    let param_name = abi
        .lookup_type(param)
        .map_or_else(|| param.to_string(), |d| d.type_field.clone());
    AbiError::InvalidComponent(format!(
        "The provided {owner} type is missing the type argument for '{param_name}'."
    ))
}
