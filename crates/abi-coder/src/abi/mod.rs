// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! JSON ABI schema model and type resolution.
//!
//! The schema is the standard JSON ABI document: a flat `types` table where
//! every declaration has a numeric `typeId`, a type string, optional
//! `components` and optional generic `typeParameters`. Arguments reference
//! declarations by id and carry concrete `typeArguments` for generics.
//!
//! ```text
//!   JsonAbi (types table)
//!        |  lookup_type / lookup_named_type
//!        v
//!   ResolvedAbiType (generics substituted, components resolved)
//!        |
//!        v
//!   TypeShape (closed set of structural shapes)
//! ```

mod resolved;
mod shape;

pub use resolved::ResolvedAbiType;
pub use shape::TypeShape;

use crate::config::EncodingVersion;
use crate::error::{AbiError, AbiResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

// ---------------------------------------------------------------------------
// Schema documents
// ---------------------------------------------------------------------------

/// Reference to a type declaration, as found in components, function
/// inputs and type arguments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiArgument {
    /// Field, case or parameter name (empty for anonymous slots).
    #[serde(default)]
    pub name: String,
    /// Id of the referenced declaration.
    #[serde(rename = "type")]
    pub type_id: usize,
    /// Concrete arguments for the declaration's generic parameters.
    #[serde(default)]
    pub type_arguments: Option<Vec<AbiArgument>>,
}

impl AbiArgument {
    /// Anonymous reference to `type_id`.
    pub fn new(type_id: usize) -> Self {
        Self {
            name: String::new(),
            type_id,
            type_arguments: None,
        }
    }

    /// Named reference to `type_id`.
    pub fn named(name: impl Into<String>, type_id: usize) -> Self {
        Self {
            name: name.into(),
            ..Self::new(type_id)
        }
    }

    /// Set the generic type arguments.
    #[must_use]
    pub fn with_type_arguments(mut self, args: Vec<AbiArgument>) -> Self {
        self.type_arguments = Some(args);
        self
    }
}

/// One entry of the schema's `types` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AbiTypeDeclaration {
    /// Unique id within the schema.
    pub type_id: usize,
    /// Type string, e.g. `u64`, `struct Foo`, `[u8; 4]`, `generic T`.
    #[serde(rename = "type")]
    pub type_field: String,
    /// Fields, cases, tuple slots or array element.
    #[serde(default)]
    pub components: Option<Vec<AbiArgument>>,
    /// Ids of the `generic` declarations this type is parametrised over.
    #[serde(default)]
    pub type_parameters: Option<Vec<usize>>,
}

impl AbiTypeDeclaration {
    /// Declaration without components.
    pub fn new(type_id: usize, type_field: impl Into<String>) -> Self {
        Self {
            type_id,
            type_field: type_field.into(),
            components: None,
            type_parameters: None,
        }
    }

    /// Set the components.
    #[must_use]
    pub fn with_components(mut self, components: Vec<AbiArgument>) -> Self {
        self.components = Some(components);
        self
    }

    /// Set the generic type parameters.
    #[must_use]
    pub fn with_type_parameters(mut self, params: Vec<usize>) -> Self {
        self.type_parameters = Some(params);
        self
    }
}

// ---------------------------------------------------------------------------
// TypeLookup trait + JsonAbi implementation
// ---------------------------------------------------------------------------

/// Read-only lookup of type declarations consulted during resolution.
pub trait TypeLookup {
    /// Look up a declaration by id.
    fn lookup_type(&self, type_id: usize) -> Option<&AbiTypeDeclaration>;

    /// Look up a declaration by its type string (e.g. `struct Foo`).
    fn lookup_named_type(&self, name: &str) -> Option<&AbiTypeDeclaration>;
}

/// A parsed JSON ABI schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JsonAbi {
    /// Encoding version declared by the schema.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    encoding: Option<String>,
    types: Vec<AbiTypeDeclaration>,
    #[serde(skip)]
    by_id: HashMap<usize, usize>,
}

impl JsonAbi {
    /// Build a schema from its declarations.
    pub fn new(types: Vec<AbiTypeDeclaration>) -> Self {
        let mut abi = Self {
            encoding: None,
            types,
            by_id: HashMap::new(),
        };
        abi.reindex();
        abi
    }

    /// Declare the schema's encoding version.
    #[must_use]
    pub fn with_encoding(mut self, encoding: EncodingVersion) -> Self {
        self.encoding = Some(encoding.as_str().to_string());
        self
    }

    /// Parse a JSON ABI document.
    pub fn from_json(json: &str) -> AbiResult<Self> {
        let mut abi: Self = serde_json::from_str(json)?;
        abi.reindex();
        log::debug!(
            "[abi] loaded schema: {} types, encoding {:?}",
            abi.types.len(),
            abi.encoding
        );
        Ok(abi)
    }

    /// Load a JSON ABI document from disk.
    pub fn from_path(path: impl AsRef<Path>) -> AbiResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// All declarations, in schema order.
    pub fn types(&self) -> &[AbiTypeDeclaration] {
        &self.types
    }

    /// The encoding version declared by the schema, if any.
    pub fn encoding(&self) -> AbiResult<Option<EncodingVersion>> {
        self.encoding
            .as_deref()
            .map(|s| s.parse::<EncodingVersion>())
            .transpose()
    }

    fn reindex(&mut self) {
        self.by_id = self
            .types
            .iter()
            .enumerate()
            .map(|(idx, decl)| (decl.type_id, idx))
            .collect();
        if self.by_id.len() != self.types.len() {
            log::warn!("[abi] schema declares duplicate type ids; the last declaration wins");
        }
    }
}

impl TypeLookup for JsonAbi {
    fn lookup_type(&self, type_id: usize) -> Option<&AbiTypeDeclaration> {
        self.by_id.get(&type_id).and_then(|&idx| self.types.get(idx))
    }

    fn lookup_named_type(&self, name: &str) -> Option<&AbiTypeDeclaration> {
        self.types.iter().find(|decl| decl.type_field == name)
    }
}

/// Resolve `argument` against `abi` and fail when the id is unknown.
pub(crate) fn find_declaration<'a>(
    abi: &'a dyn TypeLookup,
    argument: &AbiArgument,
) -> AbiResult<&'a AbiTypeDeclaration> {
    abi.lookup_type(argument.type_id).ok_or_else(|| {
        let dump = serde_json::to_string(argument).unwrap_or_default();
        AbiError::TypeNotFound(format!("Type does not exist in the provided abi: {dump}"))
    })
}
