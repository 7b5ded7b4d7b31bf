// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error taxonomy shared by resolution, coder construction and the coders.

use thiserror::Error;

/// Errors produced by the ABI codec.
///
/// Every variant carries a message naming the offending type, value or
/// byte region. Errors never leave partially decoded state behind: a failed
/// call only affects that call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbiError {
    /// Value does not match the shape the coder expects.
    #[error("Encode error: {0}")]
    Encode(String),

    /// Byte buffer is too short, oversized or structurally invalid.
    #[error("Decode error: {0}")]
    Decode(String),

    /// A type descriptor lacks a structurally required component.
    #[error("Invalid component: {0}")]
    InvalidComponent(String),

    /// No coder matches the resolved type.
    #[error("{0}")]
    CoderNotFound(String),

    /// Type is recognised but cannot be represented.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Type id is absent from the schema.
    #[error("Type not found: {0}")]
    TypeNotFound(String),

    /// Encoding version string is not known.
    #[error("Encoding version {0} is unsupported.")]
    UnsupportedEncodingVersion(String),

    /// Schema or configuration document could not be loaded.
    #[error("Schema error: {0}")]
    Schema(String),
}

impl AbiError {
    pub(crate) fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }

    pub(crate) fn decode(msg: impl Into<String>) -> Self {
        Self::Decode(msg.into())
    }

    /// The human readable message without the kind prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Encode(m)
            | Self::Decode(m)
            | Self::InvalidComponent(m)
            | Self::CoderNotFound(m)
            | Self::InvalidData(m)
            | Self::TypeNotFound(m)
            | Self::UnsupportedEncodingVersion(m)
            | Self::Schema(m) => m,
        }
    }
}

impl From<serde_json::Error> for AbiError {
    fn from(e: serde_json::Error) -> Self {
        Self::Schema(e.to_string())
    }
}

impl From<std::io::Error> for AbiError {
    fn from(e: std::io::Error) -> Self {
        Self::Schema(e.to_string())
    }
}

/// Result alias used throughout the crate.
pub type AbiResult<T> = Result<T, AbiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_variants() {
        assert_eq!(
            AbiError::decode("Invalid enum data size.").to_string(),
            "Decode error: Invalid enum data size."
        );
        assert_eq!(
            AbiError::UnsupportedEncodingVersion("2".into()).to_string(),
            "Encoding version 2 is unsupported."
        );
        assert_eq!(
            AbiError::CoderNotFound("Coder not found: {}.".into()).to_string(),
            "Coder not found: {}."
        );
    }

    #[test]
    fn test_message_strips_kind() {
        let err = AbiError::encode("Expected array value.");
        assert_eq!(err.message(), "Expected array value.");
    }

    #[test]
    fn test_from_serde_json() {
        let err: AbiError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, AbiError::Schema(_)));
    }
}
