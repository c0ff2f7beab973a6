//! Error types for alembic-splice
//!
//! This module provides unified error handling across the workspace,
//! covering configuration loading, script editing and the external
//! revision tool.

use std::path::PathBuf;
use thiserror::Error;

/// The main error type for alembic-splice
#[derive(Debug, Error)]
pub enum SpliceError {
    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// The revision YAML could not be parsed
    #[error("Failed to parse revision file '{path}': {message}")]
    Yaml { path: PathBuf, message: String },

    /// Raw YAML error without a file path (string input)
    #[error("YAML error: {0}")]
    YamlSyntax(#[from] serde_yaml::Error),

    /// General validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// A foreign key entry is missing one or more required fields
    #[error(
        "Foreign key constraint not fully defined! See key definition for '{name}' (missing: {})",
        .missing.join(", ")
    )]
    IncompleteForeignKey {
        name: String,
        missing: Vec<&'static str>,
    },

    // ========================================================================
    // Script Errors
    // ========================================================================
    /// An anchor phrase was not found in the revision script
    #[error("Anchor '{anchor}' not found in '{path}'")]
    MissingAnchor { anchor: String, path: PathBuf },

    /// An insertion point outside the script was requested
    #[error("Cannot insert after line {index}: script has {len} lines")]
    InsertOutOfBounds { index: usize, len: usize },

    // ========================================================================
    // External Tool Errors
    // ========================================================================
    /// The revision tool could not be run or exited unsuccessfully
    #[error("'{program}' failed: {message}")]
    ToolFailed { program: String, message: String },

    /// The revision tool output did not name a generated script
    #[error("Unexpected revision tool output: {0}")]
    RevisionOutput(String),

    // ========================================================================
    // IO Errors
    // ========================================================================
    /// File read error
    #[error("Failed to read file '{path}': {message}")]
    FileRead { path: PathBuf, message: String },

    /// File write error
    #[error("Failed to write file '{path}': {message}")]
    FileWrite { path: PathBuf, message: String },

    // ========================================================================
    // Generic Errors
    // ========================================================================
    /// Internal error (should not happen)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SpliceError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        SpliceError::Validation(msg.into())
    }

    /// Create a missing-anchor error
    pub fn missing_anchor(anchor: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        SpliceError::MissingAnchor {
            anchor: anchor.into(),
            path: path.into(),
        }
    }

    /// Create an external tool failure
    pub fn tool_failed(program: impl Into<String>, msg: impl Into<String>) -> Self {
        SpliceError::ToolFailed {
            program: program.into(),
            message: msg.into(),
        }
    }

    /// Create an internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        SpliceError::Internal(msg.into())
    }

    /// Check if this error is a configuration/validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SpliceError::Validation(_)
                | SpliceError::IncompleteForeignKey { .. }
                | SpliceError::Yaml { .. }
                | SpliceError::YamlSyntax(_)
        )
    }

    /// Check if this error comes from editing the script
    pub fn is_script(&self) -> bool {
        matches!(
            self,
            SpliceError::MissingAnchor { .. } | SpliceError::InsertOutOfBounds { .. }
        )
    }

    /// Check if this error is an IO error
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            SpliceError::FileRead { .. } | SpliceError::FileWrite { .. }
        )
    }
}

/// Result type alias using SpliceError
pub type SpliceResult<T> = Result<T, SpliceError>;

// ============================================================================
// Tests
// ============================================================================
