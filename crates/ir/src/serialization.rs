//! Loading revision descriptions from YAML
//!
//! Parsing happens in two steps: serde reads the document into
//! [`RawRevisionSpec`], then foreign keys are checked for completeness
//! while converting to [`RevisionSpec`]. Key order is preserved.

use crate::revision::{RawRevisionSpec, RevisionSpec};
use splice_core::{SpliceError, SpliceResult};
use std::path::Path;

/// File extensions recognised as revision descriptions
pub const REVISION_EXTENSIONS: [&str; 2] = ["yaml", "yml"];

/// Load a revision description from a file
///
/// # Example
///
/// ```rust,ignore
/// use splice_ir::load_revision;
///
/// let spec = load_revision("revisions/create_users.yaml")?;
/// println!("{} tables", spec.table_count());
/// ```
pub fn load_revision(path: impl AsRef<Path>) -> SpliceResult<RevisionSpec> {
    let path = path.as_ref();

    let text = std::fs::read_to_string(path).map_err(|e| SpliceError::FileRead {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let raw: RawRevisionSpec = serde_yaml::from_str(&text).map_err(|e| SpliceError::Yaml {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    let spec = RevisionSpec::try_from(raw)?;
    tracing::debug!(
        path = %path.display(),
        tables = spec.table_count(),
        foreign_keys = spec.foreign_key_count(),
        "Loaded revision description"
    );
    Ok(spec)
}

/// Load a revision description from a YAML string
pub fn load_revision_from_str(text: &str) -> SpliceResult<RevisionSpec> {
    let raw: RawRevisionSpec = serde_yaml::from_str(text)?;
    RevisionSpec::try_from(raw)
}

/// Check whether a path looks like a revision description
pub fn is_revision_file(path: impl AsRef<Path>) -> bool {
    path.as_ref()
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| REVISION_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

// ============================================================================
// Tests
// ============================================================================
