//! Foreign key definitions
//!
//! Foreign keys are read in a raw form where every field is optional, then
//! checked into a complete [`ForeignKeyDef`]. An incomplete entry is a hard
//! error naming the entry and the missing fields.

use serde::{Deserialize, Serialize};
use splice_core::{ColumnList, SpliceError, SpliceResult};

/// Fields every foreign key entry must declare, in reporting order
pub const REQUIRED_FIELDS: [&str; 6] = [
    "source_table",
    "referent_table",
    "local_cols",
    "remote_cols",
    "source_schema",
    "referent_schema",
];

// ============================================================================
// RawForeignKey
// ============================================================================

/// A foreign key entry exactly as written in YAML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawForeignKey {
    #[serde(default)]
    pub source_table: Option<String>,
    #[serde(default)]
    pub referent_table: Option<String>,
    #[serde(default)]
    pub local_cols: Option<ColumnList>,
    #[serde(default)]
    pub remote_cols: Option<ColumnList>,
    #[serde(default)]
    pub source_schema: Option<String>,
    #[serde(default)]
    pub referent_schema: Option<String>,
}

impl RawForeignKey {
    /// Names of required fields that are absent
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let present = [
            self.source_table.is_some(),
            self.referent_table.is_some(),
            self.local_cols.is_some(),
            self.remote_cols.is_some(),
            self.source_schema.is_some(),
            self.referent_schema.is_some(),
        ];
        REQUIRED_FIELDS
            .iter()
            .zip(present)
            .filter(|(_, present)| !present)
            .map(|(field, _)| *field)
            .collect()
    }
}

// ============================================================================
// ForeignKeyDef
// ============================================================================

/// A fully specified foreign key
#[derive(Debug, Clone, PartialEq)]
pub struct ForeignKeyDef {
    /// Entry name (the mapping key)
    pub name: String,
    pub source_table: String,
    pub referent_table: String,
    pub local_cols: ColumnList,
    pub remote_cols: ColumnList,
    pub source_schema: String,
    pub referent_schema: String,
}

impl ForeignKeyDef {
    /// Check a raw entry for completeness
    pub fn from_raw(name: impl Into<String>, raw: RawForeignKey) -> SpliceResult<Self> {
        let name = name.into();
        let missing = raw.missing_fields();
        if !missing.is_empty() {
            return Err(SpliceError::IncompleteForeignKey { name, missing });
        }

        match raw {
            RawForeignKey {
                source_table: Some(source_table),
                referent_table: Some(referent_table),
                local_cols: Some(local_cols),
                remote_cols: Some(remote_cols),
                source_schema: Some(source_schema),
                referent_schema: Some(referent_schema),
            } => Ok(Self {
                name,
                source_table,
                referent_table,
                local_cols,
                remote_cols,
                source_schema,
                referent_schema,
            }),
            _ => Err(SpliceError::internal(format!(
                "foreign key '{}' passed the completeness check with missing fields",
                name
            ))),
        }
    }

    /// Derived constraint name:
    /// `<source>_<referent>_<local cols>_<remote cols>_fk`
    pub fn constraint_name(&self) -> String {
        format!(
            "{}_{}_{}_{}_fk",
            self.source_table,
            self.referent_table,
            self.local_cols.identifier(),
            self.remote_cols.identifier()
        )
    }
}

// ============================================================================
// Tests
// ============================================================================
