//! Table definitions
//!
//! This module contains `TableDef` and the column, primary key and check
//! constraint definitions that belong to it. Names are the YAML mapping
//! keys; they are copied into the definitions when the revision is loaded.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use splice_core::{ColumnList, SpliceError, SpliceResult, Validatable};

// ============================================================================
// TableDef
// ============================================================================

/// A table to create in the revision's `upgrade()` body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableDef {
    /// Table name (the mapping key)
    #[serde(skip)]
    pub name: String,

    /// Database schema the table lives in
    pub schema: String,

    /// Table comment, a Python expression inserted verbatim
    pub comment: String,

    /// Free text placed on its own line above the table instantiation
    #[serde(default)]
    pub script_comment: Option<String>,

    /// Columns in declaration order
    #[serde(default)]
    pub columns: IndexMap<String, ColumnDef>,

    /// Primary key, if declared
    #[serde(default)]
    pub primary_key: Option<PrimaryKeyDef>,

    /// Check constraints in declaration order
    #[serde(default)]
    pub constraints: IndexMap<String, CheckConstraintDef>,
}

impl TableDef {
    /// Create a table with no columns, key or constraints
    pub fn new(
        name: impl Into<String>,
        schema: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            schema: schema.into(),
            comment: comment.into(),
            script_comment: None,
            columns: IndexMap::new(),
            primary_key: None,
            constraints: IndexMap::new(),
        }
    }

    /// Builder: add a column
    pub fn with_column(mut self, column: ColumnDef) -> Self {
        self.columns.insert(column.name.clone(), column);
        self
    }

    /// Builder: declare the primary key
    pub fn with_primary_key(mut self, columns: ColumnList) -> Self {
        self.primary_key = Some(PrimaryKeyDef { columns });
        self
    }

    /// Builder: add a check constraint
    pub fn with_constraint(mut self, constraint: CheckConstraintDef) -> Self {
        self.constraints.insert(constraint.name.clone(), constraint);
        self
    }

    /// Builder: set the script comment line
    pub fn with_script_comment(mut self, comment: impl Into<String>) -> Self {
        self.script_comment = Some(comment.into());
        self
    }

    /// Whether a primary key is declared
    pub fn has_primary_key(&self) -> bool {
        self.primary_key.is_some()
    }

    /// Constraint name used for the primary key
    pub fn primary_key_name(&self) -> String {
        format!("{}_pk", self.name)
    }

    /// Constraint name used for a check constraint of this table
    pub fn constraint_name(&self, constraint_key: &str) -> String {
        format!("{}_{}", self.name, constraint_key)
    }

    /// Copy mapping keys into the nested definitions
    pub(crate) fn attach_names(&mut self, name: &str) {
        self.name = name.to_string();
        for (key, column) in self.columns.iter_mut() {
            column.name = key.clone();
        }
        for (key, constraint) in self.constraints.iter_mut() {
            constraint.name = key.clone();
        }
    }
}

impl Validatable for TableDef {
    fn validate(&self) -> SpliceResult<()> {
        if self.name.trim().is_empty() {
            return Err(SpliceError::validation("Table name cannot be empty"));
        }

        if self.schema.trim().is_empty() {
            return Err(SpliceError::validation(format!(
                "Table '{}' has an empty schema",
                self.name
            )));
        }

        for column in self.columns.values() {
            column.validate().map_err(|e| {
                SpliceError::validation(format!("Table '{}': {}", self.name, e))
            })?;
        }

        if let Some(pk) = &self.primary_key {
            if pk.columns.is_empty() {
                return Err(SpliceError::validation(format!(
                    "Primary key of table '{}' lists no columns",
                    self.name
                )));
            }
        }

        Ok(())
    }
}

// ============================================================================
// ColumnDef
// ============================================================================

/// A column of a table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    /// Column name (the mapping key)
    #[serde(skip)]
    pub name: String,

    /// Column type expression, e.g. `sa.Integer`
    pub dtype: String,

    /// Column comment, a Python expression inserted verbatim
    pub comment: String,
}

impl ColumnDef {
    /// Create a new column definition
    pub fn new(name: impl Into<String>, dtype: impl Into<String>, comment: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            dtype: dtype.into(),
            comment: comment.into(),
        }
    }
}

impl Validatable for ColumnDef {
    fn validate(&self) -> SpliceResult<()> {
        if self.dtype.trim().is_empty() {
            return Err(SpliceError::validation(format!(
                "column '{}' has an empty dtype",
                self.name
            )));
        }
        Ok(())
    }
}

// ============================================================================
// PrimaryKeyDef / CheckConstraintDef
// ============================================================================

/// Primary key declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrimaryKeyDef {
    /// Key columns in order
    pub columns: ColumnList,
}

/// A named check constraint
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckConstraintDef {
    /// Constraint key (the mapping key, not the full constraint name)
    #[serde(skip)]
    pub name: String,

    /// SQL condition text
    pub condition: String,
}

impl CheckConstraintDef {
    /// Create a new check constraint
    pub fn new(name: impl Into<String>, condition: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            condition: condition.into(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> TableDef {
        TableDef::new("users", "public", "'user accounts'")
            .with_column(ColumnDef::new("id", "sa.Integer", "'primary id'"))
            .with_column(ColumnDef::new("email", "sa.Text", "'login email'"))
            .with_primary_key(ColumnList::new(["id"]))
    }

    #[test]
    fn test_builder_keeps_column_order() {
        let table = users();
        let names: Vec<&str> = table.columns.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id", "email"]);
        assert!(table.has_primary_key());
    }

    #[test]
    fn test_constraint_names() {
        let table = users();
        assert_eq!(table.primary_key_name(), "users_pk");
        assert_eq!(table.constraint_name("email_lower"), "users_email_lower");
    }

    #[test]
    fn test_validate_table() {
        assert!(users().is_valid());

        let mut no_schema = users();
        no_schema.schema = " ".to_string();
        assert!(!no_schema.is_valid());

        let empty_pk = users().with_primary_key(ColumnList::default());
        let err = empty_pk.validate().unwrap_err();
        assert!(err.to_string().contains("lists no columns"));
    }

    #[test]
    fn test_validate_column_dtype() {
        let table = users().with_column(ColumnDef::new("broken", "", "None"));
        let err = table.validate().unwrap_err();
        assert!(err.to_string().contains("'broken' has an empty dtype"));
    }

    #[test]
    fn test_attach_names_from_keys() {
        let yaml = r#"
schema: public
comment: "'accounts'"
columns:
  id: {dtype: sa.Integer, comment: "'id'"}
constraints:
  positive_id: {condition: "id > 0"}
"#;
        let mut table: TableDef = serde_yaml::from_str(yaml).unwrap();
        table.attach_names("users");

        assert_eq!(table.name, "users");
        assert_eq!(table.columns["id"].name, "id");
        assert_eq!(table.constraints["positive_id"].name, "positive_id");
        assert!(table.script_comment.is_none());
        assert!(table.primary_key.is_none());
    }
}
