//! Value types shared by the revision definitions and the generators

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// ColumnList
// ============================================================================

/// Ordered list of column names
///
/// Accepted from YAML either as a sequence (`[user_id, org_id]`) or as a
/// bracketed string (`"['user_id', 'org_id']"`). Renders as a Python list
/// literal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawColumnList", into = "Vec<String>")]
pub struct ColumnList(Vec<String>);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumnList {
    Names(Vec<String>),
    Text(String),
}

impl From<RawColumnList> for ColumnList {
    fn from(raw: RawColumnList) -> Self {
        match raw {
            RawColumnList::Names(names) => Self::new(names),
            RawColumnList::Text(text) => Self::parse(&text),
        }
    }
}

impl From<ColumnList> for Vec<String> {
    fn from(list: ColumnList) -> Self {
        list.0
    }
}

impl ColumnList {
    /// Create a column list from names, trimming whitespace
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            names
                .into_iter()
                .map(|n| n.into().trim().to_string())
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    /// Parse the bracketed string form, e.g. `['user_id', "org_id"]` or `user_id`
    pub fn parse(text: &str) -> Self {
        let inner = text.trim();
        let inner = inner.strip_prefix('[').unwrap_or(inner);
        let inner = inner.strip_suffix(']').unwrap_or(inner);

        Self::new(
            inner
                .split(',')
                .map(|part| part.trim().trim_matches(|c| c == '\'' || c == '"')),
        )
    }

    /// Column names in order
    pub fn names(&self) -> &[String] {
        &self.0
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the list is empty
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Join the names with `_` for use inside a constraint identifier
    pub fn identifier(&self) -> String {
        self.0.join("_")
    }

    /// Render as a Python list literal, e.g. `['id', 'email']`
    pub fn python_literal(&self) -> String {
        let quoted: Vec<String> = self
            .0
            .iter()
            .map(|name| format!("'{}'", name.replace('\\', "\\\\").replace('\'', "\\'")))
            .collect();
        format!("[{}]", quoted.join(", "))
    }
}

impl fmt::Display for ColumnList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.python_literal())
    }
}

// ============================================================================
// Tests
// ============================================================================
