//! # Statement Builder
//!
//! Every piece of Python spliced into a revision script is a [`Statement`].
//! There is one constructor per statement kind; [`Block`] collects
//! statements and renders them back to back. The rendered text of each
//! kind is fixed, including the column alignment of keyword arguments.
//!
//! ```text
//! Block
//!   ├── section_marker("users")
//!   ├── table_create("users", "public", "'user accounts'")
//!   ├── column_create("id", "sa.Integer", "'id'")
//!   ├── column_add("users", "id")
//!   └── table_materialize("users")
//! ```

use splice_core::{ColumnList, Renderable};

// ============================================================================
// Statement
// ============================================================================

/// A single generated fragment of a revision script
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// `#-------------<label>-------------#` between blank-line separators
    SectionMarker { label: String },

    /// Free text on an indented line (no newline of its own)
    ScriptComment { text: String },

    /// Extra import text, one line
    Imports { text: String },

    /// `CommentedTable(...)` instantiation
    TableCreate {
        table: String,
        schema: String,
        comment: String,
    },

    /// `CommentedColumn(...)` instantiation
    ColumnCreate {
        column: String,
        dtype: String,
        comment: String,
    },

    /// `<table>.add_column('<column>')`
    ColumnAdd { table: String, column: String },

    /// `<table>.create_table()`
    TableMaterialize { table: String },

    /// `op.drop_table(...)`
    TableDrop { table: String, schema: String },

    /// `op.create_primary_key(...)`
    PrimaryKeyCreate {
        constraint: String,
        table: String,
        columns: ColumnList,
        schema: String,
    },

    /// `op.create_check_constraint(...)`
    CheckConstraintCreate {
        constraint: String,
        table: String,
        condition: String,
        schema: String,
    },

    /// `op.create_foreign_key(...)`
    ForeignKeyCreate {
        constraint: String,
        source_table: String,
        referent_table: String,
        local_cols: ColumnList,
        remote_cols: ColumnList,
        source_schema: String,
        referent_schema: String,
    },

    /// `op.drop_constraint(...)`
    ConstraintDrop {
        constraint: String,
        table: String,
        schema: String,
    },
}

impl Statement {
    // ====================================================================
    // Constructors
    // ====================================================================

    pub fn section_marker(label: impl Into<String>) -> Self {
        Statement::SectionMarker {
            label: label.into(),
        }
    }

    pub fn script_comment(text: impl Into<String>) -> Self {
        Statement::ScriptComment { text: text.into() }
    }

    pub fn imports(text: impl Into<String>) -> Self {
        Statement::Imports { text: text.into() }
    }

    pub fn table_create(
        table: impl Into<String>,
        schema: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Statement::TableCreate {
            table: table.into(),
            schema: schema.into(),
            comment: comment.into(),
        }
    }

    pub fn column_create(
        column: impl Into<String>,
        dtype: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Statement::ColumnCreate {
            column: column.into(),
            dtype: dtype.into(),
            comment: comment.into(),
        }
    }

    pub fn column_add(table: impl Into<String>, column: impl Into<String>) -> Self {
        Statement::ColumnAdd {
            table: table.into(),
            column: column.into(),
        }
    }

    pub fn table_materialize(table: impl Into<String>) -> Self {
        Statement::TableMaterialize {
            table: table.into(),
        }
    }

    pub fn table_drop(table: impl Into<String>, schema: impl Into<String>) -> Self {
        Statement::TableDrop {
            table: table.into(),
            schema: schema.into(),
        }
    }

    pub fn primary_key_create(
        constraint: impl Into<String>,
        table: impl Into<String>,
        columns: ColumnList,
        schema: impl Into<String>,
    ) -> Self {
        Statement::PrimaryKeyCreate {
            constraint: constraint.into(),
            table: table.into(),
            columns,
            schema: schema.into(),
        }
    }

    pub fn check_constraint_create(
        constraint: impl Into<String>,
        table: impl Into<String>,
        condition: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Statement::CheckConstraintCreate {
            constraint: constraint.into(),
            table: table.into(),
            condition: condition.into(),
            schema: schema.into(),
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn foreign_key_create(
        constraint: impl Into<String>,
        source_table: impl Into<String>,
        referent_table: impl Into<String>,
        local_cols: ColumnList,
        remote_cols: ColumnList,
        source_schema: impl Into<String>,
        referent_schema: impl Into<String>,
    ) -> Self {
        Statement::ForeignKeyCreate {
            constraint: constraint.into(),
            source_table: source_table.into(),
            referent_table: referent_table.into(),
            local_cols,
            remote_cols,
            source_schema: source_schema.into(),
            referent_schema: referent_schema.into(),
        }
    }

    pub fn constraint_drop(
        constraint: impl Into<String>,
        table: impl Into<String>,
        schema: impl Into<String>,
    ) -> Self {
        Statement::ConstraintDrop {
            constraint: constraint.into(),
            table: table.into(),
            schema: schema.into(),
        }
    }
}

impl Renderable for Statement {
    fn render_into(&self, out: &mut String) {
        match self {
            Statement::SectionMarker { label } => {
                out.push_str(&format!("\n    #-------------{label}-------------#\n"));
            }
            Statement::ScriptComment { text } => {
                out.push_str("    ");
                out.push_str(text);
            }
            Statement::Imports { text } => {
                out.push_str(text);
                out.push('\n');
            }
            Statement::TableCreate {
                table,
                schema,
                comment,
            } => {
                out.push_str(&format!(
                    "\n    {table} = CommentedTable(table_name='{table}',\n\
                     {pad}schema='{schema}',\n\
                     {pad}comment={comment}{tail})\n",
                    pad = " ".repeat(35),
                    tail = " ".repeat(20),
                ));
            }
            Statement::ColumnCreate {
                column,
                dtype,
                comment,
            } => {
                out.push_str(&format!(
                    "\n    {column} = CommentedColumn(column_name='{column}',\n\
                     {pad_type}column_type={dtype},\n\
                     {pad_comment}comment={comment}{tail}) ",
                    pad_type = " ".repeat(36),
                    pad_comment = " ".repeat(37),
                    tail = " ".repeat(20),
                ));
            }
            Statement::ColumnAdd { table, column } => {
                out.push_str(&format!("\n    {table}.add_column('{column}')\n"));
            }
            Statement::TableMaterialize { table } => {
                out.push_str(&format!("    {table}.create_table()\n"));
            }
            Statement::TableDrop { table, schema } => {
                out.push_str(&format!(
                    "    op.drop_table(table_name=\"{table}\", schema=\"{schema}\")\n"
                ));
            }
            Statement::PrimaryKeyCreate {
                constraint,
                table,
                columns,
                schema,
            } => {
                out.push_str(&format!(
                    "\n    op.create_primary_key(constraint_name=\"{constraint}\",\n\
                     {pad}table_name=\"{table}\",\n\
                     {pad}columns={columns},\n\
                     {pad}schema=\"{schema}\")\n",
                    pad = " ".repeat(26),
                ));
            }
            Statement::CheckConstraintCreate {
                constraint,
                table,
                condition,
                schema,
            } => {
                out.push_str(&format!(
                    "    \n    op.create_check_constraint(\n\
                     \x20       constraint_name=\"{constraint}\",\n\
                     \x20       table_name=\"{table}\",\n\
                     \x20       condition=\"{condition}\",\n\
                     \x20       schema=\"{schema}\")\n"
                ));
            }
            Statement::ForeignKeyCreate {
                constraint,
                source_table,
                referent_table,
                local_cols,
                remote_cols,
                source_schema,
                referent_schema,
            } => {
                out.push_str(&format!(
                    "\n    # Add foreign key constraint to the assignment table\n\
                     \x20   op.create_foreign_key(\n\
                     \x20       constraint_name=\"{constraint}\",\n\
                     \x20       source_table=\"{source_table}\",\n\
                     \x20       referent_table=\"{referent_table}\",\n\
                     \x20       local_cols={local_cols},\n\
                     \x20       remote_cols={remote_cols},\n\
                     \x20       source_schema=\"{source_schema}\",\n\
                     \x20       referent_schema=\"{referent_schema}\")\n"
                ));
            }
            Statement::ConstraintDrop {
                constraint,
                table,
                schema,
            } => {
                out.push_str(&format!(
                    "\n    op.drop_constraint(\n\
                     \x20           constraint_name=\"{constraint}\",\n\
                     \x20           table_name=\"{table}\",\n\
                     \x20           schema=\"{schema}\")\n"
                ));
            }
        }
    }
}

// ============================================================================
// Block
// ============================================================================

/// An ordered run of statements rendered as one insertion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Block {
    statements: Vec<Statement>,
}

impl Block {
    /// Create an empty block
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a statement
    pub fn push(&mut self, statement: Statement) {
        self.statements.push(statement);
    }

    /// Append every statement of another block
    pub fn append(&mut self, other: Block) {
        self.statements.extend(other.statements);
    }

    /// Statements in order
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Number of statements
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    /// Check if the block has no statements
    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}

impl Extend<Statement> for Block {
    fn extend<T: IntoIterator<Item = Statement>>(&mut self, iter: T) {
        self.statements.extend(iter);
    }
}

impl FromIterator<Statement> for Block {
    fn from_iter<T: IntoIterator<Item = Statement>>(iter: T) -> Self {
        Self {
            statements: iter.into_iter().collect(),
        }
    }
}

impl Renderable for Block {
    fn render_into(&self, out: &mut String) {
        for statement in &self.statements {
            statement.render_into(out);
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_section_marker() {
        assert_eq!(
            Statement::section_marker("users_pk").render(),
            "\n    #-------------users_pk-------------#\n"
        );
    }

    #[test]
    fn test_script_comment_has_no_newline() {
        assert_eq!(
            Statement::script_comment("# legacy table").render(),
            "    # legacy table"
        );
    }

    #[test]
    fn test_imports() {
        assert_eq!(
            Statement::imports("from app.types import Email").render(),
            "from app.types import Email\n"
        );
    }

    #[test]
    fn test_table_create() {
        let expected = "
    users = CommentedTable(table_name='users',
                                   schema='public',
                                   comment='user accounts'                    )
";
        assert_eq!(
            Statement::table_create("users", "public", "'user accounts'").render(),
            expected
        );
    }

    #[test]
    fn test_column_create_ends_with_space() {
        let expected = "
    email = CommentedColumn(column_name='email',
                                    column_type=sa.Text,
                                     comment='login email'                    ) ";
        assert_eq!(
            Statement::column_create("email", "sa.Text", "'login email'").render(),
            expected
        );
    }

    #[test]
    fn test_column_add_and_materialize() {
        assert_eq!(
            Statement::column_add("users", "email").render(),
            "\n    users.add_column('email')\n"
        );
        assert_eq!(
            Statement::table_materialize("users").render(),
            "    users.create_table()\n"
        );
    }

    #[test]
    fn test_table_drop() {
        assert_eq!(
            Statement::table_drop("users", "public").render(),
            "    op.drop_table(table_name=\"users\", schema=\"public\")\n"
        );
    }

    #[test]
    fn test_primary_key_create() {
        let expected = r#"
    op.create_primary_key(constraint_name="users_pk",
                          table_name="users",
                          columns=['id', 'tenant'],
                          schema="public")
"#;
        assert_eq!(
            Statement::primary_key_create(
                "users_pk",
                "users",
                ColumnList::new(["id", "tenant"]),
                "public"
            )
            .render(),
            expected
        );
    }

    #[test]
    fn test_check_constraint_create() {
        // The opening line carries four spaces of indentation and nothing else.
        let expected = "    \n    op.create_check_constraint(
        constraint_name=\"users_email_lower\",
        table_name=\"users\",
        condition=\"email = lower(email)\",
        schema=\"public\")
";
        assert_eq!(
            Statement::check_constraint_create(
                "users_email_lower",
                "users",
                "email = lower(email)",
                "public"
            )
            .render(),
            expected
        );
    }

    #[test]
    fn test_foreign_key_create_uses_both_schemas() {
        let expected = r#"
    # Add foreign key constraint to the assignment table
    op.create_foreign_key(
        constraint_name="memberships_users_user_id_id_fk",
        source_table="memberships",
        referent_table="users",
        local_cols=['user_id'],
        remote_cols=['id'],
        source_schema="app",
        referent_schema="auth")
"#;
        assert_eq!(
            Statement::foreign_key_create(
                "memberships_users_user_id_id_fk",
                "memberships",
                "users",
                ColumnList::new(["user_id"]),
                ColumnList::new(["id"]),
                "app",
                "auth",
            )
            .render(),
            expected
        );
    }

    #[test]
    fn test_constraint_drop() {
        let expected = r#"
    op.drop_constraint(
            constraint_name="memberships_users_user_id_id_fk",
            table_name="memberships",
            schema="app")
"#;
        assert_eq!(
            Statement::constraint_drop("memberships_users_user_id_id_fk", "memberships", "app")
                .render(),
            expected
        );
    }

    #[test]
    fn test_block_renders_in_order() {
        let mut block: Block = [
            Statement::table_materialize("a"),
            Statement::table_materialize("b"),
        ]
        .into_iter()
        .collect();
        block.push(Statement::table_drop("a", "s"));

        assert_eq!(block.len(), 3);
        assert_eq!(
            block.render(),
            "    a.create_table()\n    b.create_table()\n    op.drop_table(table_name=\"a\", schema=\"s\")\n"
        );
        assert_eq!(Block::new().render(), "");
    }
}
