//! # Table Block Generator
//!
//! For every table, in declaration order, the upgrade block gets:
//!
//! ```text
//! #-------------<table>-------------#
//! [script comment]
//! <table> = CommentedTable(...)
//! <column> = CommentedColumn(...)      ┐ per column,
//! <table>.add_column('<column>')       ┘ in order
//! <table>.create_table()
//! #-------------<table>_pk-------------#          ┐ only with a
//! op.create_primary_key(...)                       │ primary key
//! #-------------<table>_<key>-------------#        │
//! op.create_check_constraint(...)  per constraint ┘
//! ```
//!
//! and the downgrade block gets one `op.drop_table(...)`.
//!
//! A table without a primary key gets a warning, and its check constraints
//! are skipped along with the key.

use super::insert_upgrade_downgrade;
use crate::SpliceConfig;
use crate::script::ScriptBuffer;
use crate::statements::{Block, Statement};
use splice_core::SpliceResult;
use splice_ir::{RevisionSpec, TableDef};

// ============================================================================
// Report
// ============================================================================

/// Counts and warnings from rendering the table blocks
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableReport {
    /// Tables emitted
    pub tables: usize,

    /// Columns emitted across all tables
    pub columns: usize,

    /// Primary keys emitted
    pub primary_keys: usize,

    /// Check constraints emitted
    pub check_constraints: usize,

    /// Non-fatal problems (tables without a primary key)
    pub warnings: Vec<String>,
}

/// Upgrade and downgrade blocks for all tables
#[derive(Debug, Clone, Default)]
pub struct RenderedTables {
    pub upgrade: Block,
    pub downgrade: Block,
    pub report: TableReport,
}

// ============================================================================
// Rendering
// ============================================================================

/// Render the table blocks without touching a script
pub fn render_tables(spec: &RevisionSpec) -> RenderedTables {
    let mut rendered = RenderedTables::default();

    for table in spec.tables() {
        render_table(table, &mut rendered);
    }

    rendered
}

fn render_table(table: &TableDef, rendered: &mut RenderedTables) {
    let upgrade = &mut rendered.upgrade;
    let report = &mut rendered.report;

    upgrade.push(Statement::section_marker(&table.name));
    if let Some(comment) = &table.script_comment {
        upgrade.push(Statement::script_comment(comment));
    }
    upgrade.push(Statement::table_create(
        &table.name,
        &table.schema,
        &table.comment,
    ));

    for column in table.columns.values() {
        upgrade.push(Statement::column_create(
            &column.name,
            &column.dtype,
            &column.comment,
        ));
        upgrade.push(Statement::column_add(&table.name, &column.name));
    }
    upgrade.push(Statement::table_materialize(&table.name));

    rendered
        .downgrade
        .push(Statement::table_drop(&table.name, &table.schema));

    report.tables += 1;
    report.columns += table.columns.len();

    let Some(primary_key) = &table.primary_key else {
        let mut warning = format!("No primary key specified for table '{}'", table.name);
        if !table.constraints.is_empty() {
            warning.push_str(&format!(
                "; {} check constraint(s) skipped",
                table.constraints.len()
            ));
        }
        tracing::warn!("{}", warning);
        report.warnings.push(warning);
        return;
    };

    let pk_name = table.primary_key_name();
    upgrade.push(Statement::section_marker(&pk_name));
    upgrade.push(Statement::primary_key_create(
        pk_name,
        &table.name,
        primary_key.columns.clone(),
        &table.schema,
    ));
    report.primary_keys += 1;

    for constraint in table.constraints.values() {
        let name = table.constraint_name(&constraint.name);
        // Marker label is `<key>_pk`, not the constraint name.
        upgrade.push(Statement::section_marker(format!("{}_pk", constraint.name)));
        upgrade.push(Statement::check_constraint_create(
            name,
            &table.name,
            &constraint.condition,
            &table.schema,
        ));
        report.check_constraints += 1;
    }
}

// ============================================================================
// Insertion
// ============================================================================

/// Render all tables and insert them into the script
///
/// The upgrade block goes after the upgrade anchor and the downgrade block
/// after the downgrade anchor, each inserted once. Both anchors are
/// required even when there are no tables.
pub fn add_tables(
    buffer: &mut ScriptBuffer,
    spec: &RevisionSpec,
    config: &SpliceConfig,
) -> SpliceResult<TableReport> {
    let rendered = render_tables(spec);

    insert_upgrade_downgrade(
        buffer,
        &config.anchors.upgrade,
        &config.anchors.downgrade,
        &rendered.upgrade,
        &rendered.downgrade,
    )?;

    tracing::info!(
        tables = rendered.report.tables,
        primary_keys = rendered.report.primary_keys,
        check_constraints = rendered.report.check_constraints,
        "Added table blocks"
    );
    Ok(rendered.report)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use splice_core::{ColumnList, Renderable, SpliceError};
    use splice_ir::{CheckConstraintDef, ColumnDef};

    const SCRIPT: &str = "\
from alembic_addons.table_classes import *

def upgrade():
    pass

def downgrade():
    pass
";

    fn users() -> TableDef {
        TableDef::new("users", "public", "\"user accounts\"")
            .with_column(ColumnDef::new("id", "integer", "None"))
            .with_column(ColumnDef::new("email", "text", "None"))
            .with_primary_key(ColumnList::new(["id"]))
    }

    fn kinds(block: &Block) -> Vec<&'static str> {
        block
            .statements()
            .iter()
            .map(|s| match s {
                Statement::SectionMarker { .. } => "marker",
                Statement::ScriptComment { .. } => "comment",
                Statement::TableCreate { .. } => "table",
                Statement::ColumnCreate { .. } => "column",
                Statement::ColumnAdd { .. } => "add_column",
                Statement::TableMaterialize { .. } => "create_table",
                Statement::PrimaryKeyCreate { .. } => "pk",
                Statement::CheckConstraintCreate { .. } => "check",
                Statement::TableDrop { .. } => "drop_table",
                _ => "other",
            })
            .collect()
    }

    #[test]
    fn test_users_round_trip() {
        let spec = RevisionSpec::new("users", "").with_table(users());
        let rendered = render_tables(&spec);

        let expected_upgrade = "
    #-------------users-------------#

    users = CommentedTable(table_name='users',
                                   schema='public',
                                   comment=\"user accounts\"                    )

    id = CommentedColumn(column_name='id',
                                    column_type=integer,
                                     comment=None                    )\x20
    users.add_column('id')

    email = CommentedColumn(column_name='email',
                                    column_type=text,
                                     comment=None                    )\x20
    users.add_column('email')
    users.create_table()

    #-------------users_pk-------------#

    op.create_primary_key(constraint_name=\"users_pk\",
                          table_name=\"users\",
                          columns=['id'],
                          schema=\"public\")
";
        assert_eq!(rendered.upgrade.render(), expected_upgrade);
        assert_eq!(
            rendered.downgrade.render(),
            "    op.drop_table(table_name=\"users\", schema=\"public\")\n"
        );
        assert_eq!(
            kinds(&rendered.upgrade),
            vec![
                "marker",
                "table",
                "column",
                "add_column",
                "column",
                "add_column",
                "create_table",
                "marker",
                "pk"
            ]
        );
        assert_eq!(rendered.report.primary_keys, 1);
        assert!(rendered.report.warnings.is_empty());
    }

    #[test]
    fn test_statement_counts_per_table_in_order() {
        let orders = TableDef::new("orders", "sales", "None")
            .with_column(ColumnDef::new("id", "sa.Integer", "None"))
            .with_column(ColumnDef::new("total", "sa.Numeric", "None"))
            .with_column(ColumnDef::new("placed_at", "sa.DateTime", "None"))
            .with_primary_key(ColumnList::new(["id"]));
        let spec = RevisionSpec::new("two", "")
            .with_table(users())
            .with_table(orders);

        let rendered = render_tables(&spec);
        let upgrade_kinds = kinds(&rendered.upgrade);

        // users: marker, table, 2x(column, add), create, marker, pk = 9
        assert_eq!(upgrade_kinds[..9].iter().filter(|k| **k == "column").count(), 2);
        assert_eq!(upgrade_kinds[9..].iter().filter(|k| **k == "column").count(), 3);
        assert_eq!(upgrade_kinds[9..].iter().filter(|k| **k == "add_column").count(), 3);
        assert_eq!(upgrade_kinds.iter().filter(|k| **k == "table").count(), 2);
        assert_eq!(upgrade_kinds.iter().filter(|k| **k == "create_table").count(), 2);
        assert_eq!(upgrade_kinds.iter().filter(|k| **k == "pk").count(), 2);

        let tables: Vec<&str> = rendered
            .upgrade
            .statements()
            .iter()
            .filter_map(|s| match s {
                Statement::TableCreate { table, .. } => Some(table.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(tables, vec!["users", "orders"]);
        assert_eq!(rendered.report.columns, 5);
        assert_eq!(kinds(&rendered.downgrade), vec!["drop_table", "drop_table"]);
    }

    #[test]
    fn test_script_comment_and_constraints() {
        let table = users()
            .with_script_comment("# accounts")
            .with_constraint(CheckConstraintDef::new("email_lower", "email = lower(email)"))
            .with_constraint(CheckConstraintDef::new("id_positive", "id > 0"));
        let spec = RevisionSpec::new("c", "").with_table(table);

        let rendered = render_tables(&spec);
        let text = rendered.upgrade.render();

        assert!(text.contains("\n    #-------------users-------------#\n    # accounts\n    users = CommentedTable("));
        assert!(text.contains("\n    #-------------email_lower_pk-------------#\n    \n    op.create_check_constraint("));
        assert!(text.contains("#-------------id_positive_pk-------------#"));
        assert!(!text.contains("#-------------users_email_lower-------------#"));
        assert!(text.contains("constraint_name=\"users_email_lower\""));
        assert!(text.contains("condition=\"id > 0\""));
        assert!(
            text.find("users_email_lower").unwrap() < text.find("users_id_positive").unwrap()
        );
        assert_eq!(rendered.report.check_constraints, 2);
    }

    #[test]
    fn test_table_without_primary_key_warns_and_skips_constraints() {
        let mut table = users().with_constraint(CheckConstraintDef::new("id_positive", "id > 0"));
        table.primary_key = None;
        let spec = RevisionSpec::new("nopk", "").with_table(table);

        let rendered = render_tables(&spec);
        let text = rendered.upgrade.render();

        assert!(!text.contains("create_primary_key"));
        assert!(!text.contains("create_check_constraint"));
        assert!(text.contains("users.create_table()"));
        assert_eq!(rendered.report.primary_keys, 0);
        assert_eq!(
            rendered.report.warnings,
            vec!["No primary key specified for table 'users'; 1 check constraint(s) skipped"]
        );
    }

    #[test]
    fn test_add_tables_inserts_each_block_once() {
        let mut buffer = ScriptBuffer::from_text("rev.py", SCRIPT);
        let spec = RevisionSpec::new("users", "").with_table(users());

        let report = add_tables(&mut buffer, &spec, &SpliceConfig::default()).unwrap();
        assert_eq!(report.tables, 1);

        let text = buffer.to_text();
        assert_eq!(text.matches("users = CommentedTable(").count(), 1);
        assert_eq!(text.matches("op.drop_table(").count(), 1);

        let upgrade_at = buffer.find_line("def upgrade():").unwrap();
        assert_eq!(buffer.lines()[upgrade_at + 2], "    #-------------users-------------#");

        let downgrade_at = buffer.find_line("def downgrade():").unwrap();
        assert_eq!(
            buffer.lines()[downgrade_at + 1],
            "    op.drop_table(table_name=\"users\", schema=\"public\")"
        );
        assert_eq!(buffer.lines()[downgrade_at + 2], "    pass");
    }

    #[test]
    fn test_missing_upgrade_anchor_aborts() {
        let script = "from alembic_addons.table_classes import *\n\ndef downgrade():\n    pass\n";
        let mut buffer = ScriptBuffer::from_text("rev.py", script);
        let spec = RevisionSpec::new("users", "").with_table(users());

        let err = add_tables(&mut buffer, &spec, &SpliceConfig::default()).unwrap_err();
        match err {
            SpliceError::MissingAnchor { anchor, .. } => assert_eq!(anchor, "def upgrade():"),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(buffer.to_text(), script);
    }

    #[test]
    fn test_missing_downgrade_anchor_leaves_buffer_untouched() {
        let script = "def upgrade():\n    pass\n";
        let mut buffer = ScriptBuffer::from_text("rev.py", script);
        let spec = RevisionSpec::new("users", "").with_table(users());

        assert!(add_tables(&mut buffer, &spec, &SpliceConfig::default()).is_err());
        assert_eq!(buffer.to_text(), script);
    }
}
