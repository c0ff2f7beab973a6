//! # Foreign Key Block Generator
//!
//! Every foreign key, in declaration order, contributes a section marker
//! and an `op.create_foreign_key(...)` call to the upgrade block and an
//! `op.drop_constraint(...)` call to the downgrade block. The two blocks
//! are inserted once, after all keys are rendered.
//!
//! Constraint names are `<source>_<referent>_<local cols>_<remote cols>_fk`
//! with the column names joined by `_`.

use super::insert_upgrade_downgrade;
use crate::SpliceConfig;
use crate::script::ScriptBuffer;
use crate::statements::{Block, Statement};
use splice_core::SpliceResult;
use splice_ir::{ForeignKeyDef, RevisionSpec};

/// Render the upgrade and downgrade blocks for all foreign keys
pub fn render_foreign_keys(spec: &RevisionSpec) -> (Block, Block) {
    let mut upgrade = Block::new();
    let mut downgrade = Block::new();

    for fk in spec.foreign_keys() {
        render_foreign_key(fk, &mut upgrade, &mut downgrade);
    }

    (upgrade, downgrade)
}

fn render_foreign_key(fk: &ForeignKeyDef, upgrade: &mut Block, downgrade: &mut Block) {
    let constraint = fk.constraint_name();

    upgrade.push(Statement::section_marker(&constraint));
    upgrade.push(Statement::foreign_key_create(
        &constraint,
        &fk.source_table,
        &fk.referent_table,
        fk.local_cols.clone(),
        fk.remote_cols.clone(),
        &fk.source_schema,
        &fk.referent_schema,
    ));

    downgrade.push(Statement::constraint_drop(
        constraint,
        &fk.source_table,
        &fk.source_schema,
    ));
}

/// Render all foreign keys and insert them into the script
///
/// Does nothing when the revision declares no foreign keys. Returns the
/// number of foreign keys inserted.
pub fn add_foreign_keys(
    buffer: &mut ScriptBuffer,
    spec: &RevisionSpec,
    config: &SpliceConfig,
) -> SpliceResult<usize> {
    let count = spec.foreign_key_count();
    if count == 0 {
        return Ok(0);
    }

    let (upgrade, downgrade) = render_foreign_keys(spec);
    insert_upgrade_downgrade(
        buffer,
        &config.anchors.upgrade,
        &config.anchors.downgrade,
        &upgrade,
        &downgrade,
    )?;

    tracing::info!(foreign_keys = count, "Added foreign key blocks");
    Ok(count)
}

// ============================================================================
// Tests
// ============================================================================
