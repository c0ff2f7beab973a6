//! # Block Generators
//!
//! Each generator renders one kind of block from the revision description
//! and inserts it after an anchor in the script buffer.
//!
//! | Generator | Anchor | Inserted |
//! |-----------|--------|----------|
//! | [`add_imports`] | import anchor | the `imports` text |
//! | [`add_tables`] | `def upgrade():` / `def downgrade():` | table creation / `op.drop_table` |
//! | [`add_foreign_keys`] | `def upgrade():` / `def downgrade():` | `op.create_foreign_key` / `op.drop_constraint` |
//!
//! Upgrade and downgrade blocks are each inserted once per generator.

pub mod foreign_keys;
pub mod imports;
pub mod tables;

pub use foreign_keys::{add_foreign_keys, render_foreign_keys};
pub use imports::add_imports;
pub use tables::{RenderedTables, TableReport, add_tables, render_tables};

use crate::script::ScriptBuffer;
use crate::statements::Block;
use splice_core::{Renderable, SpliceResult};

/// Insert an upgrade block and a downgrade block after their anchors
///
/// Both anchors must be present before anything is inserted. The downgrade
/// anchor is located again after the upgrade insertion, since its index
/// may have moved.
pub(crate) fn insert_upgrade_downgrade(
    buffer: &mut ScriptBuffer,
    upgrade_anchor: &str,
    downgrade_anchor: &str,
    upgrade: &Block,
    downgrade: &Block,
) -> SpliceResult<()> {
    let upgrade_at = buffer.locate(upgrade_anchor)?;
    buffer.locate(downgrade_anchor)?;

    let inserted = buffer.insert_after(upgrade_at, &upgrade.render())?;
    tracing::debug!(anchor = upgrade_anchor, lines = inserted, "Inserted upgrade block");

    let downgrade_at = buffer.locate(downgrade_anchor)?;
    let inserted = buffer.insert_after(downgrade_at, &downgrade.render())?;
    tracing::debug!(anchor = downgrade_anchor, lines = inserted, "Inserted downgrade block");

    Ok(())
}
