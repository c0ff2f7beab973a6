//! Import block generator

use crate::SpliceConfig;
use crate::script::ScriptBuffer;
use crate::statements::Statement;
use splice_core::{Renderable, SpliceResult};
use splice_ir::RevisionSpec;

/// Insert the revision's `imports` text after the import anchor
///
/// # Errors
///
/// `MissingAnchor` if the script has no import anchor line.
pub fn add_imports(
    buffer: &mut ScriptBuffer,
    spec: &RevisionSpec,
    config: &SpliceConfig,
) -> SpliceResult<()> {
    let anchor = &config.anchors.imports;
    let block = Statement::imports(&spec.imports).render();
    let lines = buffer.insert_after_anchor(anchor, &block)?;
    tracing::debug!(lines, "Inserted import block");
    Ok(())
}
