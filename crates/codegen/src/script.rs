//! # Revision Script Buffer
//!
//! The revision script is loaded once into a [`ScriptBuffer`], edited in
//! memory by every generator, and written back once with
//! [`ScriptBuffer::flush`]. Editing is insertion only: a block of lines is
//! placed directly after an existing line. Nothing is modified or removed.
//!
//! Line endings are detected on load (`\r\n` if the first line uses it,
//! `\n` otherwise) and used for every line when the script is written.
//!
//! The buffer is not idempotent. Inserting the same blocks twice leaves two
//! copies; always annotate a freshly generated revision.

use splice_core::{SpliceError, SpliceResult};
use std::path::{Path, PathBuf};

// ============================================================================
// ScriptBuffer
// ============================================================================

/// In-memory, line-oriented copy of a revision script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptBuffer {
    /// Where the script came from and where `flush` writes it
    path: PathBuf,

    /// Lines without terminators
    lines: Vec<String>,

    /// Whether the text ended with a newline
    trailing_newline: bool,

    /// Line terminator used when rendering
    line_ending: &'static str,
}

impl ScriptBuffer {
    /// Build a buffer from text, remembering the path it belongs to
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: text.lines().map(str::to_string).collect(),
            trailing_newline: text.is_empty() || text.ends_with('\n'),
            line_ending: detect_line_ending(text),
        }
    }

    /// Read a script from disk
    pub fn load(path: impl AsRef<Path>) -> SpliceResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| SpliceError::FileRead {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        tracing::debug!(path = %path.display(), "Loaded revision script");
        Ok(Self::from_text(path, &text))
    }

    /// Write the script back to the path it was loaded from
    pub fn flush(&self) -> SpliceResult<()> {
        std::fs::write(&self.path, self.to_text()).map_err(|e| SpliceError::FileWrite {
            path: self.path.clone(),
            message: e.to_string(),
        })?;
        tracing::debug!(
            path = %self.path.display(),
            lines = self.lines.len(),
            "Wrote revision script"
        );
        Ok(())
    }

    /// The script path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The lines, without terminators
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the script has no lines
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Render the whole script as text
    pub fn to_text(&self) -> String {
        let mut text = self.lines.join(self.line_ending);
        if self.trailing_newline && !self.lines.is_empty() {
            text.push_str(self.line_ending);
        }
        text
    }

    // ====================================================================
    // Line Locator
    // ====================================================================

    /// Index of the first line containing `phrase`, scanning from line 0
    pub fn find_line(&self, phrase: &str) -> Option<usize> {
        self.lines.iter().position(|line| line.contains(phrase))
    }

    /// Like [`find_line`](Self::find_line), but a missing anchor is an error
    pub fn locate(&self, anchor: &str) -> SpliceResult<usize> {
        self.find_line(anchor)
            .ok_or_else(|| SpliceError::missing_anchor(anchor, &self.path))
    }

    // ====================================================================
    // Insertion
    // ====================================================================

    /// Insert `block` directly after line `index`
    ///
    /// The block is split into lines; a leading newline becomes an empty
    /// line and a single trailing newline is absorbed. Returns the number
    /// of lines inserted.
    pub fn insert_after(&mut self, index: usize, block: &str) -> SpliceResult<usize> {
        if index >= self.lines.len() {
            return Err(SpliceError::InsertOutOfBounds {
                index,
                len: self.lines.len(),
            });
        }

        let new_lines: Vec<String> = block.lines().map(str::to_string).collect();
        let count = new_lines.len();
        self.lines.splice(index + 1..index + 1, new_lines);
        Ok(count)
    }

    /// Locate `anchor` and insert `block` after it
    pub fn insert_after_anchor(&mut self, anchor: &str, block: &str) -> SpliceResult<usize> {
        let index = self.locate(anchor)?;
        self.insert_after(index, block)
    }
}

fn detect_line_ending(text: &str) -> &'static str {
    match text.find('\n') {
        Some(end) if text[..end].ends_with('\r') => "\r\n",
        _ => "\n",
    }
}

/// Index of the first line of the file at `path` containing `phrase`
///
/// File-level form of [`ScriptBuffer::find_line`]; `Ok(None)` means the
/// phrase does not occur.
pub fn find_line_num(path: impl AsRef<Path>, phrase: &str) -> SpliceResult<Option<usize>> {
    Ok(ScriptBuffer::load(path)?.find_line(phrase))
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SCRIPT: &str = "\
import sqlalchemy as sa
from alembic_addons.table_classes import *

def upgrade():
    pass

def downgrade():
    pass
";

    fn buffer() -> ScriptBuffer {
        ScriptBuffer::from_text("versions/abc_init.py", SCRIPT)
    }

    #[test]
    fn test_round_trip_text() {
        assert_eq!(buffer().to_text(), SCRIPT);

        let no_newline = ScriptBuffer::from_text("x.py", "a\nb");
        assert_eq!(no_newline.to_text(), "a\nb");

        let crlf = ScriptBuffer::from_text("x.py", "a\r\nb\r\n");
        assert_eq!(crlf.lines(), &["a".to_string(), "b".to_string()]);
        assert_eq!(crlf.to_text(), "a\r\nb\r\n");
    }

    #[test]
    fn test_crlf_script_keeps_crlf_after_insert() {
        let text = SCRIPT.replace('\n', "\r\n");
        let mut buf = ScriptBuffer::from_text("versions/abc_init.py", &text);

        buf.insert_after_anchor("def upgrade():", "\n    op.execute('select 1')\n")
            .unwrap();

        assert_eq!(
            buf.to_text(),
            "import sqlalchemy as sa\r\n\
             from alembic_addons.table_classes import *\r\n\
             \r\n\
             def upgrade():\r\n\
             \r\n\
             \x20   op.execute('select 1')\r\n\
             \x20   pass\r\n\
             \r\n\
             def downgrade():\r\n\
             \x20   pass\r\n"
        );
    }

    #[test]
    fn test_find_line_first_match() {
        let buf = buffer();
        assert_eq!(buf.find_line("def upgrade():"), Some(3));
        assert_eq!(buf.find_line("def downgrade():"), Some(6));
        assert_eq!(buf.find_line("pass"), Some(4));
        assert_eq!(buf.find_line("import sqlalchemy"), Some(0));
        assert_eq!(buf.find_line("def nothing():"), None);
    }

    #[test]
    fn test_locate_missing_anchor_is_error() {
        let err = buffer().locate("def sideways():").unwrap_err();
        assert!(matches!(err, SpliceError::MissingAnchor { .. }));
        assert!(err.to_string().contains("versions/abc_init.py"));
    }

    #[test]
    fn test_insert_after_splits_block() {
        let mut buf = buffer();
        let inserted = buf.insert_after(3, "\n    # one\n    two()\n").unwrap();
        assert_eq!(inserted, 3);
        assert_eq!(
            buf.to_text(),
            "\
import sqlalchemy as sa
from alembic_addons.table_classes import *

def upgrade():

    # one
    two()
    pass

def downgrade():
    pass
"
        );
    }

    #[test]
    fn test_insert_after_last_line() {
        let mut buf = ScriptBuffer::from_text("x.py", "a\n");
        buf.insert_after(0, "b\n").unwrap();
        assert_eq!(buf.to_text(), "a\nb\n");
    }

    #[test]
    fn test_insert_out_of_bounds_rejected() {
        let mut buf = buffer();
        let len = buf.len();
        let err = buf.insert_after(len, "x\n").unwrap_err();
        assert!(matches!(err, SpliceError::InsertOutOfBounds { index, len: l } if index == len && l == len));
        assert_eq!(buf, buffer());
    }

    #[test]
    fn test_insert_empty_block_is_noop() {
        let mut buf = buffer();
        assert_eq!(buf.insert_after(3, "").unwrap(), 0);
        assert_eq!(buf, buffer());
    }

    #[test]
    fn test_insert_after_anchor() {
        let mut buf = buffer();
        buf.insert_after_anchor("def downgrade():", "    op.drop_table('t')\n")
            .unwrap();
        assert_eq!(buf.lines()[7], "    op.drop_table('t')");
        assert_eq!(buf.lines()[8], "    pass");
    }

    #[test]
    fn test_load_flush_and_find_line_num() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(SCRIPT.as_bytes()).unwrap();

        assert_eq!(find_line_num(file.path(), "def downgrade():").unwrap(), Some(6));
        assert_eq!(find_line_num(file.path(), "missing").unwrap(), None);

        let mut buf = ScriptBuffer::load(file.path()).unwrap();
        buf.insert_after(1, "from extra import thing\n").unwrap();
        buf.flush().unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.starts_with(
            "import sqlalchemy as sa\nfrom alembic_addons.table_classes import *\nfrom extra import thing\n"
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = ScriptBuffer::load("/no/such/revision.py").unwrap_err();
        assert!(err.is_io());
    }
}
