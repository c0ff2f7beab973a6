//! Core traits for alembic-splice
//!
//! This module defines the traits shared by the revision definitions and
//! the code generators: validation of loaded configuration and rendering
//! of generated script text.

use crate::error::SpliceResult;

// ============================================================================
// Validatable Trait
// ============================================================================

/// Trait for types that can be validated
///
/// Types implementing this trait can check their internal consistency
/// and return validation errors if the state is invalid.
///
/// # Example
///
/// ```rust,ignore
/// use splice_core::{Validatable, SpliceResult, SpliceError};
///
/// struct Column {
///     dtype: String,
/// }
///
/// impl Validatable for Column {
///     fn validate(&self) -> SpliceResult<()> {
///         if self.dtype.trim().is_empty() {
///             return Err(SpliceError::validation("dtype cannot be empty"));
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Validatable {
    /// Validate the current state of the object
    ///
    /// Returns `Ok(())` if valid, or a `SpliceError` describing the problem.
    fn validate(&self) -> SpliceResult<()>;

    /// Check if the object is valid without returning error details
    fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Get all validation errors (for types that can have multiple errors)
    fn validation_errors(&self) -> Vec<String> {
        match self.validate() {
            Ok(()) => vec![],
            Err(e) => vec![e.to_string()],
        }
    }
}

// ============================================================================
// Renderable Trait
// ============================================================================

/// Trait for values that render to a fragment of script text
///
/// Rendering is infallible: everything that could fail has already been
/// checked when the value was built.
///
/// # Example
///
/// ```rust,ignore
/// use splice_core::Renderable;
///
/// struct Pass;
///
/// impl Renderable for Pass {
///     fn render_into(&self, out: &mut String) {
///         out.push_str("    pass\n");
///     }
/// }
///
/// assert_eq!(Pass.render(), "    pass\n");
/// ```
pub trait Renderable {
    /// Append the rendered text to `out`
    fn render_into(&self, out: &mut String);

    /// Render to a new string
    fn render(&self) -> String {
        let mut out = String::new();
        self.render_into(&mut out);
        out
    }
}

// ============================================================================
// Tests
// ============================================================================
