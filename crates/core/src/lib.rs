//! # Splice Core
//!
//! Core types, traits, and error handling for alembic-splice.
//!
//! This crate provides the foundational building blocks used throughout
//! the workspace, including:
//!
//! - **Types**: `ColumnList`, the ordered column names used by keys
//! - **Traits**: `Validatable` and `Renderable`
//! - **Errors**: Unified error handling with `SpliceError` and `SpliceResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{SpliceError, SpliceResult};
pub use traits::{Renderable, Validatable};
pub use types::ColumnList;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
