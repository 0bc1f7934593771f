//! Discord command implementations organized by category.

#![allow(clippy::too_long_first_doc_paragraph)]

/// General utility commands
pub mod general;

/// Partnership credit and announcement commands
pub mod partner;

// Export commands
pub use general::*;
pub use partner::*;
