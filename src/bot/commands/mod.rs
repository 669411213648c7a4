//! Discord command implementations organized by view.

#![allow(clippy::too_long_first_doc_paragraph)]

/// Regular expense commands
pub mod expense;

/// General utility commands
pub mod general;

/// Planned item commands
pub mod planned;

/// Risk register commands
pub mod risk;

/// Sorting, selection and summary commands
pub mod view;

// Export commands
pub use expense::*;
pub use general::*;
pub use planned::*;
pub use risk::*;
pub use view::*;
