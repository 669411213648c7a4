//! Framework-agnostic business logic.
//!
//! Everything here works on plain records and a `&DatabaseConnection`; the Discord layer
//! only parses arguments and renders what these functions return.

/// Monthly totals and stat cards over regular expenses
pub mod aggregate;
/// Lenient numeric coercion of stored amounts and dates
pub mod coerce;
/// Record store operations and form input types
pub mod expense;
/// Splitting records into the regular, planned and risk views
pub mod partition;
/// Plain-text rendering of tables, summaries and charts
pub mod report;
/// Checkbox selection over the expense table
pub mod selection;
/// Column ordering for the expense table
pub mod sort;
/// Per-user view state and in-flight mutation guards
pub mod view;
