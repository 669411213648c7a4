//! `CondoExpenses` - A Discord bot for tracking a condominium's expenses
//!
//! This crate keeps the building's expenses, planned works and risk register in one
//! `SQLite` table, and shows each user a sortable expense table with row selection,
//! paid/pending totals and a month-by-month breakdown with a bar chart.

// Hard errors: unsafe code and things that are almost always bugs
#![deny(
    unsafe_code,
    unreachable_code,
    unreachable_patterns,
    unused_must_use,
    rustdoc::broken_intra_doc_links,
    rustdoc::private_intra_doc_links,
)]
// Warnings: missing docs and the clippy groups the code is kept clean against
#![warn(
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,

    // No panicking shortcuts outside tests
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,

    // Money is f64, compare with care
    clippy::float_cmp,

    // Shared state and readability
    clippy::clone_on_ref_ptr,
    clippy::needless_pass_by_value,
    clippy::too_many_lines,
    clippy::wildcard_imports,

    future_incompatible,
    rust_2018_idioms,
)]
// Store functions document their errors through `errors::Error`
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
)]

// `missing_docs` stays a warning: code generated by `poise::command` has no docs.

/// Discord bot interface - commands, handlers, and per-user view sessions
pub mod bot;
/// Configuration management for database and application settings
pub mod config;
/// Core business logic - framework-agnostic record store, view pipeline and rendering
pub mod core;
/// SeaORM entity definitions for database tables
pub mod entities;
/// Unified error types and result handling
pub mod errors;

#[cfg(test)]
pub mod test_utils;
