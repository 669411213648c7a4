//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for item names, periodicities and sort columns
pub mod autocomplete;
