//! Discord interaction handlers
//!
//! This module provides handlers for Discord interactions such as autocomplete.

/// Autocomplete handlers for plants, categories, vendors and statuses
pub mod autocomplete;
