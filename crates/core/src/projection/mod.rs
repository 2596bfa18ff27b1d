//! Read-side projections over expense snapshots.
//!
//! This module provides:
//! - Status filtering for the treasurer and history screens
//! - Submitter grouping for the per-student breakdown
//! - A pull-based list view that owns a snapshot and its active filter

pub mod filter;
pub mod view;

pub use filter::{distinct_submitters, filter_by_status, records_by_submitter};
pub use view::ExpenseListView;
