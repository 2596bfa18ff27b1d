//! Core business logic for TrackFest.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `expense` - Expense records, the status lifecycle, and submission rules
//! - `budget` - Budget aggregation and the treasurer-owned budget setting
//! - `projection` - Filtered and per-submitter views over expense snapshots
//! - `session` - Role context backed by a local key-value store
//! - `store` - Record store contracts plus in-memory implementations

pub mod budget;
pub mod expense;
pub mod projection;
pub mod session;
pub mod store;
