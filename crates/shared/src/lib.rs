//! Shared types, errors, and configuration for TrackFest.
//!
//! This crate provides common types used across all other crates:
//! - Amount parsing and display with decimal precision
//! - Typed IDs for type-safe record references
//! - The application-wide error type surfaced to callers
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, AppResult};
