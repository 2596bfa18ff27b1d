//! Session and role context.
//!
//! The current user's role lives in a local key-value store so it survives
//! restarts until logout. Components receive a [`SessionContext`] at
//! construction instead of reading the store ad hoc.
//!
//! # Modules
//!
//! - `types` - Roles and access-denied details
//! - `error` - Local store failures
//! - `store` - Key-value store contract with memory and file backends
//! - `context` - The session object handed to services

mod context;
mod error;
mod store;
mod types;

pub use context::{LogoutScope, ROLE_KEY, SessionContext};
pub use error::SessionError;
pub use store::{FileKeyValueStore, InMemoryKeyValueStore, KeyValueStore};
pub use types::{AccessDenied, Role};
