//! Expense claims and their approval lifecycle.
//!
//! A claim is submitted as `Pending`, then a treasurer approves or rejects it,
//! and an approved claim is settled by attaching payment proof.
//!
//! # Modules
//!
//! - `types` - Expense records, drafts, statuses, and updates
//! - `image` - Inline image payloads for receipts and payment proof
//! - `error` - Expense-specific error types
//! - `lifecycle` - Transition rules and per-role action availability
//! - `service` - Submission and transitions against a record store

pub mod error;
pub mod image;
pub mod lifecycle;
pub mod service;
pub mod types;

#[cfg(test)]
mod lifecycle_props;

pub use error::ExpenseError;
pub use image::ImagePayload;
pub use lifecycle::ExpenseLifecycle;
pub use service::ExpenseService;
pub use types::{
    ExpenseAction, ExpenseDraft, ExpensePolicy, ExpenseRecord, ExpenseStatus, ExpenseUpdate,
    MAX_TEXT_LEN, NewExpense, StatusFilter, TransitionExtras,
};
