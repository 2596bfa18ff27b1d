//! Budget tracking: the treasurer-owned total and spend aggregation.

pub mod aggregate;
pub mod error;
pub mod service;
pub mod types;


pub use aggregate::summarize;
pub use error::BudgetError;
pub use service::BudgetService;
pub use types::BudgetSummary;
