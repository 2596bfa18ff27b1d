//! Repository implementations of the core store traits.

pub mod budget;
pub mod expense;

pub use budget::BudgetRepository;
pub use expense::ExpenseRepository;
