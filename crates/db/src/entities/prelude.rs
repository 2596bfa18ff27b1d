//! Entity re-exports.

pub use super::budget_settings::Entity as BudgetSettings;
pub use super::expenses::Entity as Expenses;
