//! `SeaORM` entities.

pub mod prelude;

pub mod budget_settings;
pub mod expenses;
pub mod sea_orm_active_enums;
