//! Budget repository for database operations.

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{DatabaseConnection, DbErr, EntityTrait, Set, sea_query::OnConflict};
use tracing::{debug, info};
use trackfest_core::budget::BudgetError;
use trackfest_core::store::BudgetStore;

use crate::entities::budget_settings;

const SETTINGS_ROW: i16 = 1;

/// Postgres-backed budget setting.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl BudgetStore for BudgetRepository {
    async fn load_total(&self) -> Result<Option<Decimal>, BudgetError> {
        let row = budget_settings::Entity::find_by_id(SETTINGS_ROW)
            .one(&self.db)
            .await
            .map_err(db_error)?;

        debug!(configured = row.is_some(), "budget loaded");
        Ok(row.map(|r| r.total.normalize()))
    }

    async fn save_total(&self, total: Decimal) -> Result<(), BudgetError> {
        let row = budget_settings::ActiveModel {
            id: Set(SETTINGS_ROW),
            total: Set(total),
            updated_at: Set(Utc::now().into()),
        };

        budget_settings::Entity::insert(row)
            .on_conflict(
                OnConflict::column(budget_settings::Column::Id)
                    .update_columns([
                        budget_settings::Column::Total,
                        budget_settings::Column::UpdatedAt,
                    ])
                    .to_owned(),
            )
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        info!(%total, "budget saved");
        Ok(())
    }
}

fn db_error(err: DbErr) -> BudgetError {
    BudgetError::persistence(err.to_string())
}
