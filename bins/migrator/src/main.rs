//! Database migration runner for TrackFest.
//!
//! Usage:
//!   migrator up      - Create the expenses and budget tables
//!   migrator down    - Rollback last migration
//!   migrator status  - Show migration status
//!   migrator fresh   - Drop all tables and re-run migrations

use sea_orm_migration::prelude::*;
use trackfest_db::migration::Migrator;

#[tokio::main]
async fn main() {
    // DATABASE_URL may come from .env
    dotenvy::dotenv().ok();

    cli::run_cli(Migrator).await;
}
