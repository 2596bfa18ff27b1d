//! Expenses and budget setting tables.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(UP_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(DOWN_SQL).await?;
        Ok(())
    }
}

const UP_SQL: &str = r"
CREATE TYPE expense_status AS ENUM ('pending', 'approved', 'rejected', 'payment_cleared');
CREATE TYPE submitter_role AS ENUM ('student', 'treasurer');

CREATE TABLE expenses (
    id UUID PRIMARY KEY,
    submitter_name VARCHAR(255),
    title VARCHAR(255) NOT NULL,
    amount NUMERIC(19, 4) NOT NULL,
    description TEXT,
    submitter_role submitter_role NOT NULL,
    status expense_status NOT NULL DEFAULT 'pending',
    receipt_image TEXT,
    payment_proof_image TEXT,
    created_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_expense_amount_positive CHECK (amount > 0),
    CONSTRAINT chk_expense_title_not_blank CHECK (length(trim(title)) > 0),
    CONSTRAINT chk_expense_cleared_has_proof CHECK (
        status <> 'payment_cleared' OR payment_proof_image IS NOT NULL
    )
);

-- listAll ordering
CREATE INDEX idx_expenses_created ON expenses(created_at DESC, id DESC);

-- Treasurer queue and dashboard pending count
CREATE INDEX idx_expenses_status ON expenses(status, created_at DESC);

CREATE TABLE budget_settings (
    id SMALLINT PRIMARY KEY DEFAULT 1,
    total NUMERIC(19, 4) NOT NULL,
    updated_at TIMESTAMPTZ NOT NULL DEFAULT now(),
    CONSTRAINT chk_budget_single_row CHECK (id = 1),
    CONSTRAINT chk_budget_total_positive CHECK (total > 0)
);
";

const DOWN_SQL: &str = r"
DROP TABLE IF EXISTS budget_settings CASCADE;
DROP TABLE IF EXISTS expenses CASCADE;
DROP TYPE IF EXISTS submitter_role;
DROP TYPE IF EXISTS expense_status;
";
