//! Command handlers.
//!
//! Each handler returns the text to print on stdout. Session commands only
//! touch the local session file; everything else opens a database-backed
//! [`Workspace`].

use std::path::{Path, PathBuf};
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;
use trackfest_core::budget::BudgetService;
use trackfest_core::expense::{
    ExpenseDraft, ExpenseError, ExpensePolicy, ExpenseRecord, ExpenseService, ImagePayload,
    StatusFilter,
};
use trackfest_core::projection::{ExpenseListView, distinct_submitters, records_by_submitter};
use trackfest_core::session::{
    FileKeyValueStore, KeyValueStore, LogoutScope, Role, SessionContext,
};
use trackfest_core::store::{BudgetStore, ExpenseStore};
use trackfest_db::{BudgetRepository, ExpenseRepository};
use trackfest_shared::config::SessionConfig;
use trackfest_shared::types::ExpenseId;
use trackfest_shared::{AppConfig, AppError};

use crate::output;

/// Arguments for `trackfest add`.
#[derive(Debug, Default)]
pub struct AddArgs {
    pub title: String,
    pub amount: String,
    pub description: Option<String>,
    pub name: Option<String>,
    pub receipt: Option<PathBuf>,
}

/// The restored session.
pub struct App {
    session: Arc<SessionContext<FileKeyValueStore>>,
}

impl App {
    /// Restores the session from the configured file.
    pub async fn open(config: &SessionConfig) -> Result<Self, AppError> {
        let store = FileKeyValueStore::new(config.path.clone());
        let session = SessionContext::restore(store, LogoutScope::from(config)).await?;
        Ok(Self {
            session: Arc::new(session),
        })
    }

    pub async fn login(&self, role: Role) -> Result<String, AppError> {
        self.session.login(role).await?;
        info!(%role, "logged in");
        Ok(format!("Logged in as {role}"))
    }

    pub async fn logout(&self) -> Result<String, AppError> {
        self.session.logout().await?;
        info!("logged out");
        Ok("Logged out".to_string())
    }

    pub async fn whoami(&self) -> Result<String, AppError> {
        Ok(match self.session.current_role().await {
            Some(role) => role.to_string(),
            None => "not logged in".to_string(),
        })
    }

    /// Connects to the database and wires the services.
    pub async fn workspace(
        &self,
        config: &AppConfig,
    ) -> Result<Workspace<ExpenseRepository, BudgetRepository, FileKeyValueStore>, AppError> {
        let db = trackfest_db::connect_with(&config.database)
            .await
            .map_err(|e| AppError::Persistence(format!("cannot reach database: {e}")))?;

        Ok(Workspace::new(
            Arc::new(ExpenseRepository::new(db.clone())),
            Arc::new(BudgetRepository::new(db)),
            Arc::clone(&self.session),
            ExpensePolicy::from(&config.expenses),
        ))
    }
}

/// Expense and budget services over a pair of stores.
pub struct Workspace<S: ExpenseStore, B: BudgetStore, K: KeyValueStore> {
    store: Arc<S>,
    expenses: ExpenseService<S, K>,
    budget: BudgetService<B, K>,
    session: Arc<SessionContext<K>>,
}

impl<S: ExpenseStore, B: BudgetStore, K: KeyValueStore> Workspace<S, B, K> {
    pub fn new(
        store: Arc<S>,
        budget_store: Arc<B>,
        session: Arc<SessionContext<K>>,
        policy: ExpensePolicy,
    ) -> Self {
        Self {
            expenses: ExpenseService::new(Arc::clone(&store), Arc::clone(&session), policy),
            budget: BudgetService::new(budget_store, Arc::clone(&session)),
            store,
            session,
        }
    }

    pub async fn add(&self, args: AddArgs) -> Result<String, AppError> {
        let receipt_image = match &args.receipt {
            Some(path) => Some(read_image(path, "receipt").await?),
            None => None,
        };

        let id = self
            .expenses
            .submit(ExpenseDraft {
                submitter_name: args.name,
                title: args.title,
                amount: args.amount,
                description: args.description,
                receipt_image,
            })
            .await?;

        info!(expense_id = %id, "expense submitted");
        Ok(format!("Submitted expense {id} (Pending)"))
    }

    pub async fn list(
        &self,
        filter: StatusFilter,
        submitter: Option<&str>,
        json: bool,
    ) -> Result<String, AppError> {
        let mut view = ExpenseListView::with_filter(filter);
        view.refresh(self.store.as_ref()).await?;

        let rows: Vec<&ExpenseRecord> = match submitter {
            Some(name) => records_by_submitter(view.snapshot(), name)
                .into_iter()
                .filter(|r| filter.matches(r.status))
                .collect(),
            None => view.visible(),
        };

        if json {
            return to_json(&rows);
        }
        let role = self.session.current_role().await;
        Ok(output::expense_table(&rows, role))
    }

    pub async fn submitters(&self) -> Result<String, AppError> {
        let records = self.expenses.list().await?;
        let rows: Vec<output::SubmitterRow> = distinct_submitters(&records)
            .into_iter()
            .map(|name| {
                let claims = records_by_submitter(&records, &name);
                output::SubmitterRow {
                    claims: claims.len(),
                    total: claims
                        .iter()
                        .fold(Decimal::ZERO, |acc, r| acc.saturating_add(r.amount)),
                    name,
                }
            })
            .collect();
        Ok(output::submitter_table(&rows))
    }

    pub async fn approve(&self, id: ExpenseId) -> Result<String, AppError> {
        let record = self.expenses.approve(id).await?;
        Ok(output::transition_done(&record))
    }

    pub async fn reject(&self, id: ExpenseId) -> Result<String, AppError> {
        let record = self.expenses.reject(id).await?;
        Ok(output::transition_done(&record))
    }

    pub async fn clear(&self, id: ExpenseId, proof: &Path) -> Result<String, AppError> {
        let proof = read_image(proof, "payment proof").await?;
        let record = self.expenses.clear_payment(id, proof).await?;
        Ok(output::transition_done(&record))
    }

    pub async fn set_budget(&self, amount: &str) -> Result<String, AppError> {
        let total = self.budget.set_budget(amount).await?;
        info!(%total, "budget updated");
        Ok(format!(
            "Budget set to {}",
            trackfest_shared::types::format_amount(total)
        ))
    }

    pub async fn dashboard(&self, json: bool) -> Result<String, AppError> {
        let records = self.expenses.list().await?;
        let summary = self.budget.summary(&records).await?;
        if json {
            return to_json(&summary);
        }
        Ok(output::dashboard(&summary))
    }
}

/// Reads an image file into an inline payload.
pub async fn read_image(path: &Path, what: &str) -> Result<ImagePayload, AppError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::NotFound(format!("cannot read {what} {}: {e}", path.display())))?;
    let extension = path.extension().and_then(|ext| ext.to_str());
    let mime_type = ImagePayload::mime_type_for_extension(extension);
    ImagePayload::from_bytes(mime_type, &bytes).map_err(|e: ExpenseError| {
        AppError::Validation(format!("{what} {}: {e}", path.display()))
    })
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, AppError> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::Internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use trackfest_core::expense::ExpenseStatus;
    use trackfest_core::session::InMemoryKeyValueStore;
    use trackfest_core::store::{InMemoryBudgetStore, InMemoryExpenseStore};

    use super::*;

    type TestWorkspace = Workspace<InMemoryExpenseStore, InMemoryBudgetStore, InMemoryKeyValueStore>;

    async fn workspace() -> (TestWorkspace, Arc<SessionContext<InMemoryKeyValueStore>>) {
        let session = Arc::new(
            SessionContext::restore(InMemoryKeyValueStore::new(), LogoutScope::default())
                .await
                .unwrap(),
        );
        let ws = Workspace::new(
            Arc::new(InMemoryExpenseStore::new()),
            Arc::new(InMemoryBudgetStore::new()),
            Arc::clone(&session),
            ExpensePolicy::default(),
        );
        (ws, session)
    }

    fn args(title: &str, amount: &str, name: &str) -> AddArgs {
        AddArgs {
            title: title.to_string(),
            amount: amount.to_string(),
            name: Some(name.to_string()),
            ..AddArgs::default()
        }
    }

    fn submitted_id(out: &str) -> ExpenseId {
        out.split_whitespace().nth(2).unwrap().parse().unwrap()
    }

    #[tokio::test]
    async fn test_student_submits_and_treasurer_settles() {
        let (ws, session) = workspace().await;
        session.login(Role::Student).await.unwrap();

        let out = ws.add(args("Fairy lights", "₹800", "Asha")).await.unwrap();
        let id = submitted_id(&out);

        session.login(Role::Treasurer).await.unwrap();
        ws.set_budget("4000").await.unwrap();
        assert!(ws.approve(id).await.unwrap().contains("Approved"));

        let dir = tempfile::tempdir().unwrap();
        let proof = dir.path().join("transfer.png");
        std::fs::write(&proof, b"png bytes").unwrap();
        let out = ws.clear(id, &proof).await.unwrap();
        assert!(out.contains("Payment Cleared"));

        let json = ws.dashboard(true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["spent"], "800");
        assert_eq!(value["remaining"], "3200");
        assert_eq!(value["pendingCount"], 0);
    }

    #[tokio::test]
    async fn test_student_cannot_approve() {
        let (ws, session) = workspace().await;
        session.login(Role::Student).await.unwrap();
        let id = submitted_id(&ws.add(args("Snacks", "120", "Ravi")).await.unwrap());

        let err = ws.approve(id).await.unwrap_err();
        assert_eq!(err.exit_code(), 77);
    }

    #[tokio::test]
    async fn test_invalid_amount_exits_with_data_error() {
        let (ws, session) = workspace().await;
        session.login(Role::Student).await.unwrap();

        let err = ws.add(args("Snacks", "abc", "Ravi")).await.unwrap_err();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert_eq!(err.exit_code(), 65);
    }

    #[tokio::test]
    async fn test_list_filters_by_status_and_submitter() {
        let (ws, session) = workspace().await;
        session.login(Role::Student).await.unwrap();
        ws.add(args("Banners", "300", "Asha")).await.unwrap();
        let rejected = submitted_id(&ws.add(args("Taxi", "90", "Ravi")).await.unwrap());
        ws.add(args("Tape", "40", "Ravi")).await.unwrap();

        session.login(Role::Treasurer).await.unwrap();
        ws.reject(rejected).await.unwrap();

        let json = ws
            .list(StatusFilter::Only(ExpenseStatus::Pending), Some("Ravi"), true)
            .await
            .unwrap();
        let rows: Vec<serde_json::Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["title"], "Tape");

        let text = ws.list(StatusFilter::All, None, false).await.unwrap();
        assert!(text.contains("Banners"));
        assert!(text.contains("approve, reject"));

        let submitters = ws.submitters().await.unwrap();
        assert!(submitters.contains("Asha"));
        assert!(submitters.contains("₹130.00"));
    }

    #[tokio::test]
    async fn test_missing_receipt_file() {
        let (ws, session) = workspace().await;
        session.login(Role::Student).await.unwrap();

        let mut add = args("Paint", "75", "Meera");
        add.receipt = Some(PathBuf::from("/nonexistent/receipt.jpg"));

        let err = ws.add(add).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert!(ws.expenses.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_session_commands_need_only_the_session_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = SessionConfig {
            path: dir.path().join("session.json"),
            ..SessionConfig::default()
        };

        let app = App::open(&config).await.unwrap();
        assert_eq!(app.whoami().await.unwrap(), "not logged in");
        assert_eq!(
            app.login(Role::Treasurer).await.unwrap(),
            "Logged in as treasurer"
        );

        let reopened = App::open(&config).await.unwrap();
        assert_eq!(reopened.whoami().await.unwrap(), "treasurer");
        reopened.logout().await.unwrap();
        assert_eq!(reopened.whoami().await.unwrap(), "not logged in");
    }

    #[tokio::test]
    async fn test_read_image_uses_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("receipt.webp");
        std::fs::write(&path, [1u8, 2, 3]).unwrap();

        let image = read_image(&path, "receipt").await.unwrap();
        assert_eq!(image.mime_type(), Some("image/webp"));
        assert_eq!(image.decode(), Some(vec![1, 2, 3]));

        let empty = dir.path().join("empty.jpg");
        std::fs::write(&empty, []).unwrap();
        assert!(matches!(
            read_image(&empty, "receipt").await.unwrap_err(),
            AppError::Validation(_)
        ));
    }

    #[tokio::test]
    async fn test_budget_rejects_zero() {
        let (ws, session) = workspace().await;
        session.login(Role::Treasurer).await.unwrap();
        assert!(ws.set_budget("0").await.is_err());
        assert!(ws.set_budget("1500.5").await.unwrap().contains("₹1500.50"));
    }
}
