//! Pull-based list view.

use super::filter::filter_by_status;
use crate::expense::{ExpenseError, ExpenseRecord, StatusFilter};
use crate::store::ExpenseStore;

/// A screen's read-only snapshot of the expense collection.
///
/// The snapshot only changes on [`ExpenseListView::refresh`]; there is no
/// live subscription, so it may be stale until the next refresh.
#[derive(Debug, Clone, Default)]
pub struct ExpenseListView {
    snapshot: Vec<ExpenseRecord>,
    filter: StatusFilter,
}

impl ExpenseListView {
    /// Empty view showing every status.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty view with an initial filter.
    #[must_use]
    pub fn with_filter(filter: StatusFilter) -> Self {
        Self {
            snapshot: Vec::new(),
            filter,
        }
    }

    /// Re-fetches the snapshot from `store`.
    ///
    /// # Errors
    ///
    /// Returns the store's error; the previous snapshot is kept.
    pub async fn refresh<S: ExpenseStore>(&mut self, store: &S) -> Result<usize, ExpenseError> {
        let records = store.list_all().await?;
        self.snapshot = records;
        Ok(self.snapshot.len())
    }

    /// Changes the active filter without touching the snapshot.
    pub fn set_filter(&mut self, filter: StatusFilter) {
        self.filter = filter;
    }

    /// Active filter.
    pub fn filter(&self) -> StatusFilter {
        self.filter
    }

    /// Records passing the active filter, newest first.
    pub fn visible(&self) -> Vec<&ExpenseRecord> {
        filter_by_status(&self.snapshot, self.filter)
    }

    /// Full unfiltered snapshot.
    pub fn snapshot(&self) -> &[ExpenseRecord] {
        &self.snapshot
    }
}
