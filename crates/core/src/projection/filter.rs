//! Pure filters over a record snapshot.
//!
//! Inputs arrive newest first from the store; every filter here keeps that
//! order.

use std::collections::BTreeSet;

use crate::expense::{ExpenseRecord, StatusFilter};

/// Records matching `filter`, in input order.
///
/// `StatusFilter::All` returns every record unchanged.
pub fn filter_by_status(records: &[ExpenseRecord], filter: StatusFilter) -> Vec<&ExpenseRecord> {
    records.iter().filter(|r| filter.matches(r.status)).collect()
}

/// Non-empty submitter names, deduplicated.
pub fn distinct_submitters<'a>(
    records: impl IntoIterator<Item = &'a ExpenseRecord>,
) -> BTreeSet<String> {
    records
        .into_iter()
        .filter_map(|r| r.submitter_name.as_deref())
        .filter(|name| !name.trim().is_empty())
        .map(str::to_owned)
        .collect()
}

/// Records whose submitter name equals `name` exactly, in input order.
pub fn records_by_submitter<'a>(records: &'a [ExpenseRecord], name: &str) -> Vec<&'a ExpenseRecord> {
    records
        .iter()
        .filter(|r| r.submitter_name.as_deref() == Some(name))
        .collect()
}
