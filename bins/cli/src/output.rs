//! Plain-text rendering for terminal output.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use trackfest_core::budget::BudgetSummary;
use trackfest_core::expense::{ExpenseAction, ExpenseLifecycle, ExpenseRecord};
use trackfest_core::session::Role;
use trackfest_shared::types::format_amount;

const BAR_WIDTH: u32 = 20;

/// One line per submitter in `trackfest submitters`.
#[derive(Debug)]
pub struct SubmitterRow {
    pub name: String,
    pub claims: usize,
    pub total: Decimal,
}

/// Renders records newest first, annotated with the actions `role` may take.
pub fn expense_table(records: &[&ExpenseRecord], role: Option<Role>) -> String {
    if records.is_empty() {
        return "No expenses found.".to_string();
    }

    let mut out = String::new();
    for record in records {
        out.push_str(&format!(
            "{}  {:<15} {:>12}  {}",
            record.id,
            record.status.as_str(),
            format_amount(record.amount),
            record.title
        ));
        if let Some(name) = record.submitter_name.as_deref().filter(|n| !n.is_empty()) {
            out.push_str(&format!("  by {name}"));
        }
        let actions = ExpenseLifecycle::available_actions(record.status, role);
        if !actions.is_empty() {
            let labels: Vec<&str> = actions.iter().map(ExpenseAction::as_str).collect();
            out.push_str(&format!("  [{}]", labels.join(", ")));
        }
        out.push('\n');
    }
    out.truncate(out.trim_end().len());
    out
}

pub fn submitter_table(rows: &[SubmitterRow]) -> String {
    if rows.is_empty() {
        return "No submitters yet.".to_string();
    }
    rows.iter()
        .map(|row| {
            format!(
                "{:<24} {:>3} claim{}  {}",
                row.name,
                row.claims,
                if row.claims == 1 { "" } else { "s" },
                format_amount(row.total)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn transition_done(record: &ExpenseRecord) -> String {
    format!("Expense {} is now {}", record.id, record.status)
}

/// Dashboard card: totals, utilization bar, and the pending queue size.
pub fn dashboard(summary: &BudgetSummary) -> String {
    let percent = summary
        .progress_fraction
        .saturating_mul(Decimal::ONE_HUNDRED)
        .round_dp(1);
    let mut out = format!(
        "Budget     {}\nSpent      {}\nRemaining  {}\nProgress   {}% {}\nPending    {}",
        format_amount(summary.total),
        format_amount(summary.spent),
        format_amount(summary.remaining),
        percent.normalize(),
        progress_bar(summary.clamped_progress()),
        summary.pending_count,
    );
    if summary.is_overspent() {
        out.push_str("\nOver budget!");
    }
    out
}

/// Fixed-width bar for a fraction already clamped into `[0, 1]`.
fn progress_bar(fraction: Decimal) -> String {
    let filled = fraction
        .saturating_mul(Decimal::from(BAR_WIDTH))
        .round()
        .to_u32()
        .unwrap_or(0)
        .min(BAR_WIDTH);
    let mut bar = String::from("[");
    for i in 0..BAR_WIDTH {
        bar.push(if i < filled { '#' } else { '.' });
    }
    bar.push(']');
    bar
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rstest::rstest;
    use rust_decimal_macros::dec;
    use trackfest_core::budget::summarize;
    use trackfest_core::expense::ExpenseStatus;
    use trackfest_shared::types::ExpenseId;

    use super::*;

    fn record(title: &str, status: ExpenseStatus) -> ExpenseRecord {
        ExpenseRecord {
            id: ExpenseId::new(),
            submitter_name: Some("Asha".to_string()),
            title: title.to_string(),
            amount: dec!(250),
            description: None,
            submitter_role: Role::Student,
            status,
            created_at: Utc::now(),
            receipt_image: None,
            payment_proof_image: None,
        }
    }

    #[test]
    fn test_expense_table_shows_actions_for_treasurer() {
        let pending = record("Lights", ExpenseStatus::Pending);
        let approved = record("Stage", ExpenseStatus::Approved);
        let rows = [&pending, &approved];

        let treasurer = expense_table(&rows, Some(Role::Treasurer));
        let lines: Vec<&str> = treasurer.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("₹250.00"));
        assert!(lines[0].contains("by Asha"));
        assert!(lines[0].ends_with("[approve, reject]"));
        assert!(lines[1].ends_with("[mark paid]"));

        let student = expense_table(&rows, Some(Role::Student));
        assert!(!student.contains('['));
    }

    #[test]
    fn test_empty_tables() {
        assert_eq!(expense_table(&[], None), "No expenses found.");
        assert_eq!(submitter_table(&[]), "No submitters yet.");
    }

    #[test]
    fn test_submitter_table_pluralizes() {
        let rows = [
            SubmitterRow {
                name: "Asha".to_string(),
                claims: 1,
                total: dec!(99.5),
            },
            SubmitterRow {
                name: "Ravi".to_string(),
                claims: 3,
                total: dec!(1200),
            },
        ];
        let out = submitter_table(&rows);
        assert!(out.lines().next().unwrap().contains("1 claim  ₹99.50"));
        assert!(out.lines().nth(1).unwrap().contains("3 claims  ₹1200.00"));
    }

    #[rstest]
    #[case(dec!(0), "[....................]")]
    #[case(dec!(0.25), "[#####...............]")]
    #[case(dec!(1), "[####################]")]
    fn test_progress_bar(#[case] fraction: Decimal, #[case] expected: &str) {
        assert_eq!(progress_bar(fraction), expected);
    }

    #[test]
    fn test_dashboard_survives_extreme_progress() {
        let summary = BudgetSummary {
            total: dec!(0.0001),
            spent: Decimal::MAX,
            remaining: dec!(0.0001) - Decimal::MAX,
            progress_fraction: Decimal::MAX,
            pending_count: 0,
        };

        let out = dashboard(&summary);
        assert!(out.contains("[####################]"));
        assert!(out.ends_with("Over budget!"));
    }

    #[test]
    fn test_dashboard_flags_overspend() {
        let cleared = record("Sound", ExpenseStatus::PaymentCleared);
        let summary = summarize(dec!(200), [&cleared, &cleared]);

        let out = dashboard(&summary);
        assert!(out.contains("Remaining  -₹300.00"));
        assert!(out.contains("Progress   250%"));
        assert!(out.contains("[####################]"));
        assert!(out.ends_with("Over budget!"));
    }
}
