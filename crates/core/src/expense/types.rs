//! Expense domain types.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use trackfest_shared::config::ExpenseConfig;
use trackfest_shared::types::{ExpenseId, parse_positive_amount};

use super::error::ExpenseError;
use super::image::ImagePayload;
use crate::session::Role;

/// Expense status in the approval workflow.
///
/// The valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Rejected (reject)
/// - Approved → PaymentCleared (mark paid, with proof)
///
/// `Rejected` and `PaymentCleared` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExpenseStatus {
    /// Submitted and awaiting a treasurer decision.
    Pending,
    /// Approved for payout.
    Approved,
    /// Rejected by the treasurer.
    Rejected,
    /// Paid out, with proof attached.
    #[serde(rename = "Payment Cleared")]
    PaymentCleared,
}

impl ExpenseStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::PaymentCleared,
    ];

    /// Returns the display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::PaymentCleared => "Payment Cleared",
        }
    }

    /// Parses a status, ignoring case, spaces, and underscores.
    pub fn parse(s: &str) -> Option<Self> {
        let key: String = s
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_')
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "rejected" => Some(Self::Rejected),
            "paymentcleared" => Some(Self::PaymentCleared),
            _ => None,
        }
    }

    /// Returns true if no transition leaves this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::PaymentCleared)
    }
}

impl fmt::Display for ExpenseStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Status filter applied to list views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    /// No filtering.
    #[default]
    All,
    /// Only records in this status.
    Only(ExpenseStatus),
}

impl StatusFilter {
    /// Returns true if a record in `status` passes the filter.
    #[must_use]
    pub fn matches(&self, status: ExpenseStatus) -> bool {
        match self {
            Self::All => true,
            Self::Only(wanted) => *wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = ExpenseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        ExpenseStatus::parse(s)
            .map(Self::Only)
            .ok_or_else(|| ExpenseError::validation(format!("unknown status filter '{s}'")))
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "All"),
            Self::Only(status) => write!(f, "{status}"),
        }
    }
}

/// A persisted expense claim.
///
/// Views hold these as read-only snapshots; the record store owns the
/// authoritative copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    /// Store-assigned id.
    pub id: ExpenseId,
    /// Name of the person claiming, absent on older records.
    pub submitter_name: Option<String>,
    /// Short title.
    pub title: String,
    /// Claimed amount, always positive.
    pub amount: Decimal,
    /// Free-text description.
    pub description: Option<String>,
    /// Role of the session that submitted the claim.
    pub submitter_role: Role,
    /// Lifecycle status.
    pub status: ExpenseStatus,
    /// Store-assigned creation time.
    pub created_at: DateTime<Utc>,
    /// Receipt attached at submission.
    pub receipt_image: Option<ImagePayload>,
    /// Proof of payment, attached when clearing payment.
    pub payment_proof_image: Option<ImagePayload>,
}

impl ExpenseRecord {
    /// Merges a partial update into this snapshot.
    ///
    /// An already attached payment proof is never replaced.
    pub fn apply(&mut self, update: &ExpenseUpdate) {
        self.status = update.status;
        if self.payment_proof_image.is_none() {
            self.payment_proof_image.clone_from(&update.payment_proof_image);
        }
    }
}

/// Raw submission as entered by the user, before validation.
#[derive(Debug, Clone, Default)]
pub struct ExpenseDraft {
    /// Submitter name.
    pub submitter_name: Option<String>,
    /// Title.
    pub title: String,
    /// Amount text; must parse to a positive number.
    pub amount: String,
    /// Description.
    pub description: Option<String>,
    /// Receipt image.
    pub receipt_image: Option<ImagePayload>,
}

/// A validated expense ready to be persisted.
///
/// The store sets the id, `Pending` status, and creation time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewExpense {
    /// Submitter name.
    pub submitter_name: Option<String>,
    /// Title, non-empty.
    pub title: String,
    /// Positive amount.
    pub amount: Decimal,
    /// Description.
    pub description: Option<String>,
    /// Role captured from the session.
    pub submitter_role: Role,
    /// Receipt image.
    pub receipt_image: Option<ImagePayload>,
}

/// Partial update written by a status transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseUpdate {
    /// New status.
    pub status: ExpenseStatus,
    /// Proof of payment, only set when clearing payment.
    pub payment_proof_image: Option<ImagePayload>,
}

/// Extra fields supplied with a transition request.
#[derive(Debug, Clone, Default)]
pub struct TransitionExtras {
    /// Proof of payment; required to clear payment, refused otherwise.
    pub payment_proof_image: Option<ImagePayload>,
}

impl TransitionExtras {
    /// Extras carrying a payment proof.
    #[must_use]
    pub fn with_payment_proof(proof: ImagePayload) -> Self {
        Self {
            payment_proof_image: Some(proof),
        }
    }
}

/// Action a session can take on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseAction {
    /// Pending → Approved.
    Approve,
    /// Pending → Rejected.
    Reject,
    /// Approved → PaymentCleared, with proof.
    MarkPaid,
}

impl ExpenseAction {
    /// Status the action moves a record to.
    #[must_use]
    pub fn target_status(&self) -> ExpenseStatus {
        match self {
            Self::Approve => ExpenseStatus::Approved,
            Self::Reject => ExpenseStatus::Rejected,
            Self::MarkPaid => ExpenseStatus::PaymentCleared,
        }
    }

    /// Returns the display label.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
            Self::MarkPaid => "mark paid",
        }
    }
}

impl fmt::Display for ExpenseAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Longest title or submitter name, in characters (`VARCHAR(255)`).
pub const MAX_TEXT_LEN: usize = 255;

/// Submission rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExpensePolicy {
    /// Reject drafts without a submitter name.
    pub require_submitter_name: bool,
    /// Largest accepted encoded image.
    pub max_image_bytes: usize,
}

impl Default for ExpensePolicy {
    fn default() -> Self {
        Self::from(&ExpenseConfig::default())
    }
}

impl From<&ExpenseConfig> for ExpensePolicy {
    fn from(config: &ExpenseConfig) -> Self {
        Self {
            require_submitter_name: config.require_submitter_name,
            max_image_bytes: config.max_image_bytes,
        }
    }
}

impl ExpensePolicy {
    /// Validates a draft into a [`NewExpense`] submitted under `role`.
    ///
    /// Text fields are trimmed and blank optional fields become `None`.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Validation` for an empty or overlong title, an
    /// amount rejected by `parse_positive_amount`, a missing required or
    /// overlong name, or an oversized receipt.
    pub fn validate(&self, draft: ExpenseDraft, role: Role) -> Result<NewExpense, ExpenseError> {
        let title = draft.title.trim();
        if title.is_empty() {
            return Err(ExpenseError::validation("title is required"));
        }
        check_length("title", title)?;

        let amount = parse_positive_amount(&draft.amount)?;

        let submitter_name = non_blank(draft.submitter_name);
        if self.require_submitter_name && submitter_name.is_none() {
            return Err(ExpenseError::validation("submitter name is required"));
        }
        if let Some(name) = &submitter_name {
            check_length("submitter name", name)?;
        }

        if let Some(receipt) = &draft.receipt_image {
            self.check_image("receipt", receipt)?;
        }

        Ok(NewExpense {
            submitter_name,
            title: title.to_string(),
            amount,
            description: non_blank(draft.description),
            submitter_role: role,
            receipt_image: draft.receipt_image,
        })
    }

    /// Rejects images larger than `max_image_bytes`.
    ///
    /// # Errors
    ///
    /// Returns `ExpenseError::Validation` naming `what` when too large.
    pub fn check_image(&self, what: &str, image: &ImagePayload) -> Result<(), ExpenseError> {
        if image.len() > self.max_image_bytes {
            return Err(ExpenseError::validation(format!(
                "{what} image is {} bytes, limit is {}",
                image.len(),
                self.max_image_bytes
            )));
        }
        Ok(())
    }
}

fn check_length(what: &str, value: &str) -> Result<(), ExpenseError> {
    let len = value.chars().count();
    if len > MAX_TEXT_LEN {
        return Err(ExpenseError::validation(format!(
            "{what} is {len} characters, limit is {MAX_TEXT_LEN}"
        )));
    }
    Ok(())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
