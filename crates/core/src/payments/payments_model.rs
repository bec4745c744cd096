//! Payment domain models.

use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};
use crate::ledger::Allocation;
use crate::loans::LoanSnapshot;

/// A recorded payment and the allocation fixed when it was accepted.
///
/// Payments are immutable once persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub loan_id: String,
    pub paid_at: NaiveDateTime,
    pub amount: Decimal,
    /// Receipt file path or URL.
    pub receipt_ref: Option<String>,
    /// Actor who recorded the payment.
    pub recorded_by: String,
    pub arrears_applied: Decimal,
    pub interest_applied: Decimal,
    pub principal_applied: Decimal,
    pub created_at: NaiveDateTime,
}

impl Payment {
    /// Sum of the applied buckets.
    pub fn total_applied(&self) -> Decimal {
        self.arrears_applied + self.interest_applied + self.principal_applied
    }

    /// True when every bucket is non-negative and their sum does not exceed
    /// the payment amount.
    pub fn has_consistent_breakdown(&self) -> bool {
        self.arrears_applied >= Decimal::ZERO
            && self.interest_applied >= Decimal::ZERO
            && self.principal_applied >= Decimal::ZERO
            && self.total_applied() <= self.amount
    }
}

/// Input model for submitting a payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPayment {
    pub loan_id: String,
    pub amount: Decimal,
    pub paid_at: Option<NaiveDateTime>,
    pub receipt_ref: Option<String>,
    pub recorded_by: String,
}

impl NewPayment {
    /// Validates the payment before it is allocated.
    pub fn validate(&self) -> Result<()> {
        if self.loan_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "loanId".to_string(),
            )));
        }
        if self.amount <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Payment amount must be positive, got {}",
                self.amount
            )));
        }
        if self.recorded_by.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "recordedBy".to_string(),
            )));
        }
        Ok(())
    }
}

/// A payment ready to be persisted, with its allocation already decided.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocatedPayment {
    pub loan_id: String,
    pub paid_at: NaiveDateTime,
    pub amount: Decimal,
    pub receipt_ref: Option<String>,
    pub recorded_by: String,
    pub arrears_applied: Decimal,
    pub interest_applied: Decimal,
    pub principal_applied: Decimal,
}

impl AllocatedPayment {
    pub fn new(new_payment: NewPayment, allocation: &Allocation, now: NaiveDateTime) -> Self {
        Self {
            loan_id: new_payment.loan_id,
            paid_at: new_payment.paid_at.unwrap_or(now),
            amount: new_payment.amount,
            receipt_ref: new_payment
                .receipt_ref
                .filter(|r| !r.trim().is_empty()),
            recorded_by: new_payment.recorded_by,
            arrears_applied: allocation.arrears_applied,
            interest_applied: allocation.interest_applied,
            principal_applied: allocation.principal_applied,
        }
    }
}

/// Outcome of a payment submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentReceipt {
    pub payment: Payment,
    /// Loan aggregates after recomputation.
    pub snapshot: LoanSnapshot,
    /// Part of the payment no bucket could absorb.
    pub unapplied: Decimal,
}

/// Where the payment workflow reads the pending buckets from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum PendingBucketSource {
    /// The aggregate fields currently stored on the loan.
    StoredSnapshot,
    /// A snapshot recomputed from the payment history under the loan lock.
    #[default]
    LedgerHistory,
}

impl FromStr for PendingBucketSource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "stored" | "stored_snapshot" => Ok(PendingBucketSource::StoredSnapshot),
            "history" | "ledger_history" => Ok(PendingBucketSource::LedgerHistory),
            other => Err(Error::InvalidConfigValue(format!(
                "Unknown pending bucket source '{}', expected 'history' or 'stored'",
                other
            ))),
        }
    }
}
