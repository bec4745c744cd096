//! Loan domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_ARREARS_CONDITIONS, DEFAULT_PAYMENT_FREQUENCY};
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::PendingBuckets;

/// Repayment status of a loan, reclassified on every recomputation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoanStatus {
    #[default]
    Active,
    Paid,
    /// Principal is settled (or exceeded) while interest/arrears are still owed.
    Overdue,
}

impl LoanStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LoanStatus::Active => "active",
            LoanStatus::Paid => "paid",
            LoanStatus::Overdue => "overdue",
        }
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(LoanStatus::Active),
            "paid" => Ok(LoanStatus::Paid),
            "overdue" => Ok(LoanStatus::Overdue),
            other => Err(Error::invalid_input(format!("Unknown loan status '{}'", other))),
        }
    }
}

/// Derived accounting state of a loan.
///
/// Only the ledger recomputation produces these values; every field is a
/// function of the loan's principal and its payment history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSnapshot {
    pub balance: Decimal,
    pub total_paid: Decimal,
    pub accrued_interest: Decimal,
    pub accrued_arrears: Decimal,
    pub total_payable: Decimal,
    pub status: LoanStatus,
}

impl LoanSnapshot {
    /// State of a loan with no payments recorded.
    pub fn opening(principal: Decimal) -> Self {
        Self {
            balance: principal,
            total_paid: Decimal::ZERO,
            accrued_interest: Decimal::ZERO,
            accrued_arrears: Decimal::ZERO,
            total_payable: principal,
            status: LoanStatus::Active,
        }
    }

    /// Amounts the next payment is allocated against. Negative values are
    /// treated as nothing pending.
    pub fn pending_buckets(&self) -> PendingBuckets {
        PendingBuckets {
            arrears: self.accrued_arrears.max(Decimal::ZERO),
            interest: self.accrued_interest.max(Decimal::ZERO),
            principal: self.balance.max(Decimal::ZERO),
        }
    }

    /// `total_payable - total_paid`.
    pub fn difference(&self) -> Decimal {
        self.total_payable - self.total_paid
    }
}

/// Domain model representing an installment loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Loan {
    pub id: String,
    /// Borrower reference, opaque to the core.
    pub client_id: String,
    pub principal: Decimal,
    /// Number of scheduled installments.
    pub term: i32,
    pub annual_rate_pct: Decimal,
    pub payment_frequency: String,
    pub arrears_conditions: String,
    pub originated_at: NaiveDateTime,
    pub status: LoanStatus,
    pub balance: Decimal,
    pub total_paid: Decimal,
    pub accrued_interest: Decimal,
    pub accrued_arrears: Decimal,
    pub total_payable: Decimal,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Loan {
    /// The derived fields as currently stored.
    pub fn snapshot(&self) -> LoanSnapshot {
        LoanSnapshot {
            balance: self.balance,
            total_paid: self.total_paid,
            accrued_interest: self.accrued_interest,
            accrued_arrears: self.accrued_arrears,
            total_payable: self.total_payable,
            status: self.status,
        }
    }

    pub fn pending_buckets(&self) -> PendingBuckets {
        self.snapshot().pending_buckets()
    }
}

/// Input model for creating a new loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLoan {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub client_id: String,
    pub principal: Decimal,
    pub term: i32,
    pub annual_rate_pct: Decimal,
    pub payment_frequency: Option<String>,
    pub arrears_conditions: Option<String>,
    pub originated_at: Option<NaiveDateTime>,
}

impl NewLoan {
    /// Validates the new loan terms.
    pub fn validate(&self) -> Result<()> {
        if self.client_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "clientId".to_string(),
            )));
        }
        if self.principal <= Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Loan principal must be positive, got {}",
                self.principal
            )));
        }
        if self.term <= 0 {
            return Err(Error::invalid_input(format!(
                "Loan term must be a positive number of installments, got {}",
                self.term
            )));
        }
        if self.annual_rate_pct < Decimal::ZERO {
            return Err(Error::invalid_input(format!(
                "Annual interest rate cannot be negative, got {}",
                self.annual_rate_pct
            )));
        }
        Ok(())
    }

    /// Builds the stored loan with descriptor defaults applied and the
    /// opening snapshot as its derived state.
    pub fn into_loan(self, id: String, now: NaiveDateTime) -> Loan {
        let opening = LoanSnapshot::opening(self.principal);
        Loan {
            id,
            client_id: self.client_id,
            principal: self.principal,
            term: self.term,
            annual_rate_pct: self.annual_rate_pct,
            payment_frequency: non_blank_or(self.payment_frequency, DEFAULT_PAYMENT_FREQUENCY),
            arrears_conditions: non_blank_or(self.arrears_conditions, DEFAULT_ARREARS_CONDITIONS),
            originated_at: self.originated_at.unwrap_or(now),
            status: opening.status,
            balance: opening.balance,
            total_paid: opening.total_paid,
            accrued_interest: opening.accrued_interest,
            accrued_arrears: opening.accrued_arrears,
            total_payable: opening.total_payable,
            created_at: now,
            updated_at: now,
        }
    }
}

fn non_blank_or(value: Option<String>, default: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Installment figures derived from a loan's static terms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallmentQuote {
    pub loan_id: String,
    pub periodic_interest: Decimal,
    pub expected_installment: Decimal,
    /// `expected_installment` rounded to cents.
    pub expected_installment_rounded: Decimal,
}

/// Portfolio-wide counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_loans: i64,
    pub total_payments: i64,
    pub total_principal: Decimal,
}
