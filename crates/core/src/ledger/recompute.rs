//! Rebuilds a loan's derived fields from its full payment history.
//!
//! The summation is order-independent and never incremental: calling it
//! twice over the same history yields the same snapshot.

use log::{debug, warn};
use rust_decimal::Decimal;

use crate::errors::{Error, Result};
use crate::loans::{LoanSnapshot, LoanStatus};
use crate::payments::Payment;

#[derive(Debug, Default)]
struct HistoryTotals {
    total_paid: Decimal,
    accrued_interest: Decimal,
    accrued_arrears: Decimal,
    principal_applied: Decimal,
}

/// Derives the aggregate snapshot of a loan from `initial_principal` and
/// every payment recorded against it.
pub fn summarize_history(initial_principal: Decimal, payments: &[Payment]) -> Result<LoanSnapshot> {
    let mut totals = HistoryTotals::default();
    for payment in payments {
        if !payment.has_consistent_breakdown() {
            warn!(
                "Payment {} on loan {} applies {} out of an amount of {}",
                payment.id,
                payment.loan_id,
                payment.total_applied(),
                payment.amount
            );
        }
        totals.total_paid = checked_sum(totals.total_paid, payment.amount)?;
        totals.accrued_interest = checked_sum(totals.accrued_interest, payment.interest_applied)?;
        totals.accrued_arrears = checked_sum(totals.accrued_arrears, payment.arrears_applied)?;
        totals.principal_applied =
            checked_sum(totals.principal_applied, payment.principal_applied)?;
    }

    let balance = initial_principal
        .checked_sub(totals.principal_applied)
        .ok_or_else(|| overflow("balance"))?;
    let total_payable = initial_principal
        .checked_add(totals.accrued_interest)
        .and_then(|v| v.checked_add(totals.accrued_arrears))
        .ok_or_else(|| overflow("total payable"))?;
    let difference = total_payable
        .checked_sub(totals.total_paid)
        .ok_or_else(|| overflow("outstanding difference"))?;

    let snapshot = LoanSnapshot {
        balance,
        total_paid: totals.total_paid,
        accrued_interest: totals.accrued_interest,
        accrued_arrears: totals.accrued_arrears,
        total_payable,
        status: classify_status(difference, balance),
    };
    debug!(
        "Summarized {} payments: {:?} (difference {})",
        payments.len(),
        snapshot,
        difference
    );
    Ok(snapshot)
}

/// Status rule, evaluated in order: nothing left to pay is `paid`; otherwise
/// outstanding principal means `active`; anything else is `overdue`.
pub fn classify_status(difference: Decimal, balance: Decimal) -> LoanStatus {
    if difference <= Decimal::ZERO {
        LoanStatus::Paid
    } else if balance > Decimal::ZERO {
        LoanStatus::Active
    } else {
        LoanStatus::Overdue
    }
}

fn checked_sum(acc: Decimal, value: Decimal) -> Result<Decimal> {
    acc.checked_add(value).ok_or_else(|| overflow("payment totals"))
}

fn overflow(what: &str) -> Error {
    Error::invalid_input(format!("Payment history overflows the {}", what))
}
