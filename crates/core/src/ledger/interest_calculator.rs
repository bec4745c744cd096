//! Periodic interest and expected installment formulas.
//!
//! The nominal annual rate is split into `PERIODS_PER_YEAR` equal payment
//! periods. Results carry full decimal precision; use [`round_money`] at the
//! persistence or display boundary when a currency amount is needed.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::{MONEY_DECIMAL_PRECISION, PERIODIC_RATE_DIVISOR};
use crate::errors::{Error, Result};

/// Interest charged for one payment period:
/// `capital × (annual_rate_pct / 100) × (1 / 24)`.
pub fn periodic_interest(capital: Decimal, annual_rate_pct: Decimal) -> Result<Decimal> {
    validate_capital_and_rate(capital, annual_rate_pct)?;
    capital
        .checked_mul(annual_rate_pct)
        .map(|scaled| scaled / PERIODIC_RATE_DIVISOR)
        .ok_or_else(|| overflow("periodic interest"))
}

/// Installment due per period: the straight-line principal share plus the
/// periodic interest.
pub fn expected_installment(capital: Decimal, term: i32, annual_rate_pct: Decimal) -> Result<Decimal> {
    if term <= 0 {
        return Err(Error::invalid_input(format!(
            "Loan term must be a positive number of installments, got {}",
            term
        )));
    }
    let interest = periodic_interest(capital, annual_rate_pct)?;
    (capital / Decimal::from(term))
        .checked_add(interest)
        .ok_or_else(|| overflow("expected installment"))
}

/// Rounds a money amount to cents, midpoint away from zero.
pub fn round_money(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(MONEY_DECIMAL_PRECISION, RoundingStrategy::MidpointAwayFromZero)
}

fn overflow(what: &str) -> Error {
    Error::invalid_input(format!("Loan terms are too large to compute the {}", what))
}

fn validate_capital_and_rate(capital: Decimal, annual_rate_pct: Decimal) -> Result<()> {
    if capital < Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Capital cannot be negative, got {}",
            capital
        )));
    }
    if annual_rate_pct < Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "Annual interest rate cannot be negative, got {}",
            annual_rate_pct
        )));
    }
    Ok(())
}
