//! Payment waterfall: arrears first, then interest, then principal.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Outstanding amounts a payment can be applied against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PendingBuckets {
    pub arrears: Decimal,
    pub interest: Decimal,
    pub principal: Decimal,
}

/// How a single payment amount was split across the buckets.
///
/// `arrears_applied + interest_applied + principal_applied + remainder == amount`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Allocation {
    pub arrears_applied: Decimal,
    pub interest_applied: Decimal,
    pub principal_applied: Decimal,
    /// Portion of the payment left over after every bucket was satisfied.
    pub remainder: Decimal,
}

impl Allocation {
    /// Sum of the three applied buckets, excluding the remainder.
    pub fn total_applied(&self) -> Decimal {
        self.arrears_applied + self.interest_applied + self.principal_applied
    }
}

/// Distributes `amount` across arrears, interest and principal in strict
/// priority order.
///
/// A later bucket only receives funds once every earlier bucket is fully
/// covered. Nothing is rounded; whatever cannot be applied is returned as
/// `remainder` for the caller to dispose of.
pub fn allocate(
    amount: Decimal,
    pending_arrears: Decimal,
    pending_interest: Decimal,
    pending_principal: Decimal,
) -> Result<Allocation> {
    ensure_non_negative("amount", amount)?;
    ensure_non_negative("pending arrears", pending_arrears)?;
    ensure_non_negative("pending interest", pending_interest)?;
    ensure_non_negative("pending principal", pending_principal)?;

    let mut remaining = amount;
    let arrears_applied = take(&mut remaining, pending_arrears);
    let interest_applied = take(&mut remaining, pending_interest);
    let principal_applied = take(&mut remaining, pending_principal);

    let allocation = Allocation {
        arrears_applied,
        interest_applied,
        principal_applied,
        remainder: remaining,
    };
    debug!("Allocated payment of {}: {:?}", amount, allocation);
    Ok(allocation)
}

/// [`allocate`] against a bucket set.
pub fn allocate_against(amount: Decimal, pending: &PendingBuckets) -> Result<Allocation> {
    allocate(amount, pending.arrears, pending.interest, pending.principal)
}

fn take(remaining: &mut Decimal, pending: Decimal) -> Decimal {
    if *remaining <= Decimal::ZERO || pending <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    let applied = (*remaining).min(pending);
    *remaining -= applied;
    applied
}

fn ensure_non_negative(field: &str, value: Decimal) -> Result<()> {
    if value < Decimal::ZERO {
        return Err(Error::invalid_input(format!(
            "{} cannot be negative, got {}",
            field, value
        )));
    }
    Ok(())
}
