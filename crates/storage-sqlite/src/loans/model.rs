//! Database models for loans.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::StorageError;
use loanbook_core::loans::{Loan, LoanStatus};

/// Parses a money column stored as TEXT.
///
/// Unlike display data, ledger amounts are never defaulted: a value that
/// does not parse is reported as corrupt.
pub(crate) fn parse_money(column: &'static str, value: &str) -> Result<Decimal, StorageError> {
    Decimal::from_str(value).map_err(|_| {
        log::error!("Failed to parse {} '{}' as a decimal", column, value);
        StorageError::InvalidColumn {
            column,
            value: value.to_string(),
        }
    })
}

/// Database model for loans
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::loans)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct LoanDB {
    pub id: String,
    pub client_id: String,
    pub principal: String,
    pub term: i32,
    pub annual_rate_pct: String,
    pub payment_frequency: String,
    pub arrears_conditions: String,
    pub originated_at: NaiveDateTime,
    pub status: String,
    pub balance: String,
    pub total_paid: String,
    pub accrued_interest: String,
    pub accrued_arrears: String,
    pub total_payable: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<LoanDB> for Loan {
    type Error = StorageError;

    fn try_from(db: LoanDB) -> Result<Self, Self::Error> {
        let status = LoanStatus::from_str(&db.status).map_err(|_| StorageError::InvalidColumn {
            column: "loans.status",
            value: db.status.clone(),
        })?;
        Ok(Self {
            principal: parse_money("loans.principal", &db.principal)?,
            annual_rate_pct: parse_money("loans.annual_rate_pct", &db.annual_rate_pct)?,
            balance: parse_money("loans.balance", &db.balance)?,
            total_paid: parse_money("loans.total_paid", &db.total_paid)?,
            accrued_interest: parse_money("loans.accrued_interest", &db.accrued_interest)?,
            accrued_arrears: parse_money("loans.accrued_arrears", &db.accrued_arrears)?,
            total_payable: parse_money("loans.total_payable", &db.total_payable)?,
            status,
            id: db.id,
            client_id: db.client_id,
            term: db.term,
            payment_frequency: db.payment_frequency,
            arrears_conditions: db.arrears_conditions,
            originated_at: db.originated_at,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

impl From<&Loan> for LoanDB {
    fn from(domain: &Loan) -> Self {
        Self {
            id: domain.id.clone(),
            client_id: domain.client_id.clone(),
            principal: domain.principal.to_string(),
            term: domain.term,
            annual_rate_pct: domain.annual_rate_pct.to_string(),
            payment_frequency: domain.payment_frequency.clone(),
            arrears_conditions: domain.arrears_conditions.clone(),
            originated_at: domain.originated_at,
            status: domain.status.as_str().to_string(),
            balance: domain.balance.to_string(),
            total_paid: domain.total_paid.to_string(),
            accrued_interest: domain.accrued_interest.to_string(),
            accrued_arrears: domain.accrued_arrears.to_string(),
            total_payable: domain.total_payable.to_string(),
            created_at: domain.created_at,
            updated_at: domain.updated_at,
        }
    }
}
