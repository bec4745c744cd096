//! Database models for payments.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::errors::StorageError;
use crate::loans::{parse_money, LoanDB};
use loanbook_core::payments::{AllocatedPayment, Payment};

/// Database model for payments. Rows are insert-only.
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(LoanDB, foreign_key = loan_id))]
#[diesel(table_name = crate::schema::payments)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PaymentDB {
    pub id: String,
    pub loan_id: String,
    pub paid_at: NaiveDateTime,
    pub amount: String,
    pub receipt_ref: Option<String>,
    pub recorded_by: String,
    pub arrears_applied: String,
    pub interest_applied: String,
    pub principal_applied: String,
    pub created_at: NaiveDateTime,
}

impl PaymentDB {
    pub(crate) fn from_allocated(id: String, payment: AllocatedPayment, created_at: NaiveDateTime) -> Self {
        Self {
            id,
            loan_id: payment.loan_id,
            paid_at: payment.paid_at,
            amount: payment.amount.to_string(),
            receipt_ref: payment.receipt_ref,
            recorded_by: payment.recorded_by,
            arrears_applied: payment.arrears_applied.to_string(),
            interest_applied: payment.interest_applied.to_string(),
            principal_applied: payment.principal_applied.to_string(),
            created_at,
        }
    }
}

impl TryFrom<PaymentDB> for Payment {
    type Error = StorageError;

    fn try_from(db: PaymentDB) -> Result<Self, Self::Error> {
        Ok(Self {
            amount: parse_money("payments.amount", &db.amount)?,
            arrears_applied: parse_money("payments.arrears_applied", &db.arrears_applied)?,
            interest_applied: parse_money("payments.interest_applied", &db.interest_applied)?,
            principal_applied: parse_money("payments.principal_applied", &db.principal_applied)?,
            id: db.id,
            loan_id: db.loan_id,
            paid_at: db.paid_at,
            receipt_ref: db.receipt_ref,
            recorded_by: db.recorded_by,
            created_at: db.created_at,
        })
    }
}
