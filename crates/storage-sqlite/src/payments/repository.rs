use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use std::sync::Arc;
use uuid::Uuid;

use loanbook_core::errors::{Error, Result};
use loanbook_core::payments::{AllocatedPayment, Payment, PaymentRepositoryTrait};

use super::model::PaymentDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::payments;
use crate::schema::payments::dsl::*;

/// Append-only payment store.
pub struct PaymentRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl PaymentRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn to_domain(rows: Vec<PaymentDB>) -> Result<Vec<Payment>> {
    rows.into_iter()
        .map(|row| Payment::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl PaymentRepositoryTrait for PaymentRepository {
    async fn create(&self, payment: AllocatedPayment) -> Result<Payment> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Payment> {
                let row = PaymentDB::from_allocated(
                    Uuid::new_v4().to_string(),
                    payment,
                    Utc::now().naive_utc(),
                );
                diesel::insert_into(payments::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(Payment::try_from(row)?)
            })
            .await
    }

    fn list_by_loan(&self, target_loan_id: &str) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payments
            .filter(loan_id.eq(target_loan_id))
            .select(PaymentDB::as_select())
            .order((paid_at.asc(), created_at.asc()))
            .load::<PaymentDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Payment>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = payments
            .select(PaymentDB::as_select())
            .order((created_at.desc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .load::<PaymentDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        payments.count().get_result::<i64>(&mut conn).into_core()
    }
}
