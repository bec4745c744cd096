use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::sqlite::SqliteConnection;
use log::debug;
use std::sync::Arc;
use uuid::Uuid;

use loanbook_core::errors::{DatabaseError, Error, Result};
use loanbook_core::loans::{Loan, LoanRepositoryTrait, LoanSnapshot, NewLoan};

use super::model::LoanDB;
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::loans;
use crate::schema::loans::dsl::*;

/// Repository for loans and their stored aggregates.
pub struct LoanRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl LoanRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        Self { pool, writer }
    }
}

fn to_domain(rows: Vec<LoanDB>) -> Result<Vec<Loan>> {
    rows.into_iter()
        .map(|row| Loan::try_from(row).map_err(Error::from))
        .collect()
}

#[async_trait]
impl LoanRepositoryTrait for LoanRepository {
    async fn create(&self, new_loan: NewLoan) -> Result<Loan> {
        new_loan.validate()?;

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Loan> {
                let loan_id = new_loan
                    .id
                    .clone()
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| Uuid::new_v4().to_string());
                let loan = new_loan.into_loan(loan_id, Utc::now().naive_utc());

                diesel::insert_into(loans::table)
                    .values(LoanDB::from(&loan))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(loan)
            })
            .await
    }

    fn find_by_id(&self, loan_id: &str) -> Result<Option<Loan>> {
        let mut conn = get_connection(&self.pool)?;
        let row = loans
            .find(loan_id)
            .select(LoanDB::as_select())
            .first::<LoanDB>(&mut conn)
            .optional()
            .into_core()?;
        row.map(|r| Loan::try_from(r).map_err(Error::from))
            .transpose()
    }

    fn list(&self, client: Option<&str>) -> Result<Vec<Loan>> {
        let mut conn = get_connection(&self.pool)?;
        let mut query = loans
            .select(LoanDB::as_select())
            .order((created_at.desc(), id.asc()))
            .into_boxed();
        if let Some(client) = client {
            query = query.filter(client_id.eq(client.to_string()));
        }
        let rows = query.load::<LoanDB>(&mut conn).into_core()?;
        to_domain(rows)
    }

    fn list_page(&self, offset: i64, limit: i64) -> Result<Vec<Loan>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = loans
            .select(LoanDB::as_select())
            .order((created_at.desc(), id.asc()))
            .offset(offset)
            .limit(limit)
            .load::<LoanDB>(&mut conn)
            .into_core()?;
        to_domain(rows)
    }

    fn count(&self) -> Result<i64> {
        let mut conn = get_connection(&self.pool)?;
        loans.count().get_result::<i64>(&mut conn).into_core()
    }

    async fn update_aggregates(&self, loan_id: &str, snapshot: LoanSnapshot) -> Result<Loan> {
        let loan_id = loan_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Loan> {
                let updated = diesel::update(loans.find(&loan_id))
                    .set((
                        balance.eq(snapshot.balance.to_string()),
                        total_paid.eq(snapshot.total_paid.to_string()),
                        accrued_interest.eq(snapshot.accrued_interest.to_string()),
                        accrued_arrears.eq(snapshot.accrued_arrears.to_string()),
                        total_payable.eq(snapshot.total_payable.to_string()),
                        status.eq(snapshot.status.as_str()),
                        updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                if updated == 0 {
                    return Err(Error::Database(DatabaseError::NotFound(format!(
                        "Loan {}",
                        loan_id
                    ))));
                }
                debug!("Stored aggregates of loan {}: {:?}", loan_id, snapshot);

                let row = loans
                    .find(&loan_id)
                    .select(LoanDB::as_select())
                    .first::<LoanDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Loan::try_from(row)?)
            })
            .await
    }
}
