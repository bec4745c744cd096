use std::sync::Arc;

use crate::config::Config;
use loanbook_core::{
    ledger::{LedgerService, LedgerServiceTrait, LoanLocks},
    loans::{LoanService, LoanServiceTrait},
    payments::{PaymentService, PaymentServiceTrait},
};
use loanbook_storage_sqlite::{
    db::{self, write_actor},
    loans::LoanRepository,
    payments::PaymentRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub loan_service: Arc<dyn LoanServiceTrait>,
    pub payment_service: Arc<dyn PaymentServiceTrait>,
    pub ledger_service: Arc<dyn LedgerServiceTrait>,
    pub page_limit_max: i64,
}

pub fn init_tracing(log_format: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let loan_repository = Arc::new(LoanRepository::new(pool.clone(), writer.clone()));
    let payment_repository = Arc::new(PaymentRepository::new(pool.clone(), writer.clone()));

    // The ledger and the payment workflow must share one lock table.
    let ledger_service = Arc::new(LedgerService::new(
        loan_repository.clone(),
        payment_repository.clone(),
        Arc::new(LoanLocks::new()),
    ));
    let payment_service = Arc::new(PaymentService::new(
        loan_repository.clone(),
        payment_repository.clone(),
        ledger_service.clone(),
        config.pending_source,
    ));
    let loan_service = Arc::new(LoanService::new(loan_repository, payment_repository));

    tracing::info!(
        "Payments allocate against pending buckets from {:?}",
        config.pending_source
    );

    Ok(Arc::new(AppState {
        loan_service,
        payment_service,
        ledger_service,
        page_limit_max: config.page_limit_max,
    }))
}
