use std::sync::Arc;

use crate::{config::Config, main_lib::AppState, models};
use axum::{http::HeaderValue, routing::get, Json, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

mod calculator;
mod dashboard;
mod ledger;
mod loans;
mod payments;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        loans::list_loans,
        loans::create_loan,
        loans::list_loans_paginated,
        loans::get_loan,
        loans::get_installment_quote,
        loans::recompute_loan,
        loans::list_loan_payments,
        payments::submit_payment,
        payments::list_payments_paginated,
        ledger::recompute_all,
        calculator::allocate_payment,
        calculator::calculate_installment,
        dashboard::get_dashboard_stats,
    ),
    components(schemas(
        models::Loan,
        models::LoanStatus,
        models::NewLoan,
        models::LoanSnapshot,
        models::InstallmentQuote,
        models::DashboardStats,
        models::Payment,
        models::NewPayment,
        models::PaymentReceipt,
        models::AllocationRequest,
        models::Allocation,
        models::InstallmentRequest,
        models::InstallmentCalculation,
        models::RecomputeAllResult,
        models::PageInfo,
        models::LoanPage,
        models::PaymentPage,
    )),
    tags((name = "loanbook"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{}'", o);
                    None
                }
            })
            .collect::<Vec<_>>();
        CorsLayer::new().allow_origin(origins)
    };
    let cors = cors.allow_methods(Any).allow_headers(Any);

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/openapi.json", get(move || async move { Json(openapi) }))
        .merge(loans::router())
        .merge(payments::router())
        .merge(ledger::router())
        .merge(calculator::router())
        .merge(dashboard::router())
        .with_state(state);

    Router::new()
        .nest("/api/v1", api)
        .layer(cors)
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
