use std::sync::Arc;

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{NewPayment, PageQuery, PaymentPage, PaymentReceipt},
};
use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use loanbook_core::utils::pagination::PageRequest;

#[utoipa::path(
    post,
    path = "/api/v1/payments",
    request_body = NewPayment,
    responses(
        (status = 200, body = PaymentReceipt),
        (status = 400, description = "Invalid amount or missing field"),
        (status = 404, description = "Unknown loan"),
    )
)]
pub async fn submit_payment(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<NewPayment>,
) -> ApiResult<Json<PaymentReceipt>> {
    let receipt = state.payment_service.submit_payment(payload.into()).await?;
    Ok(Json(receipt.into()))
}

#[utoipa::path(get, path = "/api/v1/payments/paginated", params(PageQuery), responses((status = 200, body = PaymentPage)))]
pub async fn list_payments_paginated(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PageQuery>,
) -> ApiResult<Json<PaymentPage>> {
    let request = PageRequest::from_query(query.page, query.limit, state.page_limit_max);
    let page = state.payment_service.list_payments_page(request)?;
    Ok(Json(page.into()))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/payments", post(submit_payment))
        .route("/payments/paginated", get(list_payments_paginated))
}
