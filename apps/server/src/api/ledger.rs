use std::sync::Arc;

use crate::{error::ApiResult, main_lib::AppState, models::RecomputeAllResult};
use axum::{extract::State, routing::post, Json, Router};

/// Rebuilds the aggregates of every loan from its payment history.
#[utoipa::path(post, path = "/api/v1/ledger/recompute-all", responses((status = 200, body = RecomputeAllResult)))]
pub async fn recompute_all(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<RecomputeAllResult>> {
    let summary = state.ledger_service.recompute_all().await?;
    Ok(Json(RecomputeAllResult::from(summary)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/ledger/recompute-all", post(recompute_all))
}
