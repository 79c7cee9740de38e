use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::{
    error::{ErrorResponse, Result},
    extract::AppPath,
    models::MostSoldGood,
};

/// Most sold goods in the department of a worker
#[utoipa::path(
    get,
    path = "/workers/{worker_name}/most_sold_goods",
    tag = "workers",
    params(("worker_name" = String, Path, description = "Worker name")),
    responses(
        (status = 200, description = "Goods with units sold, possibly empty", body = Vec<MostSoldGood>),
        (status = 404, description = "Backend reported no sales", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn most_sold_goods(
    State(state): State<AppState>,
    AppPath(worker_name): AppPath<String>,
) -> Result<impl IntoResponse> {
    let goods = state.store.most_sold_goods_by_worker(&worker_name).await?;
    Ok((StatusCode::OK, Json(goods)))
}
