use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::{
    error::{AppError, ErrorResponse, Result},
    extract::AppPath,
    models::AveragePriceResponse,
};

#[utoipa::path(
    get,
    path = "/departments/{dept_id}/average_price",
    tag = "departments",
    params(("dept_id" = i32, Path, description = "Department key")),
    responses(
        (status = 200, description = "Average price of the department's goods", body = AveragePriceResponse),
        (status = 404, description = "Department missing or empty", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn average_price(
    State(state): State<AppState>,
    AppPath(dept_id): AppPath<i32>,
) -> Result<impl IntoResponse> {
    let average_price = state
        .store
        .average_price_by_department(dept_id)
        .await?
        .ok_or_else(|| {
            AppError::NotFound("Department not found or no goods in department".to_string())
        })?;

    Ok((
        StatusCode::OK,
        Json(AveragePriceResponse {
            department_id: dept_id,
            average_price,
        }),
    ))
}
