use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::{
    error::{AppError, ErrorResponse, Result},
    extract::{AppJson, AppPath},
    models::{Good, GoodWithSales, MessageResponse, NewGood, SetDiscountRequest},
};

pub const WEEKEND_MESSAGE: &str = "You cannot create goods at Saturday or Sunday";

/// List every good
#[utoipa::path(
    get,
    path = "/goods",
    tag = "goods",
    responses(
        (status = 200, description = "All goods", body = Vec<Good>),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn list_goods(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let goods = state.store.list_goods().await?;
    Ok((StatusCode::OK, Json(goods)))
}

/// Create a good. Refused on Saturday and Sunday.
#[utoipa::path(
    post,
    path = "/goods",
    tag = "goods",
    request_body = NewGood,
    responses(
        (status = 201, description = "Good created", body = Good),
        (status = 400, description = "Weekend or invalid values", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn create_good(
    State(state): State<AppState>,
    AppJson(good): AppJson<NewGood>,
) -> Result<impl IntoResponse> {
    if state.clock.is_weekend() {
        return Err(AppError::BadRequest(WEEKEND_MESSAGE.to_string()));
    }
    good.validate().map_err(AppError::BadRequest)?;

    let good_id = state.store.insert_good(&good).await?;
    tracing::info!(good_id, name = %good.name, "Good created");

    Ok((StatusCode::CREATED, Json(good.into_good(good_id))))
}

/// Get a good together with its sales
#[utoipa::path(
    get,
    path = "/goods/{good_id}/sales",
    tag = "goods",
    params(("good_id" = i32, Path, description = "Good identity")),
    responses(
        (status = 200, description = "Good and its sales", body = GoodWithSales),
        (status = 404, description = "Good not found", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn get_good_sales(
    State(state): State<AppState>,
    AppPath(good_id): AppPath<i32>,
) -> Result<impl IntoResponse> {
    let good = state
        .store
        .get_good(good_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Good not found".to_string()))?;

    let sales = state.store.sales_for_good(good_id).await?;

    Ok((StatusCode::OK, Json(GoodWithSales { good, sales })))
}

/// Set the discount description of a good through the backend procedure
#[utoipa::path(
    post,
    path = "/goods/set_discount",
    tag = "goods",
    request_body = SetDiscountRequest,
    responses(
        (status = 200, description = "Discount set", body = MessageResponse),
        (status = 400, description = "Rejected by a business rule", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn set_discount(
    State(state): State<AppState>,
    AppJson(request): AppJson<SetDiscountRequest>,
) -> Result<impl IntoResponse> {
    state
        .store
        .set_discount(&request.good_name, request.discount_percentage)
        .await?;

    Ok((
        StatusCode::OK,
        Json(MessageResponse {
            message: format!(
                "Discount set for '{}' to {}%",
                request.good_name, request.discount_percentage
            ),
        }),
    ))
}
