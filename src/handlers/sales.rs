use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
};

use super::AppState;
use crate::{
    error::{AppError, ErrorResponse, Result},
    extract::AppJson,
    models::{NewSale, Sale, sale::SALE_CAP_MESSAGE},
};

/// Record a sale, keeping each good at or below the lifetime unit cap.
///
/// The cap check, the insert and the audit row are separate backend calls with no
/// transaction around them, so two concurrent sales can both pass the check.
#[utoipa::path(
    post,
    path = "/sales",
    tag = "sales",
    request_body = NewSale,
    responses(
        (status = 201, description = "Sale recorded", body = Sale),
        (status = 400, description = "Cap exceeded or invalid quantity", body = ErrorResponse),
        (status = 500, description = "Backend failure", body = ErrorResponse)
    )
)]
pub async fn create_sale(
    State(state): State<AppState>,
    AppJson(sale): AppJson<NewSale>,
) -> Result<impl IntoResponse> {
    sale.validate().map_err(AppError::BadRequest)?;

    let already_sold = state.store.total_sold(sale.good_id).await?;
    if !sale.fits_cap(already_sold) {
        tracing::debug!(good_id = sale.good_id, already_sold, requested = sale.quantity, "Sale cap reached");
        return Err(AppError::BadRequest(SALE_CAP_MESSAGE.to_string()));
    }

    let sale_id = state.store.insert_sale(&sale).await?;
    state.store.log_sale(sale_id).await?;

    let created = state
        .store
        .get_sale(sale_id)
        .await?
        .ok_or_else(|| AppError::Internal(format!("sale {sale_id} missing right after insert")))?;
    tracing::info!(sale_id, good_id = created.good_id, quantity = created.quantity, "Sale recorded");

    Ok((StatusCode::CREATED, Json(created)))
}
