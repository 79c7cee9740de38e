use axum::{
    Json, Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::handlers::{self, AppState, departments, goods, sales, workers};

#[derive(OpenApi)]
#[openapi(
    info(title = "Shop API", description = "Goods, sales and shop business rules"),
    paths(
        handlers::root,
        goods::list_goods,
        goods::create_good,
        goods::get_good_sales,
        goods::set_discount,
        sales::create_sale,
        workers::most_sold_goods,
        departments::average_price,
    ),
    tags(
        (name = "goods", description = "Catalog items"),
        (name = "sales", description = "Recorded sales"),
        (name = "workers", description = "Per-worker reports"),
        (name = "departments", description = "Per-department reports")
    )
)]
pub struct ApiDoc;

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/openapi.json", get(openapi))
        .route("/goods", get(goods::list_goods).post(goods::create_good))
        .route("/goods/set_discount", post(goods::set_discount))
        .route("/goods/{good_id}/sales", get(goods::get_good_sales))
        .route("/sales", post(sales::create_sale))
        .route("/workers/{worker_name}/most_sold_goods", get(workers::most_sold_goods))
        .route("/departments/{dept_id}/average_price", get(departments::average_price))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
