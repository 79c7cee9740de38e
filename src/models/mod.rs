use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub mod good;
pub mod sale;

pub use good::{Good, GoodWithSales, NewGood};
pub use sale::{MostSoldGood, NewSale, Sale};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SetDiscountRequest {
    pub good_name: String,
    pub discount_percentage: i32,
}

/// Plain acknowledgement body
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct InfoResponse {
    pub message: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AveragePriceResponse {
    pub department_id: i32,
    pub average_price: f64,
}
