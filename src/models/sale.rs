use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Most units of a single good that may ever be sold
pub const MAX_UNITS_PER_GOOD: i64 = 100;

pub const SALE_CAP_MESSAGE: &str = "Cannot add sale: this product would exceed 100 sales";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Sale {
    pub sale_id: i32,
    pub good_id: i32,
    pub check_no: Option<i32>,
    pub date_sale: NaiveDateTime,
    pub quantity: i32,
}

/// Body of a create-sale request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewSale {
    pub good_id: i32,
    pub check_no: Option<i32>,
    pub quantity: i32,
}

impl NewSale {
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity <= 0 {
            return Err("QUANTITY must be greater than zero".to_string());
        }
        Ok(())
    }

    /// Whether adding this sale keeps the good within [`MAX_UNITS_PER_GOOD`]
    pub fn fits_cap(&self, already_sold: i64) -> bool {
        already_sold + i64::from(self.quantity) <= MAX_UNITS_PER_GOOD
    }
}

/// Row of the most-sold-goods-by-worker function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MostSoldGood {
    #[serde(rename = "GoodName", alias = "goodname")]
    pub good_name: String,
    #[serde(rename = "TotalSold", alias = "totalsold", default)]
    pub total_sold: Option<i64>,
}
