use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::sale::Sale;

/// Catalog item as stored in the goods table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct Good {
    pub good_id: i32,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i32,
    pub producer: Option<String>,
    pub dept_id: i32,
    pub description: Option<String>,
}

/// Body of a create-good request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub struct NewGood {
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub price: Decimal,
    pub quantity: i32,
    pub producer: Option<String>,
    pub dept_id: i32,
    pub description: Option<String>,
}

impl NewGood {
    /// Reject values the goods table would never hold
    pub fn validate(&self) -> Result<(), String> {
        if self.quantity < 0 {
            return Err("QUANTITY must not be negative".to_string());
        }
        if self.price.is_sign_negative() {
            return Err("PRICE must not be negative".to_string());
        }
        Ok(())
    }

    /// Merge the submitted fields with the identity the backend assigned
    pub fn into_good(self, good_id: i32) -> Good {
        Good {
            good_id,
            name: self.name,
            price: self.price,
            quantity: self.quantity,
            producer: self.producer,
            dept_id: self.dept_id,
            description: self.description,
        }
    }
}

/// A good together with every sale recorded against it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GoodWithSales {
    #[serde(flatten)]
    pub good: Good,
    pub sales: Vec<Sale>,
}
