use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::Document;

/// Collection holding registered warehouse products.
pub const PRODUCTS: &str = "wh-products";

/// A product registration request. Only `name` is required.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub product_code: Option<String>,
    #[serde(default)]
    pub net_weight: Option<String>,
    #[serde(default)]
    pub pack_size: Option<u32>,
    #[serde(default)]
    pub trade_price: Option<Decimal>,
}

impl NewProduct {
    pub fn named(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }
}

/// A registered warehouse product. Names are unique.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub net_weight: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_size: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trade_price: Option<Decimal>,
    pub created_at: DateTime<Utc>,
}

impl Document for Product {
    fn id(&self) -> &str {
        &self.name
    }
}
