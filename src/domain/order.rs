use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::cart::LineItemView;
use super::checkout::DeliveryType;
use super::pricing;

pub const STATUS_PLACED: &str = "PLACED";

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub id: Uuid,
    pub item: LineItemView,
    pub unit_price: BigDecimal,
    pub amount: i32,
}

impl OrderLineView {
    pub fn line_total(&self) -> BigDecimal {
        pricing::line_total(&self.unit_price, self.amount)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryView {
    pub id: Uuid,
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub post_office_number: Option<i32>,
    pub price: BigDecimal,
}

#[derive(Debug, Clone)]
pub struct OrderView {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub delivery: DeliveryView,
    pub packing_id: Option<Uuid>,
    pub subtotal: BigDecimal,
    pub card_discount: BigDecimal,
    pub bonus_discount: BigDecimal,
    pub packing_price: BigDecimal,
    pub total_price: BigDecimal,
    pub lines: Vec<OrderLineView>,
}

#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub id: Uuid,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub total_price: BigDecimal,
}
