//! JSON shapes shared by several handlers. Money is always rendered as a
//! decimal string with two fraction digits.

use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::cart::{CartLine, LineItemView, PricedCart};
use crate::domain::checkout::DeliveryType;
use crate::domain::order::{OrderLineView, OrderView};
use crate::domain::pricing::round_money;

/// Render `value` rounded half-up to cents, always with two fraction digits
/// (`0` becomes `"0.00"`).
pub fn money(value: &BigDecimal) -> String {
    let cents = (round_money(value) * BigDecimal::from(100)).with_scale(0);
    let digits = cents.as_bigint_and_exponent().0.to_string();
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(abs) => ("-", abs),
        None => ("", digits.as_str()),
    };
    let padded = format!("{digits:0>3}");
    let (units, fraction) = padded.split_at(padded.len() - 2);
    format!("{sign}{units}.{fraction}")
}

// ── Pagination ───────────────────────────────────────────────────────────────

pub const MAX_PAGE_SIZE: i64 = 100;

pub fn default_page() -> i64 {
    1
}

pub fn default_limit() -> i64 {
    20
}

/// Clamp client supplied paging to `page >= 1` and `1..=MAX_PAGE_SIZE`.
pub fn clamp_paging(page: i64, limit: i64) -> (i64, i64) {
    (page.max(1), limit.clamp(1, MAX_PAGE_SIZE))
}

// ── Line items ───────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LineItemResponse {
    #[serde(rename_all = "camelCase")]
    Flower {
        flower_id: Uuid,
        flower_name: String,
        colour_id: Uuid,
        colour_name: String,
    },
    #[serde(rename_all = "camelCase")]
    Collection {
        collection_id: Uuid,
        collection_name: String,
        packing_id: Uuid,
        packing_name: String,
    },
}

impl From<LineItemView> for LineItemResponse {
    fn from(item: LineItemView) -> Self {
        match item {
            LineItemView::Flower {
                flower_id,
                flower_name,
                colour_id,
                colour_name,
            } => LineItemResponse::Flower {
                flower_id,
                flower_name,
                colour_id,
                colour_name,
            },
            LineItemView::Collection {
                collection_id,
                collection_name,
                packing_id,
                packing_name,
            } => LineItemResponse::Collection {
                collection_id,
                collection_name,
                packing_id,
                packing_name,
            },
        }
    }
}

// ── Cart ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub item: LineItemResponse,
    pub image_url: Option<String>,
    pub unit_price: String,
    pub amount: i32,
    pub line_total: String,
}

impl From<CartLine> for CartLineResponse {
    fn from(line: CartLine) -> Self {
        let line_total = money(&line.line_total());
        CartLineResponse {
            id: line.id,
            item: line.item.into(),
            image_url: line.image_url,
            unit_price: money(&line.unit_price),
            amount: line.amount,
            line_total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartView {
    /// `null` until the first item is added.
    pub id: Option<Uuid>,
    pub lines: Vec<CartLineResponse>,
    pub total_price_without_discount: String,
    pub card_discount: String,
    pub bonus_discount: String,
    pub final_price: String,
}

impl From<PricedCart> for CartView {
    fn from(cart: PricedCart) -> Self {
        CartView {
            id: cart.cart_id,
            lines: cart.lines.into_iter().map(CartLineResponse::from).collect(),
            total_price_without_discount: money(&cart.pricing.subtotal),
            card_discount: money(&cart.pricing.card_discount),
            bonus_discount: money(&cart.pricing.bonus_discount),
            final_price: money(&cart.pricing.final_price),
        }
    }
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DeliveryTypeDto {
    PostOffice,
    Courier,
    SelfPickUp,
}

impl From<DeliveryTypeDto> for DeliveryType {
    fn from(dto: DeliveryTypeDto) -> Self {
        match dto {
            DeliveryTypeDto::PostOffice => DeliveryType::PostOffice,
            DeliveryTypeDto::Courier => DeliveryType::Courier,
            DeliveryTypeDto::SelfPickUp => DeliveryType::SelfPickUp,
        }
    }
}

impl From<DeliveryType> for DeliveryTypeDto {
    fn from(t: DeliveryType) -> Self {
        match t {
            DeliveryType::PostOffice => DeliveryTypeDto::PostOffice,
            DeliveryType::Courier => DeliveryTypeDto::Courier,
            DeliveryType::SelfPickUp => DeliveryTypeDto::SelfPickUp,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryResponse {
    pub id: Uuid,
    pub delivery_type: DeliveryTypeDto,
    pub address: Option<String>,
    pub post_office_number: Option<i32>,
    pub price: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderLineResponse {
    pub id: Uuid,
    #[serde(flatten)]
    pub item: LineItemResponse,
    pub unit_price: String,
    pub amount: i32,
    pub line_total: String,
}

impl From<OrderLineView> for OrderLineResponse {
    fn from(line: OrderLineView) -> Self {
        let line_total = money(&line.line_total());
        OrderLineResponse {
            id: line.id,
            item: line.item.into(),
            unit_price: money(&line.unit_price),
            amount: line.amount,
            line_total,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: Uuid,
    pub status: String,
    pub created_at: String,
    pub delivery: DeliveryResponse,
    pub packing_id: Option<Uuid>,
    pub total_price_without_discount: String,
    pub card_discount: String,
    pub bonus_discount: String,
    pub packing_price: String,
    pub total_price: String,
    pub lines: Vec<OrderLineResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            id: o.id,
            status: o.status,
            created_at: o.created_at.to_rfc3339(),
            delivery: DeliveryResponse {
                id: o.delivery.id,
                delivery_type: o.delivery.delivery_type.into(),
                address: o.delivery.address,
                post_office_number: o.delivery.post_office_number,
                price: money(&o.delivery.price),
            },
            packing_id: o.packing_id,
            total_price_without_discount: money(&o.subtotal),
            card_discount: money(&o.card_discount),
            bonus_discount: money(&o.bonus_discount),
            packing_price: money(&o.packing_price),
            total_price: money(&o.total_price),
            lines: o.lines.into_iter().map(OrderLineResponse::from).collect(),
        }
    }
}
