use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::DomainError;
use super::pricing::{self, PriceBreakdown};

/// What a cart line refers to. Flower lines are keyed by `(flower, colour)`,
/// collection lines by `(collection, packing)`; adding an existing key sums
/// the amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineItem {
    Flower { flower_id: Uuid, colour_id: Uuid },
    Collection { collection_id: Uuid, packing_id: Uuid },
}

/// A line item joined with the catalogue names it refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineItemView {
    Flower {
        flower_id: Uuid,
        flower_name: String,
        colour_id: Uuid,
        colour_name: String,
    },
    Collection {
        collection_id: Uuid,
        collection_name: String,
        packing_id: Uuid,
        packing_name: String,
    },
}

impl LineItemView {
    pub fn is_flower(&self) -> bool {
        matches!(self, LineItemView::Flower { .. })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    pub id: Uuid,
    pub item: LineItemView,
    pub image_url: Option<String>,
    pub unit_price: BigDecimal,
    pub amount: i32,
}

impl CartLine {
    pub fn line_total(&self) -> BigDecimal {
        pricing::line_total(&self.unit_price, self.amount)
    }
}

/// Hydrated cart contents as stored. `cart_id` is `None` until the first add.
#[derive(Debug, Clone, Default)]
pub struct CartSnapshot {
    pub cart_id: Option<Uuid>,
    pub lines: Vec<CartLine>,
}

impl CartSnapshot {
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn has_flower_lines(&self) -> bool {
        self.lines.iter().any(|l| l.item.is_flower())
    }
}

/// Cart contents with freshly computed totals.
#[derive(Debug, Clone)]
pub struct PricedCart {
    pub cart_id: Option<Uuid>,
    pub lines: Vec<CartLine>,
    pub pricing: PriceBreakdown,
}

impl PricedCart {
    pub fn new(snapshot: CartSnapshot, card: Option<&super::account::ClientCard>) -> Self {
        let pricing = pricing::price_cart(&snapshot.lines, card);
        Self {
            cart_id: snapshot.cart_id,
            lines: snapshot.lines,
            pricing,
        }
    }
}

/// Most items a single cart line may hold, after merging repeated adds.
pub const MAX_LINE_AMOUNT: i32 = 9_999;

pub fn validate_amount(amount: i32) -> Result<(), DomainError> {
    if amount <= 0 || amount > MAX_LINE_AMOUNT {
        return Err(DomainError::InvalidAmount(amount));
    }
    Ok(())
}

/// Amount of a line after adding `added` to its `existing` amount.
pub fn merge_amount(existing: i32, added: i32) -> Result<i32, DomainError> {
    existing
        .checked_add(added)
        .filter(|total| *total <= MAX_LINE_AMOUNT)
        .ok_or(DomainError::InvalidAmount(added))
}
