//! Checkout state machine.
//!
//! A checkout attempt starts as a [`Draft`] (the cart holds at least one
//! line), becomes [`Validated`] once the delivery details and packing pass
//! their rules, and is finally turned into an [`OrderDraft`] that the
//! repository persists in a single transaction. Any failure on the way is a
//! rejection and leaves the cart untouched.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::account::ClientCard;
use super::cart::{CartLine, CartSnapshot};
use super::catalogue::Packing;
use super::errors::{DomainError, FieldError, UnknownVariant};
use super::pricing::{self, PriceBreakdown};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryType {
    PostOffice,
    Courier,
    SelfPickUp,
}

impl DeliveryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryType::PostOffice => "POST_OFFICE",
            DeliveryType::Courier => "COURIER",
            DeliveryType::SelfPickUp => "SELF_PICK_UP",
        }
    }

    pub fn requires_address(&self) -> bool {
        matches!(self, DeliveryType::PostOffice | DeliveryType::Courier)
    }

    pub fn requires_post_office_number(&self) -> bool {
        matches!(self, DeliveryType::PostOffice)
    }
}

impl fmt::Display for DeliveryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "POST_OFFICE" => Ok(DeliveryType::PostOffice),
            "COURIER" => Ok(DeliveryType::Courier),
            "SELF_PICK_UP" => Ok(DeliveryType::SelfPickUp),
            other => Err(UnknownVariant {
                kind: "delivery type",
                value: other.to_string(),
            }),
        }
    }
}

/// Delivery price per delivery type.
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryTariffs {
    pub post_office: BigDecimal,
    pub courier: BigDecimal,
    pub self_pick_up: BigDecimal,
}

impl DeliveryTariffs {
    pub fn price_for(&self, delivery_type: DeliveryType) -> &BigDecimal {
        match delivery_type {
            DeliveryType::PostOffice => &self.post_office,
            DeliveryType::Courier => &self.courier,
            DeliveryType::SelfPickUp => &self.self_pick_up,
        }
    }
}

/// What the customer submits to place an order.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub post_office_number: Option<i32>,
    pub packing_id: Option<Uuid>,
}

/// Everything read under the checkout lock that the state machine needs.
#[derive(Debug, Clone)]
pub struct CheckoutContext {
    pub cart: CartSnapshot,
    pub card: Option<ClientCard>,
    /// The packing named by the request, if it exists.
    pub packing: Option<Packing>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutState {
    Draft,
    Validated,
    Placed,
    Rejected,
}

impl fmt::Display for CheckoutState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CheckoutState::Draft => "draft",
            CheckoutState::Validated => "validated",
            CheckoutState::Placed => "placed",
            CheckoutState::Rejected => "rejected",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone)]
pub struct Draft {
    lines: Vec<CartLine>,
}

impl Draft {
    pub fn new(cart: CartSnapshot) -> Result<Self, DomainError> {
        if cart.is_empty() {
            return Err(DomainError::EmptyCart);
        }
        Ok(Self { lines: cart.lines })
    }

    pub fn state(&self) -> CheckoutState {
        CheckoutState::Draft
    }

    /// Check the delivery details and packing choice, collecting every
    /// problem rather than stopping at the first.
    pub fn validate(
        self,
        request: &CheckoutRequest,
        packing: Option<Packing>,
    ) -> Result<Validated, DomainError> {
        let mut errors = Vec::new();
        let delivery_type = request.delivery_type;

        let address = request
            .address
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        if delivery_type.requires_address() && address.is_none() {
            errors.push(FieldError::new(
                "address",
                format!("is required for {delivery_type} delivery"),
            ));
        }

        let post_office_number = if delivery_type.requires_post_office_number() {
            match request.post_office_number {
                Some(n) if n > 0 => Some(n),
                Some(_) => {
                    errors.push(FieldError::new(
                        "postOfficeNumber",
                        "must be a positive number",
                    ));
                    None
                }
                None => {
                    errors.push(FieldError::new(
                        "postOfficeNumber",
                        format!("is required for {delivery_type} delivery"),
                    ));
                    None
                }
            }
        } else {
            None
        };

        match (request.packing_id, &packing) {
            (Some(id), None) => {
                errors.push(FieldError::new("packingId", format!("unknown packing {id}")));
            }
            (None, _) if self.lines.iter().any(|l| l.item.is_flower()) => {
                errors.push(FieldError::new(
                    "packingId",
                    "is required when the cart contains flowers",
                ));
            }
            _ => {}
        }

        if !errors.is_empty() {
            return Err(DomainError::Validation(errors));
        }

        Ok(Validated {
            lines: self.lines,
            delivery_type,
            address: if delivery_type.requires_address() {
                address
            } else {
                None
            },
            post_office_number,
            packing,
        })
    }
}

#[derive(Debug, Clone)]
pub struct Validated {
    lines: Vec<CartLine>,
    delivery_type: DeliveryType,
    address: Option<String>,
    post_office_number: Option<i32>,
    packing: Option<Packing>,
}

impl Validated {
    pub fn state(&self) -> CheckoutState {
        CheckoutState::Validated
    }

    /// Price the cart and fix every amount of the order to be placed.
    pub fn into_order(self, card: Option<&ClientCard>, tariffs: &DeliveryTariffs) -> OrderDraft {
        let pricing = pricing::price_cart(&self.lines, card);
        let delivery_price = tariffs.price_for(self.delivery_type).clone();
        let packing_price = self
            .packing
            .as_ref()
            .map(|p| p.price.clone())
            .unwrap_or_else(|| BigDecimal::from(0));
        let total_price = &pricing.final_price + &packing_price + &delivery_price;

        OrderDraft {
            lines: self.lines,
            delivery: NewDelivery {
                delivery_type: self.delivery_type,
                address: self.address,
                post_office_number: self.post_office_number,
                price: delivery_price,
            },
            packing: self.packing,
            pricing,
            packing_price,
            total_price,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewDelivery {
    pub delivery_type: DeliveryType,
    pub address: Option<String>,
    pub post_office_number: Option<i32>,
    pub price: BigDecimal,
}

/// A fully priced order ready to be persisted. Amounts are final.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub lines: Vec<CartLine>,
    pub delivery: NewDelivery,
    pub packing: Option<Packing>,
    pub pricing: PriceBreakdown,
    pub packing_price: BigDecimal,
    pub total_price: BigDecimal,
}
