//! Cart pricing: subtotal, loyalty card discounts and the final price.
//!
//! The card percentage is applied first and rounded half-up to cents; the
//! bonus amount is then spent against what remains and can never take the
//! price below zero.

use bigdecimal::{BigDecimal, RoundingMode};

use super::account::ClientCard;
use super::cart::CartLine;

pub const MONEY_SCALE: i64 = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct PriceBreakdown {
    /// Sum of all line totals before any discount.
    pub subtotal: BigDecimal,
    pub card_discount: BigDecimal,
    pub bonus_discount: BigDecimal,
    pub final_price: BigDecimal,
}

pub fn line_total(unit_price: &BigDecimal, amount: i32) -> BigDecimal {
    unit_price * BigDecimal::from(amount)
}

pub fn round_money(value: &BigDecimal) -> BigDecimal {
    value.with_scale_round(MONEY_SCALE, RoundingMode::HalfUp)
}

pub fn price_cart(lines: &[CartLine], card: Option<&ClientCard>) -> PriceBreakdown {
    let subtotal = lines
        .iter()
        .fold(BigDecimal::from(0), |acc, line| acc + line.line_total());
    apply_card(subtotal, card)
}

pub fn apply_card(subtotal: BigDecimal, card: Option<&ClientCard>) -> PriceBreakdown {
    let zero = BigDecimal::from(0);

    let Some(card) = card else {
        return PriceBreakdown {
            final_price: subtotal.clone().max(zero.clone()),
            subtotal,
            card_discount: zero.clone(),
            bonus_discount: zero,
        };
    };

    let card_discount = match &card.percentage {
        Some(p) => {
            let p = p.clone().clamp(zero.clone(), BigDecimal::from(1));
            round_money(&(&subtotal * p))
        }
        None => zero.clone(),
    };

    let remaining = (&subtotal - &card_discount).max(zero.clone());
    let bonus_discount = card
        .bonus_amount
        .clone()
        .max(zero.clone())
        .min(remaining.clone());

    let final_price = (remaining - &bonus_discount).max(zero);

    PriceBreakdown {
        subtotal,
        card_discount,
        bonus_discount,
        final_price,
    }
}
