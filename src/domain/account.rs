use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use uuid::Uuid;

use super::errors::UnknownVariant;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: Uuid,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardType {
    Bonus,
    Social,
    Gold,
}

impl CardType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CardType::Bonus => "BONUS",
            CardType::Social => "SOCIAL",
            CardType::Gold => "GOLD",
        }
    }
}

impl fmt::Display for CardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CardType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "BONUS" => Ok(CardType::Bonus),
            "SOCIAL" => Ok(CardType::Social),
            "GOLD" => Ok(CardType::Gold),
            other => Err(UnknownVariant {
                kind: "card type",
                value: other.to_string(),
            }),
        }
    }
}

/// Loyalty card owned by a user. Read-only input to pricing.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientCard {
    pub id: Uuid,
    pub card_type: CardType,
    pub bonus_amount: BigDecimal,
    /// Fraction of the subtotal taken off, `0.05` meaning five percent.
    /// `None` for card types without a percentage discount.
    pub percentage: Option<BigDecimal>,
}

#[derive(Debug, Clone)]
pub struct AccountDetails {
    pub user: User,
    pub card: Option<ClientCard>,
    pub cart: super::cart::PricedCart,
}
