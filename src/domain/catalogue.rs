use bigdecimal::BigDecimal;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub struct Flower {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Colour {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Packing {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

/// Filter applied to flower and collection listings. Every bound is optional
/// and all present bounds must hold.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub name_contains: Option<String>,
    /// Inclusive lower price bound.
    pub min_price: Option<BigDecimal>,
    /// Inclusive upper price bound.
    pub max_price: Option<BigDecimal>,
}

impl ProductFilter {
    pub fn matches(&self, name: &str, price: &BigDecimal) -> bool {
        let name_ok = self
            .name_contains
            .as_ref()
            .map_or(true, |needle| name.to_lowercase().contains(&needle.to_lowercase()));
        let min_ok = self.min_price.as_ref().map_or(true, |min| price >= min);
        let max_ok = self.max_price.as_ref().map_or(true, |max| price <= max);
        name_ok && min_ok && max_ok
    }
}

/// One page of a listing together with the unpaginated total.
#[derive(Debug, Clone)]
pub struct ListResult<T> {
    pub items: Vec<T>,
    pub total: i64,
}
