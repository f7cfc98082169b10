use uuid::Uuid;

use super::account::{ClientCard, User};
use super::cart::{CartSnapshot, LineItem};
use super::catalogue::{Collection, Colour, Flower, ListResult, Packing, ProductFilter};
use super::checkout::{CheckoutContext, OrderDraft};
use super::errors::DomainError;
use super::order::{OrderSummary, OrderView};

pub trait AccountRepository: Send + Sync + 'static {
    fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError>;
    fn find_card(&self, user_id: Uuid) -> Result<Option<ClientCard>, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    /// Hydrated cart of `user_id`. Fails with `InvalidCartState` when a line
    /// points at catalogue data that no longer exists.
    fn load_cart(&self, user_id: Uuid) -> Result<CartSnapshot, DomainError>;
    /// Add `amount` of `item`, creating the cart on first use and summing
    /// into an existing line with the same item. A merged amount above
    /// `MAX_LINE_AMOUNT` fails with `InvalidAmount` and changes nothing.
    fn add_line(&self, user_id: Uuid, item: LineItem, amount: i32) -> Result<(), DomainError>;
    fn remove_line(&self, user_id: Uuid, line_id: Uuid) -> Result<(), DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Run `build` against the user's cart while holding the user's lock and
    /// persist the resulting order, delivery and outbox event while clearing
    /// the cart, all in one transaction. An error from `build` rolls back.
    fn place_order<F>(
        &self,
        user_id: Uuid,
        packing_id: Option<Uuid>,
        build: F,
    ) -> Result<OrderView, DomainError>
    where
        F: FnOnce(CheckoutContext) -> Result<OrderDraft, DomainError>;
    fn find_order(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<OrderView>, DomainError>;
    fn list_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<OrderSummary>, DomainError>;
}

pub trait CatalogueRepository: Send + Sync + 'static {
    fn list_flowers(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<Flower>, DomainError>;
    fn find_flower(&self, id: Uuid) -> Result<Option<Flower>, DomainError>;
    fn list_collections(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<Collection>, DomainError>;
    fn list_colours(&self) -> Result<Vec<Colour>, DomainError>;
    fn list_packings(&self) -> Result<Vec<Packing>, DomainError>;
}
