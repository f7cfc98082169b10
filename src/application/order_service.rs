use uuid::Uuid;

use crate::domain::catalogue::ListResult;
use crate::domain::checkout::{CheckoutRequest, CheckoutState, DeliveryTariffs, Draft};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderSummary, OrderView};
use crate::domain::ports::{AccountRepository, OrderRepository};

pub struct OrderService<R> {
    repo: R,
    tariffs: DeliveryTariffs,
}

impl<R: OrderRepository + AccountRepository> OrderService<R> {
    pub fn new(repo: R, tariffs: DeliveryTariffs) -> Self {
        Self { repo, tariffs }
    }

    /// Turn the user's cart into an order. The cart is read, validated,
    /// priced, converted and cleared under one lock and one transaction.
    pub fn checkout(
        &self,
        user_id: Uuid,
        request: CheckoutRequest,
    ) -> Result<OrderView, DomainError> {
        let tariffs = &self.tariffs;
        let result = self.repo.place_order(user_id, request.packing_id, |ctx| {
            let draft = Draft::new(ctx.cart)?;
            log::debug!("Checkout for user {} is {}", user_id, draft.state());
            let validated = draft.validate(&request, ctx.packing)?;
            log::debug!("Checkout for user {} is {}", user_id, validated.state());
            Ok(validated.into_order(ctx.card.as_ref(), tariffs))
        });

        match &result {
            Ok(order) => log::info!(
                "Checkout {} for user {}: order {} total {}",
                CheckoutState::Placed,
                user_id,
                order.id,
                order.total_price
            ),
            Err(e) => log::warn!(
                "Checkout {} for user {}: {}",
                CheckoutState::Rejected,
                user_id,
                e
            ),
        }
        result
    }

    pub fn get_order(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<OrderView>, DomainError> {
        self.ensure_user(user_id)?;
        self.repo.find_order(user_id, order_id)
    }

    pub fn list_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<OrderSummary>, DomainError> {
        self.ensure_user(user_id)?;
        self.repo.list_orders(user_id, page, limit)
    }

    fn ensure_user(&self, user_id: Uuid) -> Result<(), DomainError> {
        match self.repo.find_user(user_id)? {
            Some(_) => Ok(()),
            None => Err(DomainError::UnknownUser),
        }
    }
}
