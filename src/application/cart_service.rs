use uuid::Uuid;

use crate::domain::account::AccountDetails;
use crate::domain::cart::{validate_amount, LineItem, PricedCart};
use crate::domain::errors::DomainError;
use crate::domain::ports::{AccountRepository, CartRepository};

pub struct CartService<R> {
    repo: R,
}

impl<R: CartRepository + AccountRepository> CartService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    pub fn get_cart(&self, user_id: Uuid) -> Result<PricedCart, DomainError> {
        if self.repo.find_user(user_id)?.is_none() {
            return Err(DomainError::UnknownUser);
        }
        self.priced_cart(user_id)
    }

    pub fn add_flower_line(
        &self,
        user_id: Uuid,
        flower_id: Uuid,
        colour_id: Uuid,
        amount: i32,
    ) -> Result<PricedCart, DomainError> {
        self.add_line(
            user_id,
            LineItem::Flower {
                flower_id,
                colour_id,
            },
            amount,
        )
    }

    pub fn add_collection_line(
        &self,
        user_id: Uuid,
        collection_id: Uuid,
        packing_id: Uuid,
        amount: i32,
    ) -> Result<PricedCart, DomainError> {
        self.add_line(
            user_id,
            LineItem::Collection {
                collection_id,
                packing_id,
            },
            amount,
        )
    }

    pub fn remove_line(&self, user_id: Uuid, line_id: Uuid) -> Result<PricedCart, DomainError> {
        self.repo.remove_line(user_id, line_id)?;
        log::info!("Removed line {} from cart of user {}", line_id, user_id);
        self.priced_cart(user_id)
    }

    pub fn account_details(&self, user_id: Uuid) -> Result<AccountDetails, DomainError> {
        let user = self
            .repo
            .find_user(user_id)?
            .ok_or(DomainError::UnknownUser)?;
        let card = self.repo.find_card(user_id)?;
        let cart = PricedCart::new(self.repo.load_cart(user_id)?, card.as_ref());
        Ok(AccountDetails { user, card, cart })
    }

    fn add_line(
        &self,
        user_id: Uuid,
        item: LineItem,
        amount: i32,
    ) -> Result<PricedCart, DomainError> {
        validate_amount(amount)?;
        self.repo.add_line(user_id, item, amount)?;
        log::info!("Added {} x {:?} to cart of user {}", amount, item, user_id);
        self.priced_cart(user_id)
    }

    fn priced_cart(&self, user_id: Uuid) -> Result<PricedCart, DomainError> {
        let card = self.repo.find_card(user_id)?;
        let snapshot = self.repo.load_cart(user_id)?;
        Ok(PricedCart::new(snapshot, card.as_ref()))
    }
}
