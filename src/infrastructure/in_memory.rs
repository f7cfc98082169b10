//! Mutex-guarded in-memory shop used by the service tests. One lock covers
//! the whole state, which gives the same per-user serialization the
//! Postgres repository gets from row locks.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use bigdecimal::BigDecimal;
use chrono::Utc;
use uuid::Uuid;

use crate::domain::account::{CardType, ClientCard, User};
use crate::domain::cart::{merge_amount, CartLine, CartSnapshot, LineItem, LineItemView};
use crate::domain::catalogue::{Collection, Colour, Flower, ListResult, Packing, ProductFilter};
use crate::domain::checkout::{CheckoutContext, OrderDraft};
use crate::domain::errors::DomainError;
use crate::domain::order::{DeliveryView, OrderLineView, OrderSummary, OrderView, STATUS_PLACED};
use crate::domain::ports::{AccountRepository, CartRepository, CatalogueRepository, OrderRepository};

#[derive(Debug, Clone, Copy)]
pub struct Seed {
    pub user_id: Uuid,
    pub carded_user_id: Uuid,
    pub rose_id: Uuid,
    pub tulip_id: Uuid,
    pub red_id: Uuid,
    pub white_id: Uuid,
    pub spring_id: Uuid,
    pub box_id: Uuid,
}

#[derive(Debug)]
struct StoredLine {
    id: Uuid,
    item: LineItem,
    amount: i32,
}

#[derive(Debug)]
struct StoredCart {
    id: Uuid,
    lines: Vec<StoredLine>,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<Uuid, User>,
    cards: HashMap<Uuid, ClientCard>,
    flowers: Vec<Flower>,
    collections: Vec<Collection>,
    colours: Vec<Colour>,
    packings: Vec<Packing>,
    carts: HashMap<Uuid, StoredCart>,
    orders: Vec<OrderView>,
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryShop {
    state: Arc<Mutex<State>>,
}

fn dec(s: &str) -> BigDecimal {
    BigDecimal::from_str(s).expect("valid decimal")
}

impl InMemoryShop {
    /// Two users (one holding a GOLD card with 10% and 5.00 bonus), two
    /// flowers, two colours, one collection and one packing.
    pub fn seeded() -> (Self, Seed) {
        let seed = Seed {
            user_id: Uuid::new_v4(),
            carded_user_id: Uuid::new_v4(),
            rose_id: Uuid::new_v4(),
            tulip_id: Uuid::new_v4(),
            red_id: Uuid::new_v4(),
            white_id: Uuid::new_v4(),
            spring_id: Uuid::new_v4(),
            box_id: Uuid::new_v4(),
        };
        let shop = Self::default();
        {
            let mut state = shop.lock();
            for (id, login) in [(seed.user_id, "alice"), (seed.carded_user_id, "bob")] {
                state.users.insert(
                    id,
                    User {
                        id,
                        login: login.to_string(),
                        first_name: None,
                        last_name: None,
                        email: None,
                    },
                );
            }
            state.cards.insert(
                seed.carded_user_id,
                ClientCard {
                    id: Uuid::new_v4(),
                    card_type: CardType::Gold,
                    bonus_amount: dec("5.00"),
                    percentage: Some(dec("0.10")),
                },
            );
            state.flowers = vec![
                Flower {
                    id: seed.rose_id,
                    name: "Rose".to_string(),
                    description: None,
                    price: dec("2.50"),
                    image_url: Some("/img/rose.png".to_string()),
                },
                Flower {
                    id: seed.tulip_id,
                    name: "Tulip".to_string(),
                    description: None,
                    price: dec("1.50"),
                    image_url: None,
                },
            ];
            state.colours = vec![
                Colour {
                    id: seed.red_id,
                    name: "Red".to_string(),
                },
                Colour {
                    id: seed.white_id,
                    name: "White".to_string(),
                },
            ];
            state.collections = vec![Collection {
                id: seed.spring_id,
                name: "Spring".to_string(),
                description: None,
                price: dec("30.00"),
                image_url: None,
            }];
            state.packings = vec![Packing {
                id: seed.box_id,
                name: "Box".to_string(),
                price: dec("3.00"),
            }];
        }
        (shop, seed)
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().expect("state lock poisoned")
    }
}

impl State {
    fn flower(&self, id: Uuid) -> Option<&Flower> {
        self.flowers.iter().find(|f| f.id == id)
    }

    fn colour(&self, id: Uuid) -> Option<&Colour> {
        self.colours.iter().find(|c| c.id == id)
    }

    fn collection(&self, id: Uuid) -> Option<&Collection> {
        self.collections.iter().find(|c| c.id == id)
    }

    fn packing(&self, id: Uuid) -> Option<&Packing> {
        self.packings.iter().find(|p| p.id == id)
    }

    fn hydrate(&self, line: &StoredLine) -> Result<CartLine, DomainError> {
        let dangling = || DomainError::InvalidCartState(format!("line {} is dangling", line.id));
        match line.item {
            LineItem::Flower {
                flower_id,
                colour_id,
            } => {
                let flower = self.flower(flower_id).ok_or_else(dangling)?;
                let colour = self.colour(colour_id).ok_or_else(dangling)?;
                Ok(CartLine {
                    id: line.id,
                    item: LineItemView::Flower {
                        flower_id,
                        flower_name: flower.name.clone(),
                        colour_id,
                        colour_name: colour.name.clone(),
                    },
                    image_url: flower.image_url.clone(),
                    unit_price: flower.price.clone(),
                    amount: line.amount,
                })
            }
            LineItem::Collection {
                collection_id,
                packing_id,
            } => {
                let collection = self.collection(collection_id).ok_or_else(dangling)?;
                let packing = self.packing(packing_id).ok_or_else(dangling)?;
                Ok(CartLine {
                    id: line.id,
                    item: LineItemView::Collection {
                        collection_id,
                        collection_name: collection.name.clone(),
                        packing_id,
                        packing_name: packing.name.clone(),
                    },
                    image_url: collection.image_url.clone(),
                    unit_price: &collection.price + &packing.price,
                    amount: line.amount,
                })
            }
        }
    }

    fn snapshot(&self, user_id: Uuid) -> Result<CartSnapshot, DomainError> {
        let Some(cart) = self.carts.get(&user_id) else {
            return Ok(CartSnapshot::default());
        };
        let lines = cart
            .lines
            .iter()
            .map(|l| self.hydrate(l))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(CartSnapshot {
            cart_id: Some(cart.id),
            lines,
        })
    }
}

fn page<T: Clone>(items: Vec<T>, page: i64, limit: i64) -> ListResult<T> {
    let total = items.len() as i64;
    let skip = ((page.max(1) - 1) * limit) as usize;
    ListResult {
        items: items.into_iter().skip(skip).take(limit as usize).collect(),
        total,
    }
}

impl AccountRepository for InMemoryShop {
    fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        Ok(self.lock().users.get(&user_id).cloned())
    }

    fn find_card(&self, user_id: Uuid) -> Result<Option<ClientCard>, DomainError> {
        Ok(self.lock().cards.get(&user_id).cloned())
    }
}

impl CartRepository for InMemoryShop {
    fn load_cart(&self, user_id: Uuid) -> Result<CartSnapshot, DomainError> {
        self.lock().snapshot(user_id)
    }

    fn add_line(&self, user_id: Uuid, item: LineItem, amount: i32) -> Result<(), DomainError> {
        let mut state = self.lock();
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::UnknownUser);
        }
        match item {
            LineItem::Flower {
                flower_id,
                colour_id,
            } => {
                state.flower(flower_id).ok_or(DomainError::NotFound("Flower"))?;
                state.colour(colour_id).ok_or(DomainError::NotFound("Colour"))?;
            }
            LineItem::Collection {
                collection_id,
                packing_id,
            } => {
                state
                    .collection(collection_id)
                    .ok_or(DomainError::NotFound("Collection"))?;
                state.packing(packing_id).ok_or(DomainError::NotFound("Packing"))?;
            }
        }

        let cart = state.carts.entry(user_id).or_insert_with(|| StoredCart {
            id: Uuid::new_v4(),
            lines: Vec::new(),
        });
        match cart.lines.iter_mut().find(|l| l.item == item) {
            Some(line) => line.amount = merge_amount(line.amount, amount)?,
            None => cart.lines.push(StoredLine {
                id: Uuid::new_v4(),
                item,
                amount,
            }),
        }
        Ok(())
    }

    fn remove_line(&self, user_id: Uuid, line_id: Uuid) -> Result<(), DomainError> {
        let mut state = self.lock();
        let cart = state
            .carts
            .get_mut(&user_id)
            .ok_or(DomainError::NotFound("Cart line"))?;
        let before = cart.lines.len();
        cart.lines.retain(|l| l.id != line_id);
        if cart.lines.len() == before {
            return Err(DomainError::NotFound("Cart line"));
        }
        Ok(())
    }
}

impl OrderRepository for InMemoryShop {
    fn place_order<F>(
        &self,
        user_id: Uuid,
        packing_id: Option<Uuid>,
        build: F,
    ) -> Result<OrderView, DomainError>
    where
        F: FnOnce(CheckoutContext) -> Result<OrderDraft, DomainError>,
    {
        let mut state = self.lock();
        if !state.users.contains_key(&user_id) {
            return Err(DomainError::UnknownUser);
        }
        let ctx = CheckoutContext {
            cart: state.snapshot(user_id)?,
            card: state.cards.get(&user_id).cloned(),
            packing: packing_id.and_then(|id| state.packing(id).cloned()),
        };
        let draft = build(ctx)?;

        let order = OrderView {
            id: Uuid::new_v4(),
            user_id,
            status: STATUS_PLACED.to_string(),
            created_at: Utc::now(),
            delivery: DeliveryView {
                id: Uuid::new_v4(),
                delivery_type: draft.delivery.delivery_type,
                address: draft.delivery.address,
                post_office_number: draft.delivery.post_office_number,
                price: draft.delivery.price,
            },
            packing_id: draft.packing.map(|p| p.id),
            subtotal: draft.pricing.subtotal,
            card_discount: draft.pricing.card_discount,
            bonus_discount: draft.pricing.bonus_discount,
            packing_price: draft.packing_price,
            total_price: draft.total_price,
            lines: draft
                .lines
                .into_iter()
                .map(|l| OrderLineView {
                    id: Uuid::new_v4(),
                    item: l.item,
                    unit_price: l.unit_price,
                    amount: l.amount,
                })
                .collect(),
        };

        if let Some(cart) = state.carts.get_mut(&user_id) {
            cart.lines.clear();
        }
        state.orders.push(order.clone());
        Ok(order)
    }

    fn find_order(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<OrderView>, DomainError> {
        Ok(self
            .lock()
            .orders
            .iter()
            .find(|o| o.id == order_id && o.user_id == user_id)
            .cloned())
    }

    fn list_orders(
        &self,
        user_id: Uuid,
        page_no: i64,
        limit: i64,
    ) -> Result<ListResult<OrderSummary>, DomainError> {
        let summaries: Vec<OrderSummary> = self
            .lock()
            .orders
            .iter()
            .rev()
            .filter(|o| o.user_id == user_id)
            .map(|o| OrderSummary {
                id: o.id,
                status: o.status.clone(),
                created_at: o.created_at,
                total_price: o.total_price.clone(),
            })
            .collect();
        Ok(page(summaries, page_no, limit))
    }
}

impl CatalogueRepository for InMemoryShop {
    fn list_flowers(
        &self,
        filter: &ProductFilter,
        page_no: i64,
        limit: i64,
    ) -> Result<ListResult<Flower>, DomainError> {
        let items: Vec<Flower> = self
            .lock()
            .flowers
            .iter()
            .filter(|f| filter.matches(&f.name, &f.price))
            .cloned()
            .collect();
        Ok(page(items, page_no, limit))
    }

    fn find_flower(&self, id: Uuid) -> Result<Option<Flower>, DomainError> {
        Ok(self.lock().flower(id).cloned())
    }

    fn list_collections(
        &self,
        filter: &ProductFilter,
        page_no: i64,
        limit: i64,
    ) -> Result<ListResult<Collection>, DomainError> {
        let items: Vec<Collection> = self
            .lock()
            .collections
            .iter()
            .filter(|c| filter.matches(&c.name, &c.price))
            .cloned()
            .collect();
        Ok(page(items, page_no, limit))
    }

    fn list_colours(&self) -> Result<Vec<Colour>, DomainError> {
        Ok(self.lock().colours.clone())
    }

    fn list_packings(&self) -> Result<Vec<Packing>, DomainError> {
        Ok(self.lock().packings.clone())
    }
}
