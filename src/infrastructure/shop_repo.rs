use std::collections::HashMap;

use chrono::{DateTime, Utc};
use diesel::pg::{Pg, PgConnection};
use diesel::prelude::*;
use diesel::result::DatabaseErrorKind;
use diesel::upsert::excluded;
use serde_json::json;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::account::{ClientCard, User};
use crate::domain::cart::{merge_amount, CartLine, CartSnapshot, LineItem, LineItemView};
use crate::domain::catalogue::{Collection, Colour, Flower, ListResult, Packing, ProductFilter};
use crate::domain::checkout::{CheckoutContext, OrderDraft};
use crate::domain::errors::DomainError;
use crate::domain::order::{DeliveryView, OrderLineView, OrderSummary, OrderView, STATUS_PLACED};
use crate::domain::ports::{AccountRepository, CartRepository, CatalogueRepository, OrderRepository};
use crate::schema::{
    cart_collections, cart_flowers, carts, client_cards, collections, colours, deliveries,
    flowers, order_collections, order_flowers, orders, packings, shop_outbox, users,
};

use super::models::{
    CartCollectionRow, CartFlowerRow, ClientCardRow, CollectionRow, ColourRow, DeliveryRow,
    FlowerRow, NewCartCollectionRow, NewCartFlowerRow, NewCartRow, NewDeliveryRow,
    NewOrderCollectionRow, NewOrderFlowerRow, NewOrderRow, NewOutboxEventRow, OrderCollectionRow,
    OrderFlowerRow, OrderRow, PackingRow, UserRow,
};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for DomainError {
    fn from(e: diesel::result::Error) -> Self {
        match e {
            diesel::result::Error::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
                DomainError::ConcurrencyConflict
            }
            other => DomainError::Internal(other.to_string()),
        }
    }
}

impl From<r2d2::Error> for DomainError {
    fn from(e: r2d2::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

// ── Row mapping ──────────────────────────────────────────────────────────────

impl From<UserRow> for User {
    fn from(r: UserRow) -> Self {
        User {
            id: r.id,
            login: r.login,
            first_name: r.first_name,
            last_name: r.last_name,
            email: r.email,
        }
    }
}

impl TryFrom<ClientCardRow> for ClientCard {
    type Error = DomainError;

    fn try_from(r: ClientCardRow) -> Result<Self, Self::Error> {
        Ok(ClientCard {
            id: r.id,
            card_type: r.card_type.parse()?,
            bonus_amount: r.bonus_amount,
            percentage: r.percentage,
        })
    }
}

impl From<FlowerRow> for Flower {
    fn from(r: FlowerRow) -> Self {
        Flower {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            image_url: r.image_url,
        }
    }
}

impl From<CollectionRow> for Collection {
    fn from(r: CollectionRow) -> Self {
        Collection {
            id: r.id,
            name: r.name,
            description: r.description,
            price: r.price,
            image_url: r.image_url,
        }
    }
}

impl From<ColourRow> for Colour {
    fn from(r: ColourRow) -> Self {
        Colour {
            id: r.id,
            name: r.name,
        }
    }
}

impl From<PackingRow> for Packing {
    fn from(r: PackingRow) -> Self {
        Packing {
            id: r.id,
            name: r.name,
            price: r.price,
        }
    }
}

impl From<OrderFlowerRow> for OrderLineView {
    fn from(r: OrderFlowerRow) -> Self {
        OrderLineView {
            id: r.id,
            item: LineItemView::Flower {
                flower_id: r.flower_id,
                flower_name: r.flower_name,
                colour_id: r.colour_id,
                colour_name: r.colour_name,
            },
            unit_price: r.unit_price,
            amount: r.amount,
        }
    }
}

impl From<OrderCollectionRow> for OrderLineView {
    fn from(r: OrderCollectionRow) -> Self {
        OrderLineView {
            id: r.id,
            item: LineItemView::Collection {
                collection_id: r.collection_id,
                collection_name: r.collection_name,
                packing_id: r.packing_id,
                packing_name: r.packing_name,
            },
            unit_price: r.unit_price,
            amount: r.amount,
        }
    }
}

// ── Query helpers ────────────────────────────────────────────────────────────

/// Take the row lock every cart mutation and checkout of `user_id` queues on.
fn lock_user(conn: &mut PgConnection, user_id: Uuid) -> Result<(), DomainError> {
    users::table
        .find(user_id)
        .select(users::id)
        .for_update()
        .first::<Uuid>(conn)
        .optional()?
        .ok_or(DomainError::UnknownUser)?;
    Ok(())
}

fn find_cart_id(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<Uuid>, DomainError> {
    Ok(carts::table
        .filter(carts::user_id.eq(user_id))
        .select(carts::id)
        .first::<Uuid>(conn)
        .optional()?)
}

fn ensure_cart(conn: &mut PgConnection, user_id: Uuid) -> Result<Uuid, DomainError> {
    diesel::insert_into(carts::table)
        .values(&NewCartRow {
            id: Uuid::new_v4(),
            user_id,
        })
        .on_conflict(carts::user_id)
        .do_nothing()
        .execute(conn)?;

    let cart_id = carts::table
        .filter(carts::user_id.eq(user_id))
        .select(carts::id)
        .first::<Uuid>(conn)?;
    Ok(cart_id)
}

fn touch_cart(conn: &mut PgConnection, cart_id: Uuid) -> Result<(), DomainError> {
    diesel::update(carts::table.find(cart_id))
        .set(carts::updated_at.eq(Utc::now()))
        .execute(conn)?;
    Ok(())
}

fn load_card(conn: &mut PgConnection, user_id: Uuid) -> Result<Option<ClientCard>, DomainError> {
    client_cards::table
        .filter(client_cards::user_id.eq(user_id))
        .select(ClientCardRow::as_select())
        .first(conn)
        .optional()?
        .map(ClientCard::try_from)
        .transpose()
}

fn dangling(line_id: Uuid, what: &str, id: Uuid) -> DomainError {
    DomainError::InvalidCartState(format!("cart line {line_id} references missing {what} {id}"))
}

/// Load the user's cart lines joined with the catalogue rows they point at.
fn load_snapshot(conn: &mut PgConnection, user_id: Uuid) -> Result<CartSnapshot, DomainError> {
    let Some(cart_id) = find_cart_id(conn, user_id)? else {
        return Ok(CartSnapshot::default());
    };

    let flower_lines = cart_flowers::table
        .filter(cart_flowers::cart_id.eq(cart_id))
        .order(cart_flowers::created_at.asc())
        .select(CartFlowerRow::as_select())
        .load(conn)?;
    let collection_lines = cart_collections::table
        .filter(cart_collections::cart_id.eq(cart_id))
        .order(cart_collections::created_at.asc())
        .select(CartCollectionRow::as_select())
        .load(conn)?;

    let flower_ids: Vec<Uuid> = flower_lines.iter().map(|l| l.flower_id).collect();
    let colour_ids: Vec<Uuid> = flower_lines.iter().map(|l| l.colour_id).collect();
    let collection_ids: Vec<Uuid> = collection_lines.iter().map(|l| l.collection_id).collect();
    let packing_ids: Vec<Uuid> = collection_lines.iter().map(|l| l.packing_id).collect();

    let flower_map: HashMap<Uuid, FlowerRow> = flowers::table
        .filter(flowers::id.eq_any(flower_ids))
        .select(FlowerRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let colour_map: HashMap<Uuid, ColourRow> = colours::table
        .filter(colours::id.eq_any(colour_ids))
        .select(ColourRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let collection_map: HashMap<Uuid, CollectionRow> = collections::table
        .filter(collections::id.eq_any(collection_ids))
        .select(CollectionRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();
    let packing_map: HashMap<Uuid, PackingRow> = packings::table
        .filter(packings::id.eq_any(packing_ids))
        .select(PackingRow::as_select())
        .load(conn)?
        .into_iter()
        .map(|r| (r.id, r))
        .collect();

    let mut lines = Vec::with_capacity(flower_lines.len() + collection_lines.len());
    for l in flower_lines {
        let flower = flower_map
            .get(&l.flower_id)
            .ok_or_else(|| dangling(l.id, "flower", l.flower_id))?;
        let colour = colour_map
            .get(&l.colour_id)
            .ok_or_else(|| dangling(l.id, "colour", l.colour_id))?;
        lines.push(CartLine {
            id: l.id,
            item: LineItemView::Flower {
                flower_id: flower.id,
                flower_name: flower.name.clone(),
                colour_id: colour.id,
                colour_name: colour.name.clone(),
            },
            image_url: flower.image_url.clone(),
            unit_price: flower.price.clone(),
            amount: l.amount,
        });
    }
    for l in collection_lines {
        let collection = collection_map
            .get(&l.collection_id)
            .ok_or_else(|| dangling(l.id, "collection", l.collection_id))?;
        let packing = packing_map
            .get(&l.packing_id)
            .ok_or_else(|| dangling(l.id, "packing", l.packing_id))?;
        lines.push(CartLine {
            id: l.id,
            item: LineItemView::Collection {
                collection_id: collection.id,
                collection_name: collection.name.clone(),
                packing_id: packing.id,
                packing_name: packing.name.clone(),
            },
            image_url: collection.image_url.clone(),
            unit_price: &collection.price + &packing.price,
            amount: l.amount,
        });
    }

    Ok(CartSnapshot {
        cart_id: Some(cart_id),
        lines,
    })
}

fn load_order_lines(
    conn: &mut PgConnection,
    order: &OrderRow,
) -> Result<Vec<OrderLineView>, DomainError> {
    let flower_rows = OrderFlowerRow::belonging_to(order)
        .select(OrderFlowerRow::as_select())
        .order(order_flowers::flower_name.asc())
        .load(conn)?;
    let collection_rows = OrderCollectionRow::belonging_to(order)
        .select(OrderCollectionRow::as_select())
        .order(order_collections::collection_name.asc())
        .load(conn)?;

    Ok(flower_rows
        .into_iter()
        .map(OrderLineView::from)
        .chain(collection_rows.into_iter().map(OrderLineView::from))
        .collect())
}

fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

fn filtered_flowers(filter: &ProductFilter) -> flowers::BoxedQuery<'static, Pg> {
    let mut query = flowers::table.into_boxed();
    if let Some(name) = &filter.name_contains {
        query = query.filter(flowers::name.ilike(format!("%{}%", escape_like(name))));
    }
    if let Some(min) = &filter.min_price {
        query = query.filter(flowers::price.ge(min.clone()));
    }
    if let Some(max) = &filter.max_price {
        query = query.filter(flowers::price.le(max.clone()));
    }
    query
}

fn filtered_collections(filter: &ProductFilter) -> collections::BoxedQuery<'static, Pg> {
    let mut query = collections::table.into_boxed();
    if let Some(name) = &filter.name_contains {
        query = query.filter(collections::name.ilike(format!("%{}%", escape_like(name))));
    }
    if let Some(min) = &filter.min_price {
        query = query.filter(collections::price.ge(min.clone()));
    }
    if let Some(max) = &filter.max_price {
        query = query.filter(collections::price.le(max.clone()));
    }
    query
}

// ── Repository ────────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DieselShopRepository {
    pool: DbPool,
}

impl DieselShopRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl AccountRepository for DieselShopRepository {
    fn find_user(&self, user_id: Uuid) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .find(user_id)
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(user.map(User::from))
    }

    fn find_card(&self, user_id: Uuid) -> Result<Option<ClientCard>, DomainError> {
        let mut conn = self.pool.get()?;
        load_card(&mut conn, user_id)
    }
}

impl CartRepository for DieselShopRepository {
    fn load_cart(&self, user_id: Uuid) -> Result<CartSnapshot, DomainError> {
        let mut conn = self.pool.get()?;

        // One snapshot for the cart row, its lines and the catalogue rows.
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, DomainError, _>(|conn| load_snapshot(conn, user_id))
    }

    fn add_line(&self, user_id: Uuid, item: LineItem, amount: i32) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            lock_user(conn, user_id)?;

            match item {
                LineItem::Flower {
                    flower_id,
                    colour_id,
                } => {
                    flowers::table
                        .find(flower_id)
                        .select(flowers::id)
                        .first::<Uuid>(conn)
                        .optional()?
                        .ok_or(DomainError::NotFound("Flower"))?;
                    colours::table
                        .find(colour_id)
                        .select(colours::id)
                        .first::<Uuid>(conn)
                        .optional()?
                        .ok_or(DomainError::NotFound("Colour"))?;

                    let cart_id = ensure_cart(conn, user_id)?;
                    let existing = cart_flowers::table
                        .filter(cart_flowers::cart_id.eq(cart_id))
                        .filter(cart_flowers::flower_id.eq(flower_id))
                        .filter(cart_flowers::colour_id.eq(colour_id))
                        .select(cart_flowers::amount)
                        .first::<i32>(conn)
                        .optional()?;
                    merge_amount(existing.unwrap_or(0), amount)?;

                    diesel::insert_into(cart_flowers::table)
                        .values(&NewCartFlowerRow {
                            id: Uuid::new_v4(),
                            cart_id,
                            flower_id,
                            colour_id,
                            amount,
                        })
                        .on_conflict((
                            cart_flowers::cart_id,
                            cart_flowers::flower_id,
                            cart_flowers::colour_id,
                        ))
                        .do_update()
                        .set(
                            cart_flowers::amount
                                .eq(cart_flowers::amount + excluded(cart_flowers::amount)),
                        )
                        .execute(conn)?;
                    touch_cart(conn, cart_id)
                }
                LineItem::Collection {
                    collection_id,
                    packing_id,
                } => {
                    collections::table
                        .find(collection_id)
                        .select(collections::id)
                        .first::<Uuid>(conn)
                        .optional()?
                        .ok_or(DomainError::NotFound("Collection"))?;
                    packings::table
                        .find(packing_id)
                        .select(packings::id)
                        .first::<Uuid>(conn)
                        .optional()?
                        .ok_or(DomainError::NotFound("Packing"))?;

                    let cart_id = ensure_cart(conn, user_id)?;
                    let existing = cart_collections::table
                        .filter(cart_collections::cart_id.eq(cart_id))
                        .filter(cart_collections::collection_id.eq(collection_id))
                        .filter(cart_collections::packing_id.eq(packing_id))
                        .select(cart_collections::amount)
                        .first::<i32>(conn)
                        .optional()?;
                    merge_amount(existing.unwrap_or(0), amount)?;

                    diesel::insert_into(cart_collections::table)
                        .values(&NewCartCollectionRow {
                            id: Uuid::new_v4(),
                            cart_id,
                            collection_id,
                            packing_id,
                            amount,
                        })
                        .on_conflict((
                            cart_collections::cart_id,
                            cart_collections::collection_id,
                            cart_collections::packing_id,
                        ))
                        .do_update()
                        .set(
                            cart_collections::amount
                                .eq(cart_collections::amount + excluded(cart_collections::amount)),
                        )
                        .execute(conn)?;
                    touch_cart(conn, cart_id)
                }
            }
        })
    }

    fn remove_line(&self, user_id: Uuid, line_id: Uuid) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            lock_user(conn, user_id)?;
            let cart_id = find_cart_id(conn, user_id)?.ok_or(DomainError::NotFound("Cart line"))?;

            let mut removed = diesel::delete(
                cart_flowers::table
                    .filter(cart_flowers::id.eq(line_id))
                    .filter(cart_flowers::cart_id.eq(cart_id)),
            )
            .execute(conn)?;
            if removed == 0 {
                removed = diesel::delete(
                    cart_collections::table
                        .filter(cart_collections::id.eq(line_id))
                        .filter(cart_collections::cart_id.eq(cart_id)),
                )
                .execute(conn)?;
            }
            if removed == 0 {
                return Err(DomainError::NotFound("Cart line"));
            }
            touch_cart(conn, cart_id)
        })
    }
}

impl OrderRepository for DieselShopRepository {
    fn place_order<F>(
        &self,
        user_id: Uuid,
        packing_id: Option<Uuid>,
        build: F,
    ) -> Result<OrderView, DomainError>
    where
        F: FnOnce(CheckoutContext) -> Result<OrderDraft, DomainError>,
    {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Serialize with every other cart mutation of this user, then
            //    read the cart as it is now.
            lock_user(conn, user_id)?;
            let cart = load_snapshot(conn, user_id)?;
            let cart_id = cart.cart_id;
            let card = load_card(conn, user_id)?;
            let packing = match packing_id {
                Some(id) => packings::table
                    .find(id)
                    .select(PackingRow::as_select())
                    .first(conn)
                    .optional()?
                    .map(Packing::from),
                None => None,
            };

            let draft = build(CheckoutContext {
                cart,
                card,
                packing,
            })?;

            // 2. Delivery and order
            let delivery_id = Uuid::new_v4();
            diesel::insert_into(deliveries::table)
                .values(&NewDeliveryRow {
                    id: delivery_id,
                    delivery_type: draft.delivery.delivery_type.as_str().to_string(),
                    address: draft.delivery.address.clone(),
                    post_office_number: draft.delivery.post_office_number,
                    price: draft.delivery.price.clone(),
                })
                .execute(conn)?;

            let order_id = Uuid::new_v4();
            let created_at: DateTime<Utc> = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    id: order_id,
                    user_id,
                    delivery_id,
                    packing_id: draft.packing.as_ref().map(|p| p.id),
                    status: STATUS_PLACED.to_string(),
                    subtotal: draft.pricing.subtotal.clone(),
                    card_discount: draft.pricing.card_discount.clone(),
                    bonus_discount: draft.pricing.bonus_discount.clone(),
                    packing_price: draft.packing_price.clone(),
                    total_price: draft.total_price.clone(),
                })
                .returning(orders::created_at)
                .get_result(conn)?;

            // 3. Order lines, snapshotting names and prices
            let mut lines = Vec::with_capacity(draft.lines.len());
            let mut flower_rows = Vec::new();
            let mut collection_rows = Vec::new();
            for line in &draft.lines {
                let id = Uuid::new_v4();
                match &line.item {
                    LineItemView::Flower {
                        flower_id,
                        flower_name,
                        colour_id,
                        colour_name,
                    } => flower_rows.push(NewOrderFlowerRow {
                        id,
                        order_id,
                        flower_id: *flower_id,
                        flower_name: flower_name.clone(),
                        colour_id: *colour_id,
                        colour_name: colour_name.clone(),
                        unit_price: line.unit_price.clone(),
                        amount: line.amount,
                    }),
                    LineItemView::Collection {
                        collection_id,
                        collection_name,
                        packing_id,
                        packing_name,
                    } => collection_rows.push(NewOrderCollectionRow {
                        id,
                        order_id,
                        collection_id: *collection_id,
                        collection_name: collection_name.clone(),
                        packing_id: *packing_id,
                        packing_name: packing_name.clone(),
                        unit_price: line.unit_price.clone(),
                        amount: line.amount,
                    }),
                }
                lines.push(OrderLineView {
                    id,
                    item: line.item.clone(),
                    unit_price: line.unit_price.clone(),
                    amount: line.amount,
                });
            }
            if !flower_rows.is_empty() {
                diesel::insert_into(order_flowers::table)
                    .values(&flower_rows)
                    .execute(conn)?;
            }
            if !collection_rows.is_empty() {
                diesel::insert_into(order_collections::table)
                    .values(&collection_rows)
                    .execute(conn)?;
            }

            // 4. Clear the cart
            if let Some(cart_id) = cart_id {
                diesel::delete(cart_flowers::table.filter(cart_flowers::cart_id.eq(cart_id)))
                    .execute(conn)?;
                diesel::delete(
                    cart_collections::table.filter(cart_collections::cart_id.eq(cart_id)),
                )
                .execute(conn)?;
                touch_cart(conn, cart_id)?;
            }

            // 5. Outbox event in the same transaction, so consumers see an
            //    order exactly when it committed.
            let line_payloads: Vec<serde_json::Value> = lines
                .iter()
                .map(|l| match &l.item {
                    LineItemView::Flower {
                        flower_id,
                        colour_id,
                        ..
                    } => json!({
                        "kind": "FLOWER",
                        "flower_id": flower_id,
                        "colour_id": colour_id,
                        "amount": l.amount,
                        "unit_price": l.unit_price.to_string()
                    }),
                    LineItemView::Collection {
                        collection_id,
                        packing_id,
                        ..
                    } => json!({
                        "kind": "COLLECTION",
                        "collection_id": collection_id,
                        "packing_id": packing_id,
                        "amount": l.amount,
                        "unit_price": l.unit_price.to_string()
                    }),
                })
                .collect();

            let event_payload = json!({
                "order_id": order_id,
                "user_id": user_id,
                "status": STATUS_PLACED,
                "delivery_type": draft.delivery.delivery_type.as_str(),
                "total_price": draft.total_price.to_string(),
                "lines": line_payloads
            });

            diesel::insert_into(shop_outbox::table)
                .values(&NewOutboxEventRow {
                    id: Uuid::new_v4(),
                    aggregate_type: "Order".to_string(),
                    aggregate_id: order_id.to_string(),
                    event_type: "OrderPlaced".to_string(),
                    payload: event_payload,
                })
                .execute(conn)?;

            Ok(OrderView {
                id: order_id,
                user_id,
                status: STATUS_PLACED.to_string(),
                created_at,
                delivery: DeliveryView {
                    id: delivery_id,
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
                lines,
            })
        })
    }

    fn find_order(&self, user_id: Uuid, order_id: Uuid) -> Result<Option<OrderView>, DomainError> {
        let mut conn = self.pool.get()?;

        let order = orders::table
            .filter(orders::id.eq(order_id))
            .filter(orders::user_id.eq(user_id))
            .select(OrderRow::as_select())
            .first(&mut conn)
            .optional()?;

        let Some(order) = order else {
            return Ok(None);
        };

        let delivery = deliveries::table
            .find(order.delivery_id)
            .select(DeliveryRow::as_select())
            .first(&mut conn)?;
        let lines = load_order_lines(&mut conn, &order)?;

        Ok(Some(OrderView {
            id: order.id,
            user_id: order.user_id,
            status: order.status,
            created_at: order.created_at,
            delivery: DeliveryView {
                id: delivery.id,
                delivery_type: delivery.delivery_type.parse()?,
                address: delivery.address,
                post_office_number: delivery.post_office_number,
                price: delivery.price,
            },
            packing_id: order.packing_id,
            subtotal: order.subtotal,
            card_discount: order.card_discount,
            bonus_discount: order.bonus_discount,
            packing_price: order.packing_price,
            total_price: order.total_price,
            lines,
        }))
    }

    fn list_orders(
        &self,
        user_id: Uuid,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<OrderSummary>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = orders::table
                .filter(orders::user_id.eq(user_id))
                .count()
                .get_result(conn)?;

            let rows = orders::table
                .filter(orders::user_id.eq(user_id))
                .select(OrderRow::as_select())
                .order(orders::created_at.desc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows
                    .into_iter()
                    .map(|o| OrderSummary {
                        id: o.id,
                        status: o.status,
                        created_at: o.created_at,
                        total_price: o.total_price,
                    })
                    .collect(),
                total,
            })
        })
    }
}

impl CatalogueRepository for DieselShopRepository {
    fn list_flowers(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<Flower>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = filtered_flowers(filter).count().get_result(conn)?;

            let rows = filtered_flowers(filter)
                .select(FlowerRow::as_select())
                .order(flowers::name.asc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows.into_iter().map(Flower::from).collect(),
                total,
            })
        })
    }

    fn find_flower(&self, id: Uuid) -> Result<Option<Flower>, DomainError> {
        let mut conn = self.pool.get()?;

        let flower = flowers::table
            .find(id)
            .select(FlowerRow::as_select())
            .first(&mut conn)
            .optional()?;
        Ok(flower.map(Flower::from))
    }

    fn list_collections(
        &self,
        filter: &ProductFilter,
        page: i64,
        limit: i64,
    ) -> Result<ListResult<Collection>, DomainError> {
        let mut conn = self.pool.get()?;

        let offset = (page - 1) * limit;
        conn.transaction::<_, DomainError, _>(|conn| {
            let total: i64 = filtered_collections(filter).count().get_result(conn)?;

            let rows = filtered_collections(filter)
                .select(CollectionRow::as_select())
                .order(collections::name.asc())
                .limit(limit)
                .offset(offset)
                .load(conn)?;

            Ok(ListResult {
                items: rows.into_iter().map(Collection::from).collect(),
                total,
            })
        })
    }

    fn list_colours(&self) -> Result<Vec<Colour>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = colours::table
            .select(ColourRow::as_select())
            .order(colours::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Colour::from).collect())
    }

    fn list_packings(&self) -> Result<Vec<Packing>, DomainError> {
        let mut conn = self.pool.get()?;

        let rows = packings::table
            .select(PackingRow::as_select())
            .order(packings::name.asc())
            .load(&mut conn)?;
        Ok(rows.into_iter().map(Packing::from).collect())
    }
}
