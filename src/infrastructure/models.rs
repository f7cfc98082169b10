use bigdecimal::BigDecimal;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::schema::{
    cart_collections, cart_flowers, carts, client_cards, collections, colours, deliveries,
    flowers, order_collections, order_flowers, orders, packings, shop_outbox, users,
};

// ── Accounts & catalogue ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: Uuid,
    pub login: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = client_cards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ClientCardRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub card_type: String,
    pub bonus_amount: BigDecimal,
    pub percentage: Option<BigDecimal>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = flowers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FlowerRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CollectionRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: BigDecimal,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = colours)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ColourRow {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = packings)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PackingRow {
    pub id: Uuid,
    pub name: String,
    pub price: BigDecimal,
}

// ── Cart ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Insertable)]
#[diesel(table_name = carts)]
pub struct NewCartRow {
    pub id: Uuid,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_flowers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartFlowerRow {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub flower_id: Uuid,
    pub colour_id: Uuid,
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_flowers)]
pub struct NewCartFlowerRow {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub flower_id: Uuid,
    pub colour_id: Uuid,
    pub amount: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = cart_collections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartCollectionRow {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub collection_id: Uuid,
    pub packing_id: Uuid,
    pub amount: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart_collections)]
pub struct NewCartCollectionRow {
    pub id: Uuid,
    pub cart_id: Uuid,
    pub collection_id: Uuid,
    pub packing_id: Uuid,
    pub amount: i32,
}

// ── Orders ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = deliveries)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct DeliveryRow {
    pub id: Uuid,
    pub delivery_type: String,
    pub address: Option<String>,
    pub post_office_number: Option<i32>,
    pub price: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = deliveries)]
pub struct NewDeliveryRow {
    pub id: Uuid,
    pub delivery_type: String,
    pub address: Option<String>,
    pub post_office_number: Option<i32>,
    pub price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub delivery_id: Uuid,
    pub packing_id: Option<Uuid>,
    pub status: String,
    pub subtotal: BigDecimal,
    pub card_discount: BigDecimal,
    pub bonus_discount: BigDecimal,
    pub packing_price: BigDecimal,
    pub total_price: BigDecimal,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub delivery_id: Uuid,
    pub packing_id: Option<Uuid>,
    pub status: String,
    pub subtotal: BigDecimal,
    pub card_discount: BigDecimal,
    pub bonus_discount: BigDecimal,
    pub packing_price: BigDecimal,
    pub total_price: BigDecimal,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_flowers)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderFlowerRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub flower_id: Uuid,
    pub flower_name: String,
    pub colour_id: Uuid,
    pub colour_name: String,
    pub unit_price: BigDecimal,
    pub amount: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_flowers)]
pub struct NewOrderFlowerRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub flower_id: Uuid,
    pub flower_name: String,
    pub colour_id: Uuid,
    pub colour_name: String,
    pub unit_price: BigDecimal,
    pub amount: i32,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Associations)]
#[diesel(table_name = order_collections)]
#[diesel(belongs_to(OrderRow, foreign_key = order_id))]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderCollectionRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub collection_id: Uuid,
    pub collection_name: String,
    pub packing_id: Uuid,
    pub packing_name: String,
    pub unit_price: BigDecimal,
    pub amount: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_collections)]
pub struct NewOrderCollectionRow {
    pub id: Uuid,
    pub order_id: Uuid,
    pub collection_id: Uuid,
    pub collection_name: String,
    pub packing_id: Uuid,
    pub packing_name: String,
    pub unit_price: BigDecimal,
    pub amount: i32,
}

// ── Outbox ───────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize, Queryable, Selectable, Identifiable)]
#[diesel(table_name = shop_outbox)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OutboxEventRow {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = shop_outbox)]
pub struct NewOutboxEventRow {
    pub id: Uuid,
    pub aggregate_type: String,
    pub aggregate_id: String,
    pub event_type: String,
    pub payload: Value,
}
