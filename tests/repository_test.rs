//! Cart, pricing and checkout against a real Postgres.

mod common;

use std::sync::{Arc, Barrier};
use std::thread;

use diesel::prelude::*;
use flower_shop::application::cart_service::CartService;
use flower_shop::application::order_service::OrderService;
use flower_shop::domain::cart::MAX_LINE_AMOUNT;
use flower_shop::domain::checkout::{CheckoutRequest, DeliveryType};
use flower_shop::domain::errors::DomainError;
use flower_shop::infrastructure::models::OutboxEventRow;
use flower_shop::infrastructure::DieselShopRepository;
use flower_shop::schema::{
    cart_flowers, deliveries, flowers, order_flowers, orders, shop_outbox,
};
use uuid::Uuid;

use common::{dec, seed, setup_db, tariffs};

fn courier(packing_id: Option<Uuid>) -> CheckoutRequest {
    CheckoutRequest {
        delivery_type: DeliveryType::Courier,
        address: Some("Flower st. 7".to_string()),
        post_office_number: None,
        packing_id,
    }
}

#[tokio::test]
async fn adding_same_flower_and_colour_sums_amounts() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let carts = CartService::new(DieselShopRepository::new(pool));

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 2)
        .expect("first add");
    let cart = carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 3)
        .expect("second add");

    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].amount, 5);
    assert_eq!(cart.pricing.subtotal, dec("12.50"));
    assert!(cart.cart_id.is_some());
}

#[tokio::test]
async fn invalid_amount_leaves_cart_unchanged() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let carts = CartService::new(DieselShopRepository::new(pool));

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 1)
        .expect("add");
    let err = carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 0)
        .expect_err("zero amount");
    assert!(matches!(err, DomainError::InvalidAmount(0)));

    let cart = carts.get_cart(seed.user_id).expect("cart");
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].amount, 1);
}

#[tokio::test]
async fn merged_amount_above_line_maximum_is_rejected() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let carts = CartService::new(DieselShopRepository::new(pool));

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, MAX_LINE_AMOUNT)
        .expect("add");
    let err = carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, MAX_LINE_AMOUNT)
        .expect_err("merge overflows the line");
    assert!(matches!(err, DomainError::InvalidAmount(_)));

    let cart = carts.get_cart(seed.user_id).expect("cart");
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].amount, MAX_LINE_AMOUNT);
}

#[tokio::test]
async fn gold_card_discounts_the_cart() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let carts = CartService::new(DieselShopRepository::new(pool));

    let cart = carts
        .add_collection_line(seed.carded_user_id, seed.spring_id, seed.box_id, 2)
        .expect("add");

    // (30.00 + 3.00) * 2 = 66.00, minus 6.60, minus 5.00 bonus
    assert_eq!(cart.lines[0].unit_price, dec("33.00"));
    assert_eq!(cart.pricing.subtotal, dec("66.00"));
    assert_eq!(cart.pricing.card_discount, dec("6.60"));
    assert_eq!(cart.pricing.bonus_discount, dec("5.00"));
    assert_eq!(cart.pricing.final_price, dec("54.40"));
}

#[tokio::test]
async fn removing_a_line_of_another_user_is_not_found() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let carts = CartService::new(DieselShopRepository::new(pool));

    let cart = carts
        .add_flower_line(seed.user_id, seed.tulip_id, seed.white_id, 3)
        .expect("add");
    let line_id = cart.lines[0].id;

    let err = carts
        .remove_line(seed.carded_user_id, line_id)
        .expect_err("foreign line");
    assert!(matches!(err, DomainError::NotFound(_)));

    let cart = carts.remove_line(seed.user_id, line_id).expect("own line");
    assert!(cart.lines.is_empty());
}

#[tokio::test]
async fn dangling_line_is_an_invalid_cart_state() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let carts = CartService::new(DieselShopRepository::new(pool.clone()));

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 1)
        .expect("add");

    // Simulate catalogue data vanishing underneath the cart.
    let mut conn = pool.get().expect("conn");
    diesel::sql_query("ALTER TABLE cart_flowers DROP CONSTRAINT cart_flowers_flower_id_fkey")
        .execute(&mut conn)
        .expect("drop fk");
    diesel::delete(flowers::table.filter(flowers::id.eq(seed.rose_id)))
        .execute(&mut conn)
        .expect("delete flower");

    let err = carts.get_cart(seed.user_id).expect_err("dangling");
    assert!(matches!(err, DomainError::InvalidCartState(_)));
}

#[tokio::test]
async fn checkout_places_order_clears_cart_and_writes_outbox_event() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let repo = DieselShopRepository::new(pool.clone());
    let carts = CartService::new(repo.clone());
    let orders = OrderService::new(repo, tariffs());

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 4)
        .expect("add flowers");
    carts
        .add_collection_line(seed.user_id, seed.spring_id, seed.box_id, 1)
        .expect("add collection");

    let order = orders
        .checkout(seed.user_id, courier(Some(seed.box_id)))
        .expect("checkout");

    // 10.00 + 33.00 lines, 3.00 packing, 100.00 courier
    assert_eq!(order.subtotal, dec("43.00"));
    assert_eq!(order.packing_price, dec("3.00"));
    assert_eq!(order.total_price, dec("146.00"));
    assert_eq!(order.lines.len(), 2);

    let cart = carts.get_cart(seed.user_id).expect("cart");
    assert!(cart.lines.is_empty());

    let stored = orders
        .get_order(seed.user_id, order.id)
        .expect("find")
        .expect("order exists");
    assert_eq!(stored.total_price, dec("146.00"));
    assert_eq!(stored.delivery.delivery_type, DeliveryType::Courier);
    assert_eq!(stored.delivery.address.as_deref(), Some("Flower st. 7"));
    let line_sum = stored
        .lines
        .iter()
        .fold(dec("0"), |acc, l| acc + l.line_total());
    assert_eq!(line_sum, stored.subtotal);

    let mut conn = pool.get().expect("conn");
    let events: Vec<OutboxEventRow> = shop_outbox::table
        .filter(shop_outbox::aggregate_id.eq(order.id.to_string()))
        .select(OutboxEventRow::as_select())
        .load(&mut conn)
        .expect("query failed");
    assert_eq!(events.len(), 1, "exactly one outbox event per order");
    assert_eq!(events[0].aggregate_type, "Order");
    assert_eq!(events[0].event_type, "OrderPlaced");
    let total = events[0].payload["total_price"]
        .as_str()
        .expect("total_price is a string");
    assert_eq!(dec(total), dec("146.00"));
    assert_eq!(events[0].payload["lines"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn rejected_checkout_writes_nothing() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let repo = DieselShopRepository::new(pool.clone());
    let carts = CartService::new(repo.clone());
    let orders = OrderService::new(repo, tariffs());

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 1)
        .expect("add");

    let request = CheckoutRequest {
        delivery_type: DeliveryType::PostOffice,
        address: Some("Central".to_string()),
        post_office_number: None,
        packing_id: Some(seed.box_id),
    };
    let err = orders.checkout(seed.user_id, request).expect_err("rejected");
    match err {
        DomainError::Validation(fields) => {
            assert_eq!(fields.len(), 1);
            assert_eq!(fields[0].field, "postOfficeNumber");
        }
        other => panic!("unexpected {other:?}"),
    }

    let mut conn = pool.get().expect("conn");
    let lines: i64 = cart_flowers::table
        .count()
        .get_result(&mut conn)
        .expect("count");
    assert_eq!(lines, 1);
    let events: i64 = shop_outbox::table
        .count()
        .get_result(&mut conn)
        .expect("count");
    assert_eq!(events, 0);
}

#[tokio::test]
async fn failure_while_persisting_the_order_rolls_everything_back() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let repo = DieselShopRepository::new(pool.clone());
    let carts = CartService::new(repo.clone());
    let order_service = OrderService::new(repo, tariffs());

    carts
        .add_flower_line(seed.user_id, seed.rose_id, seed.red_id, 2)
        .expect("add");

    // The outbox insert is the last write of a checkout; make it fail.
    let mut conn = pool.get().expect("conn");
    diesel::sql_query(
        "ALTER TABLE shop_outbox ADD CONSTRAINT no_order_events \
         CHECK (event_type <> 'OrderPlaced')",
    )
    .execute(&mut conn)
    .expect("add constraint");

    let err = order_service
        .checkout(seed.user_id, courier(Some(seed.box_id)))
        .expect_err("outbox insert fails");
    assert!(matches!(err, DomainError::Internal(_)));

    for (table, count) in [
        ("orders", orders::table.count().get_result::<i64>(&mut conn)),
        ("deliveries", deliveries::table.count().get_result::<i64>(&mut conn)),
        ("order_flowers", order_flowers::table.count().get_result::<i64>(&mut conn)),
        ("shop_outbox", shop_outbox::table.count().get_result::<i64>(&mut conn)),
    ] {
        assert_eq!(count.expect("count"), 0, "{table} must be empty after rollback");
    }

    let cart = carts.get_cart(seed.user_id).expect("cart");
    assert_eq!(cart.lines.len(), 1);
    assert_eq!(cart.lines[0].amount, 2);
}

#[tokio::test]
async fn concurrent_checkouts_place_exactly_one_order() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let repo = DieselShopRepository::new(pool);
    let carts = CartService::new(repo.clone());
    let orders = Arc::new(OrderService::new(repo, tariffs()));

    carts
        .add_collection_line(seed.user_id, seed.spring_id, seed.box_id, 1)
        .expect("add");

    let barrier = Arc::new(Barrier::new(2));
    let handles: Vec<_> = (0..2)
        .map(|_| {
            let orders = Arc::clone(&orders);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                orders.checkout(seed.user_id, courier(None))
            })
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(
        results
            .iter()
            .filter(|r| matches!(r, Err(DomainError::EmptyCart)))
            .count(),
        1
    );

    let listed = orders.list_orders(seed.user_id, 1, 20).expect("list");
    assert_eq!(listed.total, 1);
}

#[tokio::test]
async fn list_orders_paginates_newest_first() {
    let (_container, pool) = setup_db().await;
    let seed = seed(&pool);
    let repo = DieselShopRepository::new(pool);
    let carts = CartService::new(repo.clone());
    let orders = OrderService::new(repo, tariffs());

    let mut placed = Vec::new();
    for _ in 0..3 {
        carts
            .add_collection_line(seed.user_id, seed.spring_id, seed.box_id, 1)
            .expect("add");
        placed.push(
            orders
                .checkout(seed.user_id, courier(None))
                .expect("checkout")
                .id,
        );
    }

    let page1 = orders.list_orders(seed.user_id, 1, 2).expect("page 1");
    assert_eq!(page1.total, 3);
    assert_eq!(page1.items.len(), 2);
    assert_eq!(page1.items[0].id, placed[2]);

    let page2 = orders.list_orders(seed.user_id, 2, 2).expect("page 2");
    assert_eq!(page2.items.len(), 1);
    assert_eq!(page2.items[0].id, placed[0]);

    let other = orders.list_orders(seed.carded_user_id, 1, 20).expect("other");
    assert_eq!(other.total, 0);
}
