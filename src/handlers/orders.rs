use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::checkout::CheckoutRequest;
use crate::errors::AppError;
use crate::ShopOrderService;

use super::auth::CurrentUser;
use super::dto::{clamp_paging, default_limit, default_page, money, DeliveryTypeDto, OrderResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub delivery_type: DeliveryTypeDto,
    /// Required for `COURIER` and `POST_OFFICE`.
    pub address: Option<String>,
    /// Required for `POST_OFFICE`.
    pub post_office_number: Option<i32>,
    /// Required when the cart contains loose flowers.
    pub packing_id: Option<Uuid>,
}

impl From<CreateOrderRequest> for CheckoutRequest {
    fn from(r: CreateOrderRequest) -> Self {
        CheckoutRequest {
            delivery_type: r.delivery_type.into(),
            address: r.address,
            post_office_number: r.post_office_number,
            packing_id: r.packing_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummaryResponse {
    pub id: Uuid,
    pub status: String,
    pub created_at: String,
    pub total_price: String,
}

// ── Pagination ───────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct ListOrdersParams {
    /// Page number (1-based). Defaults to 1.
    #[serde(default = "default_page")]
    pub page: i64,
    /// Number of items per page. Defaults to 20, maximum 100.
    #[serde(default = "default_limit")]
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ListOrdersResponse {
    pub items: Vec<OrderSummaryResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /api/orders
///
/// Checks out the current user's cart. Validation, pricing, order creation,
/// delivery creation, the `OrderPlaced` outbox event and clearing the cart
/// all happen in one database transaction; a rejected checkout leaves the
/// cart as it was.
#[utoipa::path(
    post,
    path = "/api/orders",
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    request_body = CreateOrderRequest,
    responses(
        (status = 201, description = "Order placed", body = OrderResponse),
        (status = 400, description = "Delivery details rejected, see `fields`"),
        (status = 401, description = "Missing or unknown user"),
        (status = 409, description = "Cart is empty or was checked out concurrently"),
        (status = 422, description = "Cart references missing catalogue data"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn create_order(
    orders: web::Data<ShopOrderService>,
    user: CurrentUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let request = CheckoutRequest::from(body.into_inner());

    let order = web::block(move || orders.checkout(user.0, request))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Created().json(OrderResponse::from(order)))
}

/// GET /api/orders/{id}
///
/// Returns one of the current user's orders together with its lines.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(
        ("id" = Uuid, Path, description = "Order UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 401, description = "Missing or unknown user"),
        (status = 404, description = "Order not found"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    orders: web::Data<ShopOrderService>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();

    let result = web::block(move || orders.get_order(user.0, order_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(order) => Ok(HttpResponse::Ok().json(OrderResponse::from(order))),
        None => Err(AppError::NotFound("Order not found".to_string())),
    }
}

/// GET /api/orders
///
/// Returns a paginated list of the current user's orders, newest first.
/// Use `page` (1-based) and `limit` to control pagination.
#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Paginated list of orders", body = ListOrdersResponse),
        (status = 401, description = "Missing or unknown user"),
        (status = 500, description = "Internal server error"),
    ),
    tag = "orders"
)]
pub async fn list_orders(
    orders: web::Data<ShopOrderService>,
    user: CurrentUser,
    query: web::Query<ListOrdersParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let (page, limit) = clamp_paging(params.page, params.limit);

    let result = web::block(move || orders.list_orders(user.0, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ListOrdersResponse {
        items: result
            .items
            .into_iter()
            .map(|o| OrderSummaryResponse {
                id: o.id,
                status: o.status,
                created_at: o.created_at.to_rfc3339(),
                total_price: money(&o.total_price),
            })
            .collect(),
        total: result.total,
        page,
        limit,
    }))
}
