use actix_web::{web, HttpResponse};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ShopCartService;

use super::auth::CurrentUser;
use super::dto::CartView;

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddFlowerRequest {
    pub amount: i32,
    pub colour_id: Uuid,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCollectionRequest {
    pub amount: i32,
    pub packing_id: Uuid,
}

/// GET /api/cart
#[utoipa::path(
    get,
    path = "/api/cart",
    params(
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Priced cart", body = CartView),
        (status = 401, description = "Missing or unknown user"),
        (status = 422, description = "Cart references missing catalogue data"),
    ),
    tag = "cart"
)]
pub async fn get_cart(
    carts: web::Data<ShopCartService>,
    user: CurrentUser,
) -> Result<HttpResponse, AppError> {
    let cart = web::block(move || carts.get_cart(user.0))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartView::from(cart)))
}

/// POST /api/flowers/{id}/cart
///
/// Adds `amount` stems of the flower in the given colour. An existing line
/// for the same flower and colour has its amount increased instead.
#[utoipa::path(
    post,
    path = "/api/flowers/{id}/cart",
    params(
        ("id" = Uuid, Path, description = "Flower UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    request_body = AddFlowerRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartView),
        (status = 400, description = "Amount is not positive"),
        (status = 401, description = "Missing or unknown user"),
        (status = 404, description = "Flower or colour not found"),
    ),
    tag = "cart"
)]
pub async fn add_flower(
    carts: web::Data<ShopCartService>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    body: web::Json<AddFlowerRequest>,
) -> Result<HttpResponse, AppError> {
    let flower_id = path.into_inner();
    let body = body.into_inner();

    let cart = web::block(move || {
        carts.add_flower_line(user.0, flower_id, body.colour_id, body.amount)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartView::from(cart)))
}

/// POST /api/collections/{id}/cart
#[utoipa::path(
    post,
    path = "/api/collections/{id}/cart",
    params(
        ("id" = Uuid, Path, description = "Collection UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    request_body = AddCollectionRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartView),
        (status = 400, description = "Amount is not positive"),
        (status = 401, description = "Missing or unknown user"),
        (status = 404, description = "Collection or packing not found"),
    ),
    tag = "cart"
)]
pub async fn add_collection(
    carts: web::Data<ShopCartService>,
    user: CurrentUser,
    path: web::Path<Uuid>,
    body: web::Json<AddCollectionRequest>,
) -> Result<HttpResponse, AppError> {
    let collection_id = path.into_inner();
    let body = body.into_inner();

    let cart = web::block(move || {
        carts.add_collection_line(user.0, collection_id, body.packing_id, body.amount)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartView::from(cart)))
}

/// DELETE /api/cart/lines/{line_id}
#[utoipa::path(
    delete,
    path = "/api/cart/lines/{line_id}",
    params(
        ("line_id" = Uuid, Path, description = "Cart line UUID"),
        ("X-User-Id" = Uuid, Header, description = "Authenticated user id"),
    ),
    responses(
        (status = 200, description = "Updated cart", body = CartView),
        (status = 401, description = "Missing or unknown user"),
        (status = 404, description = "No such line in the user's cart"),
    ),
    tag = "cart"
)]
pub async fn remove_line(
    carts: web::Data<ShopCartService>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let line_id = path.into_inner();

    let cart = web::block(move || carts.remove_line(user.0, line_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(CartView::from(cart)))
}
