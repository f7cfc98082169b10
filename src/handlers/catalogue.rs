use std::str::FromStr;

use actix_web::{web, HttpResponse};
use bigdecimal::BigDecimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::domain::catalogue::{Collection, Colour, Flower, Packing, ProductFilter};
use crate::errors::AppError;
use crate::ShopCatalogueService;

use super::dto::{clamp_paging, default_limit, default_page, money};

// ── Request / response DTOs ──────────────────────────────────────────────────

/// Query parameters accepted by the flower and collection listings.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductListParams {
    /// Case-insensitive substring of the name.
    pub name: Option<String>,
    /// Inclusive lower price bound, e.g. "2.50".
    pub min_price: Option<String>,
    /// Inclusive upper price bound.
    pub max_price: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

impl ProductListParams {
    fn filter(&self) -> Result<ProductFilter, AppError> {
        Ok(ProductFilter {
            name_contains: self
                .name
                .as_deref()
                .map(str::trim)
                .filter(|n| !n.is_empty())
                .map(str::to_string),
            min_price: parse_price("minPrice", self.min_price.as_deref())?,
            max_price: parse_price("maxPrice", self.max_price.as_deref())?,
        })
    }
}

fn parse_price(name: &str, raw: Option<&str>) -> Result<Option<BigDecimal>, AppError> {
    raw.map(|s| {
        BigDecimal::from_str(s.trim())
            .map_err(|_| AppError::BadRequest(format!("{name} must be a decimal number")))
    })
    .transpose()
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<Flower> for ProductResponse {
    fn from(f: Flower) -> Self {
        ProductResponse {
            id: f.id,
            name: f.name,
            description: f.description,
            price: money(&f.price),
            image_url: f.image_url,
        }
    }
}

impl From<Collection> for ProductResponse {
    fn from(c: Collection) -> Self {
        ProductResponse {
            id: c.id,
            name: c.name,
            description: c.description,
            price: money(&c.price),
            image_url: c.image_url,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductListResponse {
    pub items: Vec<ProductResponse>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ColourResponse {
    pub id: Uuid,
    pub name: String,
}

impl From<Colour> for ColourResponse {
    fn from(c: Colour) -> Self {
        ColourResponse {
            id: c.id,
            name: c.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PackingResponse {
    pub id: Uuid,
    pub name: String,
    pub price: String,
}

impl From<Packing> for PackingResponse {
    fn from(p: Packing) -> Self {
        PackingResponse {
            id: p.id,
            name: p.name,
            price: money(&p.price),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /api/flowers
#[utoipa::path(
    get,
    path = "/api/flowers",
    params(
        ("name" = Option<String>, Query, description = "Name contains (case-insensitive)"),
        ("minPrice" = Option<String>, Query, description = "Inclusive minimum price"),
        ("maxPrice" = Option<String>, Query, description = "Inclusive maximum price"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated flowers", body = ProductListResponse),
        (status = 400, description = "Malformed price bound"),
    ),
    tag = "catalogue"
)]
pub async fn list_flowers(
    catalogue: web::Data<ShopCatalogueService>,
    query: web::Query<ProductListParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let filter = params.filter()?;
    let (page, limit) = clamp_paging(params.page, params.limit);

    let result = web::block(move || catalogue.list_flowers(&filter, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductListResponse {
        items: result.items.into_iter().map(ProductResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /api/flowers/{id}
#[utoipa::path(
    get,
    path = "/api/flowers/{id}",
    params(
        ("id" = Uuid, Path, description = "Flower UUID"),
    ),
    responses(
        (status = 200, description = "Flower found", body = ProductResponse),
        (status = 404, description = "Flower not found"),
    ),
    tag = "catalogue"
)]
pub async fn get_flower(
    catalogue: web::Data<ShopCatalogueService>,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let flower_id = path.into_inner();

    let result = web::block(move || catalogue.get_flower(flower_id))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    match result {
        Some(flower) => Ok(HttpResponse::Ok().json(ProductResponse::from(flower))),
        None => Err(AppError::NotFound("Flower not found".to_string())),
    }
}

/// GET /api/collections
#[utoipa::path(
    get,
    path = "/api/collections",
    params(
        ("name" = Option<String>, Query, description = "Name contains (case-insensitive)"),
        ("minPrice" = Option<String>, Query, description = "Inclusive minimum price"),
        ("maxPrice" = Option<String>, Query, description = "Inclusive maximum price"),
        ("page" = Option<i64>, Query, description = "Page number (1-based, default 1)"),
        ("limit" = Option<i64>, Query, description = "Items per page (default 20, max 100)"),
    ),
    responses(
        (status = 200, description = "Paginated collections", body = ProductListResponse),
        (status = 400, description = "Malformed price bound"),
    ),
    tag = "catalogue"
)]
pub async fn list_collections(
    catalogue: web::Data<ShopCatalogueService>,
    query: web::Query<ProductListParams>,
) -> Result<HttpResponse, AppError> {
    let params = query.into_inner();
    let filter = params.filter()?;
    let (page, limit) = clamp_paging(params.page, params.limit);

    let result = web::block(move || catalogue.list_collections(&filter, page, limit))
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    Ok(HttpResponse::Ok().json(ProductListResponse {
        items: result.items.into_iter().map(ProductResponse::from).collect(),
        total: result.total,
        page,
        limit,
    }))
}

/// GET /api/colours
#[utoipa::path(
    get,
    path = "/api/colours",
    responses(
        (status = 200, description = "All colours", body = [ColourResponse]),
    ),
    tag = "catalogue"
)]
pub async fn list_colours(
    catalogue: web::Data<ShopCatalogueService>,
) -> Result<HttpResponse, AppError> {
    let colours = web::block(move || catalogue.list_colours())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<ColourResponse> = colours.into_iter().map(ColourResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/packings
#[utoipa::path(
    get,
    path = "/api/packings",
    responses(
        (status = 200, description = "All packings", body = [PackingResponse]),
    ),
    tag = "catalogue"
)]
pub async fn list_packings(
    catalogue: web::Data<ShopCatalogueService>,
) -> Result<HttpResponse, AppError> {
    let packings = web::block(move || catalogue.list_packings())
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??;

    let body: Vec<PackingResponse> = packings.into_iter().map(PackingResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}
