pub mod application;
pub mod config;
pub mod db;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::AppConfig;
pub use db::{create_pool, DbPool};

use application::cart_service::CartService;
use application::catalogue_service::CatalogueService;
use application::order_service::OrderService;
use domain::checkout::DeliveryTariffs;
use errors::AppError;
use infrastructure::DieselShopRepository;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub type ShopCartService = CartService<DieselShopRepository>;
pub type ShopOrderService = OrderService<DieselShopRepository>;
pub type ShopCatalogueService = CatalogueService<DieselShopRepository>;

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::account::get_account_details,
        handlers::cart::get_cart,
        handlers::cart::add_flower,
        handlers::cart::add_collection,
        handlers::cart::remove_line,
        handlers::orders::create_order,
        handlers::orders::get_order,
        handlers::orders::list_orders,
        handlers::catalogue::list_flowers,
        handlers::catalogue::get_flower,
        handlers::catalogue::list_collections,
        handlers::catalogue::list_colours,
        handlers::catalogue::list_packings,
    ),
    components(schemas(errors::ErrorBody)),
    tags(
        (name = "account", description = "Current user"),
        (name = "cart", description = "Shopping cart"),
        (name = "orders", description = "Checkout and order history"),
        (name = "catalogue", description = "Flowers, collections, colours and packings"),
    )
)]
pub struct ApiDoc;

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Register every route under `/api` plus the Swagger UI. Shared by the
/// server and by in-process tests.
pub fn configure(
    pool: DbPool,
    tariffs: DeliveryTariffs,
) -> impl Fn(&mut web::ServiceConfig) + Clone + Send + 'static {
    let repo = DieselShopRepository::new(pool);
    let carts = web::Data::new(CartService::new(repo.clone()));
    let orders = web::Data::new(OrderService::new(repo.clone(), tariffs));
    let catalogue = web::Data::new(CatalogueService::new(repo));

    move |cfg: &mut web::ServiceConfig| {
        cfg.app_data(carts.clone())
            .app_data(orders.clone())
            .app_data(catalogue.clone())
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::PathConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .app_data(web::QueryConfig::default().error_handler(|err, _req| {
                AppError::BadRequest(err.to_string()).into()
            }))
            .service(
                web::scope("/api")
                    .route(
                        "/account-details",
                        web::get().to(handlers::account::get_account_details),
                    )
                    .route("/cart", web::get().to(handlers::cart::get_cart))
                    .route(
                        "/cart/lines/{line_id}",
                        web::delete().to(handlers::cart::remove_line),
                    )
                    .route("/flowers", web::get().to(handlers::catalogue::list_flowers))
                    .route("/flowers/{id}", web::get().to(handlers::catalogue::get_flower))
                    .route("/flowers/{id}/cart", web::post().to(handlers::cart::add_flower))
                    .route(
                        "/collections",
                        web::get().to(handlers::catalogue::list_collections),
                    )
                    .route(
                        "/collections/{id}/cart",
                        web::post().to(handlers::cart::add_collection),
                    )
                    .route("/colours", web::get().to(handlers::catalogue::list_colours))
                    .route("/packings", web::get().to(handlers::catalogue::list_packings))
                    .route("/orders", web::post().to(handlers::orders::create_order))
                    .route("/orders", web::get().to(handlers::orders::list_orders))
                    .route("/orders/{id}", web::get().to(handlers::orders::get_order)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            );
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    tariffs: DeliveryTariffs,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let routes = configure(pool, tariffs);
    Ok(HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .configure(routes.clone())
    })
    .bind((host.to_string(), port))?
    .run())
}
