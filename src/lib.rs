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

use application::cart_service::CartService;
use application::catalog_service::CatalogService;
use application::content_service::ContentService;
use application::customer_service::CustomerService;
use application::order_service::OrderService;
use infrastructure::{
    DieselCartRepository, DieselCatalogRepository, DieselContentRepository,
    DieselCustomerDirectory, DieselOrderRepository,
};

pub use config::Config;
pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    log::info!("Applied {} pending migration(s)", applied.len());
    Ok(())
}

/// Services wired to their Postgres repositories, shared by every worker.
pub struct AppState {
    pub catalog: CatalogService<DieselCatalogRepository>,
    pub customers: CustomerService<DieselCustomerDirectory>,
    pub carts: CartService<DieselCatalogRepository, DieselCartRepository>,
    pub orders: OrderService<DieselOrderRepository>,
    pub content: ContentService<DieselContentRepository>,
}

impl AppState {
    pub fn new(pool: DbPool) -> Self {
        Self {
            catalog: CatalogService::new(DieselCatalogRepository::new(pool.clone())),
            customers: CustomerService::new(DieselCustomerDirectory::new(pool.clone())),
            carts: CartService::new(
                DieselCatalogRepository::new(pool.clone()),
                DieselCartRepository::new(pool.clone()),
            ),
            orders: OrderService::new(DieselOrderRepository::new(pool.clone())),
            content: ContentService::new(DieselContentRepository::new(pool)),
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Oil shop API", description = "Catalog, carts and orders of a lubricant store"),
    paths(
        handlers::catalog::list_categories,
        handlers::catalog::create_category,
        handlers::catalog::category_products,
        handlers::catalog::latest_products,
        handlers::catalog::get_product,
        handlers::catalog::create_product,
        handlers::customers::create_customer,
        handlers::customers::customer_cart,
        handlers::customers::customer_orders,
        handlers::carts::create_cart,
        handlers::carts::get_cart,
        handlers::carts::add_item,
        handlers::carts::change_item_quantity,
        handlers::carts::remove_item,
        handlers::orders::place_order,
        handlers::orders::list_orders,
        handlers::orders::get_order,
        handlers::orders::advance_status,
        handlers::content::latest_reviews,
        handlers::content::create_review,
        handlers::content::list_slides,
        handlers::content::create_slide,
    ),
    tags(
        (name = "catalog", description = "Categories and products"),
        (name = "customers", description = "Customers and their carts"),
        (name = "carts", description = "Cart actions"),
        (name = "orders", description = "Order placement and tracking"),
        (name = "content", description = "Reviews and homepage slides"),
    )
)]
pub struct ApiDoc;

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    pool: DbPool,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    let state = web::Data::new(AppState::new(pool));
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .service(
                web::scope("/categories")
                    .route("", web::get().to(handlers::catalog::list_categories))
                    .route("", web::post().to(handlers::catalog::create_category))
                    .route(
                        "/{slug}/products",
                        web::get().to(handlers::catalog::category_products),
                    ),
            )
            .service(
                web::scope("/products")
                    .route("", web::post().to(handlers::catalog::create_product))
                    .route("/latest", web::get().to(handlers::catalog::latest_products))
                    .route("/{slug}", web::get().to(handlers::catalog::get_product)),
            )
            .service(
                web::scope("/customers")
                    .route("", web::post().to(handlers::customers::create_customer))
                    .route("/{id}/cart", web::get().to(handlers::customers::customer_cart))
                    .route(
                        "/{id}/orders",
                        web::get().to(handlers::customers::customer_orders),
                    ),
            )
            .service(
                web::scope("/carts")
                    .route("", web::post().to(handlers::carts::create_cart))
                    .route("/{id}", web::get().to(handlers::carts::get_cart))
                    .route("/{id}/items/{slug}", web::post().to(handlers::carts::add_item))
                    .route(
                        "/{id}/items/{slug}",
                        web::put().to(handlers::carts::change_item_quantity),
                    )
                    .route(
                        "/{id}/items/{slug}",
                        web::delete().to(handlers::carts::remove_item),
                    )
                    .route("/{id}/order", web::post().to(handlers::orders::place_order)),
            )
            .service(
                web::scope("/orders")
                    .route("", web::get().to(handlers::orders::list_orders))
                    .route("/{id}", web::get().to(handlers::orders::get_order))
                    .route(
                        "/{id}/status",
                        web::patch().to(handlers::orders::advance_status),
                    ),
            )
            .service(
                web::resource("/reviews")
                    .route(web::get().to(handlers::content::latest_reviews))
                    .route(web::post().to(handlers::content::create_review)),
            )
            .service(
                web::resource("/slides")
                    .route(web::get().to(handlers::content::list_slides))
                    .route(web::post().to(handlers::content::create_slide)),
            )
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
