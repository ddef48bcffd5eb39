// src/main.rs

use actix_web::{web, App, HttpResponse, HttpServer};
use dotenvy::dotenv;
use sqlx::PgPool;
use std::env;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use garments_api::auth::RequireAuth;
use garments_api::config::Config;
use garments_api::models::{USER_TYPE_BUSINESS, USER_TYPE_INDIVIDUAL, USER_TYPE_SUPERADMIN};
use garments_api::{api, docs, AppState};

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({
        "success": false,
        "message": "Endpoint not found",
        "error": "Route does not exist",
    }))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = PgPool::connect(&database_url)
        .await
        .expect("Failed to connect to DB");

    sqlx::migrate!()
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    let config = Config::from_env();
    let port = config.app_port;
    let state = web::Data::new(AppState { pool, config });

    tracing::info!(port, "starting garments api");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .service(
                SwaggerUi::new("/docs/{_:.*}")
                    .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
            )
            .service(
                web::scope("/api")
                    .service(api::health)
                    // Public auth routes
                    .service(api::auth::superadmin_login)
                    .service(api::auth::business_login)
                    .service(api::auth::business_signup)
                    .service(api::auth::individual_login)
                    .service(api::auth::individual_signup)
                    // Public catalog
                    .service(api::products::list_products)
                    .service(api::products::get_product)
                    .service(
                        web::scope("/business")
                            .wrap(RequireAuth::roles(&[USER_TYPE_BUSINESS]))
                            .service(api::business::dashboard)
                            .service(api::business::get_measurements)
                            .service(api::business::create_measurement)
                            .service(api::business::update_measurement)
                            .service(api::business::delete_measurement)
                            .service(api::business::get_orders)
                            .service(api::business::create_order),
                    )
                    .service(
                        web::scope("/individual")
                            .wrap(RequireAuth::roles(&[USER_TYPE_INDIVIDUAL]))
                            .service(api::individual::dashboard)
                            .service(api::individual::get_measurements)
                            .service(api::individual::create_measurement)
                            .service(api::individual::update_measurement)
                            .service(api::individual::delete_measurement)
                            .service(api::individual::get_orders)
                            .service(api::individual::create_order),
                    )
                    .service(
                        web::scope("/cart")
                            .wrap(RequireAuth::roles(&[
                                USER_TYPE_BUSINESS,
                                USER_TYPE_INDIVIDUAL,
                            ]))
                            .service(api::products::get_cart)
                            .service(api::products::add_to_cart)
                            .service(api::products::update_cart_item)
                            .service(api::products::remove_from_cart)
                            .service(api::products::clear_cart),
                    )
                    .service(
                        web::scope("/superadmin")
                            .wrap(RequireAuth::roles(&[USER_TYPE_SUPERADMIN]))
                            .service(api::superadmin::dashboard)
                            .service(api::superadmin::get_business_users)
                            .service(api::superadmin::get_individual_users)
                            .service(api::superadmin::approve_user)
                            .service(api::superadmin::block_user)
                            .service(api::superadmin::unblock_user)
                            .service(api::superadmin::get_all_products)
                            .service(api::superadmin::create_product)
                            .service(api::superadmin::update_product)
                            .service(api::superadmin::delete_product)
                            .service(api::superadmin::get_all_orders)
                            .service(api::superadmin::update_order_status),
                    ),
            )
            .default_service(web::route().to(not_found))
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
