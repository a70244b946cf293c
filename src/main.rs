mod api;
mod database;
mod middleware;
mod models;
mod services;

use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::env;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    // Get configuration from environment
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = env::var("PORT").unwrap_or_else(|_| "5000".to_string());
    let database_url = env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    log::info!("🚀 Starting HeartsUnite Service...");
    log::info!("📊 Database: {}", database_url);

    // Initialize MongoDB connection (indexes + counter bootstrap incluídos)
    let db = database::MongoDB::new(&database_url)
        .await
        .expect("Failed to connect to MongoDB");

    let db_data = web::Data::new(db.clone());

    log::info!("✅ MongoDB connected successfully");

    log::info!("🌐 Server starting on {}:{}", host, port);
    log::info!("📚 Swagger UI available at: http://{}:{}/swagger-ui/", host, port);
    log::info!("📄 OpenAPI spec at: http://{}:{}/api-docs/openapi.json", host, port);

    // Start HTTP server
    HttpServer::new(move || {
        let cors = Cors::default()
            .allowed_origin("http://localhost:5173") // Frontend dev
            .allowed_origin("http://localhost:5174")
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .supports_credentials()
            .max_age(3600);

        // Generate OpenAPI specification
        let openapi = api::swagger::ApiDoc::openapi();

        App::new()
            .app_data(db_data.clone())
            .wrap(cors)
            .wrap(Logger::default())
            // Swagger UI
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", openapi.clone()),
            )
            // Health check
            .route("/health", web::get().to(api::health::health_check))
            // Auth boundary: cookie emitido no login, limpo no logout
            .route("/jwt", web::post().to(api::auth::issue_token))
            .route("/logout", web::get().to(api::auth::logout))
            // ==================== PUBLIC BROWSING ====================
            .route("/biodatas", web::get().to(api::biodatas::list_biodatas))
            .route("/similarBiodatas", web::get().to(api::biodatas::similar_biodatas))
            .route("/allPremiumMember", web::get().to(api::biodatas::premium_members))
            .route("/checkout/{biodata_id}", web::get().to(api::biodatas::checkout_lookup))
            // GET público + PATCH admin no mesmo path: o PATCH se protege
            // pelo extractor de Claims, não por wrap de scope
            .service(
                web::resource("/biodata/{id}")
                    .route(web::get().to(api::biodatas::get_biodata))
                    .route(web::patch().to(api::biodatas::set_status)),
            )
            .service(
                web::resource("/success-stories")
                    .route(web::get().to(api::success_stories::list_success_stories))
                    .route(web::post().to(api::success_stories::create_success_story)),
            )
            // ==================== AUTHENTICATED ====================
            .service(
                web::resource("/user")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::put().to(api::users::upsert_user)),
            )
            .service(
                web::resource("/user/{email}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::users::get_user)),
            )
            .service(
                web::resource("/biodata")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::post().to(api::biodatas::create_biodata)),
            )
            .service(
                web::resource("/biodata/requestPremium/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::patch().to(api::biodatas::request_premium)),
            )
            .service(
                web::resource("/viewBiodata/{email}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::biodatas::view_biodata)),
            )
            .service(
                web::resource("/favBiodatas")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::favorites::list_favorites)),
            )
            .service(
                web::resource("/favBiodata")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::post().to(api::favorites::add_favorite)),
            )
            .service(
                web::resource("/favBiodata/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::delete().to(api::favorites::delete_favorite)),
            )
            .service(
                web::resource("/contactReq")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::post().to(api::contact_requests::create_contact_request)),
            )
            .service(
                web::resource("/contactReqs")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::contact_requests::list_all)),
            )
            .service(
                web::resource("/contactReqs/{email}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::contact_requests::list_by_requester)),
            )
            .service(
                web::resource("/contactReq/approve/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::patch().to(api::contact_requests::approve)),
            )
            .service(
                web::resource("/contactReq/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::delete().to(api::contact_requests::delete)),
            )
            .service(
                web::resource("/create-payment-intent")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::post().to(api::payments::create_payment_intent)),
            )
            // ==================== ADMIN ====================
            // AuthMiddleware garante o token; o papel de admin é checado
            // contra o banco dentro de cada handler (api::require_admin)
            .service(
                web::resource("/users")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::users::list_users)),
            )
            .service(
                web::resource("/users/update/{email}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::patch().to(api::users::update_user_status)),
            )
            .service(
                web::resource("/allPremiumReq")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::biodatas::premium_requests)),
            )
            .service(
                web::resource("/makePremium/{id}")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::patch().to(api::biodatas::make_premium)),
            )
            .service(
                web::resource("/admin-stat")
                    .wrap(middleware::AuthMiddleware)
                    .route(web::get().to(api::stats::admin_stats)),
            )
    })
    .bind(format!("{}:{}", host, port))?
    .run()
    .await
}
