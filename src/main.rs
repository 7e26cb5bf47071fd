use actix_cors::Cors;
use actix_web::{App, HttpServer, web};
use dotenv::dotenv;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use workbridge_backend::auth::middleware::JwtSecret;
use workbridge_backend::cache::{CacheConfig, RedisCache};
use workbridge_backend::create_pool;
use workbridge_backend::domain::milestone::ApprovalPolicy;
use workbridge_backend::handlers;
use workbridge_backend::services::matching::MatchingClient;
use workbridge_backend::services::payments::PaymentGateway;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let db = create_pool().await;
    let db_data = web::Data::new(db);

    // Initialize Redis cache
    let redis_url = std::env::var("REDIS_URL").expect("REDIS_URL must be set");
    let redis_cache = RedisCache::new(&redis_url)
        .await
        .expect("Failed to connect to Redis");
    let redis_data = web::Data::new(Arc::new(redis_cache));
    let cache_cfg = web::Data::new(CacheConfig::from_env());
    tracing::info!("Connected to Redis");

    let jwt_secret = std::env::var("AUTH_JWT_SECRET").expect("AUTH_JWT_SECRET must be set");
    let jwt_data = web::Data::new(JwtSecret(jwt_secret));

    let matching = web::Data::new(MatchingClient::from_env());
    let gateway = web::Data::new(PaymentGateway::from_env());

    let approval_policy = ApprovalPolicy::from_env();
    let policy_data = web::Data::new(approval_policy);
    tracing::info!(?approval_policy, "milestone approval policy loaded");

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());
    let bind_addr = format!("0.0.0.0:{port}");
    tracing::info!("Server running at http://{bind_addr}");

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"])
            .allowed_headers(vec![
                actix_web::http::header::AUTHORIZATION,
                actix_web::http::header::CONTENT_TYPE,
                actix_web::http::header::ACCEPT,
            ])
            .max_age(3600);

        App::new()
            .wrap(cors)
            .app_data(db_data.clone())
            .app_data(redis_data.clone())
            .app_data(cache_cfg.clone())
            .app_data(jwt_data.clone())
            .app_data(matching.clone())
            .app_data(gateway.clone())
            .app_data(policy_data.clone())
            .service(web::scope("/api").configure(handlers::init_routes))
    })
    .bind(&bind_addr)?
    .run()
    .await
}
