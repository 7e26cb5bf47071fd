use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::require_role;
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::profiles as profile_db;
use crate::models::profiles::{ProfileResponse, UpsertProfile};
use crate::models::users::UserRole;
use crate::services::matching::MatchingClient;

/// GET /api/profiles/me — the authenticated user's marketplace profile.
pub async fn get_my_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match profile_db::get_by_user_id(db.get_ref(), user.0.id).await {
        Ok(Some(profile)) => HttpResponse::Ok().json(ProfileResponse::from(profile)),
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": "No profile yet — create one with PUT /api/profiles/me",
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/profiles/me — create or update the authenticated user's profile.
pub async fn upsert_my_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<UpsertProfile>,
) -> impl Responder {
    match profile_db::upsert_for_user(db.get_ref(), user.0.id, body.into_inner()).await {
        Ok(profile) => {
            let _ = cache.delete(&keys::profile(&user.0.id.to_string())).await;
            let _ = cache.delete(&keys::engineer_pool()).await;
            HttpResponse::Ok().json(ProfileResponse::from(profile))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to save profile: {e}"),
        })),
    }
}

/// GET /api/profiles/user/{user_id} — a user's profile (requires authentication).
pub async fn get_profile_by_user(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let user_id = path.into_inner();
    let cache_key = keys::profile(&user_id.to_string());

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match profile_db::get_by_user_id(db.get_ref(), user_id).await {
        Ok(Some(profile)) => {
            let response = ProfileResponse::from(profile);
            let _ = cache
                .set(&cache_key, &response, Some(cache_cfg.profile_ttl))
                .await;
            HttpResponse::Ok().json(response)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("No profile for user {user_id}"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/profiles/engineers — browse available engineer profiles.
pub async fn list_engineers(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
) -> impl Responder {
    let cache_key = keys::engineer_pool();

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match profile_db::list_available_engineers(db.get_ref()).await {
        Ok(profiles) => {
            let response: Vec<ProfileResponse> =
                profiles.into_iter().map(ProfileResponse::from).collect();
            let _ = cache
                .set(&cache_key, &response, Some(cache_cfg.profile_ttl))
                .await;
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/profiles/roster — a resourcing company adds an engineer to its roster.
pub async fn create_roster_profile(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<UpsertProfile>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, UserRole::ResourcingCompany) {
        return resp;
    }

    match profile_db::insert_roster_profile(db.get_ref(), user.0.id, body.into_inner()).await {
        Ok(profile) => {
            let _ = cache.delete(&keys::engineer_pool()).await;
            HttpResponse::Created().json(ProfileResponse::from(profile))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create roster profile: {e}"),
        })),
    }
}

/// GET /api/profiles/roster — the resourcing company's own roster.
pub async fn list_roster(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, UserRole::ResourcingCompany) {
        return resp;
    }

    match profile_db::list_roster(db.get_ref(), user.0.id).await {
        Ok(profiles) => {
            let response: Vec<ProfileResponse> =
                profiles.into_iter().map(ProfileResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/profiles/me/coaching — AI feedback on the engineer's own profile.
pub async fn profile_coaching(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    matching: web::Data<MatchingClient>,
) -> impl Responder {
    let profile = match profile_db::get_by_user_id(db.get_ref(), user.0.id).await {
        Ok(Some(profile)) => profile,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "No profile yet — create one before requesting coaching",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    match matching.profile_coaching(&profile).await {
        Ok(insights) => HttpResponse::Ok().json(serde_json::json!({ "insights": insights })),
        Err(e) => HttpResponse::BadGateway().json(serde_json::json!({
            "error": format!("{e}"),
        })),
    }
}
