use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::users as user_db;
use crate::models::PaginationQuery;
use crate::models::users::{UpdateUser, UserResponse, UserRole};

/// GET /api/users — list all users with pagination (requires authentication).
/// Query params: ?page=1&limit=20
pub async fn get_users(
    _user: AuthenticatedUser, // ensures caller is authenticated
    db: web::Data<DatabaseConnection>,
    query: web::Query<PaginationQuery>,
) -> impl Responder {
    let page = query.page();
    let limit = query.limit();

    match user_db::get_users_paginated(db.get_ref(), page, limit).await {
        Ok(users) => {
            let response: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch users: {e}"),
        })),
    }
}

/// GET /api/users/{id} — get a single user (requires authentication).
pub async fn get_user(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::user(&id.to_string());

    // Try the cache first; on a miss or cache error fall through to the DB.
    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match user_db::get_user_by_id(db.get_ref(), id).await {
        Ok(Some(user)) => {
            let response = UserResponse::from(user);
            let _ = cache
                .set(&cache_key, &response, Some(cache_cfg.user_ttl))
                .await;
            HttpResponse::Ok().json(response)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("User {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// PUT /api/users/{id} — update a user (self or admin).
pub async fn update_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateUser>,
) -> impl Responder {
    let id = path.into_inner();

    if auth_user.0.id != id && auth_user.0.role != UserRole::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only update your own account",
        }));
    }

    // Role changes are reserved for admins.
    if body.role.is_some() && auth_user.0.role != UserRole::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only admins can change a user's role",
        }));
    }

    match user_db::update_user(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            let _ = cache.delete(&keys::user(&id.to_string())).await;
            HttpResponse::Ok().json(UserResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update user: {e}"),
        })),
    }
}

/// DELETE /api/users/{id} — delete a user (self or admin).
pub async fn delete_user(
    auth_user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if auth_user.0.id != id && auth_user.0.role != UserRole::Admin {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You can only delete your own account",
        }));
    }

    match user_db::delete_user(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                let _ = cache.delete(&keys::user(&id.to_string())).await;
                let _ = cache.delete(&keys::profile(&id.to_string())).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("User {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("User {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete user: {e}"),
        })),
    }
}
