use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{require_role, verify_job_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::cache::{CacheConfig, RedisCache, keys};
use crate::db::jobs as job_db;
use crate::db::profiles as profile_db;
use crate::models::jobs::{CreateJob, JobListQuery, JobResponse, JobStatus, UpdateJob};
use crate::models::users::UserRole;
use crate::services::matching::MatchingClient;

async fn invalidate_job_caches(cache: &RedisCache, id: Uuid) {
    let _ = cache.delete(&keys::job(&id.to_string())).await;
    let _ = cache.delete_pattern("jobs:list:*").await;
}

/// GET /api/jobs — search open jobs (requires authentication).
/// Query params: ?q=&skill=&min_rate=&max_rate=&limit=&cursor_created_at=&cursor_id=
pub async fn get_jobs(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    query: web::Query<JobListQuery>,
) -> impl Responder {
    // Only the first page is cached; cursored pages churn too much to be
    // worth the invalidation traffic.
    let cacheable = query.cursor_created_at.is_none() && query.cursor_id.is_none();
    let cache_key = keys::job_list(&query.fingerprint());

    if cacheable {
        if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
            return HttpResponse::Ok().json(cached);
        }
    }

    match job_db::search_open_jobs(db.get_ref(), &query).await {
        Ok(jobs) => {
            let response: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
            if cacheable {
                let _ = cache
                    .set(&cache_key, &response, Some(cache_cfg.job_list_ttl))
                    .await;
            }
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to fetch jobs: {e}"),
        })),
    }
}

/// GET /api/jobs/{id} — get a single job (requires authentication).
pub async fn get_job(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    cache_cfg: web::Data<CacheConfig>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();
    let cache_key = keys::job(&id.to_string());

    if let Ok(Some(cached)) = cache.get::<serde_json::Value>(&cache_key).await {
        return HttpResponse::Ok().json(cached);
    }

    match job_db::get_job_by_id(db.get_ref(), id).await {
        Ok(Some(job)) => {
            let response = JobResponse::from(job);
            let _ = cache
                .set(&cache_key, &response, Some(cache_cfg.job_ttl))
                .await;
            HttpResponse::Ok().json(response)
        }
        Ok(None) => HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Job {id} not found"),
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/jobs — post a new job (company role required).
pub async fn create_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    body: web::Json<CreateJob>,
) -> impl Responder {
    if let Err(resp) = require_role(&user.0, UserRole::Company) {
        return resp;
    }

    match job_db::insert_job(db.get_ref(), body.into_inner(), user.0.id).await {
        Ok(job) => {
            let _ = cache.delete_pattern("jobs:list:*").await;
            HttpResponse::Created().json(JobResponse::from(job))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create job: {e}"),
        })),
    }
}

/// PUT /api/jobs/{id} — update a job (owner or admin).
pub async fn update_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
    body: web::Json<UpdateJob>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(resp) = verify_job_owner(db.get_ref(), id, &user.0).await {
        return resp;
    }

    match job_db::update_job(db.get_ref(), id, body.into_inner()).await {
        Ok(updated) => {
            invalidate_job_caches(cache.get_ref(), id).await;
            HttpResponse::Ok().json(JobResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update job: {e}"),
        })),
    }
}

/// POST /api/jobs/{id}/close — close a job to new applications (owner or admin).
pub async fn close_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(resp) = verify_job_owner(db.get_ref(), id, &user.0).await {
        return resp;
    }

    match job_db::set_job_status(db.get_ref(), id, JobStatus::Closed).await {
        Ok(updated) => {
            invalidate_job_caches(cache.get_ref(), id).await;
            HttpResponse::Ok().json(JobResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to close job: {e}"),
        })),
    }
}

/// DELETE /api/jobs/{id} — delete a job (owner or admin).
pub async fn delete_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    cache: web::Data<Arc<RedisCache>>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    if let Err(resp) = verify_job_owner(db.get_ref(), id, &user.0).await {
        return resp;
    }

    match job_db::delete_job(db.get_ref(), id).await {
        Ok(result) => {
            if result.rows_affected > 0 {
                invalidate_job_caches(cache.get_ref(), id).await;
                HttpResponse::Ok().json(serde_json::json!({
                    "message": format!("Job {id} deleted"),
                }))
            } else {
                HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Job {id} not found"),
                }))
            }
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to delete job: {e}"),
        })),
    }
}

/// GET /api/jobs/company/{company_id} — all jobs posted by a company.
pub async fn get_jobs_by_company(
    _user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let company_id = path.into_inner();

    match job_db::get_jobs_by_company_id(db.get_ref(), company_id).await {
        Ok(jobs) => {
            let response: Vec<JobResponse> = jobs.into_iter().map(JobResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/jobs/{id}/match — rank available engineers against the job via
/// the AI matching service (owner or admin).
pub async fn match_engineers(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    matching: web::Data<MatchingClient>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let id = path.into_inner();

    let job = match verify_job_owner(db.get_ref(), id, &user.0).await {
        Ok(job) => job,
        Err(resp) => return resp,
    };

    let candidates = match profile_db::list_available_engineers(db.get_ref()).await {
        Ok(candidates) => candidates,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if candidates.is_empty() {
        return HttpResponse::Ok().json(serde_json::json!({ "matches": [] }));
    }

    match matching.rank_candidates(&job, &candidates).await {
        Ok(matches) => HttpResponse::Ok().json(serde_json::json!({ "matches": matches })),
        Err(e) => HttpResponse::BadGateway().json(serde_json::json!({
            "error": format!("{e}"),
        })),
    }
}
