use actix_web::{HttpResponse, Responder, web};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::auth::authorization::{require_role, verify_job_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::jobs as job_db;
use crate::domain::application::{self, ApplicationActor};
use crate::models::applications;
use crate::models::jobs::JobStatus;
use crate::models::users::{Model as User, UserRole};
use crate::services::payments::PaymentGateway;

/// Flat fee charged to supercharge an application.
const SUPERCHARGE_FEE: Decimal = Decimal::from_parts(2500, 0, 0, false, 2); // 25.00

/// Resolve whether the acting user is the applicant or the job owner for an
/// application, loading both rows along the way.
async fn resolve_actor(
    db: &DatabaseConnection,
    application_id: Uuid,
    user: &User,
) -> Result<(applications::Model, ApplicationActor), HttpResponse> {
    let application = application_db::get_application_by_id(db, application_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Application {application_id} not found"),
            }))
        })?;

    if application.engineer_id == user.id {
        return Ok((application, ApplicationActor::Applicant));
    }

    let job = job_db::get_job_by_id(db, application.job_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": "The job for this application no longer exists",
            }))
        })?;

    if job.company_id == user.id || user.role == UserRole::Admin {
        Ok((application, ApplicationActor::JobOwner))
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not involved in this application",
        })))
    }
}

/// POST /api/jobs/{id}/apply — an engineer applies to an open job.
pub async fn apply(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let job_id = path.into_inner();

    if let Err(resp) = require_role(&user.0, UserRole::Engineer) {
        return resp;
    }

    let job = match job_db::get_job_by_id(db.get_ref(), job_id).await {
        Ok(Some(job)) => job,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Job {job_id} not found"),
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    if job.status != JobStatus::Open {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "This job is no longer accepting applications",
        }));
    }

    match application_db::application_exists(db.get_ref(), job_id, user.0.id).await {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "You have already applied to this job",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    match application_db::insert_application(db.get_ref(), job_id, user.0.id).await {
        Ok(application) => HttpResponse::Created().json(application),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create application: {e}"),
        })),
    }
}

/// GET /api/applications/mine — the engineer's own applications.
pub async fn my_applications(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match application_db::get_applications_by_engineer_id(db.get_ref(), user.0.id).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// GET /api/jobs/{id}/applications — applications on a job, supercharged
/// first (owner or admin).
pub async fn applications_for_job(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let job_id = path.into_inner();

    if let Err(resp) = verify_job_owner(db.get_ref(), job_id, &user.0).await {
        return resp;
    }

    match application_db::get_applications_by_job_id(db.get_ref(), job_id).await {
        Ok(applications) => HttpResponse::Ok().json(applications),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// Shared body for the four status transitions: fetch, resolve actor, run
/// the domain transition, persist.
async fn transition(
    db: &DatabaseConnection,
    application_id: Uuid,
    user: &User,
    apply: impl Fn(
        &applications::ApplicationStatus,
        ApplicationActor,
    ) -> Result<applications::ApplicationStatus, crate::domain::TransitionError>,
) -> HttpResponse {
    let (application, actor) = match resolve_actor(db, application_id, user).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    let next = match apply(&application.status, actor) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match application_db::update_application_status(db, application_id, next).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update application: {e}"),
        })),
    }
}

/// POST /api/applications/{id}/offer — job owner extends an offer.
pub async fn offer(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(db.get_ref(), path.into_inner(), &user.0, application::offer).await
}

/// POST /api/applications/{id}/reject — job owner rejects the application.
pub async fn reject(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(db.get_ref(), path.into_inner(), &user.0, application::reject).await
}

/// POST /api/applications/{id}/accept — applicant accepts an offer.
pub async fn accept(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(db.get_ref(), path.into_inner(), &user.0, application::accept).await
}

/// POST /api/applications/{id}/withdraw — applicant withdraws.
pub async fn withdraw(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    transition(
        db.get_ref(),
        path.into_inner(),
        &user.0,
        application::withdraw,
    )
    .await
}

/// POST /api/applications/{id}/review — job owner marks the application read.
pub async fn review(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let application_id = path.into_inner();

    let (_, actor) = match resolve_actor(db.get_ref(), application_id, &user.0).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };
    if actor != ApplicationActor::JobOwner {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the job owner can mark applications reviewed",
        }));
    }

    match application_db::mark_reviewed(db.get_ref(), application_id).await {
        Ok(updated) => HttpResponse::Ok().json(updated),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update application: {e}"),
        })),
    }
}

/// POST /api/applications/{id}/supercharge — applicant pays the priority fee.
pub async fn supercharge(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<PaymentGateway>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let application_id = path.into_inner();

    let (application, actor) = match resolve_actor(db.get_ref(), application_id, &user.0).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };
    if actor != ApplicationActor::Applicant {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the applicant can supercharge their application",
        }));
    }
    if application.is_supercharged {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "This application is already supercharged",
        }));
    }

    let receipt = match gateway
        .charge(SUPERCHARGE_FEE, "USD", "Application supercharge")
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            return HttpResponse::PaymentRequired().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match application_db::mark_supercharged(db.get_ref(), application_id).await {
        Ok(updated) => HttpResponse::Ok().json(serde_json::json!({
            "application": updated,
            "receipt": receipt,
        })),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update application: {e}"),
        })),
    }
}
