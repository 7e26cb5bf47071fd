use actix_web::HttpResponse;
use sea_orm::DatabaseConnection;
use uuid::Uuid;

use crate::db::contracts as contract_db;
use crate::db::jobs as job_db;
use crate::domain::ContractParty;
use crate::models::contracts::Model as Contract;
use crate::models::jobs::Model as Job;
use crate::models::users::{Model as User, UserRole};

/// Resolve which side of a contract the acting user is on. Admins act on the
/// company side and may countersign.
pub async fn verify_contract_party(
    db: &DatabaseConnection,
    contract_id: Uuid,
    user: &User,
) -> Result<(Contract, ContractParty), HttpResponse> {
    let contract = contract_db::get_contract_by_id(db, contract_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Contract {contract_id} not found"),
            }))
        })?;

    let party = if contract.engineer_id == user.id {
        ContractParty::Engineer
    } else if contract.company_id == user.id || user.role == UserRole::Admin {
        ContractParty::Company
    } else {
        return Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You are not a party to this contract",
        })));
    };

    Ok((contract, party))
}

/// Verify the user owns the job (or is an admin) and return it.
pub async fn verify_job_owner(
    db: &DatabaseConnection,
    job_id: Uuid,
    user: &User,
) -> Result<Job, HttpResponse> {
    match job_db::get_job_by_id(db, job_id).await {
        Ok(Some(job)) if job.company_id == user.id || user.role == UserRole::Admin => Ok(job),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "You do not own this job",
        }))),
        Ok(None) => Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": format!("Job {job_id} not found"),
        }))),
        Err(e) => Err(HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        }))),
    }
}

/// Admin-only endpoints.
pub fn require_admin(user: &User) -> Result<(), HttpResponse> {
    if user.role == UserRole::Admin {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Admin access required",
        })))
    }
}

/// Endpoints reserved for a specific role (admins always pass).
pub fn require_role(user: &User, role: UserRole) -> Result<(), HttpResponse> {
    if user.role == role || user.role == UserRole::Admin {
        Ok(())
    } else {
        Err(HttpResponse::Forbidden().json(serde_json::json!({
            "error": format!("This action requires the {:?} role", role),
        })))
    }
}
