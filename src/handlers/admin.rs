use actix_web::{HttpResponse, Responder, web};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;

use crate::auth::authorization::require_admin;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::contracts as contract_db;
use crate::db::jobs as job_db;
use crate::db::users as user_db;
use crate::models::applications::ApplicationStatus;
use crate::models::contracts::{ContractResponse, ContractStatus};
use crate::models::users::UserRole;

/// GET /api/admin/stats — marketplace-wide counts for the oversight
/// dashboard.
pub async fn stats(user: AuthenticatedUser, db: web::Data<DatabaseConnection>) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }
    let db = db.get_ref();

    let mut users = serde_json::Map::new();
    for (label, role) in [
        ("engineers", UserRole::Engineer),
        ("companies", UserRole::Company),
        ("resourcing_companies", UserRole::ResourcingCompany),
        ("admins", UserRole::Admin),
    ] {
        match user_db::count_by_role(db, role).await {
            Ok(count) => {
                users.insert(label.to_string(), count.into());
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    let open_jobs = match job_db::count_open(db).await {
        Ok(count) => count,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let mut applications = serde_json::Map::new();
    for (label, status) in [
        ("applied", ApplicationStatus::Applied),
        ("offered", ApplicationStatus::Offered),
        ("accepted", ApplicationStatus::Accepted),
        ("rejected", ApplicationStatus::Rejected),
        ("withdrawn", ApplicationStatus::Withdrawn),
    ] {
        match application_db::count_by_status(db, status).await {
            Ok(count) => {
                applications.insert(label.to_string(), count.into());
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    let mut contracts = serde_json::Map::new();
    for (label, status) in [
        ("draft", ContractStatus::Draft),
        ("pending_signature", ContractStatus::PendingSignature),
        ("signed", ContractStatus::Signed),
        ("active", ContractStatus::Active),
        ("completed", ContractStatus::Completed),
        ("cancelled", ContractStatus::Cancelled),
    ] {
        match contract_db::count_by_status(db, status).await {
            Ok(count) => {
                contracts.insert(label.to_string(), count.into());
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        }
    }

    // Total value across contracts that made it past signature.
    let contracted_value = match contract_db::get_all_contracts(db).await {
        Ok(all) => all
            .iter()
            .filter(|c| {
                matches!(
                    c.status,
                    ContractStatus::Active | ContractStatus::Completed
                )
            })
            .fold(Decimal::ZERO, |acc, c| acc + c.amount),
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    HttpResponse::Ok().json(serde_json::json!({
        "users": users,
        "open_jobs": open_jobs,
        "applications": applications,
        "contracts": contracts,
        "contracted_value": contracted_value,
    }))
}

/// GET /api/admin/contracts — every contract on the platform.
pub async fn all_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    if let Err(resp) = require_admin(&user.0) {
        return resp;
    }

    match contract_db::get_all_contracts(db.get_ref()).await {
        Ok(contracts) => {
            let response: Vec<ContractResponse> =
                contracts.into_iter().map(ContractResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
