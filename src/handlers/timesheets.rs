use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::verify_contract_party;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::timesheets as timesheet_db;
use crate::domain::timesheet as timesheet_domain;
use crate::domain::{ContractParty, contract as contract_domain};
use crate::models::contracts::{self, ContractType};
use crate::models::timesheets::{self as timesheet_model, SubmitTimesheet, TimesheetResponse};
use crate::services::payments::PaymentGateway;

/// Load the timesheet and check it belongs to an active day-rate contract
/// the user is a party to.
async fn load_for_action(
    db: &DatabaseConnection,
    contract_id: Uuid,
    timesheet_id: Uuid,
    user: &crate::models::users::Model,
    action: &'static str,
) -> Result<(contracts::Model, ContractParty, timesheet_model::Model), HttpResponse> {
    let (contract, party) = verify_contract_party(db, contract_id, user).await?;

    if contract.contract_type != ContractType::DayRate {
        return Err(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Timesheets apply to day-rate contracts only",
        })));
    }
    if let Err(e) = contract_domain::require_active(&contract.status, action) {
        return Err(HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("{e}"),
        })));
    }

    let timesheet = timesheet_db::get_timesheet_by_id(db, timesheet_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Timesheet {timesheet_id} not found"),
            }))
        })?;

    if timesheet.contract_id != contract.id {
        return Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Timesheet does not belong to this contract",
        })));
    }

    Ok((contract, party, timesheet))
}

/// GET /api/contracts/{id}/timesheets — the contract's timesheets with
/// derived amounts, parties only.
pub async fn get_timesheets(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let (contract, _) = match verify_contract_party(db.get_ref(), contract_id, &user.0).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    match timesheet_db::get_timesheets_by_contract_id(db.get_ref(), contract.id).await {
        Ok(timesheets) => {
            let response: Vec<TimesheetResponse> = timesheets
                .into_iter()
                .map(|t| TimesheetResponse::from_model(t, contract.amount))
                .collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/timesheets — the engineer submits a period.
pub async fn submit_timesheet(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SubmitTimesheet>,
) -> impl Responder {
    let contract_id = path.into_inner();

    if let Err(e) = timesheet_domain::validate_submission(&body.period, body.days) {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": format!("{e}"),
        }));
    }

    let (contract, party) = match verify_contract_party(db.get_ref(), contract_id, &user.0).await
    {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    if party != ContractParty::Engineer {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the engineer can submit timesheets",
        }));
    }
    if contract.contract_type != ContractType::DayRate {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Timesheets apply to day-rate contracts only",
        }));
    }
    if let Err(e) = contract_domain::require_active(&contract.status, "submit a timesheet") {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("{e}"),
        }));
    }

    match timesheet_db::insert_timesheet(
        db.get_ref(),
        contract.id,
        body.period.trim().to_string(),
        body.days,
    )
    .await
    {
        Ok(timesheet) => {
            info!(timesheet_id = %timesheet.id, contract_id = %contract.id, "timesheet submitted");
            HttpResponse::Created().json(TimesheetResponse::from_model(timesheet, contract.amount))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to create timesheet: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/timesheets/{tid}/approve — the company approves
/// and pays the period in one step.
pub async fn approve_timesheet(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<PaymentGateway>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (contract_id, timesheet_id) = path.into_inner();

    let (contract, party, timesheet) = match load_for_action(
        db.get_ref(),
        contract_id,
        timesheet_id,
        &user.0,
        "approve a timesheet",
    )
    .await
    {
        Ok(triple) => triple,
        Err(resp) => return resp,
    };

    let approved = match timesheet_domain::approve(&timesheet.status, party) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    // Pay out `day rate × days`, then mark paid.
    let amount = contract.amount * timesheet.days;
    let receipt = match gateway
        .charge(amount, &contract.currency, "Timesheet payout")
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            return HttpResponse::PaymentRequired().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    let paid = match timesheet_domain::mark_paid(&approved) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match timesheet_db::update_timesheet_status(db.get_ref(), timesheet_id, paid).await {
        Ok(updated) => {
            info!(timesheet_id = %timesheet_id, %amount, "timesheet approved and paid");
            HttpResponse::Ok().json(serde_json::json!({
                "timesheet": TimesheetResponse::from_model(updated, contract.amount),
                "receipt": receipt,
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update timesheet: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/timesheets/{tid}/reject — the company sends a
/// period back. The engineer submits a corrected timesheet as a new row.
pub async fn reject_timesheet(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (contract_id, timesheet_id) = path.into_inner();

    let (contract, party, timesheet) = match load_for_action(
        db.get_ref(),
        contract_id,
        timesheet_id,
        &user.0,
        "reject a timesheet",
    )
    .await
    {
        Ok(triple) => triple,
        Err(resp) => return resp,
    };

    let next = match timesheet_domain::reject(&timesheet.status, party) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match timesheet_db::update_timesheet_status(db.get_ref(), timesheet_id, next).await {
        Ok(updated) => {
            info!(timesheet_id = %timesheet_id, "timesheet rejected");
            HttpResponse::Ok().json(TimesheetResponse::from_model(updated, contract.amount))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update timesheet: {e}"),
        })),
    }
}
