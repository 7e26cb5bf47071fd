use actix_web::{HttpResponse, Responder, web};
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::verify_contract_party;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::contracts as contract_db;
use crate::db::milestones as milestone_db;
use crate::domain::milestone::{self as milestone_domain, ApprovalPolicy};
use crate::domain::{ContractParty, contract as contract_domain};
use crate::models::contracts::{self, ContractType};
use crate::models::milestones::{self as milestone_model, MilestoneStatus};
use crate::services::payments::PaymentGateway;

/// Load the milestone and check it belongs to an active SOW contract the
/// user is a party to. Returns the contract, the user's side, and the row.
async fn load_for_action(
    db: &DatabaseConnection,
    contract_id: Uuid,
    milestone_id: Uuid,
    user: &crate::models::users::Model,
    action: &'static str,
) -> Result<(contracts::Model, ContractParty, milestone_model::Model), HttpResponse> {
    let (contract, party) = verify_contract_party(db, contract_id, user).await?;

    if contract.contract_type != ContractType::Sow {
        return Err(HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Milestones apply to SOW contracts only",
        })));
    }
    if let Err(e) = contract_domain::require_active(&contract.status, action) {
        return Err(HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("{e}"),
        })));
    }

    let milestone = milestone_db::get_milestone_by_id(db, milestone_id)
        .await
        .map_err(|e| {
            HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }))
        })?
        .ok_or_else(|| {
            HttpResponse::NotFound().json(serde_json::json!({
                "error": format!("Milestone {milestone_id} not found"),
            }))
        })?;

    if milestone.contract_id != contract.id {
        return Err(HttpResponse::NotFound().json(serde_json::json!({
            "error": "Milestone does not belong to this contract",
        })));
    }

    Ok((contract, party, milestone))
}

/// When the last milestone is paid out, the contract closes on its own.
pub(crate) async fn maybe_complete_sow_contract(
    db: &DatabaseConnection,
    contract: &contracts::Model,
) -> Result<(), sea_orm::DbErr> {
    let milestones = milestone_db::get_milestones_by_contract_id(db, contract.id).await?;
    let all_paid = !milestones.is_empty()
        && milestones
            .iter()
            .all(|m| m.status == MilestoneStatus::CompletedPaid);

    if all_paid {
        if let Ok(next) = contract_domain::complete(&contract.status) {
            contract_db::update_contract_status(db, contract.id, next).await?;
            info!(contract_id = %contract.id, "all milestones paid; contract completed");
        }
    }
    Ok(())
}

/// GET /api/contracts/{id}/milestones — the contract's milestones, parties only.
pub async fn get_milestones(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let (contract, _) = match verify_contract_party(db.get_ref(), contract_id, &user.0).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    match milestone_db::get_milestones_by_contract_id(db.get_ref(), contract.id).await {
        Ok(milestones) => HttpResponse::Ok().json(milestones),
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/milestones/{mid}/fund — the company escrows the
/// milestone amount through the payment gateway.
pub async fn fund_milestone(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<PaymentGateway>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (contract_id, milestone_id) = path.into_inner();

    let (contract, party, milestone) = match load_for_action(
        db.get_ref(),
        contract_id,
        milestone_id,
        &user.0,
        "fund a milestone",
    )
    .await
    {
        Ok(triple) => triple,
        Err(resp) => return resp,
    };

    let next = match milestone_domain::fund(&milestone.status, party) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    // Escrow the funds before the transition commits.
    let receipt = match gateway
        .charge(milestone.amount, &contract.currency, "Milestone escrow")
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            return HttpResponse::PaymentRequired().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match milestone_db::update_milestone_status(db.get_ref(), milestone_id, next).await {
        Ok(updated) => {
            info!(milestone_id = %milestone_id, contract_id = %contract_id, "milestone funded");
            HttpResponse::Ok().json(serde_json::json!({
                "milestone": updated,
                "receipt": receipt,
            }))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update milestone: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/milestones/{mid}/submit — the engineer hands the
/// work in for approval.
pub async fn submit_milestone(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (contract_id, milestone_id) = path.into_inner();

    let (_, party, milestone) = match load_for_action(
        db.get_ref(),
        contract_id,
        milestone_id,
        &user.0,
        "submit a milestone",
    )
    .await
    {
        Ok(triple) => triple,
        Err(resp) => return resp,
    };

    let next = match milestone_domain::submit(&milestone.status, party) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match milestone_db::update_milestone_status(db.get_ref(), milestone_id, next).await {
        Ok(updated) => {
            info!(milestone_id = %milestone_id, "milestone submitted for approval");
            HttpResponse::Ok().json(updated)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to update milestone: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/milestones/{mid}/approve — the company approves
/// submitted work. Where it lands depends on the deployment's approval
/// policy; under the direct policy the escrowed funds are released here.
pub async fn approve_milestone(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<PaymentGateway>,
    policy: web::Data<ApprovalPolicy>,
    path: web::Path<(Uuid, Uuid)>,
) -> impl Responder {
    let (contract_id, milestone_id) = path.into_inner();

    let (contract, party, milestone) = match load_for_action(
        db.get_ref(),
        contract_id,
        milestone_id,
        &user.0,
        "approve a milestone",
    )
    .await
    {
        Ok(triple) => triple,
        Err(resp) => return resp,
    };

    let policy = *policy.get_ref();
    let next = match milestone_domain::approve(&milestone.status, party, policy) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    // Direct policy: the payout leaves escrow at approval time.
    if next == MilestoneStatus::CompletedPaid {
        if let Err(e) = gateway
            .charge(milestone.amount, &contract.currency, "Milestone payout")
            .await
        {
            return HttpResponse::PaymentRequired().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    }

    let updated = match milestone_db::update_milestone_status(db.get_ref(), milestone_id, next).await
    {
        Ok(updated) => updated,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to update milestone: {e}"),
            }));
        }
    };
    info!(milestone_id = %milestone_id, status = ?updated.status, "milestone approved");

    if updated.status == MilestoneStatus::CompletedPaid {
        if let Err(e) = maybe_complete_sow_contract(db.get_ref(), &contract).await {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to complete contract: {e}"),
            }));
        }
    }

    HttpResponse::Ok().json(updated)
}
