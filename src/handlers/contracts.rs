use actix_web::{HttpResponse, Responder, web};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::{verify_contract_party, verify_job_owner};
use crate::auth::middleware::AuthenticatedUser;
use crate::db::applications as application_db;
use crate::db::contracts as contract_db;
use crate::db::milestones as milestone_db;
use crate::db::users as user_db;
use crate::domain::{ContractParty, contract as contract_domain};
use crate::domain::application as application_domain;
use crate::domain::contract::SignatureState;
use crate::models::contracts::{
    ContractResponse, ContractType, CreateContractRequest, NewContract, SignRequest,
};

/// POST /api/contracts — a company draws up a contract from an application on
/// one of its jobs and dispatches it for signature.
///
/// SOW contracts carry a milestone list and their amount is the milestone
/// sum; day-rate contracts take the job's day rate unless overridden.
pub async fn create_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    body: web::Json<CreateContractRequest>,
) -> impl Responder {
    let body = body.into_inner();

    // 1. The application must exist.
    let application =
        match application_db::get_application_by_id(db.get_ref(), body.application_id).await {
            Ok(Some(application)) => application,
            Ok(None) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Application {} not found", body.application_id),
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

    // 2. Only the job owner (or an admin) can contract on it.
    let job = match verify_job_owner(db.get_ref(), application.job_id, &user.0).await {
        Ok(job) => job,
        Err(resp) => return resp,
    };

    // 3. The application must still be live on the company's side.
    if !application_domain::contractable(&application.status) {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": "A contract can only be drawn up from an applied or accepted application",
        }));
    }

    // 4. One live contract per (job, engineer) pair.
    match contract_db::contract_exists_for_job_and_engineer(
        db.get_ref(),
        job.id,
        application.engineer_id,
    )
    .await
    {
        Ok(true) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": "A contract already exists for this engineer on this job",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
        _ => {}
    }

    // 5. Day-rate contracts must not carry milestones.
    if body.contract_type == ContractType::DayRate && !body.milestones.is_empty() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "Day-rate contracts are billed by timesheet and cannot have milestones",
        }));
    }

    // 6. Resolve party names for the boilerplate terms.
    let engineer = match user_db::get_user_by_id(db.get_ref(), application.engineer_id).await {
        Ok(Some(engineer)) => engineer,
        Ok(None) => {
            return HttpResponse::NotFound().json(serde_json::json!({
                "error": "The applicant's account no longer exists",
            }));
        }
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };
    let company_name = match user_db::get_user_by_id(db.get_ref(), job.company_id).await {
        Ok(Some(company)) => company.party_name(),
        Ok(None) => job.company_id.to_string(),
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Database error: {e}"),
            }));
        }
    };

    let amount = match body.contract_type {
        ContractType::Sow => body
            .milestones
            .iter()
            .fold(Decimal::ZERO, |acc, m| acc + m.amount),
        ContractType::DayRate => body.amount.unwrap_or(job.day_rate),
    };
    let description = body.description.clone().unwrap_or_else(|| {
        contract_domain::boilerplate_terms(&company_name, &engineer.party_name(), &job.title)
    });

    // 7. Store the draft.
    let input = NewContract {
        job_id: job.id,
        company_id: job.company_id,
        engineer_id: application.engineer_id,
        job_title: job.title.clone(),
        contract_type: body.contract_type,
        description,
        amount,
        currency: body.currency.unwrap_or_else(|| job.currency.clone()),
    };
    let contract = match contract_db::insert_contract(db.get_ref(), input).await {
        Ok(contract) => contract,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create contract: {e}"),
            }));
        }
    };

    let milestones = if body.contract_type == ContractType::Sow {
        match milestone_db::insert_milestones(db.get_ref(), contract.id, body.milestones).await {
            Ok(milestones) => milestones,
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Failed to create milestones: {e}"),
                }));
            }
        }
    } else {
        Vec::new()
    };

    // 8. Dispatch for signature (Draft → PendingSignature).
    let next = match contract_domain::send_for_signature(&contract.status) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };
    let contract = match contract_db::update_contract_status(db.get_ref(), contract.id, next).await
    {
        Ok(contract) => contract,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to dispatch contract: {e}"),
            }));
        }
    };

    info!(contract_id = %contract.id, job_id = %contract.job_id, "contract sent for signature");

    HttpResponse::Created().json(serde_json::json!({
        "contract": ContractResponse::from(contract),
        "milestones": milestones,
    }))
}

/// GET /api/contracts — contracts where the authenticated user is a party.
pub async fn get_contracts(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
) -> impl Responder {
    match contract_db::get_contracts_for_user(db.get_ref(), user.0.id).await {
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

/// GET /api/contracts/{id} — a single contract, parties only.
pub async fn get_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    match verify_contract_party(db.get_ref(), path.into_inner(), &user.0).await {
        Ok((contract, _)) => HttpResponse::Ok().json(ContractResponse::from(contract)),
        Err(resp) => resp,
    }
}

/// POST /api/contracts/{id}/sign — a party signs the contract.
///
/// The engineer signs first (`PendingSignature → Signed`), then the company
/// countersigns (`Signed → Active`). Requires a typed name and an explicit
/// agreement flag.
pub async fn sign_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
    body: web::Json<SignRequest>,
) -> impl Responder {
    let contract_id = path.into_inner();

    if let Err(e) = contract_domain::validate_signature(&body.name, body.agreed) {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": format!("{e}"),
        }));
    }

    let (contract, party) =
        match verify_contract_party(db.get_ref(), contract_id, &user.0).await {
            Ok(pair) => pair,
            Err(resp) => return resp,
        };

    let sigs = SignatureState {
        engineer_signed: contract.engineer_signed_name.is_some(),
        company_signed: contract.company_signed_name.is_some(),
    };
    let next = match contract_domain::sign(&contract.status, sigs, party) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match contract_db::record_signature(
        db.get_ref(),
        contract_id,
        party,
        body.name.trim().to_string(),
        next,
    )
    .await
    {
        Ok(updated) => {
            info!(
                contract_id = %contract_id,
                party = party.label(),
                status = ?updated.status,
                "contract signed"
            );
            HttpResponse::Ok().json(ContractResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to record signature: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/cancel — either party cancels a non-terminal
/// contract.
pub async fn cancel_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let (contract, party) =
        match verify_contract_party(db.get_ref(), contract_id, &user.0).await {
            Ok(pair) => pair,
            Err(resp) => return resp,
        };

    let next = match contract_domain::cancel(&contract.status) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match contract_db::update_contract_status(db.get_ref(), contract_id, next).await {
        Ok(updated) => {
            info!(contract_id = %contract_id, party = party.label(), "contract cancelled");
            HttpResponse::Ok().json(ContractResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to cancel contract: {e}"),
        })),
    }
}

/// POST /api/contracts/{id}/complete — the company closes out an active
/// day-rate contract. SOW contracts complete on their own when the last
/// milestone is paid.
pub async fn complete_contract(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let (contract, party) =
        match verify_contract_party(db.get_ref(), contract_id, &user.0).await {
            Ok(pair) => pair,
            Err(resp) => return resp,
        };

    if party != ContractParty::Company {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the company can complete a contract",
        }));
    }
    if contract.contract_type != ContractType::DayRate {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "SOW contracts complete automatically when all milestones are paid",
        }));
    }

    let next = match contract_domain::complete(&contract.status) {
        Ok(next) => next,
        Err(e) => {
            return HttpResponse::Conflict().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    match contract_db::update_contract_status(db.get_ref(), contract_id, next).await {
        Ok(updated) => {
            info!(contract_id = %contract_id, "contract completed");
            HttpResponse::Ok().json(ContractResponse::from(updated))
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to complete contract: {e}"),
        })),
    }
}
