use actix_web::{HttpResponse, Responder, web};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use tracing::info;
use uuid::Uuid;

use crate::auth::authorization::verify_contract_party;
use crate::auth::middleware::AuthenticatedUser;
use crate::db::invoices as invoice_db;
use crate::db::milestones as milestone_db;
use crate::domain::milestone as milestone_domain;
use crate::domain::{ContractParty, contract as contract_domain};
use crate::handlers::milestones::maybe_complete_sow_contract;
use crate::models::contracts::ContractType;
use crate::models::invoices::{CreateInvoice, InvoiceItem, InvoiceResponse};
use crate::services::payments::PaymentGateway;

/// POST /api/contracts/{id}/invoices — the company raises an invoice over a
/// set of approved milestones. Items and the total are derived from the
/// milestone rows; each covered milestone moves to `CompletedPaid` once the
/// payout settles.
pub async fn create_invoice(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    gateway: web::Data<PaymentGateway>,
    path: web::Path<Uuid>,
    body: web::Json<CreateInvoice>,
) -> impl Responder {
    let contract_id = path.into_inner();
    let body = body.into_inner();

    if body.milestone_ids.is_empty() {
        return HttpResponse::UnprocessableEntity().json(serde_json::json!({
            "error": "An invoice needs at least one milestone",
        }));
    }

    let (contract, party) = match verify_contract_party(db.get_ref(), contract_id, &user.0).await
    {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    if party != ContractParty::Company {
        return HttpResponse::Forbidden().json(serde_json::json!({
            "error": "Only the company can raise an invoice",
        }));
    }
    if contract.contract_type != ContractType::Sow {
        return HttpResponse::BadRequest().json(serde_json::json!({
            "error": "Invoices cover SOW milestones; day-rate contracts pay per timesheet",
        }));
    }
    if let Err(e) = contract_domain::require_active(&contract.status, "raise an invoice") {
        return HttpResponse::Conflict().json(serde_json::json!({
            "error": format!("{e}"),
        }));
    }

    // Resolve every referenced milestone and make sure it is invoiceable.
    let mut items = Vec::with_capacity(body.milestone_ids.len());
    let mut transitions = Vec::with_capacity(body.milestone_ids.len());
    for milestone_id in &body.milestone_ids {
        let milestone = match milestone_db::get_milestone_by_id(db.get_ref(), *milestone_id).await
        {
            Ok(Some(m)) if m.contract_id == contract.id => m,
            Ok(_) => {
                return HttpResponse::NotFound().json(serde_json::json!({
                    "error": format!("Milestone {milestone_id} not found on this contract"),
                }));
            }
            Err(e) => {
                return HttpResponse::InternalServerError().json(serde_json::json!({
                    "error": format!("Database error: {e}"),
                }));
            }
        };

        let next = match milestone_domain::invoice(&milestone.status) {
            Ok(next) => next,
            Err(e) => {
                return HttpResponse::Conflict().json(serde_json::json!({
                    "error": format!("milestone {milestone_id}: {e}"),
                }));
            }
        };

        items.push(InvoiceItem {
            milestone_id: milestone.id,
            description: milestone.description.clone(),
            amount: milestone.amount,
        });
        transitions.push((milestone.id, next));
    }

    let total = items.iter().fold(Decimal::ZERO, |acc, i| acc + i.amount);

    // Release the payout for the invoiced milestones.
    let receipt = match gateway
        .charge(total, &contract.currency, "Invoice payout")
        .await
    {
        Ok(receipt) => receipt,
        Err(e) => {
            return HttpResponse::PaymentRequired().json(serde_json::json!({
                "error": format!("{e}"),
            }));
        }
    };

    let invoice = match invoice_db::insert_invoice(
        db.get_ref(),
        contract.id,
        body.payment_terms,
        items,
        total,
    )
    .await
    {
        Ok(invoice) => invoice,
        Err(e) => {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to create invoice: {e}"),
            }));
        }
    };

    for (milestone_id, next) in transitions {
        if let Err(e) =
            milestone_db::update_milestone_status(db.get_ref(), milestone_id, next).await
        {
            return HttpResponse::InternalServerError().json(serde_json::json!({
                "error": format!("Failed to update milestone: {e}"),
            }));
        }
    }

    if let Err(e) = maybe_complete_sow_contract(db.get_ref(), &contract).await {
        return HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Failed to complete contract: {e}"),
        }));
    }

    info!(invoice_id = %invoice.id, contract_id = %contract.id, %total, "invoice submitted");

    HttpResponse::Created().json(serde_json::json!({
        "invoice": InvoiceResponse::from(invoice),
        "receipt": receipt,
    }))
}

/// GET /api/contracts/{id}/invoices — invoices on a contract, parties only.
pub async fn get_invoices(
    user: AuthenticatedUser,
    db: web::Data<DatabaseConnection>,
    path: web::Path<Uuid>,
) -> impl Responder {
    let contract_id = path.into_inner();

    let (contract, _) = match verify_contract_party(db.get_ref(), contract_id, &user.0).await {
        Ok(pair) => pair,
        Err(resp) => return resp,
    };

    match invoice_db::get_invoices_by_contract_id(db.get_ref(), contract.id).await {
        Ok(invoices) => {
            let response: Vec<InvoiceResponse> =
                invoices.into_iter().map(InvoiceResponse::from).collect();
            HttpResponse::Ok().json(response)
        }
        Err(e) => HttpResponse::InternalServerError().json(serde_json::json!({
            "error": format!("Database error: {e}"),
        })),
    }
}
