use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::models::invoices::{self, InvoiceItem, PaymentTerms};

/// Insert an invoice with its derived items and total.
pub async fn insert_invoice(
    db: &DatabaseConnection,
    contract_id: Uuid,
    payment_terms: PaymentTerms,
    items: Vec<InvoiceItem>,
    total: Decimal,
) -> Result<invoices::Model, DbErr> {
    let items_json = serde_json::to_value(&items)
        .map_err(|e| DbErr::Custom(format!("Failed to encode invoice items: {e}")))?;

    let new_invoice = invoices::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(contract_id),
        payment_terms: Set(payment_terms),
        items: Set(items_json),
        total: Set(total),
        created_at: Set(chrono::Utc::now()),
    };

    new_invoice.insert(db).await
}

/// Invoices raised against a contract, newest first.
pub async fn get_invoices_by_contract_id(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<invoices::Model>, DbErr> {
    invoices::Entity::find()
        .filter(invoices::Column::ContractId.eq(contract_id))
        .order_by_desc(invoices::Column::CreatedAt)
        .all(db)
        .await
}
