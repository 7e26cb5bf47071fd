use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment terms offered on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum PaymentTerms {
    #[sea_orm(string_value = "net7")]
    Net7,
    #[sea_orm(string_value = "net14")]
    Net14,
    #[sea_orm(string_value = "net30")]
    Net30,
}

/// One invoice line, derived from an approved milestone.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub milestone_id: Uuid,
    pub description: String,
    pub amount: Decimal,
}

/// SeaORM entity for the `invoices` table.
///
/// `total` is always the sum of the item amounts; both are written in the
/// same insert so they cannot drift.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "invoices")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    pub payment_terms: PaymentTerms,
    #[sea_orm(column_type = "JsonBinary")]
    pub items: Json,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub total: Decimal,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::contracts::Entity",
        from = "Column::ContractId",
        to = "super::contracts::Column::Id"
    )]
    Contract,
}

impl Related<super::contracts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Contract.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn item_list(&self) -> Vec<InvoiceItem> {
        serde_json::from_value(self.items.clone()).unwrap_or_default()
    }
}

// ── DTOs ──

/// Request body for POST /api/contracts/{id}/invoices — raise an invoice over
/// a set of approved milestones.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvoice {
    pub milestone_ids: Vec<Uuid>,
    pub payment_terms: PaymentTerms,
}

/// Invoice representation for API responses (items decoded).
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceResponse {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub payment_terms: PaymentTerms,
    pub items: Vec<InvoiceItem>,
    pub total: Decimal,
    pub created_at: DateTimeUtc,
}

impl From<Model> for InvoiceResponse {
    fn from(m: Model) -> Self {
        let items = m.item_list();
        Self {
            id: m.id,
            contract_id: m.contract_id,
            payment_terms: m.payment_terms,
            items,
            total: m.total,
            created_at: m.created_at,
        }
    }
}
