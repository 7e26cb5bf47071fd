use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment mechanism of a contract: milestone-based statement of work, or
/// time-and-materials billed through timesheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ContractType {
    #[sea_orm(string_value = "sow")]
    Sow,
    #[sea_orm(string_value = "day_rate")]
    DayRate,
}

/// Contract lifecycle status stored as a lowercase string in the database.
///
/// Transitions between these values go through `domain::contract` only;
/// no handler writes a status directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ContractStatus {
    #[sea_orm(string_value = "draft")]
    Draft,
    #[sea_orm(string_value = "pending_signature")]
    PendingSignature,
    #[sea_orm(string_value = "signed")]
    Signed,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// SeaORM entity for the `contracts` table.
///
/// Signature pairs are nullable and write-once: once a party's name/date
/// columns are set they are never reassigned.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "contracts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub company_id: Uuid,
    pub engineer_id: Uuid,
    pub job_title: String,
    pub contract_type: ContractType,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Total value for SOW contracts, per-day rate for day-rate contracts.
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    pub currency: String,
    pub status: ContractStatus,
    pub engineer_signed_name: Option<String>,
    pub engineer_signed_at: Option<DateTimeUtc>,
    pub company_signed_name: Option<String>,
    pub company_signed_at: Option<DateTimeUtc>,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::jobs::Entity",
        from = "Column::JobId",
        to = "super::jobs::Column::Id"
    )]
    Job,
    #[sea_orm(has_many = "super::milestones::Entity")]
    Milestones,
    #[sea_orm(has_many = "super::timesheets::Entity")]
    Timesheets,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::milestones::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Milestones.def()
    }
}

impl Related<super::timesheets::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timesheets.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// ── DTOs ──

/// Fully-resolved contract fields handed to the insert, after the handler
/// has applied boilerplate, totals, and defaults.
#[derive(Debug, Clone)]
pub struct NewContract {
    pub job_id: Uuid,
    pub company_id: Uuid,
    pub engineer_id: Uuid,
    pub job_title: String,
    pub contract_type: ContractType,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
}

/// Milestone line supplied when creating an SOW contract.
#[derive(Debug, Clone, Deserialize)]
pub struct MilestoneInput {
    pub description: String,
    pub amount: Decimal,
}

/// Request body for POST /api/contracts — a company draws up a contract from
/// one of its job's applications and dispatches it for signature.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateContractRequest {
    pub application_id: Uuid,
    pub contract_type: ContractType,
    /// Agreement terms; when omitted, boilerplate is interpolated from the
    /// party names.
    pub description: Option<String>,
    /// Day-rate override; defaults to the job's day rate. Ignored for SOW
    /// contracts, whose amount is the milestone sum.
    pub amount: Option<Decimal>,
    pub currency: Option<String>,
    #[serde(default)]
    pub milestones: Vec<MilestoneInput>,
}

/// Request body for POST /api/contracts/{id}/sign.
#[derive(Debug, Clone, Deserialize)]
pub struct SignRequest {
    pub name: String,
    #[serde(default)]
    pub agreed: bool,
}

/// A party's signature as rendered in responses.
#[derive(Debug, Clone, Serialize)]
pub struct Signature {
    pub name: String,
    pub date: DateTimeUtc,
}

/// Contract representation for API responses, signatures folded into pairs.
#[derive(Debug, Clone, Serialize)]
pub struct ContractResponse {
    pub id: Uuid,
    pub job_id: Uuid,
    pub company_id: Uuid,
    pub engineer_id: Uuid,
    pub job_title: String,
    pub contract_type: ContractType,
    pub description: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: ContractStatus,
    pub engineer_signature: Option<Signature>,
    pub company_signature: Option<Signature>,
    pub created_at: DateTimeUtc,
}

impl From<Model> for ContractResponse {
    fn from(m: Model) -> Self {
        let engineer_signature = match (m.engineer_signed_name, m.engineer_signed_at) {
            (Some(name), Some(date)) => Some(Signature { name, date }),
            _ => None,
        };
        let company_signature = match (m.company_signed_name, m.company_signed_at) {
            (Some(name), Some(date)) => Some(Signature { name, date }),
            _ => None,
        };
        Self {
            id: m.id,
            job_id: m.job_id,
            company_id: m.company_id,
            engineer_id: m.engineer_id,
            job_title: m.job_title,
            contract_type: m.contract_type,
            description: m.description,
            amount: m.amount,
            currency: m.currency,
            status: m.status,
            engineer_signature,
            company_signature,
            created_at: m.created_at,
        }
    }
}
