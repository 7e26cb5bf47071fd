use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Timesheet status for day-rate contracts. `Rejected` is terminal; a
/// corrected timesheet is submitted as a new row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum TimesheetStatus {
    #[sea_orm(string_value = "submitted")]
    Submitted,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "paid")]
    Paid,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// SeaORM entity for the `timesheets` table (day-rate contracts only).
///
/// The payable amount is never stored — it is `contract.amount × days`,
/// recomputed wherever it is shown.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "timesheets")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    /// Free-text billing period label, e.g. "Week 1".
    pub period: String,
    #[sea_orm(column_type = "Decimal(Some((6, 2)))")]
    pub days: Decimal,
    pub status: TimesheetStatus,
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

// ── DTOs ──

/// Request body for POST /api/contracts/{id}/timesheets.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitTimesheet {
    pub period: String,
    pub days: Decimal,
}

/// Timesheet plus its derived payable amount for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetResponse {
    pub id: Uuid,
    pub contract_id: Uuid,
    pub period: String,
    pub days: Decimal,
    pub status: TimesheetStatus,
    pub amount: Decimal,
    pub created_at: DateTimeUtc,
}

impl TimesheetResponse {
    pub fn from_model(m: Model, day_rate: Decimal) -> Self {
        Self {
            id: m.id,
            contract_id: m.contract_id,
            period: m.period,
            days: m.days,
            status: m.status,
            amount: day_rate * m.days,
            created_at: m.created_at,
        }
    }
}
