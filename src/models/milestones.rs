use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Milestone escrow status. Strictly forward-moving; every transition goes
/// through `domain::milestone`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum MilestoneStatus {
    #[sea_orm(string_value = "awaiting_funding")]
    AwaitingFunding,
    #[sea_orm(string_value = "funded_in_progress")]
    FundedInProgress,
    #[sea_orm(string_value = "submitted_for_approval")]
    SubmittedForApproval,
    #[sea_orm(string_value = "approved_pending_invoice")]
    ApprovedPendingInvoice,
    #[sea_orm(string_value = "completed_paid")]
    CompletedPaid,
}

/// SeaORM entity for the `milestones` table (SOW contracts only).
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "milestones")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub contract_id: Uuid,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub amount: Decimal,
    /// Order within the contract as entered at creation time.
    pub position: i32,
    pub status: MilestoneStatus,
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
