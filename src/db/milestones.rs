use sea_orm::*;
use uuid::Uuid;

use crate::models::contracts::MilestoneInput;
use crate::models::milestones::{self, MilestoneStatus};

/// Insert the milestone list for a freshly created SOW contract, all in
/// `AwaitingFunding`, preserving the entered order.
pub async fn insert_milestones(
    db: &DatabaseConnection,
    contract_id: Uuid,
    inputs: Vec<MilestoneInput>,
) -> Result<Vec<milestones::Model>, DbErr> {
    let mut created = Vec::with_capacity(inputs.len());
    for (position, input) in inputs.into_iter().enumerate() {
        let new_milestone = milestones::ActiveModel {
            id: Set(Uuid::new_v4()),
            contract_id: Set(contract_id),
            description: Set(input.description),
            amount: Set(input.amount),
            position: Set(position as i32),
            status: Set(MilestoneStatus::AwaitingFunding),
            created_at: Set(chrono::Utc::now()),
        };
        created.push(new_milestone.insert(db).await?);
    }
    Ok(created)
}

/// Fetch a single milestone by ID.
pub async fn get_milestone_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<milestones::Model>, DbErr> {
    milestones::Entity::find_by_id(id).one(db).await
}

/// Milestones of a contract in entered order.
pub async fn get_milestones_by_contract_id(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<milestones::Model>, DbErr> {
    milestones::Entity::find()
        .filter(milestones::Column::ContractId.eq(contract_id))
        .order_by_asc(milestones::Column::Position)
        .all(db)
        .await
}

/// Persist a status computed by `domain::milestone`.
pub async fn update_milestone_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: MilestoneStatus,
) -> Result<milestones::Model, DbErr> {
    let milestone = milestones::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Milestone not found".to_string()))?;

    let mut active: milestones::ActiveModel = milestone.into();
    active.status = Set(status);

    active.update(db).await
}
