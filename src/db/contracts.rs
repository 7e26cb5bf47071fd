use sea_orm::*;
use uuid::Uuid;

use crate::domain::ContractParty;
use crate::models::contracts::{self, ContractStatus, NewContract};

/// Insert a new contract in `Draft` status.
pub async fn insert_contract(
    db: &DatabaseConnection,
    input: NewContract,
) -> Result<contracts::Model, DbErr> {
    let new_contract = contracts::ActiveModel {
        id: Set(Uuid::new_v4()),
        job_id: Set(input.job_id),
        company_id: Set(input.company_id),
        engineer_id: Set(input.engineer_id),
        job_title: Set(input.job_title),
        contract_type: Set(input.contract_type),
        description: Set(input.description),
        amount: Set(input.amount),
        currency: Set(input.currency),
        status: Set(ContractStatus::Draft),
        engineer_signed_name: Set(None),
        engineer_signed_at: Set(None),
        company_signed_name: Set(None),
        company_signed_at: Set(None),
        created_at: Set(chrono::Utc::now()),
    };

    new_contract.insert(db).await
}

/// Fetch a single contract by ID.
pub async fn get_contract_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<contracts::Model>, DbErr> {
    contracts::Entity::find_by_id(id).one(db).await
}

/// Contracts where the user is a party on either side.
pub async fn get_contracts_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .filter(
            Condition::any()
                .add(contracts::Column::EngineerId.eq(user_id))
                .add(contracts::Column::CompanyId.eq(user_id)),
        )
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// Fetch all contracts (admin oversight).
pub async fn get_all_contracts(db: &DatabaseConnection) -> Result<Vec<contracts::Model>, DbErr> {
    contracts::Entity::find()
        .order_by_desc(contracts::Column::CreatedAt)
        .all(db)
        .await
}

/// One live contract per (job, engineer) pair.
pub async fn contract_exists_for_job_and_engineer(
    db: &DatabaseConnection,
    job_id: Uuid,
    engineer_id: Uuid,
) -> Result<bool, DbErr> {
    let count = contracts::Entity::find()
        .filter(contracts::Column::JobId.eq(job_id))
        .filter(contracts::Column::EngineerId.eq(engineer_id))
        .filter(contracts::Column::Status.ne(ContractStatus::Cancelled))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Persist a status computed by `domain::contract`.
pub async fn update_contract_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ContractStatus,
) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let mut active: contracts::ActiveModel = contract.into();
    active.status = Set(status);

    active.update(db).await
}

/// Record a party's signature together with the status the signing produced,
/// so status and signature state can never disagree.
pub async fn record_signature(
    db: &DatabaseConnection,
    id: Uuid,
    party: ContractParty,
    name: String,
    status: ContractStatus,
) -> Result<contracts::Model, DbErr> {
    let contract = contracts::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Contract not found".to_string()))?;

    let mut active: contracts::ActiveModel = contract.into();
    match party {
        ContractParty::Engineer => {
            active.engineer_signed_name = Set(Some(name));
            active.engineer_signed_at = Set(Some(chrono::Utc::now()));
        }
        ContractParty::Company => {
            active.company_signed_name = Set(Some(name));
            active.company_signed_at = Set(Some(chrono::Utc::now()));
        }
    }
    active.status = Set(status);

    active.update(db).await
}

/// Count contracts in a given status (admin dashboard).
pub async fn count_by_status(
    db: &DatabaseConnection,
    status: ContractStatus,
) -> Result<u64, DbErr> {
    contracts::Entity::find()
        .filter(contracts::Column::Status.eq(status))
        .count(db)
        .await
}
