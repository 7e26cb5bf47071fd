use rust_decimal::Decimal;
use sea_orm::*;
use uuid::Uuid;

use crate::models::timesheets::{self, TimesheetStatus};

/// Insert a newly submitted timesheet.
pub async fn insert_timesheet(
    db: &DatabaseConnection,
    contract_id: Uuid,
    period: String,
    days: Decimal,
) -> Result<timesheets::Model, DbErr> {
    let new_timesheet = timesheets::ActiveModel {
        id: Set(Uuid::new_v4()),
        contract_id: Set(contract_id),
        period: Set(period),
        days: Set(days),
        status: Set(TimesheetStatus::Submitted),
        created_at: Set(chrono::Utc::now()),
    };

    new_timesheet.insert(db).await
}

/// Fetch a single timesheet by ID.
pub async fn get_timesheet_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<timesheets::Model>, DbErr> {
    timesheets::Entity::find_by_id(id).one(db).await
}

/// Timesheets of a contract, oldest first.
pub async fn get_timesheets_by_contract_id(
    db: &DatabaseConnection,
    contract_id: Uuid,
) -> Result<Vec<timesheets::Model>, DbErr> {
    timesheets::Entity::find()
        .filter(timesheets::Column::ContractId.eq(contract_id))
        .order_by_asc(timesheets::Column::CreatedAt)
        .all(db)
        .await
}

/// Persist a status computed by `domain::timesheet`.
pub async fn update_timesheet_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: TimesheetStatus,
) -> Result<timesheets::Model, DbErr> {
    let timesheet = timesheets::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Timesheet not found".to_string()))?;

    let mut active: timesheets::ActiveModel = timesheet.into();
    active.status = Set(status);

    active.update(db).await
}
