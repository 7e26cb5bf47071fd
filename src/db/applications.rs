use sea_orm::*;
use uuid::Uuid;

use crate::models::applications::{self, ApplicationStatus};

/// Insert a new application in `Applied` status.
pub async fn insert_application(
    db: &DatabaseConnection,
    job_id: Uuid,
    engineer_id: Uuid,
) -> Result<applications::Model, DbErr> {
    let new_application = applications::ActiveModel {
        id: Set(Uuid::new_v4()),
        job_id: Set(job_id),
        engineer_id: Set(engineer_id),
        status: Set(ApplicationStatus::Applied),
        is_supercharged: Set(false),
        reviewed: Set(false),
        created_at: Set(chrono::Utc::now()),
    };

    new_application.insert(db).await
}

/// One application per engineer per job.
pub async fn application_exists(
    db: &DatabaseConnection,
    job_id: Uuid,
    engineer_id: Uuid,
) -> Result<bool, DbErr> {
    let count = applications::Entity::find()
        .filter(applications::Column::JobId.eq(job_id))
        .filter(applications::Column::EngineerId.eq(engineer_id))
        .count(db)
        .await?;
    Ok(count > 0)
}

/// Fetch a single application by ID.
pub async fn get_application_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<applications::Model>, DbErr> {
    applications::Entity::find_by_id(id).one(db).await
}

/// Applications on a job, supercharged first, then oldest first — the
/// preferential ordering shown to the job owner.
pub async fn get_applications_by_job_id(
    db: &DatabaseConnection,
    job_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::JobId.eq(job_id))
        .order_by_desc(applications::Column::IsSupercharged)
        .order_by_asc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// All applications submitted by an engineer.
pub async fn get_applications_by_engineer_id(
    db: &DatabaseConnection,
    engineer_id: Uuid,
) -> Result<Vec<applications::Model>, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::EngineerId.eq(engineer_id))
        .order_by_desc(applications::Column::CreatedAt)
        .all(db)
        .await
}

/// Persist a status computed by `domain::application`.
pub async fn update_application_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: ApplicationStatus,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();
    active.status = Set(status);

    active.update(db).await
}

/// One-way reviewed flag set by the job owner.
pub async fn mark_reviewed(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();
    active.reviewed = Set(true);

    active.update(db).await
}

/// Priority flag set after the supercharge payment settles.
pub async fn mark_supercharged(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<applications::Model, DbErr> {
    let application = applications::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Application not found".to_string()))?;

    let mut active: applications::ActiveModel = application.into();
    active.is_supercharged = Set(true);

    active.update(db).await
}

/// Count applications in a given status (admin dashboard).
pub async fn count_by_status(
    db: &DatabaseConnection,
    status: ApplicationStatus,
) -> Result<u64, DbErr> {
    applications::Entity::find()
        .filter(applications::Column::Status.eq(status))
        .count(db)
        .await
}
