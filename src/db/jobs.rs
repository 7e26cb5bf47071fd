use sea_orm::*;
use uuid::Uuid;

use crate::models::jobs::{self, CreateJob, JobListQuery, JobStatus, UpdateJob};

/// Insert a new job posting (opens immediately).
pub async fn insert_job(
    db: &DatabaseConnection,
    input: CreateJob,
    company_id: Uuid,
) -> Result<jobs::Model, DbErr> {
    let skills = serde_json::to_string(&input.skills.unwrap_or_default())
        .unwrap_or_else(|_| "[]".to_string());

    let new_job = jobs::ActiveModel {
        id: Set(Uuid::new_v4()),
        title: Set(input.title),
        description: Set(input.description),
        skills: Set(skills),
        day_rate: Set(input.day_rate),
        currency: Set(input.currency.unwrap_or_else(|| "USD".to_string())),
        status: Set(JobStatus::Open),
        company_id: Set(company_id),
        created_at: Set(chrono::Utc::now()),
    };

    new_job.insert(db).await
}

/// Search open jobs with keyword/skill/rate filters and keyset pagination on
/// (created_at, id) descending.
pub async fn search_open_jobs(
    db: &DatabaseConnection,
    query: &JobListQuery,
) -> Result<Vec<jobs::Model>, DbErr> {
    let mut select = jobs::Entity::find().filter(jobs::Column::Status.eq(JobStatus::Open));

    if let Some(q) = query.q.as_deref().filter(|q| !q.is_empty()) {
        select = select.filter(
            Condition::any()
                .add(jobs::Column::Title.contains(q))
                .add(jobs::Column::Description.contains(q)),
        );
    }
    if let Some(skill) = query.skill.as_deref().filter(|s| !s.is_empty()) {
        // Skills are stored as a JSON-encoded array, so an exact element is
        // always quoted.
        select = select.filter(jobs::Column::Skills.contains(&format!("\"{skill}\"")));
    }
    if let Some(min) = query.min_rate {
        select = select.filter(jobs::Column::DayRate.gte(min));
    }
    if let Some(max) = query.max_rate {
        select = select.filter(jobs::Column::DayRate.lte(max));
    }
    if let (Some(ts), Some(id)) = (query.cursor_created_at, query.cursor_id) {
        select = select.filter(
            Condition::any().add(jobs::Column::CreatedAt.lt(ts)).add(
                Condition::all()
                    .add(jobs::Column::CreatedAt.eq(ts))
                    .add(jobs::Column::Id.lt(id)),
            ),
        );
    }

    select
        .order_by_desc(jobs::Column::CreatedAt)
        .order_by_desc(jobs::Column::Id)
        .limit(query.limit())
        .all(db)
        .await
}

/// Fetch a single job by ID.
pub async fn get_job_by_id(db: &DatabaseConnection, id: Uuid) -> Result<Option<jobs::Model>, DbErr> {
    jobs::Entity::find_by_id(id).one(db).await
}

/// All jobs posted by a company.
pub async fn get_jobs_by_company_id(
    db: &DatabaseConnection,
    company_id: Uuid,
) -> Result<Vec<jobs::Model>, DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::CompanyId.eq(company_id))
        .order_by_desc(jobs::Column::CreatedAt)
        .all(db)
        .await
}

/// Update an existing job posting.
pub async fn update_job(
    db: &DatabaseConnection,
    id: Uuid,
    input: UpdateJob,
) -> Result<jobs::Model, DbErr> {
    let job = jobs::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Job not found".to_string()))?;

    let mut active: jobs::ActiveModel = job.into();

    if let Some(title) = input.title {
        active.title = Set(title);
    }
    if let Some(description) = input.description {
        active.description = Set(description);
    }
    if let Some(skills) = input.skills {
        active.skills = Set(serde_json::to_string(&skills).unwrap_or_else(|_| "[]".to_string()));
    }
    if let Some(day_rate) = input.day_rate {
        active.day_rate = Set(day_rate);
    }
    if let Some(currency) = input.currency {
        active.currency = Set(currency);
    }

    active.update(db).await
}

/// Set a job's status (open/closed).
pub async fn set_job_status(
    db: &DatabaseConnection,
    id: Uuid,
    status: JobStatus,
) -> Result<jobs::Model, DbErr> {
    let job = jobs::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or(DbErr::RecordNotFound("Job not found".to_string()))?;

    let mut active: jobs::ActiveModel = job.into();
    active.status = Set(status);

    active.update(db).await
}

/// Count jobs currently open (admin dashboard).
pub async fn count_open(db: &DatabaseConnection) -> Result<u64, DbErr> {
    jobs::Entity::find()
        .filter(jobs::Column::Status.eq(JobStatus::Open))
        .count(db)
        .await
}

/// Delete a job by ID.
pub async fn delete_job(db: &DatabaseConnection, id: Uuid) -> Result<DeleteResult, DbErr> {
    jobs::Entity::delete_by_id(id).exec(db).await
}
