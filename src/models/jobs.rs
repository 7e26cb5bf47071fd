use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job posting status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum JobStatus {
    #[sea_orm(string_value = "open")]
    Open,
    #[sea_orm(string_value = "closed")]
    Closed,
}

/// SeaORM entity for the `jobs` table.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "jobs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// JSON-encoded string array, kept as TEXT so listings can filter with LIKE.
    #[sea_orm(column_type = "Text")]
    pub skills: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))")]
    pub day_rate: Decimal,
    pub currency: String,
    pub status: JobStatus,
    pub company_id: Uuid,
    pub created_at: DateTimeUtc,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::applications::Entity")]
    Applications,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CompanyId",
        to = "super::users::Column::Id"
    )]
    Company,
}

impl Related<super::applications::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Applications.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn skill_list(&self) -> Vec<String> {
        serde_json::from_str(&self.skills).unwrap_or_default()
    }
}

// ── DTOs ──

#[derive(Debug, Clone, Deserialize)]
pub struct CreateJob {
    pub title: String,
    pub description: String,
    pub skills: Option<Vec<String>>,
    pub day_rate: Decimal,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateJob {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skills: Option<Vec<String>>,
    pub day_rate: Option<Decimal>,
    pub currency: Option<String>,
}

/// Query params for `GET /api/jobs` — keyword/skill/rate filters plus keyset
/// pagination on (created_at, id).
#[derive(Debug, Clone, Deserialize)]
pub struct JobListQuery {
    pub q: Option<String>,
    pub skill: Option<String>,
    pub min_rate: Option<Decimal>,
    pub max_rate: Option<Decimal>,
    pub limit: Option<u64>,
    pub cursor_created_at: Option<chrono::DateTime<chrono::Utc>>,
    pub cursor_id: Option<Uuid>,
}

impl JobListQuery {
    pub fn limit(&self) -> u64 {
        self.limit.unwrap_or(20).min(100)
    }

    /// Stable fingerprint of the filter set, used as a cache key suffix.
    pub fn fingerprint(&self) -> String {
        format!(
            "{}:{}:{}:{}:{}",
            self.q.as_deref().unwrap_or(""),
            self.skill.as_deref().unwrap_or(""),
            self.min_rate.map(|r| r.to_string()).unwrap_or_default(),
            self.max_rate.map(|r| r.to_string()).unwrap_or_default(),
            self.limit()
        )
    }
}

/// Job representation for API responses (skills decoded to an array).
#[derive(Debug, Clone, Serialize)]
pub struct JobResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub skills: Vec<String>,
    pub day_rate: Decimal,
    pub currency: String,
    pub status: JobStatus,
    pub company_id: Uuid,
    pub created_at: DateTimeUtc,
}

impl From<Model> for JobResponse {
    fn from(m: Model) -> Self {
        let skills = m.skill_list();
        Self {
            id: m.id,
            title: m.title,
            description: m.description,
            skills,
            day_rate: m.day_rate,
            currency: m.currency,
            status: m.status,
            company_id: m.company_id,
            created_at: m.created_at,
        }
    }
}
