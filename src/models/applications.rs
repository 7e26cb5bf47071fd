use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Application pipeline status stored as a lowercase string in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "applied")]
    Applied,
    #[sea_orm(string_value = "offered")]
    Offered,
    #[sea_orm(string_value = "accepted")]
    Accepted,
    #[sea_orm(string_value = "rejected")]
    Rejected,
    #[sea_orm(string_value = "withdrawn")]
    Withdrawn,
}

/// SeaORM entity for the `applications` table.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub job_id: Uuid,
    pub engineer_id: Uuid,
    pub status: ApplicationStatus,
    /// Priority flag — supercharged applications sort ahead of the rest.
    pub is_supercharged: bool,
    /// One-way flag set when the job owner has looked at the application.
    pub reviewed: bool,
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
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::EngineerId",
        to = "super::users::Column::Id"
    )]
    Engineer,
}

impl Related<super::jobs::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Job.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Engineer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
