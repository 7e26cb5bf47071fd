use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// SeaORM entity for the `profiles` table.
///
/// One row per marketplace profile. Engineer fields (headline, skills,
/// day_rate, available) and organization fields (company_name, website) share
/// the table; which side is populated follows the owning user's role.
/// Roster profiles created by a resourcing company have `managed_by` set and
/// no `user_id` of their own.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_id: Option<Uuid>,
    pub headline: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub bio: Option<String>,
    pub location: Option<String>,
    /// JSON-encoded string array, kept as TEXT so listings can filter with LIKE.
    #[sea_orm(column_type = "Text")]
    pub skills: String,
    #[sea_orm(column_type = "Decimal(Some((12, 2)))", nullable)]
    pub day_rate: Option<Decimal>,
    pub currency: Option<String>,
    pub available: bool,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub managed_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn skill_list(&self) -> Vec<String> {
        serde_json::from_str(&self.skills).unwrap_or_default()
    }
}

// ── DTOs ──

/// Body for `PUT /api/profiles/me` and roster creation.
#[derive(Debug, Clone, Deserialize)]
pub struct UpsertProfile {
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Option<Vec<String>>,
    pub day_rate: Option<Decimal>,
    pub currency: Option<String>,
    pub available: Option<bool>,
    pub company_name: Option<String>,
    pub website: Option<String>,
}

/// Profile representation for API responses (skills decoded to an array).
#[derive(Debug, Clone, Serialize)]
pub struct ProfileResponse {
    pub id: Uuid,
    pub user_id: Option<Uuid>,
    pub headline: Option<String>,
    pub bio: Option<String>,
    pub location: Option<String>,
    pub skills: Vec<String>,
    pub day_rate: Option<Decimal>,
    pub currency: Option<String>,
    pub available: bool,
    pub company_name: Option<String>,
    pub website: Option<String>,
    pub managed_by: Option<Uuid>,
    pub created_at: DateTimeUtc,
    pub updated_at: Option<DateTimeUtc>,
}

impl From<Model> for ProfileResponse {
    fn from(m: Model) -> Self {
        let skills = m.skill_list();
        Self {
            id: m.id,
            user_id: m.user_id,
            headline: m.headline,
            bio: m.bio,
            location: m.location,
            skills,
            day_rate: m.day_rate,
            currency: m.currency,
            available: m.available,
            company_name: m.company_name,
            website: m.website,
            managed_by: m.managed_by,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}
