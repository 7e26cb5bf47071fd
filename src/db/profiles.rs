use sea_orm::*;
use uuid::Uuid;

use crate::models::profiles::{self, UpsertProfile};

fn encode_skills(skills: Option<Vec<String>>) -> Option<String> {
    skills.map(|s| serde_json::to_string(&s).unwrap_or_else(|_| "[]".to_string()))
}

/// Create or update the profile owned by `user_id`.
pub async fn upsert_for_user(
    db: &DatabaseConnection,
    user_id: Uuid,
    input: UpsertProfile,
) -> Result<profiles::Model, DbErr> {
    let existing = profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(db)
        .await?;

    let skills = encode_skills(input.skills);

    match existing {
        Some(profile) => {
            let mut active: profiles::ActiveModel = profile.into();
            if let Some(headline) = input.headline {
                active.headline = Set(Some(headline));
            }
            if let Some(bio) = input.bio {
                active.bio = Set(Some(bio));
            }
            if let Some(location) = input.location {
                active.location = Set(Some(location));
            }
            if let Some(skills) = skills {
                active.skills = Set(skills);
            }
            if let Some(day_rate) = input.day_rate {
                active.day_rate = Set(Some(day_rate));
            }
            if let Some(currency) = input.currency {
                active.currency = Set(Some(currency));
            }
            if let Some(available) = input.available {
                active.available = Set(available);
            }
            if let Some(company_name) = input.company_name {
                active.company_name = Set(Some(company_name));
            }
            if let Some(website) = input.website {
                active.website = Set(Some(website));
            }
            active.updated_at = Set(Some(chrono::Utc::now()));
            active.update(db).await
        }
        None => {
            let new_profile = profiles::ActiveModel {
                id: Set(Uuid::new_v4()),
                user_id: Set(Some(user_id)),
                headline: Set(input.headline),
                bio: Set(input.bio),
                location: Set(input.location),
                skills: Set(skills.unwrap_or_else(|| "[]".to_string())),
                day_rate: Set(input.day_rate),
                currency: Set(input.currency),
                available: Set(input.available.unwrap_or(true)),
                company_name: Set(input.company_name),
                website: Set(input.website),
                managed_by: Set(None),
                created_at: Set(chrono::Utc::now()),
                updated_at: Set(None),
            };
            new_profile.insert(db).await
        }
    }
}

/// Create a roster profile managed by a resourcing company.
pub async fn insert_roster_profile(
    db: &DatabaseConnection,
    manager_id: Uuid,
    input: UpsertProfile,
) -> Result<profiles::Model, DbErr> {
    let new_profile = profiles::ActiveModel {
        id: Set(Uuid::new_v4()),
        user_id: Set(None),
        headline: Set(input.headline),
        bio: Set(input.bio),
        location: Set(input.location),
        skills: Set(encode_skills(input.skills).unwrap_or_else(|| "[]".to_string())),
        day_rate: Set(input.day_rate),
        currency: Set(input.currency),
        available: Set(input.available.unwrap_or(true)),
        company_name: Set(input.company_name),
        website: Set(input.website),
        managed_by: Set(Some(manager_id)),
        created_at: Set(chrono::Utc::now()),
        updated_at: Set(None),
    };
    new_profile.insert(db).await
}

/// Fetch the profile owned by a user.
pub async fn get_by_user_id(
    db: &DatabaseConnection,
    user_id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::UserId.eq(user_id))
        .one(db)
        .await
}

/// Fetch a profile by its own ID.
pub async fn get_by_id(
    db: &DatabaseConnection,
    id: Uuid,
) -> Result<Option<profiles::Model>, DbErr> {
    profiles::Entity::find_by_id(id).one(db).await
}

/// Browse engineer profiles currently marked available (candidate pool for
/// matching). Roster profiles count too.
pub async fn list_available_engineers(
    db: &DatabaseConnection,
) -> Result<Vec<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::Available.eq(true))
        .filter(profiles::Column::DayRate.is_not_null())
        .order_by_desc(profiles::Column::CreatedAt)
        .all(db)
        .await
}

/// All roster profiles managed by a resourcing company.
pub async fn list_roster(
    db: &DatabaseConnection,
    manager_id: Uuid,
) -> Result<Vec<profiles::Model>, DbErr> {
    profiles::Entity::find()
        .filter(profiles::Column::ManagedBy.eq(manager_id))
        .order_by_desc(profiles::Column::CreatedAt)
        .all(db)
        .await
}
