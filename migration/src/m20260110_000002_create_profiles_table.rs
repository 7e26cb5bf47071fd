use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `profiles` table and its columns.
#[derive(DeriveIden)]
enum Profiles {
    Table,
    Id,
    UserId,
    Headline,
    Bio,
    Location,
    Skills,
    DayRate,
    Currency,
    Available,
    CompanyName,
    Website,
    ManagedBy,
    CreatedAt,
    UpdatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Profiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Profiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Profiles::UserId).uuid().unique_key())
                    .col(ColumnDef::new(Profiles::Headline).string())
                    .col(ColumnDef::new(Profiles::Bio).text())
                    .col(ColumnDef::new(Profiles::Location).string())
                    .col(ColumnDef::new(Profiles::Skills).text().not_null())
                    .col(ColumnDef::new(Profiles::DayRate).decimal_len(12, 2))
                    .col(ColumnDef::new(Profiles::Currency).string())
                    .col(ColumnDef::new(Profiles::Available).boolean().not_null())
                    .col(ColumnDef::new(Profiles::CompanyName).string())
                    .col(ColumnDef::new(Profiles::Website).string())
                    .col(ColumnDef::new(Profiles::ManagedBy).uuid())
                    .col(
                        ColumnDef::new(Profiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Profiles::UpdatedAt).timestamp_with_time_zone())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_user_id")
                            .from(Profiles::Table, Profiles::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_profiles_managed_by")
                            .from(Profiles::Table, Profiles::ManagedBy)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Profiles::Table).to_owned())
            .await
    }
}
