use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `contracts` table and its columns.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
    JobId,
    CompanyId,
    EngineerId,
    JobTitle,
    ContractType,
    Description,
    Amount,
    Currency,
    Status,
    EngineerSignedName,
    EngineerSignedAt,
    CompanySignedName,
    CompanySignedAt,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Jobs {
    Table,
    Id,
}

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
                    .table(Contracts::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Contracts::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Contracts::JobId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::CompanyId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::EngineerId).uuid().not_null())
                    .col(ColumnDef::new(Contracts::JobTitle).string().not_null())
                    .col(ColumnDef::new(Contracts::ContractType).string().not_null())
                    .col(ColumnDef::new(Contracts::Description).text().not_null())
                    .col(
                        ColumnDef::new(Contracts::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Contracts::Currency).string().not_null())
                    .col(ColumnDef::new(Contracts::Status).string().not_null())
                    .col(ColumnDef::new(Contracts::EngineerSignedName).string())
                    .col(
                        ColumnDef::new(Contracts::EngineerSignedAt).timestamp_with_time_zone(),
                    )
                    .col(ColumnDef::new(Contracts::CompanySignedName).string())
                    .col(ColumnDef::new(Contracts::CompanySignedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Contracts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_job_id")
                            .from(Contracts::Table, Contracts::JobId)
                            .to(Jobs::Table, Jobs::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_company_id")
                            .from(Contracts::Table, Contracts::CompanyId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_contracts_engineer_id")
                            .from(Contracts::Table, Contracts::EngineerId)
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
            .drop_table(Table::drop().table(Contracts::Table).to_owned())
            .await
    }
}
