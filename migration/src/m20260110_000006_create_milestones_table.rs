use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `milestones` table and its columns.
#[derive(DeriveIden)]
enum Milestones {
    Table,
    Id,
    ContractId,
    Description,
    Amount,
    Position,
    Status,
    CreatedAt,
}

/// Re-declare parent table identifiers for foreign-key references.
#[derive(DeriveIden)]
enum Contracts {
    Table,
    Id,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Milestones::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Milestones::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Milestones::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Milestones::Description).text().not_null())
                    .col(
                        ColumnDef::new(Milestones::Amount)
                            .decimal_len(12, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Milestones::Position).integer().not_null())
                    .col(ColumnDef::new(Milestones::Status).string().not_null())
                    .col(
                        ColumnDef::new(Milestones::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_milestones_contract_id")
                            .from(Milestones::Table, Milestones::ContractId)
                            .to(Contracts::Table, Contracts::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Milestones::Table).to_owned())
            .await
    }
}
