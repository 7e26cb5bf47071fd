use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

/// Identifiers for the `timesheets` table and its columns.
#[derive(DeriveIden)]
enum Timesheets {
    Table,
    Id,
    ContractId,
    Period,
    Days,
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
                    .table(Timesheets::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Timesheets::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Timesheets::ContractId).uuid().not_null())
                    .col(ColumnDef::new(Timesheets::Period).string().not_null())
                    .col(
                        ColumnDef::new(Timesheets::Days)
                            .decimal_len(6, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Timesheets::Status).string().not_null())
                    .col(
                        ColumnDef::new(Timesheets::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timesheets_contract_id")
                            .from(Timesheets::Table, Timesheets::ContractId)
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
            .drop_table(Table::drop().table(Timesheets::Table).to_owned())
            .await
    }
}
