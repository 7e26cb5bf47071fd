use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(DeriveIden)]
enum Jobs {
    Table,
    CompanyId,
    Status,
}

#[derive(DeriveIden)]
enum Applications {
    Table,
    JobId,
    EngineerId,
}

#[derive(DeriveIden)]
enum Contracts {
    Table,
    CompanyId,
    EngineerId,
}

#[derive(DeriveIden)]
enum Milestones {
    Table,
    ContractId,
}

#[derive(DeriveIden)]
enum Timesheets {
    Table,
    ContractId,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Index on jobs.company_id for fetching a company's postings
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_company_id")
                    .table(Jobs::Table)
                    .col(Jobs::CompanyId)
                    .to_owned(),
            )
            .await?;

        // Index on jobs.status for the open-jobs board
        manager
            .create_index(
                Index::create()
                    .name("idx_jobs_status")
                    .table(Jobs::Table)
                    .col(Jobs::Status)
                    .to_owned(),
            )
            .await?;

        // Index on applications.job_id for per-job application lists
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_job_id")
                    .table(Applications::Table)
                    .col(Applications::JobId)
                    .to_owned(),
            )
            .await?;

        // Index on applications.engineer_id for an engineer's own list
        manager
            .create_index(
                Index::create()
                    .name("idx_applications_engineer_id")
                    .table(Applications::Table)
                    .col(Applications::EngineerId)
                    .to_owned(),
            )
            .await?;

        // Indexes on contracts for both party-side lookups
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_company_id")
                    .table(Contracts::Table)
                    .col(Contracts::CompanyId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .name("idx_contracts_engineer_id")
                    .table(Contracts::Table)
                    .col(Contracts::EngineerId)
                    .to_owned(),
            )
            .await?;

        // Index on milestones.contract_id for per-contract listings
        manager
            .create_index(
                Index::create()
                    .name("idx_milestones_contract_id")
                    .table(Milestones::Table)
                    .col(Milestones::ContractId)
                    .to_owned(),
            )
            .await?;

        // Index on timesheets.contract_id for per-contract listings
        manager
            .create_index(
                Index::create()
                    .name("idx_timesheets_contract_id")
                    .table(Timesheets::Table)
                    .col(Timesheets::ContractId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_jobs_company_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_jobs_status").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_applications_job_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_applications_engineer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_company_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_contracts_engineer_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_milestones_contract_id").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_timesheets_contract_id").to_owned())
            .await?;

        Ok(())
    }
}
