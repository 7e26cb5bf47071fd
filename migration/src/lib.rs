pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users_table;
mod m20260110_000002_create_profiles_table;
mod m20260110_000003_create_jobs_table;
mod m20260110_000004_create_applications_table;
mod m20260110_000005_create_contracts_table;
mod m20260110_000006_create_milestones_table;
mod m20260110_000007_create_timesheets_table;
mod m20260110_000008_create_invoices_table;
mod m20260112_000001_add_unique_job_engineer_to_applications;
mod m20260118_000001_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260110_000001_create_users_table::Migration),
            Box::new(m20260110_000002_create_profiles_table::Migration),
            Box::new(m20260110_000003_create_jobs_table::Migration),
            Box::new(m20260110_000004_create_applications_table::Migration),
            Box::new(m20260110_000005_create_contracts_table::Migration),
            Box::new(m20260110_000006_create_milestones_table::Migration),
            Box::new(m20260110_000007_create_timesheets_table::Migration),
            Box::new(m20260110_000008_create_invoices_table::Migration),
            Box::new(m20260112_000001_add_unique_job_engineer_to_applications::Migration),
            Box::new(m20260118_000001_add_indexes::Migration),
        ]
    }
}
