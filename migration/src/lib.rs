pub use sea_orm_migration::prelude::*;

mod m20250101_000001_create_users_table;
mod m20250101_000002_create_images_table;
mod m20250101_000003_create_projects_table;
mod m20250101_000004_create_skills_table;
mod m20250101_000005_create_experiences_table;
mod m20250101_000006_create_educations_table;
mod m20250101_000007_create_blogs_table;
mod m20250101_000008_create_contacts_table;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250101_000001_create_users_table::Migration),
            Box::new(m20250101_000002_create_images_table::Migration),
            Box::new(m20250101_000003_create_projects_table::Migration),
            Box::new(m20250101_000004_create_skills_table::Migration),
            Box::new(m20250101_000005_create_experiences_table::Migration),
            Box::new(m20250101_000006_create_educations_table::Migration),
            Box::new(m20250101_000007_create_blogs_table::Migration),
            Box::new(m20250101_000008_create_contacts_table::Migration),
        ]
    }
}
