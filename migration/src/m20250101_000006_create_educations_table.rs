use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Educations::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Educations::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Educations::Institution)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Educations::Degree).string_len(200).not_null())
                    .col(
                        ColumnDef::new(Educations::FieldOfStudy)
                            .string_len(200)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Educations::Description).text().null())
                    .col(ColumnDef::new(Educations::StartDate).date().not_null())
                    .col(ColumnDef::new(Educations::EndDate).date().null())
                    .col(
                        ColumnDef::new(Educations::Current)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Educations::Gpa).string_len(20).null())
                    .col(ColumnDef::new(Educations::Location).string_len(200).null())
                    .col(ColumnDef::new(Educations::InstitutionLogo).text().null())
                    .col(
                        ColumnDef::new(Educations::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Educations::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_educations_start_date
                ON educations (start_date DESC);
                CREATE TRIGGER update_educations_updated_at
                BEFORE UPDATE ON educations
                FOR EACH ROW
                EXECUTE FUNCTION update_updated_at_column();
                "#,
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared("DROP TRIGGER IF EXISTS update_educations_updated_at ON educations")
            .await?;

        manager
            .drop_table(Table::drop().table(Educations::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Educations {
    Table,
    Id,
    Institution,
    Degree,
    FieldOfStudy,
    Description,
    StartDate,
    EndDate,
    Current,
    Gpa,
    Location,
    InstitutionLogo,
    CreatedAt,
    UpdatedAt,
}
