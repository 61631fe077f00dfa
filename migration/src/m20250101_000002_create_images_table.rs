use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Images::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Images::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Images::Filename)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Images::OriginalFilename)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Images::FilePath).text().not_null())
                    .col(ColumnDef::new(Images::FileUrl).text().not_null())
                    .col(ColumnDef::new(Images::FileSize).big_integer().not_null())
                    .col(ColumnDef::new(Images::MimeType).string_len(100).not_null())
                    .col(ColumnDef::new(Images::ImageType).string_len(20).not_null())
                    .col(ColumnDef::new(Images::UserId).uuid().not_null())
                    .col(ColumnDef::new(Images::ProjectId).uuid().null())
                    .col(ColumnDef::new(Images::BlogId).uuid().null())
                    .col(
                        ColumnDef::new(Images::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Images::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Images::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_images_user_id")
                            .from(Images::Table, Images::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_images_user_type_active
                ON images (user_id, image_type, is_active);
                CREATE INDEX IF NOT EXISTS idx_images_project_id
                ON images (project_id) WHERE project_id IS NOT NULL;
                CREATE INDEX IF NOT EXISTS idx_images_blog_id
                ON images (blog_id) WHERE blog_id IS NOT NULL;
                CREATE INDEX IF NOT EXISTS idx_images_created_at
                ON images (created_at DESC);
                "#,
            )
            .await?;

        // One active hero/about/avatar per owner.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE UNIQUE INDEX IF NOT EXISTS idx_images_active_profile_unique
                ON images (user_id, image_type)
                WHERE is_active = true AND image_type IN ('hero', 'about', 'avatar');
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_images_updated_at
                BEFORE UPDATE ON images
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
            .execute_unprepared("DROP TRIGGER IF EXISTS update_images_updated_at ON images")
            .await?;

        manager
            .drop_table(Table::drop().table(Images::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Images {
    Table,
    Id,
    Filename,
    OriginalFilename,
    FilePath,
    FileUrl,
    FileSize,
    MimeType,
    ImageType,
    UserId,
    ProjectId,
    BlogId,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Users {
    Table,
    Id,
}
