use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let optional = |column: Users| ColumnDef::new(column).string_len(255).null().to_owned();

        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Users::Id).uuid().not_null().primary_key())
                    .col(
                        ColumnDef::new(Users::Username)
                            .string_len(50)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::Email)
                            .string_len(255)
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Users::PasswordHash)
                            .string_len(255)
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Users::IsAdmin)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(optional(Users::FirstName))
                    .col(optional(Users::LastName))
                    .col(ColumnDef::new(Users::Bio).text().null())
                    .col(optional(Users::Title))
                    .col(optional(Users::Location))
                    .col(optional(Users::Phone))
                    .col(optional(Users::AvatarUrl))
                    .col(optional(Users::GithubUrl))
                    .col(optional(Users::LinkedinUrl))
                    .col(optional(Users::TwitterUrl))
                    .col(optional(Users::InstagramUrl))
                    .col(optional(Users::WhatsappUrl))
                    .col(optional(Users::WebsiteUrl))
                    .col(optional(Users::EmailUrl))
                    .col(optional(Users::HeroImageUrl))
                    .col(optional(Users::AboutImageUrl))
                    .col(optional(Users::CvUrl))
                    .col(
                        ColumnDef::new(Users::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Users::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        // Public profile resolves the first admin, then the first user.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE INDEX IF NOT EXISTS idx_users_admin_created_at
                ON users (is_admin DESC, created_at ASC);
                "#,
            )
            .await?;

        // Shared by every table with an updated_at column.
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE OR REPLACE FUNCTION update_updated_at_column()
                RETURNS TRIGGER AS $$
                BEGIN
                    NEW.updated_at = CURRENT_TIMESTAMP;
                    RETURN NEW;
                END;
                $$ language 'plpgsql';
                "#,
            )
            .await?;

        manager
            .get_connection()
            .execute_unprepared(
                r#"
                CREATE TRIGGER update_users_updated_at
                BEFORE UPDATE ON users
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
            .execute_unprepared("DROP TRIGGER IF EXISTS update_users_updated_at ON users")
            .await?;

        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;

        manager
            .get_connection()
            .execute_unprepared("DROP FUNCTION IF EXISTS update_updated_at_column")
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden, Clone, Copy)]
enum Users {
    Table,
    Id,
    Username,
    Email,
    PasswordHash,
    IsAdmin,
    FirstName,
    LastName,
    Bio,
    Title,
    Location,
    Phone,
    AvatarUrl,
    GithubUrl,
    LinkedinUrl,
    TwitterUrl,
    InstagramUrl,
    WhatsappUrl,
    WebsiteUrl,
    EmailUrl,
    HeroImageUrl,
    AboutImageUrl,
    CvUrl,
    CreatedAt,
    UpdatedAt,
}
