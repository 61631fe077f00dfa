use super::sea_orm_entity::users::{Column as UserColumn, Entity as UserEntity};
use crate::auth::application::domain::entities::{normalize_email, User, UserId};
use crate::auth::application::ports::outgoing::user_query::{UserQuery, UserQueryError};
use async_trait::async_trait;
use sea_orm::sea_query::{Expr, Func};
use sea_orm::{ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder};
use std::sync::Arc;

#[derive(Clone, Debug)]
pub struct UserQueryPostgres {
    db: Arc<DatabaseConnection>,
}

impl UserQueryPostgres {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

fn map_db_err(e: DbErr) -> UserQueryError {
    UserQueryError::DatabaseError(e.to_string())
}

#[async_trait]
impl UserQuery for UserQueryPostgres {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find_by_id(user_id.value())
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(
                Expr::expr(Func::lower(Expr::col(UserColumn::Email))).eq(normalize_email(email)),
            )
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        let user = UserEntity::find()
            .filter(UserColumn::Username.eq(username.trim()))
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(user.map(User::from))
    }

    async fn find_portfolio_owner(&self) -> Result<Option<User>, UserQueryError> {
        let admin = UserEntity::find()
            .filter(UserColumn::IsAdmin.eq(true))
            .order_by_asc(UserColumn::CreatedAt)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        if let Some(admin) = admin {
            return Ok(Some(admin.into()));
        }

        let first = UserEntity::find()
            .order_by_asc(UserColumn::CreatedAt)
            .one(&*self.db)
            .await
            .map_err(map_db_err)?;

        Ok(first.map(User::from))
    }
}
