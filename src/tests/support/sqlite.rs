use std::sync::Arc;

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, EntityTrait, Schema};
use uuid::Uuid;

use crate::auth::adapter::outgoing::sea_orm_entity::users;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::ports::outgoing::{NewUser, UserRepository};
use crate::blog::adapter::outgoing::sea_orm_entity::blogs;
use crate::contact::adapter::outgoing::sea_orm_entity::contacts;
use crate::education::adapter::outgoing::sea_orm_entity::educations;
use crate::experience::adapter::outgoing::sea_orm_entity::experiences;
use crate::media::adapter::outgoing::db::sea_orm_entity::images;
use crate::project::adapter::outgoing::sea_orm_entity::projects;
use crate::skill::adapter::outgoing::sea_orm_entity::skills;

async fn create_table<E>(db: &DatabaseConnection, schema: &Schema, entity: E)
where
    E: EntityTrait,
{
    let backend = db.get_database_backend();
    db.execute(backend.build(&schema.create_table_from_entity(entity)))
        .await
        .expect("create table");
}

/// In-memory SQLite with every table the app uses. One connection, so the
/// database lives as long as the returned handle.
pub async fn memory_db() -> Arc<DatabaseConnection> {
    let mut options = ConnectOptions::new("sqlite::memory:");
    options
        .max_connections(1)
        .min_connections(1)
        .sqlx_logging(false);
    let db = Database::connect(options).await.expect("connect sqlite");

    let schema = Schema::new(db.get_database_backend());
    create_table(&db, &schema, users::Entity).await;
    create_table(&db, &schema, images::Entity).await;
    create_table(&db, &schema, projects::Entity).await;
    create_table(&db, &schema, skills::Entity).await;
    create_table(&db, &schema, experiences::Entity).await;
    create_table(&db, &schema, educations::Entity).await;
    create_table(&db, &schema, blogs::Entity).await;
    create_table(&db, &schema, contacts::Entity).await;

    Arc::new(db)
}

pub async fn insert_user(db: &Arc<DatabaseConnection>, username: &str, is_admin: bool) -> Uuid {
    UserRepositoryPostgres::new(db.clone())
        .create_user(NewUser {
            username: username.to_string(),
            email: format!("{username}@example.com"),
            password_hash: "hashed".to_string(),
            is_admin,
        })
        .await
        .expect("insert user")
        .id
        .value()
}
