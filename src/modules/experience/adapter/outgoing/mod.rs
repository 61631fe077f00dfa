pub mod sea_orm_entity;
pub mod experience_repository_postgres;
