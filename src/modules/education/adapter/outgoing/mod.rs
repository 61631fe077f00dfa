pub mod sea_orm_entity;
pub mod education_repository_postgres;
