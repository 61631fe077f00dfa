pub mod sea_orm_entity;
pub mod contact_repository_postgres;
