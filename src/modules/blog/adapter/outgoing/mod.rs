pub mod sea_orm_entity;
pub mod blog_repository_postgres;
