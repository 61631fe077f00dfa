pub mod image_query_postgres;
pub mod image_repository_postgres;
pub mod sea_orm_entity;

pub use image_query_postgres::ImageQueryPostgres;
pub use image_repository_postgres::ImageRepositoryPostgres;
