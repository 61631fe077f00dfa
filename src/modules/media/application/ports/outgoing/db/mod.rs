pub mod image_query;
pub mod image_repository;

pub use image_query::{ImageQuery, ImageQueryError};
pub use image_repository::{
    ImageMetadataPatch, ImageRepository, ImageRepositoryError, NewImage,
};
