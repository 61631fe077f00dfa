pub mod entities;
pub mod file_names;
pub mod policies;
