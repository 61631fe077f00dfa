pub mod api;
pub mod crud;
pub mod errors;
pub mod monthly;
pub mod pagination;
pub mod patch;
