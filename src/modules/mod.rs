pub mod auth;
pub mod blog;
pub mod contact;
pub mod content;
pub mod education;
pub mod experience;
pub mod media;
pub mod portfolio;
pub mod project;
pub mod skill;
