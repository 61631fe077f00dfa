pub mod educations;
