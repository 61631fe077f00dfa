pub mod json_config;
pub mod path;
pub mod response;

pub use json_config::custom_json_config;
pub use path::parse_uuid;
pub use response::ApiResponse;
