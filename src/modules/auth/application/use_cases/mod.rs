pub mod authorize_admin;
pub mod change_password;
pub mod create_user;
pub mod fetch_profile;
pub mod login_user;
pub mod refresh_token;
pub mod update_profile;
