mod change_password;
mod fetch_user;
mod login_user;
mod refresh_token;
mod register_user;
mod update_profile;

pub use change_password::*;
pub use fetch_user::*;
pub use login_user::*;
pub use refresh_token::*;
pub use register_user::*;
pub use update_profile::*;

use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(register_user_handler)
        .service(login_user_handler)
        .service(refresh_token_handler)
        .service(get_user_profile_handler)
        .service(update_user_profile_handler)
        .service(change_password_handler)
        .service(get_public_profile_handler);
}
