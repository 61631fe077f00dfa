use std::sync::Arc;

use crate::auth::application::use_cases::{
    authorize_admin::AuthorizeAdminUseCase,
    change_password::ChangePasswordUseCase,
    create_user::ICreateUserUseCase,
    fetch_profile::{FetchPublicProfileUseCase, FetchUserProfileUseCase},
    login_user::ILoginUserUseCase,
    refresh_token::IRefreshTokenUseCase,
    update_profile::UpdateUserProfileUseCase,
};

#[derive(Clone)]
pub struct AuthUseCases {
    pub register: Arc<dyn ICreateUserUseCase>,
    pub login: Arc<dyn ILoginUserUseCase>,
    pub refresh: Arc<dyn IRefreshTokenUseCase>,
    pub fetch_profile: Arc<dyn FetchUserProfileUseCase>,
    pub public_profile: Arc<dyn FetchPublicProfileUseCase>,
    pub update_profile: Arc<dyn UpdateUserProfileUseCase>,
    pub change_password: Arc<dyn ChangePasswordUseCase>,
    pub authorize_admin: Arc<dyn AuthorizeAdminUseCase>,
}
