use std::sync::Arc;

use actix_web::web;
use sea_orm::{DatabaseBackend, MockDatabase};

use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::use_cases::authorize_admin::AuthorizeAdminUseCase;
use crate::auth::application::use_cases::change_password::ChangePasswordUseCase;
use crate::auth::application::use_cases::create_user::{CreateUserError, ICreateUserUseCase};
use crate::auth::application::use_cases::fetch_profile::{
    FetchPublicProfileUseCase, FetchUserProfileUseCase,
};
use crate::auth::application::use_cases::login_user::ILoginUserUseCase;
use crate::auth::application::use_cases::refresh_token::{IRefreshTokenUseCase, RefreshTokenUseCase};
use crate::auth::application::use_cases::update_profile::UpdateUserProfileUseCase;
use crate::content::ContentRepositories;
use crate::media::application::domain::policies::upload_policy::UploadPolicy;
use crate::media::application::media_use_cases::MediaUseCases;
use crate::tests::support::auth_helper::test_token_service;
use crate::tests::support::media_fakes::{media_use_cases, InMemoryImages, MemoryStorage};
use crate::tests::support::stubs::*;
use crate::AppState;

/// `AppState` with inert defaults; override only what a test exercises.
pub struct TestAppStateBuilder {
    auth: AuthUseCases,
    media: Option<MediaUseCases>,
    content: Option<ContentRepositories>,
    upload_max_bytes: u64,
    expose_error_details: bool,
}

impl Default for TestAppStateBuilder {
    fn default() -> Self {
        Self {
            auth: AuthUseCases {
                register: Arc::new(StubCreateUser::failing(CreateUserError::RepositoryError(
                    "not used in this test".into(),
                ))),
                login: Arc::new(StubLogin),
                refresh: Arc::new(RefreshTokenUseCase::new(Arc::new(test_token_service()))),
                fetch_profile: Arc::new(StubFetchProfile::missing()),
                public_profile: Arc::new(StubFetchProfile::missing()),
                update_profile: Arc::new(StubUpdateProfile),
                change_password: Arc::new(StubChangePassword(Ok(()))),
                authorize_admin: Arc::new(StubAuthorizeAdmin::denied()),
            },
            media: None,
            content: None,
            upload_max_bytes: UploadPolicy::DEFAULT_MAX_FILE_SIZE_BYTES,
            expose_error_details: false,
        }
    }
}

impl TestAppStateBuilder {
    pub fn with_register(mut self, uc: impl ICreateUserUseCase + 'static) -> Self {
        self.auth.register = Arc::new(uc);
        self
    }

    pub fn with_login_user(mut self, uc: impl ILoginUserUseCase + 'static) -> Self {
        self.auth.login = Arc::new(uc);
        self
    }

    pub fn with_refresh_token(mut self, uc: impl IRefreshTokenUseCase + 'static) -> Self {
        self.auth.refresh = Arc::new(uc);
        self
    }

    pub fn with_fetch_user_profile(mut self, uc: impl FetchUserProfileUseCase + 'static) -> Self {
        self.auth.fetch_profile = Arc::new(uc);
        self
    }

    pub fn with_public_profile(mut self, uc: impl FetchPublicProfileUseCase + 'static) -> Self {
        self.auth.public_profile = Arc::new(uc);
        self
    }

    pub fn with_update_user_profile(mut self, uc: impl UpdateUserProfileUseCase + 'static) -> Self {
        self.auth.update_profile = Arc::new(uc);
        self
    }

    pub fn with_change_password(mut self, uc: impl ChangePasswordUseCase + 'static) -> Self {
        self.auth.change_password = Arc::new(uc);
        self
    }

    pub fn with_authorize_admin(mut self, uc: impl AuthorizeAdminUseCase + 'static) -> Self {
        self.auth.authorize_admin = Arc::new(uc);
        self
    }

    pub fn with_auth(mut self, auth: AuthUseCases) -> Self {
        self.auth = auth;
        self
    }

    pub fn with_media(mut self, media: MediaUseCases) -> Self {
        self.media = Some(media);
        self
    }

    pub fn with_content(mut self, content: ContentRepositories) -> Self {
        self.content = Some(content);
        self
    }

    pub fn build(self) -> web::Data<AppState> {
        let media = self
            .media
            .unwrap_or_else(|| media_use_cases(&InMemoryImages::default(), &MemoryStorage::default()));
        // An empty mock connection errors on first use.
        let content = self.content.unwrap_or_else(|| {
            ContentRepositories::postgres(Arc::new(
                MockDatabase::new(DatabaseBackend::Postgres).into_connection(),
            ))
        });

        web::Data::new(AppState {
            auth: self.auth,
            media,
            content,
            upload_max_bytes: self.upload_max_bytes,
            expose_error_details: self.expose_error_details,
        })
    }
}
