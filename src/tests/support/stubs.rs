use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use crate::auth::application::domain::entities::{normalize_email, Requester, User, UserId, UserProfile};
use crate::auth::application::ports::outgoing::{
    HashError, NewUser, PasswordHasher, ProfilePatch, UserQuery, UserQueryError, UserRepository,
    UserRepositoryError,
};
use crate::auth::application::use_cases::authorize_admin::{AuthorizeAdminUseCase, AuthorizeError};
use crate::auth::application::use_cases::change_password::{ChangePasswordError, ChangePasswordUseCase};
use crate::auth::application::use_cases::create_user::{CreateUserError, CreateUserInput, ICreateUserUseCase};
use crate::auth::application::use_cases::fetch_profile::{
    FetchPublicProfileUseCase, FetchUserError, FetchUserProfileUseCase,
};
use crate::auth::application::use_cases::login_user::{
    ILoginUserUseCase, LoginError, LoginRequest, LoginUserResponse,
};
use crate::auth::application::use_cases::update_profile::{UpdateUserError, UpdateUserProfileUseCase};
use crate::shared::patch::PatchField;

// ============================================================
// Users
// ============================================================

/// User store backed by a vector; clones share the same rows.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    rows: Arc<Mutex<Vec<User>>>,
}

impl InMemoryUsers {
    fn find(&self, pred: impl Fn(&User) -> bool) -> Option<User> {
        self.rows.lock().unwrap().iter().find(|u| pred(u)).cloned()
    }

    fn modify(
        &self,
        user_id: UserId,
        f: impl FnOnce(&mut User),
    ) -> Result<User, UserRepositoryError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == user_id)
            .ok_or(UserRepositoryError::UserNotFound)?;
        f(user);
        user.updated_at = Utc::now();
        Ok(user.clone())
    }
}

fn apply(target: &mut Option<String>, patch: PatchField<String>) {
    if let Some(value) = patch.into_update() {
        *target = value;
    }
}

#[async_trait]
impl UserQuery for InMemoryUsers {
    async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError> {
        Ok(self.find(|u| u.id == user_id))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError> {
        let email = normalize_email(email);
        Ok(self.find(|u| u.email == email))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError> {
        Ok(self.find(|u| u.username == username))
    }

    async fn find_portfolio_owner(&self) -> Result<Option<User>, UserQueryError> {
        Ok(self.find(|u| u.is_admin).or_else(|| self.find(|_| true)))
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError> {
        let email = normalize_email(&user.email);
        let username = user.username.trim().to_string();

        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == email || u.username == username) {
            return Err(UserRepositoryError::UserAlreadyExists);
        }

        let now = Utc::now();
        let created = User {
            id: UserId::new(),
            username,
            email,
            password_hash: user.password_hash,
            is_admin: user.is_admin,
            profile: UserProfile::default(),
            created_at: now,
            updated_at: now,
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn update_profile(
        &self,
        user_id: UserId,
        patch: ProfilePatch,
    ) -> Result<User, UserRepositoryError> {
        self.modify(user_id, |user| {
            let p = &mut user.profile;
            apply(&mut p.first_name, patch.first_name);
            apply(&mut p.last_name, patch.last_name);
            apply(&mut p.bio, patch.bio);
            apply(&mut p.title, patch.title);
            apply(&mut p.location, patch.location);
            apply(&mut p.phone, patch.phone);
            apply(&mut p.avatar_url, patch.avatar_url);
            apply(&mut p.github_url, patch.github_url);
            apply(&mut p.linkedin_url, patch.linkedin_url);
            apply(&mut p.twitter_url, patch.twitter_url);
            apply(&mut p.instagram_url, patch.instagram_url);
            apply(&mut p.whatsapp_url, patch.whatsapp_url);
            apply(&mut p.website_url, patch.website_url);
            apply(&mut p.email_url, patch.email_url);
            apply(&mut p.hero_image_url, patch.hero_image_url);
            apply(&mut p.about_image_url, patch.about_image_url);
            apply(&mut p.cv_url, patch.cv_url);
        })
    }

    async fn update_password(
        &self,
        user_id: UserId,
        new_password_hash: String,
    ) -> Result<(), UserRepositoryError> {
        self.modify(user_id, |user| user.password_hash = new_password_hash)
            .map(|_| ())
    }
}

// ============================================================
// Hashing
// ============================================================

/// Deterministic hasher: `pw` hashes to `hashed:pw`.
#[derive(Clone, Default)]
pub struct FixedHasher {
    failure: Option<HashError>,
}

impl FixedHasher {
    pub fn failing(error: HashError) -> Self {
        Self { failure: Some(error) }
    }
}

#[async_trait]
impl PasswordHasher for FixedHasher {
    async fn hash_password(&self, password: &str) -> Result<String, HashError> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(format!("hashed:{password}")),
        }
    }

    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(hash == format!("hashed:{password}")),
        }
    }
}

// ============================================================
// Use cases
// ============================================================

fn stub_user(username: &str, is_admin: bool) -> User {
    let now = Utc::now();
    User {
        id: UserId::new(),
        username: username.to_string(),
        email: format!("{username}@example.com"),
        password_hash: "hashed".to_string(),
        is_admin,
        profile: UserProfile::default(),
        created_at: now,
        updated_at: now,
    }
}

#[derive(Clone)]
pub struct StubCreateUser(Result<(), CreateUserError>);

impl StubCreateUser {
    pub fn success() -> Self {
        Self(Ok(()))
    }

    pub fn failing(error: CreateUserError) -> Self {
        Self(Err(error))
    }
}

#[async_trait]
impl ICreateUserUseCase for StubCreateUser {
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError> {
        self.0.clone()?;
        let mut user = stub_user(&input.username, false);
        user.email = input.email;
        Ok(user)
    }
}

#[derive(Clone)]
pub struct StubLogin;

#[async_trait]
impl ILoginUserUseCase for StubLogin {
    async fn execute(&self, _request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Clone)]
pub struct StubFetchProfile(Option<User>);

impl StubFetchProfile {
    pub fn found(user: User) -> Self {
        Self(Some(user))
    }

    pub fn missing() -> Self {
        Self(None)
    }
}

#[async_trait]
impl FetchUserProfileUseCase for StubFetchProfile {
    async fn execute(&self, _user_id: UserId) -> Result<User, FetchUserError> {
        self.0.clone().ok_or(FetchUserError::NotFound)
    }
}

#[async_trait]
impl FetchPublicProfileUseCase for StubFetchProfile {
    async fn execute(&self) -> Result<User, FetchUserError> {
        self.0.clone().ok_or(FetchUserError::NotFound)
    }
}

#[derive(Clone)]
pub struct StubUpdateProfile;

#[async_trait]
impl UpdateUserProfileUseCase for StubUpdateProfile {
    async fn execute(&self, _user_id: UserId, _patch: ProfilePatch) -> Result<User, UpdateUserError> {
        unimplemented!("Not used in this test")
    }
}

#[derive(Clone)]
pub struct StubChangePassword(pub Result<(), ChangePasswordError>);

#[async_trait]
impl ChangePasswordUseCase for StubChangePassword {
    async fn execute(
        &self,
        _user_id: UserId,
        _current_password: &str,
        _new_password: &str,
    ) -> Result<(), ChangePasswordError> {
        self.0.clone()
    }
}

/// Admin check that ignores the store and answers with a fixed verdict.
#[derive(Clone)]
pub struct StubAuthorizeAdmin {
    allow: bool,
}

impl StubAuthorizeAdmin {
    pub fn allowed() -> Self {
        Self { allow: true }
    }

    pub fn denied() -> Self {
        Self { allow: false }
    }
}

#[async_trait]
impl AuthorizeAdminUseCase for StubAuthorizeAdmin {
    async fn execute(&self, user_id: UserId) -> Result<Requester, AuthorizeError> {
        if self.allow {
            Ok(Requester { user_id, is_admin: true })
        } else {
            Err(AuthorizeError::NotAdmin)
        }
    }
}
