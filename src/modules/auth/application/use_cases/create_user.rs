use std::sync::Arc;

use async_trait::async_trait;
use email_address::EmailAddress;

use crate::auth::application::domain::entities::{normalize_email, User};
use crate::auth::application::domain::password_policy::validate_password;
use crate::auth::application::ports::outgoing::{
    NewUser, PasswordHasher, UserQuery, UserRepository, UserRepositoryError,
};

const MAX_USERNAME_LEN: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CreateUserError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("Username already exists")]
    UsernameAlreadyExists,

    #[error("Email already exists")]
    EmailAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

/// Validated registration data.
#[derive(Debug, Clone)]
pub struct CreateUserInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl CreateUserInput {
    pub fn new(username: &str, email: &str, password: &str) -> Result<Self, CreateUserError> {
        let username = username.trim();
        if username.is_empty() {
            return Err(CreateUserError::InvalidInput("Username is required".into()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(CreateUserError::InvalidInput(format!(
                "Username must be at most {MAX_USERNAME_LEN} characters"
            )));
        }

        let email = normalize_email(email);
        if !EmailAddress::is_valid(&email) {
            return Err(CreateUserError::InvalidInput("Invalid email address".into()));
        }

        validate_password(password).map_err(|e| CreateUserError::InvalidInput(e.to_string()))?;

        Ok(Self {
            username: username.to_string(),
            email,
            password: password.to_string(),
        })
    }
}

#[async_trait]
pub trait ICreateUserUseCase: Send + Sync {
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError>;
}

#[derive(Clone)]
pub struct CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<Q, R> CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }
}

#[async_trait]
impl<Q, R> ICreateUserUseCase for CreateUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, input: CreateUserInput) -> Result<User, CreateUserError> {
        let by_name = self
            .query
            .find_by_username(&input.username)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
        if by_name.is_some() {
            return Err(CreateUserError::UsernameAlreadyExists);
        }

        let by_email = self
            .query
            .find_by_email(&input.email)
            .await
            .map_err(|e| CreateUserError::RepositoryError(e.to_string()))?;
        if by_email.is_some() {
            return Err(CreateUserError::EmailAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(&input.password)
            .await
            .map_err(|e| CreateUserError::HashingFailed(e.to_string()))?;

        self.repository
            .create_user(NewUser {
                username: input.username,
                email: input.email,
                password_hash,
                is_admin: false,
            })
            .await
            .map_err(|e| match e {
                // lost a race with a concurrent registration
                UserRepositoryError::UserAlreadyExists => CreateUserError::EmailAlreadyExists,
                other => CreateUserError::RepositoryError(other.to_string()),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::{UserId, UserProfile};
    use crate::auth::application::ports::outgoing::{
        HashError, ProfilePatch, UserQueryError,
    };
    use crate::tests::support::stubs::{FixedHasher, InMemoryUsers};
    use mockall::mock;

    mock! {
        pub Users {}

        #[async_trait]
        impl UserQuery for Users {
            async fn find_by_id(&self, user_id: UserId) -> Result<Option<User>, UserQueryError>;
            async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserQueryError>;
            async fn find_by_username(&self, username: &str) -> Result<Option<User>, UserQueryError>;
            async fn find_portfolio_owner(&self) -> Result<Option<User>, UserQueryError>;
        }
    }

    mock! {
        pub Repo {}

        #[async_trait]
        impl UserRepository for Repo {
            async fn create_user(&self, user: NewUser) -> Result<User, UserRepositoryError>;
            async fn update_profile(&self, user_id: UserId, patch: ProfilePatch) -> Result<User, UserRepositoryError>;
            async fn update_password(&self, user_id: UserId, new_password_hash: String) -> Result<(), UserRepositoryError>;
        }
    }

    fn existing_user(username: &str, email: &str) -> User {
        User {
            id: UserId::new(),
            username: username.into(),
            email: email.into(),
            password_hash: "hash".into(),
            is_admin: false,
            profile: UserProfile::default(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn input_normalizes_email_and_trims_username() {
        let input = CreateUserInput::new("  alice ", " Alice@X.com ", "pw123456").unwrap();
        assert_eq!(input.username, "alice");
        assert_eq!(input.email, "alice@x.com");
    }

    #[test]
    fn input_rejects_missing_fields() {
        assert!(matches!(
            CreateUserInput::new("", "a@x.com", "pw123456"),
            Err(CreateUserError::InvalidInput(_))
        ));
        assert!(matches!(
            CreateUserInput::new("alice", "not-an-email", "pw123456"),
            Err(CreateUserError::InvalidInput(_))
        ));
        assert!(matches!(
            CreateUserInput::new("alice", "a@x.com", "short"),
            Err(CreateUserError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected_before_hashing() {
        let mut query = MockUsers::new();
        query
            .expect_find_by_username()
            .withf(|name| name == "alice")
            .returning(|_| Ok(Some(existing_user("alice", "alice@x.com"))));

        let mut repo = MockRepo::new();
        repo.expect_create_user().never();

        let use_case = CreateUserUseCase::new(query, repo, Arc::new(FixedHasher::default()));
        let input = CreateUserInput::new("alice", "other@x.com", "pw123456").unwrap();

        assert_eq!(
            use_case.execute(input).await.unwrap_err(),
            CreateUserError::UsernameAlreadyExists
        );
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let mut query = MockUsers::new();
        query.expect_find_by_username().returning(|_| Ok(None));
        query
            .expect_find_by_email()
            .withf(|email| email == "alice@x.com")
            .returning(|_| Ok(Some(existing_user("someone", "alice@x.com"))));

        let mut repo = MockRepo::new();
        repo.expect_create_user().never();

        let use_case = CreateUserUseCase::new(query, repo, Arc::new(FixedHasher::default()));
        let input = CreateUserInput::new("alice", "ALICE@x.com", "pw123456").unwrap();

        assert_eq!(
            use_case.execute(input).await.unwrap_err(),
            CreateUserError::EmailAlreadyExists
        );
    }

    #[tokio::test]
    async fn stores_hash_not_plaintext() {
        let users = InMemoryUsers::default();
        let use_case = CreateUserUseCase::new(
            users.clone(),
            users.clone(),
            Arc::new(FixedHasher::default()),
        );

        let input = CreateUserInput::new("alice", "alice@x.com", "pw123456").unwrap();
        let user = use_case.execute(input).await.unwrap();

        assert_eq!(user.password_hash, "hashed:pw123456");
        assert!(!user.is_admin);
    }

    #[tokio::test]
    async fn hashing_failure_is_reported() {
        let users = InMemoryUsers::default();
        let use_case = CreateUserUseCase::new(
            users.clone(),
            users,
            Arc::new(FixedHasher::failing(HashError::TaskFailed)),
        );

        let input = CreateUserInput::new("alice", "alice@x.com", "pw123456").unwrap();
        assert!(matches!(
            use_case.execute(input).await,
            Err(CreateUserError::HashingFailed(_))
        ));
    }
}
