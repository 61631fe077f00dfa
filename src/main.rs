pub mod api;
pub mod config;
pub mod health;
pub mod modules;
pub mod shared;

pub use modules::{
    auth, blog, contact, content, education, experience, media, portfolio, project, skill,
};

use std::sync::Arc;
use std::time::Duration;

use actix_web::{web, App, HttpServer};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::openapi::ApiDoc;
use crate::auth::adapter::outgoing::jwt::JwtTokenService;
use crate::auth::adapter::outgoing::security::argon2_hasher::Argon2Hasher;
use crate::auth::adapter::outgoing::user_query_postgres::UserQueryPostgres;
use crate::auth::adapter::outgoing::user_repository_postgres::UserRepositoryPostgres;
use crate::auth::application::auth_use_cases::AuthUseCases;
use crate::auth::application::ports::outgoing::{PasswordHasher, TokenProvider};
use crate::auth::application::use_cases::{
    authorize_admin::AuthorizeAdminService, change_password::ChangePasswordService,
    create_user::CreateUserUseCase, fetch_profile::FetchProfileService,
    login_user::LoginUserUseCase, refresh_token::RefreshTokenUseCase,
    update_profile::UpdateProfileService,
};
use crate::config::AppConfig;
use crate::content::ContentRepositories;
use crate::media::adapter::outgoing::db::{ImageQueryPostgres, ImageRepositoryPostgres};
use crate::media::adapter::outgoing::storage::LocalImageStorage;
use crate::media::application::media_use_cases::MediaUseCases;
use crate::media::application::ports::incoming::services::{
    DeleteImageService, ImageReadService, UpdateImageService, UploadImageService,
};
use crate::media::application::ports::outgoing::ImageStorage;
use crate::shared::api::custom_json_config;

#[cfg(test)]
mod tests;

#[derive(Clone)]
pub struct AppState {
    pub auth: AuthUseCases,
    pub media: MediaUseCases,
    pub content: ContentRepositories,
    pub upload_max_bytes: u64,
    pub expose_error_details: bool,
}

fn load_env() {
    let env = std::env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());

    // .env.{environment} first, then plain .env
    if dotenvy::from_filename(format!(".env.{env}")).is_err() {
        dotenvy::dotenv().ok();
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn invalid_config(e: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::new(std::io::ErrorKind::InvalidInput, e.to_string())
}

#[actix_web::main]
#[cfg(not(tarpaulin_include))]
async fn start() -> std::io::Result<()> {
    load_env();
    init_tracing();

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "Invalid configuration");
        invalid_config(e)
    })?;
    info!(
        environment = %config.environment,
        api_prefix = %config.api_prefix,
        upload_root = %config.upload.upload_root.display(),
        "Starting portfolio API"
    );

    let mut opt = ConnectOptions::new(config.database_url.clone());
    opt.max_connections(config.db_max_connections)
        .min_connections(1)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(5))
        .idle_timeout(Duration::from_secs(300))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(false);

    let db = Arc::new(Database::connect(opt).await.map_err(|e| {
        error!(error = %e, "Failed to connect to database");
        std::io::Error::new(std::io::ErrorKind::ConnectionRefused, e.to_string())
    })?);

    Migrator::up(db.as_ref(), None).await.map_err(|e| {
        error!(error = %e, "Failed to apply migrations");
        std::io::Error::new(std::io::ErrorKind::Other, e.to_string())
    })?;
    info!("Database schema is up to date");

    // Auth
    let jwt_service = JwtTokenService::new(config.jwt.clone());
    let hasher: Arc<dyn PasswordHasher> =
        Arc::new(Argon2Hasher::new(config.argon2).map_err(invalid_config)?);
    let tokens: Arc<dyn TokenProvider> = Arc::new(jwt_service.clone());

    let user_query = UserQueryPostgres::new(db.clone());
    let user_repo = UserRepositoryPostgres::new(db.clone());
    let profiles = Arc::new(FetchProfileService::new(user_query.clone()));

    let auth = AuthUseCases {
        register: Arc::new(CreateUserUseCase::new(
            user_query.clone(),
            user_repo.clone(),
            hasher.clone(),
        )),
        login: Arc::new(LoginUserUseCase::new(
            user_query.clone(),
            hasher.clone(),
            tokens.clone(),
        )),
        refresh: Arc::new(RefreshTokenUseCase::new(tokens)),
        fetch_profile: profiles.clone(),
        public_profile: profiles,
        update_profile: Arc::new(UpdateProfileService::new(user_repo.clone())),
        change_password: Arc::new(ChangePasswordService::new(
            user_query.clone(),
            user_repo,
            hasher,
        )),
        authorize_admin: Arc::new(AuthorizeAdminService::new(user_query)),
    };

    // Media
    let image_repo = ImageRepositoryPostgres::new(db.clone());
    let image_query = ImageQueryPostgres::new(db.clone());
    let storage: Arc<dyn ImageStorage> = Arc::new(LocalImageStorage::new(&config.upload));
    let image_reads = Arc::new(ImageReadService::new(image_query.clone()));
    let image_deletes = Arc::new(DeleteImageService::new(
        image_repo.clone(),
        image_query.clone(),
        storage.clone(),
    ));

    let media = MediaUseCases {
        upload: Arc::new(UploadImageService::new(
            image_repo.clone(),
            image_query.clone(),
            storage,
            config.upload.clone(),
        )),
        get: image_reads.clone(),
        list: image_reads.clone(),
        stats: image_reads,
        soft_delete: image_deletes.clone(),
        hard_delete: image_deletes.clone(),
        delete_own: image_deletes,
        update: Arc::new(UpdateImageService::new(
            image_repo,
            image_query,
            config.upload.max_images_per_entity,
        )),
    };

    let state = web::Data::new(AppState {
        auth,
        media,
        content: ContentRepositories::postgres(db.clone()),
        upload_max_bytes: config.upload.max_file_size_bytes,
        expose_error_details: config.expose_error_details,
    });

    let token_provider: Arc<dyn TokenProvider + Send + Sync> = Arc::new(jwt_service);
    let api_prefix = config.api_prefix.clone();
    let bind_address = config.bind_address();
    info!(address = %bind_address, "HTTP server listening");

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(web::Data::new(Arc::clone(&token_provider)))
            .app_data(web::Data::new(Arc::clone(&db)))
            .app_data(custom_json_config())
            .service(crate::health::health)
            .service(crate::health::readiness)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}")
                    .url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
            .service(web::scope(&api_prefix).configure(init_routes))
    })
    .bind(bind_address)?
    .run()
    .await
}

#[cfg(not(tarpaulin_include))]
fn init_routes(cfg: &mut web::ServiceConfig) {
    crate::auth::adapter::incoming::web::routes::configure(cfg);
    crate::media::adapter::incoming::web::routes::configure(cfg);
    crate::content::configure(cfg);
    crate::portfolio::adapter::incoming::web::routes::configure(cfg);
}

#[cfg(not(tarpaulin_include))]
fn main() {
    if let Err(e) = start() {
        eprintln!("Error starting app: {e}");
        std::process::exit(1);
    }
}
