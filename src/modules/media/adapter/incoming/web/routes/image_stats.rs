use actix_web::{get, web, Responder};
use tracing::error;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::media::application::domain::entities::ImageStats;
use crate::media::application::ports::incoming::use_cases::ImageStatsError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Counts and total size of active images
#[utoipa::path(
    get,
    path = "/api/images/stats",
    tag = "images",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Statistics", body = inline(SuccessResponse<ImageStats>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
    )
)]
#[get("/images/stats")]
pub async fn image_stats_handler(admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.media.stats.execute(admin.requester()).await {
        Ok(stats) => ApiResponse::success(stats),
        Err(ImageStatsError::Forbidden) => {
            ApiResponse::forbidden("FORBIDDEN", "Admin access required")
        }
        Err(ImageStatsError::RepositoryError(e)) => {
            error!(error = %e, "Computing image statistics failed");
            ApiResponse::internal_error_detailed(data.expose_error_details, &e)
        }
    }
}
