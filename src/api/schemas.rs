use serde::Serialize;
use utoipa::ToSchema;

/// Standard success response wrapper
#[derive(Serialize, ToSchema)]
#[serde(bound = "T: Serialize")]
pub struct SuccessResponse<T> {
    /// Always true for successful responses
    #[schema(example = true)]
    pub success: bool,
    /// Response data
    pub data: T,
}

/// Standard error response wrapper
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Always false for error responses
    #[schema(example = false)]
    pub success: bool,

    /// Human-readable error message
    #[schema(example = "Image not found")]
    pub error: String,

    /// Error code for programmatic handling
    #[schema(example = "IMAGE_NOT_FOUND")]
    pub code: String,

    /// Underlying cause, only present when the deployment exposes error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}
