use actix_web::{get, web, HttpResponse, Responder, ResponseError};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::media::application::domain::entities::{EntityKind, Image, ImageType};
use crate::media::application::ports::incoming::use_cases::ListImagesError;
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::pagination::{PageQuery, PageResult};
use crate::AppState;

pub const MAX_IMAGES_PER_PAGE: u32 = 100;

#[derive(Serialize, ToSchema)]
pub struct ImageListResponse {
    pub images: Vec<Image>,
    pub total: u64,
    pub pages: u64,
    pub page: u32,
    pub per_page: u32,
}

impl From<PageResult<Image>> for ImageListResponse {
    fn from(page: PageResult<Image>) -> Self {
        Self {
            pages: page.pages(),
            total: page.total,
            page: page.page,
            per_page: page.per_page,
            images: page.items,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct OwnImagesResponse {
    pub images: Vec<Image>,
    pub total: usize,
}

fn list_error_response(err: ListImagesError, expose: bool) -> HttpResponse {
    let ListImagesError::RepositoryError(e) = err;
    error!(error = %e, "Listing images failed");
    ApiResponse::internal_error_detailed(expose, &e)
}

/// Active images of one type, newest first
#[utoipa::path(
    get,
    path = "/api/images/type/{image_type}",
    tag = "images",
    params(("image_type" = String, Path, description = "Image type"), PageQuery),
    responses(
        (status = 200, description = "One page of images", body = inline(SuccessResponse<ImageListResponse>)),
        (status = 400, description = "Unknown image type", body = ErrorResponse),
    )
)]
#[get("/images/type/{image_type}")]
pub async fn list_images_by_type_handler(
    path: web::Path<String>,
    query: web::Query<PageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let image_type = match ImageType::parse(&path) {
        Ok(t) => t,
        Err(e) => return ApiResponse::bad_request("INVALID_IMAGE_TYPE", &e.to_string()),
    };
    let page = query.into_inner().into_request(MAX_IMAGES_PER_PAGE);

    match data.media.list.by_type(image_type, page).await {
        Ok(result) => ApiResponse::success(ImageListResponse::from(result)),
        Err(e) => list_error_response(e, data.expose_error_details),
    }
}

/// Active images attached to a project, blog post or user
#[utoipa::path(
    get,
    path = "/api/images/entity/{kind}/{id}",
    tag = "images",
    params(
        ("kind" = String, Path, description = "project, blog or user"),
        ("id" = String, Path, description = "Entity id"),
        PageQuery
    ),
    responses(
        (status = 200, description = "One page of images", body = inline(SuccessResponse<ImageListResponse>)),
        (status = 400, description = "Unknown kind or malformed id", body = ErrorResponse),
    )
)]
#[get("/images/entity/{kind}/{id}")]
pub async fn list_images_by_entity_handler(
    path: web::Path<(String, String)>,
    query: web::Query<PageQuery>,
    data: web::Data<AppState>,
) -> impl Responder {
    let (kind, id) = path.into_inner();
    let kind = match EntityKind::parse(&kind) {
        Ok(kind) => kind,
        Err(e) => return ApiResponse::bad_request("INVALID_ENTITY_TYPE", &e.to_string()),
    };
    let entity_id = match parse_uuid(&id, "entity id") {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };
    let page = query.into_inner().into_request(MAX_IMAGES_PER_PAGE);

    match data.media.list.by_entity(kind, entity_id, page).await {
        Ok(result) => ApiResponse::success(ImageListResponse::from(result)),
        Err(e) => list_error_response(e, data.expose_error_details),
    }
}

/// Every image the caller uploaded, inactive ones included
#[utoipa::path(
    get,
    path = "/api/auth/profile/images",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Caller's images", body = inline(SuccessResponse<OwnImagesResponse>)),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
    )
)]
#[get("/auth/profile/images")]
pub async fn list_own_images_handler(
    user: AuthenticatedUser,
    data: web::Data<AppState>,
) -> impl Responder {
    match data.media.list.by_owner(user.user_id).await {
        Ok(images) => ApiResponse::success(OwnImagesResponse {
            total: images.len(),
            images,
        }),
        Err(e) => list_error_response(e, data.expose_error_details),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::ports::outgoing::TokenProvider;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{test_token_data, test_token_service};
    use crate::tests::support::media_fakes::{media_use_cases, sample_image, InMemoryImages, MemoryStorage};
    use actix_web::{test, App};
    use uuid::Uuid;

    fn seeded() -> InMemoryImages {
        let images = InMemoryImages::default();
        for _ in 0..3 {
            images.insert(sample_image());
        }
        let mut hidden = sample_image();
        hidden.is_active = false;
        images.insert(hidden);
        images
    }

    #[actix_web::test]
    async fn lists_active_images_of_a_type_with_paging() {
        let images = seeded();
        let state = TestAppStateBuilder::default()
            .with_media(media_use_cases(&images, &MemoryStorage::default()))
            .build();
        let app =
            test::init_service(App::new().app_data(state).service(list_images_by_type_handler)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/images/type/general?page=1&per_page=2")
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 3);
        assert_eq!(body["data"]["pages"], 2);
        assert_eq!(body["data"]["images"].as_array().unwrap().len(), 2);
    }

    #[actix_web::test]
    async fn unknown_type_is_bad_request() {
        let state = TestAppStateBuilder::default().build();
        let app =
            test::init_service(App::new().app_data(state).service(list_images_by_type_handler)).await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get().uri("/images/type/banner").to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn lists_images_of_a_project() {
        let images = InMemoryImages::default();
        let project = Uuid::new_v4();
        let mut attached = sample_image();
        attached.image_type = ImageType::Project;
        attached.project_id = Some(project);
        images.insert(attached);
        images.insert(sample_image());

        let state = TestAppStateBuilder::default()
            .with_media(media_use_cases(&images, &MemoryStorage::default()))
            .build();
        let app = test::init_service(
            App::new().app_data(state).service(list_images_by_entity_handler),
        )
        .await;

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/images/entity/project/{project}"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 1);

        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri(&format!("/images/entity/album/{project}"))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 400);
    }

    #[actix_web::test]
    async fn own_images_include_inactive_ones() {
        let images = InMemoryImages::default();
        let owner = sample_image();
        let mut retired = sample_image();
        retired.user_id = owner.user_id;
        retired.is_active = false;
        images.insert(owner.clone());
        images.insert(retired);
        images.insert(sample_image());

        let state = TestAppStateBuilder::default()
            .with_media(media_use_cases(&images, &MemoryStorage::default()))
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(list_own_images_handler),
        )
        .await;

        let token = test_token_service().issue_access(owner.user_id).unwrap();
        let resp = test::call_service(
            &app,
            test::TestRequest::get()
                .uri("/auth/profile/images")
                .insert_header(("Authorization", format!("Bearer {token}")))
                .to_request(),
        )
        .await;
        assert_eq!(resp.status(), 200);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["data"]["total"], 2);
    }
}
