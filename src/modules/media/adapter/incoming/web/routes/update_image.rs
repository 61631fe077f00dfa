use actix_web::{put, web, HttpResponse, Responder, ResponseError};
use serde::Deserialize;
use tracing::error;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::media::application::domain::entities::{Image, ImageType};
use crate::media::application::ports::incoming::use_cases::{UpdateImageCommand, UpdateImageError};
use crate::media::application::ports::outgoing::ImageMetadataPatch;
use crate::shared::api::{parse_uuid, ApiResponse};
use crate::shared::patch::PatchField;
use crate::AppState;

/// Omitted fields stay as they are; `null` detaches the image from a project or blog.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateImageRequest {
    #[schema(example = "project")]
    pub image_type: Option<String>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub project_id: PatchField<Uuid>,
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub blog_id: PatchField<Uuid>,
}

fn update_error_response(err: UpdateImageError, expose: bool) -> HttpResponse {
    match err {
        UpdateImageError::NotFound => ApiResponse::not_found("IMAGE_NOT_FOUND", "Image not found"),
        UpdateImageError::Forbidden => ApiResponse::forbidden("FORBIDDEN", "Admin access required"),
        UpdateImageError::LimitExceeded { image_type, max } => ApiResponse::bad_request(
            "LIMIT_EXCEEDED",
            &format!("Maximum {max} images allowed per {image_type}"),
        ),
        UpdateImageError::RepositoryError(ref e) => {
            error!(error = %e, "Updating image failed");
            ApiResponse::internal_error_detailed(expose, e)
        }
    }
}

/// Change an image's type or owning entity
#[utoipa::path(
    put,
    path = "/api/images/{id}",
    tag = "images",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Image id")),
    request_body = UpdateImageRequest,
    responses(
        (status = 200, description = "Updated image", body = inline(SuccessResponse<Image>)),
        (status = 400, description = "Invalid id or image type, or the target entity is full", body = ErrorResponse),
        (status = 401, description = "Not authenticated", body = ErrorResponse),
        (status = 403, description = "Admin access required", body = ErrorResponse),
        (status = 404, description = "Image not found", body = ErrorResponse),
    )
)]
#[put("/images/{id}")]
pub async fn update_image_handler(
    admin: AdminUser,
    path: web::Path<String>,
    body: web::Json<UpdateImageRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let image_id = match parse_uuid(&path, "image id") {
        Ok(id) => id,
        Err(e) => return e.error_response(),
    };

    let body = body.into_inner();
    let image_type = match body.image_type.as_deref().map(ImageType::parse).transpose() {
        Ok(t) => t,
        Err(e) => return ApiResponse::bad_request("INVALID_IMAGE_TYPE", &e.to_string()),
    };

    let command = UpdateImageCommand {
        requester: admin.requester(),
        image_id,
        patch: ImageMetadataPatch {
            image_type,
            project_id: body.project_id,
            blog_id: body.blog_id,
        },
    };

    match data.media.update.execute(command).await {
        Ok(image) => ApiResponse::success(image),
        Err(e) => update_error_response(e, data.expose_error_details),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::application::domain::entities::UserId;
    use crate::auth::application::ports::outgoing::TokenProvider;
    use crate::tests::support::app_state_builder::TestAppStateBuilder;
    use crate::tests::support::auth_helper::{test_token_data, test_token_service};
    use crate::tests::support::media_fakes::{media_use_cases, sample_image, InMemoryImages, MemoryStorage};
    use crate::tests::support::stubs::StubAuthorizeAdmin;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn retypes_and_detaches() {
        let images = InMemoryImages::default();
        let mut image = sample_image();
        image.blog_id = Some(Uuid::new_v4());
        images.insert(image.clone());

        let state = TestAppStateBuilder::default()
            .with_media(media_use_cases(&images, &MemoryStorage::default()))
            .with_authorize_admin(StubAuthorizeAdmin::allowed())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(update_image_handler),
        )
        .await;

        let token = test_token_service().issue_access(UserId::new()).unwrap();
        let req = test::TestRequest::put()
            .uri(&format!("/images/{}", image.id))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "image_type": "skill", "blog_id": null }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 200);

        let stored = images.get(image.id).unwrap();
        assert_eq!(stored.image_type, ImageType::Skill);
        assert_eq!(stored.blog_id, None);
    }

    #[actix_web::test]
    async fn refuses_to_overfill_a_project() {
        use crate::media::application::domain::policies::upload_policy::UploadPolicy;

        let images = InMemoryImages::default();
        let project = Uuid::new_v4();
        for _ in 0..UploadPolicy::MAX_IMAGES_PER_ENTITY {
            let mut full = sample_image();
            full.image_type = ImageType::Project;
            full.project_id = Some(project);
            images.insert(full);
        }
        let general = sample_image();
        images.insert(general.clone());

        let state = TestAppStateBuilder::default()
            .with_media(media_use_cases(&images, &MemoryStorage::default()))
            .with_authorize_admin(StubAuthorizeAdmin::allowed())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(update_image_handler),
        )
        .await;

        let token = test_token_service().issue_access(UserId::new()).unwrap();
        let req = test::TestRequest::put()
            .uri(&format!("/images/{}", general.id))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "image_type": "project", "project_id": project }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "LIMIT_EXCEEDED");
        assert_eq!(images.get(general.id).unwrap().project_id, None);
    }

    #[actix_web::test]
    async fn rejects_unknown_image_type() {
        let state = TestAppStateBuilder::default()
            .with_authorize_admin(StubAuthorizeAdmin::allowed())
            .build();
        let app = test::init_service(
            App::new()
                .app_data(state)
                .app_data(test_token_data())
                .service(update_image_handler),
        )
        .await;

        let token = test_token_service().issue_access(UserId::new()).unwrap();
        let req = test::TestRequest::put()
            .uri(&format!("/images/{}", Uuid::new_v4()))
            .insert_header(("Authorization", format!("Bearer {token}")))
            .set_json(json!({ "image_type": "banner" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), 400);
    }
}
