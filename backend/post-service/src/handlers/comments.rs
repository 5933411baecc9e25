/// Comment handlers - HTTP endpoints for comment operations
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a comment
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Comment on a post
/// POST /api/posts/comment/{id}
///
/// Unlike the post routes, a malformed or unknown post id here is a
/// storage failure (500), not a 404 - this route has no not-found
/// contract.
pub async fn create_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<String>,
    req: web::Json<CreateCommentRequest>,
) -> Result<HttpResponse> {
    let body = CreateCommentRequest {
        text: req.text.trim().to_string(),
    };
    if body.validate().is_err() {
        return Err(AppError::ValidationError("Text is required".to_string()));
    }

    let post_id = Uuid::parse_str(&path)
        .map_err(|_| AppError::Internal(format!("malformed post id: {}", path)))?;

    let service = PostService::new((**pool).clone());
    let comments = service.add_comment(post_id, user_id.0, &body.text).await?;

    Ok(HttpResponse::Ok().json(comments))
}

/// Delete a comment (comment author only)
/// DELETE /api/posts/comment/{id}/{comment_id}
pub async fn delete_comment(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<(String, String)>,
) -> Result<HttpResponse> {
    let (raw_post_id, raw_comment_id) = path.into_inner();

    let post_id = crate::handlers::posts::parse_post_id(&raw_post_id)?;
    let comment_id = Uuid::parse_str(&raw_comment_id).map_err(|_| {
        AppError::NotFound("Comment with the given id doesn't exist".to_string())
    })?;

    let service = PostService::new((**pool).clone());
    let comments = service.delete_comment(post_id, comment_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(comments))
}
