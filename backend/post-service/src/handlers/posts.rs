/// Post handlers - HTTP endpoints for post operations
use crate::error::{AppError, Result};
use crate::middleware::UserId;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// Request body for creating a post
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, message = "Text is required"))]
    pub text: String,
}

/// Parse a post id from the path. A malformed id is indistinguishable
/// from a missing post as far as the caller is concerned.
pub(crate) fn parse_post_id(raw: &str) -> Result<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::NotFound("No post with the given id is found".to_string()))
}

/// Create a new post
/// POST /api/posts
pub async fn create_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    req: web::Json<CreatePostRequest>,
) -> Result<HttpResponse> {
    let body = CreatePostRequest {
        text: req.text.trim().to_string(),
    };
    if body.validate().is_err() {
        return Err(AppError::ValidationError("Text is required".to_string()));
    }

    let service = PostService::new((**pool).clone());
    let post = service.create_post(user_id.0, &body.text).await?;

    Ok(HttpResponse::Ok().json(post))
}

/// Get all posts, newest first
/// GET /api/posts
pub async fn get_posts(pool: web::Data<PgPool>, _user_id: UserId) -> Result<HttpResponse> {
    let service = PostService::new((**pool).clone());
    let posts = service.list_posts().await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// Get a post by ID
/// GET /api/posts/{id}
pub async fn get_post(
    pool: web::Data<PgPool>,
    _user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let service = PostService::new((**pool).clone());
    match service.get_post(post_id).await? {
        Some(post) => Ok(HttpResponse::Ok().json(post)),
        None => Err(AppError::NotFound(
            "No post with the given id is found".to_string(),
        )),
    }
}

/// Delete a post (author only)
/// DELETE /api/posts/{id}
pub async fn delete_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let service = PostService::new((**pool).clone());
    service.delete_post(post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "msg": "Post removed" })))
}
