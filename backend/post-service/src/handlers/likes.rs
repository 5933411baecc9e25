/// Like handlers - HTTP endpoints for like operations
///
/// Both endpoints respond with the post's updated like list so the
/// client can swap its copy wholesale.
use crate::error::Result;
use crate::handlers::posts::parse_post_id;
use crate::middleware::UserId;
use crate::services::PostService;
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Like a post
/// PUT /api/posts/like/{id}
pub async fn like_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let service = PostService::new((**pool).clone());
    let likes = service.add_like(post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(likes))
}

/// Remove the caller's like from a post
/// PUT /api/posts/unlike/{id}
pub async fn unlike_post(
    pool: web::Data<PgPool>,
    user_id: UserId,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    let post_id = parse_post_id(&path)?;

    let service = PostService::new((**pool).clone());
    let likes = service.remove_like(post_id, user_id.0).await?;

    Ok(HttpResponse::Ok().json(likes))
}
