/// Route registration
///
/// Every route sits under /api/posts and behind the JWT middleware;
/// an unauthenticated request never reaches a handler.
use actix_web::web;

use crate::handlers;
use crate::middleware::JwtAuthMiddleware;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/posts")
            .wrap(JwtAuthMiddleware)
            .route("", web::post().to(handlers::create_post))
            .route("", web::get().to(handlers::get_posts))
            .route("/like/{id}", web::put().to(handlers::like_post))
            .route("/unlike/{id}", web::put().to(handlers::unlike_post))
            .route("/comment/{id}", web::post().to(handlers::create_comment))
            .route(
                "/comment/{id}/{comment_id}",
                web::delete().to(handlers::delete_comment),
            )
            .route("/{id}", web::get().to(handlers::get_post))
            .route("/{id}", web::delete().to(handlers::delete_post)),
    );
}
