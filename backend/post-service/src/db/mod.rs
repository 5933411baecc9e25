/// Database access layer
///
/// One repository per entity, each a thin wrapper over a `PgPool`.
pub mod comment_repo;
pub mod like_repo;
pub mod post_repo;
pub mod user_repo;

pub use comment_repo::{CommentRepository, CommentStore};
pub use like_repo::{LikeRepository, LikeStore};
pub use post_repo::{PostRepository, PostStore};
pub use user_repo::{UserRepository, UserStore};

#[cfg(test)]
pub use comment_repo::MockCommentStore;
#[cfg(test)]
pub use like_repo::MockLikeStore;
#[cfg(test)]
pub use post_repo::MockPostStore;
#[cfg(test)]
pub use user_repo::MockUserStore;
