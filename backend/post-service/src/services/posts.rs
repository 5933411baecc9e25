/// Post service - post, like, and comment operations
///
/// Each operation resolves to at most a handful of repository calls; the
/// database is the only shared state. Repositories are reached through
/// the store traits in `db`, so the branch logic here is testable
/// without a live pool.
use crate::db::{
    CommentRepository, CommentStore, LikeRepository, LikeStore, PostRepository, PostStore,
    UserRepository, UserStore,
};
use crate::error::{AppError, Result};
use crate::middleware::{check_comment_deletion, check_post_deletion};
use crate::models::{Comment, Like, Post, PostDetail};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

const POST_NOT_FOUND: &str = "No post with the given id is found";
const COMMENT_NOT_FOUND: &str = "Comment with the given id doesn't exist";

pub struct PostService {
    posts: Box<dyn PostStore>,
    likes: Box<dyn LikeStore>,
    comments: Box<dyn CommentStore>,
    users: Box<dyn UserStore>,
}

impl PostService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            posts: Box::new(PostRepository::new(pool.clone())),
            likes: Box::new(LikeRepository::new(pool.clone())),
            comments: Box::new(CommentRepository::new(pool.clone())),
            users: Box::new(UserRepository::new(pool)),
        }
    }

    #[cfg(test)]
    fn with_stores(
        posts: Box<dyn PostStore>,
        likes: Box<dyn LikeStore>,
        comments: Box<dyn CommentStore>,
        users: Box<dyn UserStore>,
    ) -> Self {
        Self {
            posts,
            likes,
            comments,
            users,
        }
    }

    /// Create a post, snapshotting the author's name and avatar
    pub async fn create_post(&self, user_id: Uuid, text: &str) -> Result<PostDetail> {
        let author = self
            .users
            .find_author_profile(user_id)
            .await?
            .ok_or_else(|| AppError::Internal(format!("author profile missing: {}", user_id)))?;

        let post = self.posts.create_post(user_id, &author, text).await?;
        Ok(PostDetail::new(post, Vec::new(), Vec::new()))
    }

    /// All posts newest-first, each hydrated with its likes and comments
    pub async fn list_posts(&self) -> Result<Vec<PostDetail>> {
        let posts = self.posts.list_posts().await?;
        let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();

        let mut likes = index_by_post(self.likes.get_likes_for_posts(&post_ids).await?, |l| {
            l.post_id
        });
        let mut comments =
            index_by_post(self.comments.get_comments_for_posts(&post_ids).await?, |c| {
                c.post_id
            });

        Ok(posts
            .into_iter()
            .map(|post| {
                let post_likes = likes.remove(&post.id).unwrap_or_default();
                let post_comments = comments.remove(&post.id).unwrap_or_default();
                PostDetail::new(post, post_likes, post_comments)
            })
            .collect())
    }

    /// Get a post by ID with its children
    pub async fn get_post(&self, post_id: Uuid) -> Result<Option<PostDetail>> {
        let post = match self.posts.find_post(post_id).await? {
            Some(post) => post,
            None => return Ok(None),
        };

        let likes = self.likes.get_post_likes(post_id).await?;
        let comments = self.comments.get_post_comments(post_id).await?;
        Ok(Some(PostDetail::new(post, likes, comments)))
    }

    /// Delete a post and its embedded children. Author only.
    pub async fn delete_post(&self, post_id: Uuid, caller: Uuid) -> Result<()> {
        let post = self.require_post(post_id).await?;
        check_post_deletion(caller, post.user_id)?;

        self.posts.delete_post(post_id).await?;
        Ok(())
    }

    /// Like a post. Returns the updated like list, newest first.
    pub async fn add_like(&self, post_id: Uuid, caller: Uuid) -> Result<Vec<Like>> {
        self.require_post(post_id).await?;

        if !self.likes.add_like(post_id, caller).await? {
            return Err(AppError::BadRequest("Post already liked by you".to_string()));
        }

        self.likes.get_post_likes(post_id).await
    }

    /// Remove the caller's like. Returns the updated like list.
    pub async fn remove_like(&self, post_id: Uuid, caller: Uuid) -> Result<Vec<Like>> {
        self.require_post(post_id).await?;

        if !self.likes.remove_like(post_id, caller).await? {
            return Err(AppError::BadRequest(
                "Post has not yet been liked".to_string(),
            ));
        }

        self.likes.get_post_likes(post_id).await
    }

    /// Comment on a post. Returns the updated comment list, newest first.
    ///
    /// There is deliberately no post existence pre-check here: a missing
    /// post fails the foreign key and surfaces as a storage error.
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        caller: Uuid,
        text: &str,
    ) -> Result<Vec<Comment>> {
        let author = self
            .users
            .find_author_profile(caller)
            .await?
            .ok_or_else(|| AppError::Internal(format!("author profile missing: {}", caller)))?;

        self.comments
            .create_comment(post_id, caller, &author, text)
            .await?;

        self.comments.get_post_comments(post_id).await
    }

    /// Delete a comment by id. Comment author only.
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        caller: Uuid,
    ) -> Result<Vec<Comment>> {
        let comment = self
            .comments
            .find_comment(post_id, comment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(COMMENT_NOT_FOUND.to_string()))?;

        check_comment_deletion(caller, comment.user_id)?;

        self.comments.delete_comment(comment_id).await?;
        self.comments.get_post_comments(post_id).await
    }

    async fn require_post(&self, post_id: Uuid) -> Result<Post> {
        self.posts
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound(POST_NOT_FOUND.to_string()))
    }
}

/// Group child rows by post id, preserving their query order within
/// each bucket.
fn index_by_post<T>(items: Vec<T>, post_id: impl Fn(&T) -> Uuid) -> HashMap<Uuid, Vec<T>> {
    let mut map: HashMap<Uuid, Vec<T>> = HashMap::new();
    for item in items {
        map.entry(post_id(&item)).or_default().push(item);
    }
    map
}
