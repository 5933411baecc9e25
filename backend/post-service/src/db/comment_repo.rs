use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthorProfile, Comment};
use sqlx::PgPool;
use uuid::Uuid;

/// Comment persistence seam
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CommentStore: Send + Sync {
    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        author: &AuthorProfile,
        text: &str,
    ) -> Result<Comment>;
    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Option<Comment>>;
    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool>;
    async fn get_post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>>;
    async fn get_comments_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Comment>>;
}

/// Repository for Comment operations
#[derive(Clone)]
pub struct CommentRepository {
    pool: PgPool,
}

impl CommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentStore for CommentRepository {
    /// Create a new comment carrying the author snapshot.
    ///
    /// The post_id foreign key is the existence check: commenting on a
    /// missing post surfaces as a storage error, not a 404.
    async fn create_comment(
        &self,
        post_id: Uuid,
        user_id: Uuid,
        author: &AuthorProfile,
        text: &str,
    ) -> Result<Comment> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (post_id, user_id, author_name, author_avatar, text)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, post_id, user_id, author_name, author_avatar, text, created_at
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .bind(&author.name)
        .bind(&author.avatar)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Get a comment by id, scoped to its post
    async fn find_comment(&self, post_id: Uuid, comment_id: Uuid) -> Result<Option<Comment>> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, author_name, author_avatar, text, created_at
            FROM comments
            WHERE id = $1 AND post_id = $2
            "#,
        )
        .bind(comment_id)
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(comment)
    }

    /// Delete a comment by its own id, never by position
    async fn delete_comment(&self, comment_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(comment_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Comments for a post, newest first
    async fn get_post_comments(&self, post_id: Uuid) -> Result<Vec<Comment>> {
        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, author_name, author_avatar, text, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    /// Comments for a batch of posts in one query, newest first per post
    async fn get_comments_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Comment>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let comments = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, post_id, user_id, author_name, author_avatar, text, created_at
            FROM comments
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }
}
