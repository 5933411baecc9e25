use async_trait::async_trait;

use crate::error::Result;
use crate::models::{AuthorProfile, Post};
use sqlx::PgPool;
use uuid::Uuid;

/// Post persistence seam. `PostRepository` is the Postgres
/// implementation; the service layer only sees this trait.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostStore: Send + Sync {
    async fn create_post(
        &self,
        user_id: Uuid,
        author: &AuthorProfile,
        text: &str,
    ) -> Result<Post>;
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>>;
    async fn list_posts(&self) -> Result<Vec<Post>>;
    async fn delete_post(&self, post_id: Uuid) -> Result<bool>;
}

/// Repository for Post operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PostStore for PostRepository {
    /// Create a new post with the author snapshot taken at creation time
    async fn create_post(
        &self,
        user_id: Uuid,
        author: &AuthorProfile,
        text: &str,
    ) -> Result<Post> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, author_name, author_avatar, text)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, author_name, author_avatar, text, created_at
            "#,
        )
        .bind(user_id)
        .bind(&author.name)
        .bind(&author.avatar)
        .bind(text)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    /// Get a post by ID
    async fn find_post(&self, post_id: Uuid) -> Result<Option<Post>> {
        let post = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, author_name, author_avatar, text, created_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(post)
    }

    /// All posts, newest first
    async fn list_posts(&self) -> Result<Vec<Post>> {
        let posts = sqlx::query_as::<_, Post>(
            r#"
            SELECT id, user_id, author_name, author_avatar, text, created_at
            FROM posts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(posts)
    }

    /// Delete a post. Likes and comments cascade with the row.
    async fn delete_post(&self, post_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM posts
            WHERE id = $1
            "#,
        )
        .bind(post_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
