use async_trait::async_trait;

use crate::error::Result;
use crate::models::Like;
use sqlx::PgPool;
use uuid::Uuid;

/// Like persistence seam
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LikeStore: Send + Sync {
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool>;
    async fn get_post_likes(&self, post_id: Uuid) -> Result<Vec<Like>>;
    async fn get_likes_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Like>>;
}

/// Repository for Like operations
#[derive(Clone)]
pub struct LikeRepository {
    pool: PgPool,
}

impl LikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeStore for LikeRepository {
    /// Insert a like. Returns false when the (post, user) pair already
    /// has one; the unique index makes the check race-free.
    async fn add_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            INSERT INTO likes (post_id, user_id)
            VALUES ($1, $2)
            ON CONFLICT (post_id, user_id) DO NOTHING
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Remove a like. Returns false when the caller never liked the post.
    async fn remove_like(&self, post_id: Uuid, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM likes
            WHERE post_id = $1 AND user_id = $2
            "#,
        )
        .bind(post_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Likes for a post, newest first
    async fn get_post_likes(&self, post_id: Uuid) -> Result<Vec<Like>> {
        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, post_id, user_id, created_at
            FROM likes
            WHERE post_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }

    /// Likes for a batch of posts in one query, newest first per post
    async fn get_likes_for_posts(&self, post_ids: &[Uuid]) -> Result<Vec<Like>> {
        if post_ids.is_empty() {
            return Ok(Vec::new());
        }

        let likes = sqlx::query_as::<_, Like>(
            r#"
            SELECT id, post_id, user_id, created_at
            FROM likes
            WHERE post_id = ANY($1)
            ORDER BY created_at DESC
            "#,
        )
        .bind(post_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(likes)
    }
}
