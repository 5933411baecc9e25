use async_trait::async_trait;

use crate::error::Result;
use crate::models::AuthorProfile;
use sqlx::PgPool;
use uuid::Uuid;

/// Author lookup seam
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_author_profile(&self, user_id: Uuid) -> Result<Option<AuthorProfile>>;
}

/// Read-only repository over the user store.
///
/// This service never writes users and never reads the password hash.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for UserRepository {
    /// Fetch the author profile used for denormalized snapshots
    async fn find_author_profile(&self, user_id: Uuid) -> Result<Option<AuthorProfile>> {
        let profile = sqlx::query_as::<_, AuthorProfile>(
            r#"
            SELECT id, name, avatar
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(profile)
    }
}
