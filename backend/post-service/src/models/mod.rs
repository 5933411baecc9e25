/// Data models for post-service
///
/// A `Post` is serialized for the API together with its owned child
/// collections (likes and comments), both newest-first. The children are
/// stored in their own tables but live and die with the post.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post row - author name/avatar are denormalized snapshots taken at
/// creation time and never synced with later profile edits.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Like entity - at most one per (post, user) pair
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Like {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Comment entity - carries the same author snapshot as posts
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub author_name: String,
    pub author_avatar: Option<String>,
    pub text: String,
    pub created_at: DateTime<Utc>,
}

/// Author profile as read from the user store. The password hash column
/// is never selected into this struct.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AuthorProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar: Option<String>,
}

/// API representation of a post: the row plus its embedded children,
/// both ordered newest-first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub post: Post,
    pub likes: Vec<Like>,
    pub comments: Vec<Comment>,
}

impl PostDetail {
    pub fn new(post: Post, likes: Vec<Like>, comments: Vec<Comment>) -> Self {
        Self {
            post,
            likes,
            comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_post() -> Post {
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            author_name: "jane".to_string(),
            author_avatar: None,
            text: "hello".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn post_detail_flattens_post_fields() {
        let post = sample_post();
        let detail = PostDetail::new(post.clone(), vec![], vec![]);
        let json = serde_json::to_value(&detail).unwrap();

        assert_eq!(json["id"], serde_json::json!(post.id));
        assert_eq!(json["text"], "hello");
        assert_eq!(json["likes"], serde_json::json!([]));
        assert_eq!(json["comments"], serde_json::json!([]));
    }

    #[test]
    fn author_profile_has_no_password_field() {
        let profile = AuthorProfile {
            id: Uuid::new_v4(),
            name: "jane".to_string(),
            avatar: Some("avatar.png".to_string()),
        };
        let json = serde_json::to_value(&profile).unwrap();
        let keys: Vec<&String> = json.as_object().unwrap().keys().collect();
        assert_eq!(keys, ["avatar", "id", "name"]);
    }
}
