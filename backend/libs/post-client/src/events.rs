/// Terminal events emitted by the client action layer.
///
/// Every API call resolves to exactly one of these; the consuming store
/// folds them into its state. Failures are uniform: status code plus
/// status text, with no further classification.
use crate::models::{Comment, Like, Post};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq)]
pub enum PostEvent {
    PostsLoaded(Vec<Post>),
    PostLoaded(Post),
    PostAdded(Post),
    PostDeleted(Uuid),
    LikesUpdated { post_id: Uuid, likes: Vec<Like> },
    CommentAdded { post_id: Uuid, comments: Vec<Comment> },
    CommentRemoved { post_id: Uuid, comment_id: Uuid },
    /// Any non-2xx response or transport failure. `status` is 0 when the
    /// request never produced a response.
    RequestFailed { status: u16, msg: String },
}

/// Receiver for terminal events (the UI store boundary)
pub trait EventSink {
    fn dispatch(&self, event: PostEvent);
}

/// Side-channel notifications ("Post Added", "Post Removed", ...),
/// emitted only after a successful mutation.
pub trait AlertSink {
    fn alert(&self, msg: &str);
}

/// No-op alert sink for callers that don't surface notifications
pub struct NoAlerts;

impl AlertSink for NoAlerts {
    fn alert(&self, _msg: &str) {}
}
