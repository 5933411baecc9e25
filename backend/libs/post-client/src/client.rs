/// HTTP client for the posts API
///
/// Thin wrapper over `reqwest::Client`: no retries, no deduplication,
/// default timeouts. Each method sends one request and dispatches one
/// event.
use crate::events::{AlertSink, EventSink, PostEvent};
use crate::models::{Comment, Like, Post};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use uuid::Uuid;

pub struct PostsClient {
    http: Client,
    base_url: String,
    token: String,
}

impl PostsClient {
    pub fn new(base_url: &str, token: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    fn authed(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.bearer_auth(&self.token)
    }

    /// Load all posts
    pub async fn get_posts(&self, events: &dyn EventSink) {
        let request = self.authed(self.http.get(self.endpoint("api/posts")));
        let event = Self::resolve(request, PostEvent::PostsLoaded).await;
        events.dispatch(event);
    }

    /// Load a single post
    pub async fn get_post(&self, post_id: Uuid, events: &dyn EventSink) {
        let url = self.endpoint(&format!("api/posts/{}", post_id));
        let request = self.authed(self.http.get(url));
        let event = Self::resolve(request, PostEvent::PostLoaded).await;
        events.dispatch(event);
    }

    /// Create a post
    pub async fn add_post(&self, text: &str, events: &dyn EventSink, alerts: &dyn AlertSink) {
        let request = self
            .authed(self.http.post(self.endpoint("api/posts")))
            .json(&serde_json::json!({ "text": text }));

        let event = Self::resolve(request, PostEvent::PostAdded).await;
        if let PostEvent::PostAdded(_) = &event {
            alerts.alert("Post Added");
        }
        events.dispatch(event);
    }

    /// Delete a post
    pub async fn delete_post(&self, post_id: Uuid, events: &dyn EventSink, alerts: &dyn AlertSink) {
        let url = self.endpoint(&format!("api/posts/{}", post_id));
        let request = self.authed(self.http.delete(url));

        // response body ({msg}) is ignored; the event carries the id
        let event = match Self::send(request).await {
            Ok(_) => PostEvent::PostDeleted(post_id),
            Err(failure) => failure,
        };
        if let PostEvent::PostDeleted(_) = &event {
            alerts.alert("Post Removed");
        }
        events.dispatch(event);
    }

    /// Like a post
    pub async fn add_like(&self, post_id: Uuid, events: &dyn EventSink) {
        let url = self.endpoint(&format!("api/posts/like/{}", post_id));
        let request = self.authed(self.http.put(url));
        let event =
            Self::resolve(request, |likes: Vec<Like>| PostEvent::LikesUpdated { post_id, likes })
                .await;
        events.dispatch(event);
    }

    /// Remove the caller's like
    pub async fn remove_like(&self, post_id: Uuid, events: &dyn EventSink) {
        let url = self.endpoint(&format!("api/posts/unlike/{}", post_id));
        let request = self.authed(self.http.put(url));
        let event =
            Self::resolve(request, |likes: Vec<Like>| PostEvent::LikesUpdated { post_id, likes })
                .await;
        events.dispatch(event);
    }

    /// Comment on a post
    pub async fn add_comment(
        &self,
        post_id: Uuid,
        text: &str,
        events: &dyn EventSink,
        alerts: &dyn AlertSink,
    ) {
        let url = self.endpoint(&format!("api/posts/comment/{}", post_id));
        let request = self
            .authed(self.http.post(url))
            .json(&serde_json::json!({ "text": text }));

        let event = Self::resolve(request, |comments: Vec<Comment>| PostEvent::CommentAdded {
            post_id,
            comments,
        })
        .await;
        if let PostEvent::CommentAdded { .. } = &event {
            alerts.alert("Comment Added");
        }
        events.dispatch(event);
    }

    /// Delete a comment
    pub async fn delete_comment(
        &self,
        post_id: Uuid,
        comment_id: Uuid,
        events: &dyn EventSink,
        alerts: &dyn AlertSink,
    ) {
        let url = self.endpoint(&format!("api/posts/comment/{}/{}", post_id, comment_id));
        let request = self.authed(self.http.delete(url));

        let event = match Self::send(request).await {
            Ok(_) => PostEvent::CommentRemoved {
                post_id,
                comment_id,
            },
            Err(failure) => failure,
        };
        if let PostEvent::CommentRemoved { .. } = &event {
            alerts.alert("Comment Removed");
        }
        events.dispatch(event);
    }

    /// Send a request and fold the outcome into a single event via `map`.
    async fn resolve<T, F>(request: RequestBuilder, map: F) -> PostEvent
    where
        T: DeserializeOwned,
        F: FnOnce(T) -> PostEvent,
    {
        match Self::send(request).await {
            Ok(response) => match response.json::<T>().await {
                Ok(payload) => map(payload),
                Err(err) => transport_failure(&err),
            },
            Err(failure) => failure,
        }
    }

    /// Send a request, mapping any non-2xx response or transport error
    /// to a failure event.
    async fn send(request: RequestBuilder) -> Result<Response, PostEvent> {
        match request.send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    Ok(response)
                } else {
                    tracing::debug!(%status, "posts API request rejected");
                    Err(failure_from_status(status))
                }
            }
            Err(err) => {
                tracing::debug!("posts API request failed: {}", err);
                Err(transport_failure(&err))
            }
        }
    }
}

/// Failure event for a response with a non-success status
fn failure_from_status(status: StatusCode) -> PostEvent {
    PostEvent::RequestFailed {
        status: status.as_u16(),
        msg: status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

/// Failure event for an error with no usable response
fn transport_failure(err: &reqwest::Error) -> PostEvent {
    PostEvent::RequestFailed {
        status: err.status().map(|s| s.as_u16()).unwrap_or(0),
        msg: err.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NoAlerts;
    use chrono::Utc;
    use std::sync::Mutex;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    struct RecordingSink(Mutex<Vec<PostEvent>>);

    impl RecordingSink {
        fn new() -> Self {
            Self(Mutex::new(Vec::new()))
        }

        fn events(&self) -> Vec<PostEvent> {
            self.0.lock().unwrap().clone()
        }
    }

    impl EventSink for RecordingSink {
        fn dispatch(&self, event: PostEvent) {
            self.0.lock().unwrap().push(event);
        }
    }

    struct RecordingAlerts(Mutex<Vec<String>>);

    impl RecordingAlerts {
        fn new() -> Self {
            Self(Mutex::new(Vec::new()))
        }

        fn alerts(&self) -> Vec<String> {
            self.0.lock().unwrap().clone()
        }
    }

    impl AlertSink for RecordingAlerts {
        fn alert(&self, msg: &str) {
            self.0.lock().unwrap().push(msg.to_string());
        }
    }

    /// True once `raw` holds a full request: terminated headers plus
    /// the declared body length.
    fn request_complete(raw: &[u8]) -> bool {
        let Some(split) = raw.windows(4).position(|w| w == b"\r\n\r\n") else {
            return false;
        };
        let head = String::from_utf8_lossy(&raw[..split]);
        let mut body_len = 0;
        for line in head.lines() {
            if let Some((name, value)) = line.split_once(':') {
                if name.eq_ignore_ascii_case("content-length") {
                    body_len = value.trim().parse().unwrap_or(0);
                }
            }
        }
        raw.len() >= split + 4 + body_len
    }

    /// Serve exactly one request on an ephemeral port with a canned
    /// 200 JSON response, returning the base URL to point the client at.
    async fn one_shot_server(body: String) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 1024];
            let mut seen = Vec::new();
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                seen.extend_from_slice(&buf[..n]);
                if n == 0 || request_complete(&seen) {
                    break;
                }
            }
            let response = format!(
                "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{}",
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn post(text: &str) -> Post {
        Post {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            author_name: "ada".to_string(),
            author_avatar: None,
            text: text.to_string(),
            created_at: Utc::now(),
            likes: Vec::new(),
            comments: Vec::new(),
        }
    }

    #[test]
    fn endpoint_builds_expected_urls() {
        let client = PostsClient::new("http://localhost:8083/", "tok");
        assert_eq!(client.endpoint("api/posts"), "http://localhost:8083/api/posts");

        let id = Uuid::new_v4();
        assert_eq!(
            client.endpoint(&format!("api/posts/like/{}", id)),
            format!("http://localhost:8083/api/posts/like/{}", id)
        );
    }

    #[test]
    fn failure_event_carries_status_and_text() {
        let event = failure_from_status(StatusCode::NOT_FOUND);
        assert_eq!(
            event,
            PostEvent::RequestFailed {
                status: 404,
                msg: "Not Found".to_string()
            }
        );

        let event = failure_from_status(StatusCode::BAD_REQUEST);
        assert_eq!(
            event,
            PostEvent::RequestFailed {
                status: 400,
                msg: "Bad Request".to_string()
            }
        );
    }

    #[tokio::test]
    async fn unreachable_server_emits_exactly_one_failure() {
        // nothing listens on this port; the request fails at connect
        let client = PostsClient::new("http://127.0.0.1:9", "tok");
        let sink = RecordingSink::new();

        client.get_posts(&sink).await;

        let events = sink.events();
        assert_eq!(events.len(), 1, "exactly one terminal event per call");
        match &events[0] {
            PostEvent::RequestFailed { status, .. } => assert_eq!(*status, 0),
            other => panic!("expected RequestFailed, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn failed_delete_emits_no_alert() {
        struct PanickingAlerts;
        impl AlertSink for PanickingAlerts {
            fn alert(&self, msg: &str) {
                panic!("alert fired on failure: {}", msg);
            }
        }

        let client = PostsClient::new("http://127.0.0.1:9", "tok");
        let sink = RecordingSink::new();

        client
            .delete_post(Uuid::new_v4(), &sink, &PanickingAlerts)
            .await;

        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test]
    async fn no_alerts_sink_is_silent() {
        let client = PostsClient::new("http://127.0.0.1:9", "tok");
        let sink = RecordingSink::new();

        client.add_post("hello", &sink, &NoAlerts).await;
        assert_eq!(sink.events().len(), 1);
    }

    #[tokio::test]
    async fn loaded_posts_map_to_posts_loaded() {
        let posts = vec![post("first"), post("second")];
        let base = one_shot_server(serde_json::to_string(&posts).unwrap()).await;

        let client = PostsClient::new(&base, "tok");
        let sink = RecordingSink::new();
        client.get_posts(&sink).await;

        assert_eq!(sink.events(), vec![PostEvent::PostsLoaded(posts)]);
    }

    #[tokio::test]
    async fn added_post_emits_event_and_alert() {
        let created = post("hello");
        let base = one_shot_server(serde_json::to_string(&created).unwrap()).await;

        let client = PostsClient::new(&base, "tok");
        let sink = RecordingSink::new();
        let alerts = RecordingAlerts::new();
        client.add_post("hello", &sink, &alerts).await;

        assert_eq!(sink.events(), vec![PostEvent::PostAdded(created)]);
        assert_eq!(alerts.alerts(), vec!["Post Added".to_string()]);
    }

    #[tokio::test]
    async fn like_success_maps_to_likes_updated() {
        let post_id = Uuid::new_v4();
        let likes = vec![Like {
            id: Uuid::new_v4(),
            post_id,
            user_id: Uuid::new_v4(),
            created_at: Utc::now(),
        }];
        let base = one_shot_server(serde_json::to_string(&likes).unwrap()).await;

        let client = PostsClient::new(&base, "tok");
        let sink = RecordingSink::new();
        client.add_like(post_id, &sink).await;

        assert_eq!(
            sink.events(),
            vec![PostEvent::LikesUpdated { post_id, likes }]
        );
    }

    #[tokio::test]
    async fn deleted_post_alerts_and_carries_the_id() {
        let base = one_shot_server(r#"{"msg":"Post removed"}"#.to_string()).await;
        let post_id = Uuid::new_v4();

        let client = PostsClient::new(&base, "tok");
        let sink = RecordingSink::new();
        let alerts = RecordingAlerts::new();
        client.delete_post(post_id, &sink, &alerts).await;

        assert_eq!(sink.events(), vec![PostEvent::PostDeleted(post_id)]);
        assert_eq!(alerts.alerts(), vec!["Post Removed".to_string()]);
    }
}
