//! Async client action layer for the posts API.
//!
//! One method per API call; each call performs a single HTTP request and
//! emits exactly one terminal event (success payload or failure) to the
//! consuming store. Side-channel alerts fire only on success, through a
//! separate collaborator.

pub mod client;
pub mod events;
pub mod models;

pub use client::PostsClient;
pub use events::{AlertSink, EventSink, PostEvent};
