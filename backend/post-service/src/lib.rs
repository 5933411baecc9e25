/// Post Service Library
///
/// REST API for posts, likes, and comments on the Linkup social platform.
/// Every operation is a pass-through to the database behind an
/// authentication check; the service keeps no state of its own.
///
/// # Modules
///
/// - `handlers`: HTTP request handlers
/// - `models`: Data structures for posts, likes, comments
/// - `services`: Business logic layer
/// - `db`: Database access layer and repositories
/// - `middleware`: JWT authentication and ownership checks
/// - `routes`: Route registration
/// - `error`: Error types and handling
/// - `config`: Configuration management
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

pub use config::Config;
pub use error::{AppError, Result};
