/// HTTP request handlers
pub mod comments;
pub mod likes;
pub mod posts;

pub use comments::*;
pub use likes::*;
pub use posts::*;
