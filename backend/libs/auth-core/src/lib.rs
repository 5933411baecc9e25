//! Shared authentication primitives for Linkup services.
//!
//! Currently this is JWT validation only; token issuance lives in the
//! identity service and is out of scope for consumers of this crate.

pub mod jwt;

pub use jwt::{validate_token, Claims};
