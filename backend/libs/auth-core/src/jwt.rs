/// Shared JWT validation for Linkup services
///
/// All services validate bearer tokens through this module so that the
/// accepted algorithm and claim layout stay consistent everywhere.
///
/// ## Security Design
///
/// - **RS256 ONLY**: no symmetric algorithms, preventing confusion attacks
/// - **No hardcoded keys**: keys are loaded from the environment at startup
/// - **Thread-safe**: keys are set once via `OnceCell` and immutable after
///
/// Services must call `initialize_validation_key()` (or
/// `initialize_jwt_keys()` when they also mint tokens, e.g. in tests)
/// during startup, before any JWT operation.
use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const ACCESS_TOKEN_EXPIRY_HOURS: i64 = 1;

/// JWT algorithm - MUST be RS256 for all Linkup services
const JWT_ALGORITHM: Algorithm = Algorithm::RS256;

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Token type: only "access" is accepted by `validate_token`
    pub token_type: String,
}

static JWT_ENCODING_KEY: OnceCell<EncodingKey> = OnceCell::new();
static JWT_DECODING_KEY: OnceCell<DecodingKey> = OnceCell::new();

/// Initialize both signing and validation keys from PEM-formatted strings.
///
/// Only services that mint tokens need the private key; the posts API
/// itself calls `initialize_validation_key` instead. Can only be called
/// once per process.
pub fn initialize_jwt_keys(private_key_pem: &str, public_key_pem: &str) -> Result<()> {
    let encoding_key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA private key: {e}"))?;

    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_ENCODING_KEY
        .set(encoding_key)
        .map_err(|_| anyhow!("JWT encoding key already initialized"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

/// Initialize the validation key only.
///
/// Use this for services that never generate tokens; it avoids handing
/// the private key to processes that have no business signing.
pub fn initialize_validation_key(public_key_pem: &str) -> Result<()> {
    let decoding_key = DecodingKey::from_rsa_pem(public_key_pem.as_bytes())
        .map_err(|e| anyhow!("Failed to parse RSA public key: {e}"))?;

    JWT_DECODING_KEY
        .set(decoding_key)
        .map_err(|_| anyhow!("JWT decoding key already initialized"))?;

    Ok(())
}

/// Generate a signed access token for the given user.
///
/// Requires `initialize_jwt_keys` to have been called with a private key.
pub fn generate_access_token(user_id: Uuid) -> Result<String> {
    let encoding_key = JWT_ENCODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT encoding key not initialized"))?;

    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(ACCESS_TOKEN_EXPIRY_HOURS)).timestamp(),
        token_type: "access".to_string(),
    };

    encode(&Header::new(JWT_ALGORITHM), &claims, encoding_key)
        .map_err(|e| anyhow!("Failed to encode JWT: {e}"))
}

/// Validate a bearer token and return its decoded claims.
///
/// Rejects expired tokens, wrong algorithms, bad signatures, and tokens
/// whose `token_type` is not "access".
pub fn validate_token(token: &str) -> Result<TokenData<Claims>> {
    let decoding_key = JWT_DECODING_KEY
        .get()
        .ok_or_else(|| anyhow!("JWT decoding key not initialized"))?;

    let validation = Validation::new(JWT_ALGORITHM);
    let data = decode::<Claims>(token, decoding_key, &validation)
        .map_err(|e| anyhow!("Invalid token: {e}"))?;

    if data.claims.token_type != "access" {
        return Err(anyhow!("Not an access token"));
    }

    Ok(data)
}
