//! Authentication handling for the Zendesk API.
//!
//! Zendesk API tokens are sent with HTTP Basic auth using the
//! `{email}/token:{api_token}` convention. Tokens are stored in the OS
//! keyring, and can be overridden per process through `ZTV_API_TOKEN`.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use tracing::debug;

use super::error::{ApiError, Result};

/// The keyring service name for ztv tokens.
const KEYRING_SERVICE: &str = "ztv";

/// Environment variable that overrides the keyring token.
pub const TOKEN_ENV_VAR: &str = "ZTV_API_TOKEN";

/// Authentication credentials for Zendesk.
#[derive(Debug, Clone)]
pub struct Auth {
    /// The Base64-encoded authorization header value.
    auth_header: String,
}

impl Auth {
    /// Create new authentication credentials from email and API token.
    ///
    /// The token is immediately encoded and the raw token is not stored.
    pub fn new(email: &str, token: &str) -> Self {
        let auth_header = build_auth_header(email, token);
        Self { auth_header }
    }

    /// Create authentication for a profile.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::MissingToken` if neither the environment override
    /// nor the keyring holds a token for the profile.
    pub fn for_profile(profile_name: &str, email: &str) -> Result<Self> {
        let token = resolve_token(profile_name)?;
        Ok(Self::new(email, &token))
    }

    /// Get the authorization header value for HTTP requests.
    ///
    /// Returns the complete "Basic ..." header value.
    pub fn header_value(&self) -> &str {
        &self.auth_header
    }
}

/// Build the Basic Auth header value for an API token.
fn build_auth_header(email: &str, token: &str) -> String {
    let credentials = format!("{}/token:{}", email, token);
    let encoded = BASE64.encode(credentials.as_bytes());
    format!("Basic {}", encoded)
}

/// Resolve the API token for a profile.
///
/// A non-empty `ZTV_API_TOKEN` wins over the keyring.
pub fn resolve_token(profile_name: &str) -> Result<String> {
    if let Ok(token) = std::env::var(TOKEN_ENV_VAR) {
        if !token.trim().is_empty() {
            debug!("Using API token from {}", TOKEN_ENV_VAR);
            return Ok(token.trim().to_string());
        }
    }

    get_token(profile_name).map_err(|e| {
        debug!("Keyring lookup failed: {}", e);
        ApiError::MissingToken(profile_name.to_string())
    })
}

/// Store an API token in the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be stored in the keyring.
pub fn store_token(profile_name: &str, token: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to create keyring entry: {}", e)))?;

    entry
        .set_password(token)
        .map_err(|e| ApiError::Keyring(format!("failed to store token: {}", e)))?;

    Ok(())
}

/// Retrieve an API token from the OS keyring.
///
/// # Errors
///
/// Returns an error if the token cannot be retrieved from the keyring.
pub fn get_token(profile_name: &str) -> Result<String> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    entry
        .get_password()
        .map_err(|e| ApiError::Keyring(format!("failed to retrieve token: {}", e)))
}

/// Delete a stored API token.
///
/// A missing entry is not an error.
pub fn delete_token(profile_name: &str) -> Result<()> {
    let entry = keyring::Entry::new(KEYRING_SERVICE, profile_name)
        .map_err(|e| ApiError::Keyring(format!("failed to access keyring: {}", e)))?;

    match entry.delete_password() {
        Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
        Err(e) => Err(ApiError::Keyring(format!("failed to delete token: {}", e))),
    }
}
