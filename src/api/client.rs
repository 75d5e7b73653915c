//! Zendesk API client implementation.
//!
//! This module provides the client for the Zendesk Support API v2. It handles
//! authentication, cursor-paginated ticket listing, error mapping and retry
//! logic for transient failures.

use std::time::Duration;

use reqwest::{header, Client, Response, StatusCode};
use tracing::{debug, error, info, instrument, warn};

use super::auth::Auth;
use super::error::{ApiError, Result};
use super::types::{CurrentUser, CurrentUserResponse, TicketPage};
use crate::config::Profile;

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Maximum number of retries for transient failures.
const MAX_RETRIES: u32 = 3;

/// Base delay between retries in milliseconds.
const RETRY_DELAY_MS: u64 = 1000;

/// Largest page size the ticket endpoint accepts.
pub const MAX_PAGE_SIZE: u32 = 100;

/// The Zendesk API client.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ZendeskClient {
    /// The HTTP client.
    client: Client,
    /// The base URL for the Zendesk instance.
    base_url: String,
    /// Authentication credentials.
    auth: Auth,
}

impl ZendeskClient {
    /// Create a new Zendesk client from a profile.
    ///
    /// Resolves the API token and validates the connection.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No token is available for the profile
    /// - The HTTP client cannot be built
    /// - Connection validation fails
    #[instrument(skip(profile), fields(profile_name = %profile.name))]
    pub async fn new(profile: &Profile) -> Result<Self> {
        info!("Creating Zendesk client for profile");

        let auth = Auth::for_profile(&profile.name, &profile.email)?;
        let client = Self::build_http_client()?;
        let base_url = normalize_base_url(&profile.base_url());

        let zendesk = Self {
            client,
            base_url,
            auth,
        };

        zendesk.validate_connection().await?;

        info!("Zendesk client created and connection validated");
        Ok(zendesk)
    }

    /// Build the HTTP client with appropriate settings.
    fn build_http_client() -> Result<Client> {
        Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()
            .map_err(ApiError::Network)
    }

    /// Validate the connection by calling the `/users/me` endpoint.
    #[instrument(skip(self))]
    pub async fn validate_connection(&self) -> Result<CurrentUser> {
        debug!("Validating Zendesk connection");

        let user = self.get_current_user().await.map_err(|e| {
            error!("Connection validation failed: {}", e);
            match e {
                ApiError::Unauthorized => e,
                ApiError::Network(ref _err) => ApiError::ConnectionFailed(format!(
                    "Cannot connect to {}: {}",
                    self.base_url, e
                )),
                _ => ApiError::ConnectionFailed(e.to_string()),
            }
        })?;

        info!("Connected as user: {}", user.name);
        Ok(user)
    }

    /// Get the current authenticated user.
    #[instrument(skip(self))]
    pub async fn get_current_user(&self) -> Result<CurrentUser> {
        let url = format!("{}/api/v2/users/me.json", self.base_url);
        let response: CurrentUserResponse = self.get(&url).await?;
        Ok(response.user)
    }

    /// Fetch one page of tickets.
    ///
    /// # Arguments
    ///
    /// * `cursor` - The `after_cursor` of the previous page, `None` for the first page
    /// * `page_size` - Maximum number of tickets to return (max 100)
    #[instrument(skip(self))]
    pub async fn list_tickets(&self, cursor: Option<&str>, page_size: u32) -> Result<TicketPage> {
        let url = tickets_url(&self.base_url, cursor, page_size);
        let page: TicketPage = self.get(&url).await?;
        debug!(
            "Fetched {} tickets (has_more: {})",
            page.tickets.len(),
            page.meta.has_more
        );
        Ok(page)
    }

    /// Perform a GET request with authentication and error handling.
    ///
    /// Includes retry logic for transient failures (rate limiting, server errors).
    #[instrument(skip(self), fields(url = %url))]
    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let mut attempts = 0;
        let mut last_error: Option<ApiError> = None;

        while attempts < MAX_RETRIES {
            attempts += 1;
            debug!("Request attempt {}/{}", attempts, MAX_RETRIES);

            match self.execute_get::<T>(url).await {
                Ok(response) => return Ok(response),
                Err(e) => {
                    if Self::is_retryable(&e) && attempts < MAX_RETRIES {
                        let delay = Self::calculate_retry_delay(attempts);
                        warn!(
                            "Request failed (attempt {}), retrying in {}ms: {}",
                            attempts, delay, e
                        );
                        tokio::time::sleep(Duration::from_millis(delay)).await;
                        last_error = Some(e);
                    } else {
                        return Err(e);
                    }
                }
            }
        }

        Err(last_error.unwrap_or(ApiError::ServerError("Max retries exceeded".to_string())))
    }

    /// Execute a single GET request.
    async fn execute_get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header(header::AUTHORIZATION, self.auth.header_value())
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle the HTTP response, checking for errors and parsing JSON.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: Response,
    ) -> Result<T> {
        let status = response.status();
        let url = response.url().to_string();

        if status.is_success() {
            response
                .json::<T>()
                .await
                .map_err(|e| ApiError::InvalidResponse(format!("Failed to parse response: {}", e)))
        } else {
            let error_body = response.text().await.unwrap_or_default();
            debug!("Error response body: {}", error_body);

            Err(Self::error_from_response(status, &url, &error_body))
        }
    }

    /// Create an appropriate error from an HTTP response.
    ///
    /// Zendesk error bodies look like `{"error": "...", "description": "..."}`,
    /// where `error` is either a string or an object with `title`/`message`.
    fn error_from_response(status: StatusCode, url: &str, body: &str) -> ApiError {
        let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
            return ApiError::from_status(status, url);
        };

        let error = match json.get("error") {
            Some(serde_json::Value::String(s)) => Some(s.clone()),
            Some(obj @ serde_json::Value::Object(_)) => obj
                .get("message")
                .or_else(|| obj.get("title"))
                .and_then(|v| v.as_str())
                .map(str::to_string),
            _ => None,
        };
        let description = json
            .get("description")
            .and_then(|v| v.as_str())
            .map(str::to_string);

        let context = match (error, description) {
            (Some(e), Some(d)) => format!("{}: {}", e, d),
            (Some(e), None) => e,
            (None, Some(d)) => d,
            (None, None) => url.to_string(),
        };

        ApiError::from_status(status, &context)
    }

    /// Check if an error is retryable.
    fn is_retryable(error: &ApiError) -> bool {
        matches!(
            error,
            ApiError::RateLimited | ApiError::ServerError(_) | ApiError::Network(_)
        )
    }

    /// Calculate retry delay with exponential backoff.
    fn calculate_retry_delay(attempt: u32) -> u64 {
        RETRY_DELAY_MS * 2u64.pow(attempt - 1)
    }
}

/// Build the ticket listing URL for a cursor.
fn tickets_url(base_url: &str, cursor: Option<&str>, page_size: u32) -> String {
    let mut url = format!(
        "{}/api/v2/tickets.json?page[size]={}",
        base_url,
        page_size.clamp(1, MAX_PAGE_SIZE)
    );
    if let Some(cursor) = cursor {
        url.push_str("&page[after]=");
        url.push_str(&urlencoding::encode(cursor));
    }
    url
}

/// Normalize the base URL by removing trailing slashes and warning on plain HTTP.
fn normalize_base_url(url: &str) -> String {
    let url = url.trim_end_matches('/');

    if !url.starts_with("https://") && !url.contains("localhost") {
        warn!("URL does not use HTTPS: {}. This is insecure for production use.", url);
    }

    url.to_string()
}
