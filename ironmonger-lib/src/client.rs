//! Main StoreClient

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use reqwest::Client;
use reqwest::Method;
use reqwest::header::HeaderMap;
use reqwest::header::HeaderValue;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::auth::Role;
use crate::auth::SessionProvider;
use crate::auth::SessionToken;
use crate::cache::CacheConfig;
use crate::cache::MemoryCache;
use crate::cache::ResponseCache;
use crate::error::ApiError;
use crate::error::AuthError;
use crate::error::Error;

/// The main client for the storefront REST API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use ironmonger_lib::{StoreClient, auth::StaticSessionProvider};
///
/// let provider = StaticSessionProvider::new("my-token");
/// let client = StoreClient::builder()
///     .url("https://shop.example.com")
///     .session_provider(provider)
///     .build();
///
/// client.connect().await?;
/// ```
#[derive(Clone)]
pub struct StoreClient {
    inner: Arc<StoreClientInner>,
}

struct StoreClientInner {
    base_url: String,
    api_version: String,
    session_provider: Arc<dyn SessionProvider>,
    http_client: Client,
    timeout: Option<Duration>,
    cache: Arc<dyn ResponseCache>,
    cache_config: CacheConfig,
}

impl StoreClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> StoreClientBuilder<Missing, Missing> {
        StoreClientBuilder::new()
    }

    /// Validates connectivity and the session.
    ///
    /// Makes a `GET /auth/me` request to verify the base URL and session
    /// are valid, and returns who the session belongs to.
    pub async fn connect(&self) -> Result<MeResponse, Error> {
        let url = self.endpoint_url("/auth/me");
        let response = self.request(Method::GET, &url, None, None).await?;
        let me: MeResponse = response
            .json()
            .await
            .map_err(|e| ApiError::parse(e.to_string()))?;
        Ok(me)
    }

    /// Exchanges credentials for a session token.
    ///
    /// This is a plain endpoint wrapper; session caching and renewal belong
    /// to the [`SessionProvider`] the embedder supplies.
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionToken, Error> {
        let url = self.endpoint_url("/auth/login");
        let body = serde_json::json!({ "email": email, "password": password }).to_string();

        debug!("POST {}", url);
        let response = self
            .inner
            .http_client
            .post(&url)
            .headers(self.default_headers())
            .body(body)
            .send()
            .await
            .map_err(ApiError::from)?;

        let status = response.status();
        if status.as_u16() == 401 {
            return Err(AuthError::InvalidCredentials.into());
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::http(status.as_u16(), body).into());
        }

        let login: LoginResponse = response
            .json()
            .await
            .map_err(|e| AuthError::Parse(e.to_string()))?;

        let mut token = SessionToken::new(login.token);
        token.expires_at = login.expires_at;
        token.role = Some(login.role);
        Ok(token)
    }

    /// Returns the base URL of the storefront.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Returns the API version being used.
    pub fn api_version(&self) -> &str {
        &self.inner.api_version
    }

    pub(crate) fn cache(&self) -> &dyn ResponseCache {
        self.inner.cache.as_ref()
    }

    pub(crate) fn cache_config(&self) -> &CacheConfig {
        &self.inner.cache_config
    }

    /// Builds a full URL for an API path like `/products`.
    pub(crate) fn endpoint_url(&self, path: &str) -> String {
        format!(
            "{}/api/{}{}",
            self.inner.base_url.trim_end_matches('/'),
            self.inner.api_version,
            path
        )
    }

    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        headers.insert("Accept", HeaderValue::from_static("application/json"));
        headers
    }

    /// Makes an authenticated HTTP request.
    ///
    /// This is the low-level request method used by all API operations.
    /// When `required_role` is set and the session's role is known, a
    /// mismatch fails locally with [`AuthError::Forbidden`] instead of
    /// spending a round trip on a guaranteed 403.
    pub(crate) async fn request(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        required_role: Option<Role>,
    ) -> Result<reqwest::Response, Error> {
        let token = self
            .inner
            .session_provider
            .session(&self.inner.base_url)
            .await?;

        if let (Some(required), Some(role)) = (required_role, token.role) {
            if !role.allows(required) {
                return Err(AuthError::forbidden(format!(
                    "{} session cannot use a {} surface",
                    role, required
                ))
                .into());
            }
        }

        debug!("{} {}", method, url);
        let mut request = self
            .inner
            .http_client
            .request(method, url)
            .headers(self.default_headers())
            .bearer_auth(&token.bearer);

        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        if let Some(body) = body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout(self.inner.timeout.unwrap_or(Duration::from_secs(30)))
            } else {
                ApiError::Network(e)
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            401 => Err(AuthError::SessionExpired.into()),
            403 => {
                let body = response.text().await.unwrap_or_default();
                Err(AuthError::forbidden(body).into())
            }
            status => {
                let body = response.text().await.unwrap_or_default();
                let code = serde_json::from_str::<ErrorBody>(&body)
                    .ok()
                    .and_then(|b| b.code);
                Err(ApiError::Http {
                    status,
                    message: body,
                    code,
                }
                .into())
            }
        }
    }

    /// Makes a GET request and returns the raw response body.
    pub(crate) async fn get_text(
        &self,
        url: &str,
        required_role: Option<Role>,
    ) -> Result<String, Error> {
        let response = self.request(Method::GET, url, None, required_role).await?;
        response.text().await.map_err(|e| ApiError::from(e).into())
    }

    /// Makes a GET request and parses the JSON response body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        required_role: Option<Role>,
    ) -> Result<T, Error> {
        self.send_json(Method::GET, url, None, required_role).await
    }

    /// Makes a request with an optional JSON body and parses the JSON
    /// response body.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<String>,
        required_role: Option<Role>,
    ) -> Result<T, Error> {
        let response = self.request(method, url, body, required_role).await?;
        let body = response.text().await.map_err(ApiError::from)?;
        serde_json::from_str(&body)
            .map_err(|e| ApiError::parse_with_body(e.to_string(), body).into())
    }
}

/// Response from the `GET /auth/me` probe.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeResponse {
    /// The ID of the current user.
    pub user_id: Uuid,
    /// The user's email address.
    pub email: String,
    /// The session's role.
    pub role: Role,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LoginResponse {
    token: String,
    #[serde(default)]
    expires_at: Option<chrono::DateTime<chrono::Utc>>,
    role: Role,
}

/// Error envelope some endpoints return alongside a non-2xx status.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    code: Option<String>,
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(T);

/// Builder for constructing a [`StoreClient`].
///
/// Uses the typestate pattern to ensure required fields are set at compile
/// time.
///
/// # Required Fields
///
/// - `url` - The storefront base URL
/// - `session_provider` - A [`SessionProvider`] implementation
///
/// # Example
///
/// ```ignore
/// let client = StoreClient::builder()
///     .url("https://shop.example.com")
///     .session_provider(my_provider)
///     .api_version("v1")
///     .timeout(Duration::from_secs(30))
///     .build();
/// ```
pub struct StoreClientBuilder<Url, Provider> {
    url: Url,
    session_provider: Provider,
    api_version: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
    cache: Option<Arc<dyn ResponseCache>>,
    cache_config: CacheConfig,
}

impl StoreClientBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            url: Missing,
            session_provider: Missing,
            api_version: "v1".to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
            cache: None,
            cache_config: CacheConfig::default(),
        }
    }
}

impl Default for StoreClientBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> StoreClientBuilder<Missing, P> {
    /// Sets the storefront base URL.
    pub fn url(self, url: impl Into<String>) -> StoreClientBuilder<Set<String>, P> {
        StoreClientBuilder {
            url: Set(url.into()),
            session_provider: self.session_provider,
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl<U> StoreClientBuilder<U, Missing> {
    /// Sets the session provider for authentication.
    pub fn session_provider<T: SessionProvider + 'static>(
        self,
        provider: T,
    ) -> StoreClientBuilder<U, Set<Arc<dyn SessionProvider>>> {
        StoreClientBuilder {
            url: self.url,
            session_provider: Set(Arc::new(provider) as Arc<dyn SessionProvider>),
            api_version: self.api_version,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
            cache: self.cache,
            cache_config: self.cache_config,
        }
    }
}

impl<U, P> StoreClientBuilder<U, P> {
    /// Sets the API version to use.
    ///
    /// Defaults to `v1`.
    pub fn api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// This is applied when building the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    ///
    /// If not set, a default client will be created.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets a custom response cache.
    ///
    /// Defaults to a [`MemoryCache`].
    pub fn cache<C: ResponseCache + 'static>(mut self, cache: C) -> Self {
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Sets the cache TTL configuration.
    pub fn cache_config(mut self, config: CacheConfig) -> Self {
        self.cache_config = config;
        self
    }
}

impl StoreClientBuilder<Set<String>, Set<Arc<dyn SessionProvider>>> {
    /// Builds the [`StoreClient`].
    ///
    /// This method is only available when both `url` and `session_provider`
    /// have been set.
    pub fn build(self) -> StoreClient {
        let http_client = self.http_client.unwrap_or_else(|| {
            let mut builder = Client::builder();
            if let Some(timeout) = self.connect_timeout {
                builder = builder.connect_timeout(timeout);
            }
            builder.build().expect("Failed to build HTTP client")
        });

        StoreClient {
            inner: Arc::new(StoreClientInner {
                base_url: self.url.0,
                api_version: self.api_version,
                session_provider: self.session_provider.0,
                http_client,
                timeout: self.timeout,
                cache: self
                    .cache
                    .unwrap_or_else(|| Arc::new(MemoryCache::new())),
                cache_config: self.cache_config,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::query::ListQuery;
    use crate::auth::StaticSessionProvider;

    fn client_with_role(role: Role) -> StoreClient {
        StoreClient::builder()
            .url("https://shop.invalid")
            .session_provider(StaticSessionProvider::new("token").role(role))
            .build()
    }

    #[test]
    fn test_endpoint_url_joins_version_and_path() {
        let client = client_with_role(Role::Customer);
        assert_eq!(
            client.endpoint_url("/products"),
            "https://shop.invalid/api/v1/products"
        );

        let client = StoreClient::builder()
            .url("https://shop.invalid/")
            .session_provider(StaticSessionProvider::new("token"))
            .api_version("v2")
            .build();
        assert_eq!(
            client.endpoint_url("/orders/my"),
            "https://shop.invalid/api/v2/orders/my"
        );
    }

    #[tokio::test]
    async fn test_admin_surface_refused_locally_for_customer_session() {
        // The URL is unreachable, so reaching the network would fail with a
        // different error; Forbidden proves the request was never issued.
        let client = client_with_role(Role::Customer);
        let result = client.orders(&ListQuery::new()).await;
        assert!(matches!(
            result,
            Err(Error::Auth(AuthError::Forbidden { .. }))
        ));
    }

    #[tokio::test]
    async fn test_government_session_may_use_retail_surface_gate() {
        // Gate passes for government-on-customer; the failure that follows
        // is a network error, not a local refusal.
        let client = client_with_role(Role::Government);
        let result = client.my_orders(&ListQuery::new()).await;
        assert!(matches!(result, Err(Error::Api(ApiError::Network(_)))));
    }
}
