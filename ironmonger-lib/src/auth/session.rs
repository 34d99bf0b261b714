//! SessionProvider trait and SessionToken

use async_trait::async_trait;
use chrono::DateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::error::AuthError;

/// The role attached to a storefront session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A private retail customer.
    Customer,
    /// A government procurement client.
    Government,
    /// Back-office staff.
    Admin,
}

impl Role {
    /// Returns `true` if a session with this role may use a surface that
    /// requires the given role.
    ///
    /// Admin sessions may use everything; government sessions may also use
    /// the retail surfaces (government clients are customers too); customer
    /// sessions are limited to the retail surfaces.
    pub fn allows(self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, _) => true,
            (Role::Government, Role::Government | Role::Customer) => true,
            (Role::Customer, Role::Customer) => true,
            _ => false,
        }
    }

    /// Returns the role name as it appears on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Government => "government",
            Role::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bearer session token with optional expiry and role.
///
/// This is what a [`SessionProvider`] hands the client before each request.
/// The role, when known, lets the client refuse a call locally instead of
/// burning a round trip on a guaranteed 403.
#[derive(Debug, Clone)]
pub struct SessionToken {
    /// The bearer token used for API authentication.
    pub bearer: String,
    /// When the session expires, if known.
    pub expires_at: Option<DateTime<Utc>>,
    /// The session's role, if known.
    pub role: Option<Role>,
}

impl SessionToken {
    /// Creates a new session token with just the bearer string.
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            bearer: bearer.into(),
            expires_at: None,
            role: None,
        }
    }

    /// Creates a new session token with an expiry time.
    pub fn with_expiry(bearer: impl Into<String>, expires_at: DateTime<Utc>) -> Self {
        Self {
            bearer: bearer.into(),
            expires_at: Some(expires_at),
            role: None,
        }
    }

    /// Attaches the session's role (builder pattern).
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    /// Returns `true` if the session has expired.
    ///
    /// Returns `false` if the expiry time is unknown.
    pub fn is_expired(&self) -> bool {
        self.expires_at.is_some_and(|exp| Utc::now() >= exp)
    }

    /// Returns `true` if the session will expire within the given duration.
    ///
    /// Returns `false` if the expiry time is unknown.
    pub fn expires_within(&self, duration: chrono::Duration) -> bool {
        self.expires_at
            .is_some_and(|exp| Utc::now() + duration >= exp)
    }

    /// Returns the token as a bearer authorization header value.
    pub fn as_bearer(&self) -> String {
        format!("Bearer {}", self.bearer)
    }
}

/// Trait for providing session tokens to the storefront client.
///
/// Implementors are responsible for obtaining the initial session (the
/// login call), caching it, and renewing it when it expires. The client
/// calls `session` before each API request; implementations should return
/// the cached token while it is valid.
///
/// How a session is *obtained* is the embedder's concern — this trait is
/// the seam, not an authentication flow.
#[async_trait]
pub trait SessionProvider: Send + Sync {
    /// Gets a session token for the given storefront base URL.
    async fn session(&self, resource: &str) -> Result<SessionToken, AuthError>;
}

/// A session provider that always returns the same static token.
///
/// Useful for tests and for long-lived service tokens that need no renewal.
///
/// # Example
///
/// ```
/// use ironmonger_lib::auth::{Role, StaticSessionProvider};
///
/// let provider = StaticSessionProvider::new("service-token").role(Role::Admin);
/// ```
#[derive(Debug, Clone)]
pub struct StaticSessionProvider {
    token: SessionToken,
}

impl StaticSessionProvider {
    /// Creates a new static provider with the given bearer string.
    pub fn new(bearer: impl Into<String>) -> Self {
        Self {
            token: SessionToken::new(bearer),
        }
    }

    /// Creates a new static provider from an existing token.
    pub fn from_token(token: SessionToken) -> Self {
        Self { token }
    }

    /// Attaches a role to the provided token (builder pattern).
    pub fn role(mut self, role: Role) -> Self {
        self.token.role = Some(role);
        self
    }
}

#[async_trait]
impl SessionProvider for StaticSessionProvider {
    async fn session(&self, _resource: &str) -> Result<SessionToken, AuthError> {
        Ok(self.token.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_allows() {
        assert!(Role::Admin.allows(Role::Customer));
        assert!(Role::Admin.allows(Role::Government));
        assert!(Role::Admin.allows(Role::Admin));

        assert!(Role::Government.allows(Role::Customer));
        assert!(Role::Government.allows(Role::Government));
        assert!(!Role::Government.allows(Role::Admin));

        assert!(Role::Customer.allows(Role::Customer));
        assert!(!Role::Customer.allows(Role::Government));
        assert!(!Role::Customer.allows(Role::Admin));
    }

    #[test]
    fn test_expiry_checks() {
        let expired = SessionToken::with_expiry("t", Utc::now() - chrono::Duration::minutes(1));
        assert!(expired.is_expired());

        let fresh = SessionToken::with_expiry("t", Utc::now() + chrono::Duration::hours(1));
        assert!(!fresh.is_expired());
        assert!(fresh.expires_within(chrono::Duration::hours(2)));
        assert!(!fresh.expires_within(chrono::Duration::minutes(5)));

        let unknown = SessionToken::new("t");
        assert!(!unknown.is_expired());
    }

    #[test]
    fn test_bearer_header() {
        assert_eq!(SessionToken::new("abc").as_bearer(), "Bearer abc");
    }
}
