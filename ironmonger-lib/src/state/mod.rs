//! Application state with an explicit persistence allow-list

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;
use tokio::sync::Mutex;

use crate::auth::Role;
use crate::auth::SessionToken;
use crate::error::StateError;

/// Color theme preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Follow the host environment.
    #[default]
    System,
    /// Light theme.
    Light,
    /// Dark theme.
    Dark,
}

/// User preferences carried across sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Color theme.
    pub theme: Theme,
    /// Default page size for listings.
    pub default_page_size: u32,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            default_page_size: 20,
        }
    }
}

/// In-memory application state for an embedding frontend.
///
/// There is no global singleton: the embedder constructs one and passes it
/// where it is needed. Persistence is opt-in per field through
/// [`AppState::snapshot`] — everything else is session-local by
/// construction.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// The active session, if signed in.
    pub session: Option<SessionToken>,
    /// User preferences.
    pub preferences: Preferences,
}

impl AppState {
    /// Creates a fresh signed-out state with default preferences.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the persistable subset of the state.
    ///
    /// This is an allow-list, not a filter: only the fields named on
    /// [`PersistedState`] ever reach storage. Derived session data
    /// (expiry timing) is deliberately re-learned on restore rather than
    /// trusted from disk.
    pub fn snapshot(&self) -> PersistedState {
        PersistedState {
            bearer: self.session.as_ref().map(|s| s.bearer.clone()),
            role: self.session.as_ref().and_then(|s| s.role),
            preferences: self.preferences.clone(),
        }
    }

    /// Rebuilds state from a persisted snapshot.
    pub fn restore(snapshot: PersistedState) -> Self {
        let session = snapshot.bearer.map(|bearer| {
            let mut token = SessionToken::new(bearer);
            token.role = snapshot.role;
            token
        });
        Self {
            session,
            preferences: snapshot.preferences,
        }
    }

    /// Saves the persistable subset to the given store.
    pub async fn save_to(&self, store: &dyn StateStore) -> Result<(), StateError> {
        let json = serde_json::to_string(&self.snapshot())?;
        store.save(&json).await
    }

    /// Loads state from the given store, or a fresh default when the store
    /// is empty.
    pub async fn load_from(store: &dyn StateStore) -> Result<Self, StateError> {
        match store.load().await? {
            Some(json) => Ok(Self::restore(serde_json::from_str(&json)?)),
            None => Ok(Self::new()),
        }
    }
}

/// The allow-listed, serializable subset of [`AppState`].
///
/// Adding a field here is a deliberate decision to write it to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedState {
    /// The bearer token, when a session should survive a restart.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bearer: Option<String>,
    /// The session role, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    /// User preferences.
    pub preferences: Preferences,
}

/// Trait for persisted-state storage backends.
///
/// Implementations store one JSON document. File- or keychain-backed
/// stores are supplied by the embedding application.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Loads the persisted document, if any.
    async fn load(&self) -> Result<Option<String>, StateError>;

    /// Saves the persisted document, replacing any previous one.
    async fn save(&self, json: &str) -> Result<(), StateError>;
}

/// An in-memory state store, for tests and ephemeral embedders.
#[derive(Debug, Default)]
pub struct MemoryStateStore {
    document: Mutex<Option<String>>,
}

impl MemoryStateStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStateStore {
    async fn load(&self) -> Result<Option<String>, StateError> {
        Ok(self.document.lock().await.clone())
    }

    async fn save(&self, json: &str) -> Result<(), StateError> {
        *self.document.lock().await = Some(json.to_string());
        Ok(())
    }
}
