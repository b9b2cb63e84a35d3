//! Session store: token + profile, durable across reloads.

use std::sync::{Arc, RwLock};

use mizan_client::TokenProvider;
use mizan_events::{Notice, SharedBus, publish_or_log};
use mizan_storage::ClientStore;

use crate::profile::UserProfile;

#[derive(Debug, Clone, Default)]
struct SessionState {
    token: Option<String>,
    user: Option<UserProfile>,
}

/// Authenticated-session handle.
///
/// The in-memory copy is authoritative during a session; the storage port is
/// only read on [`SessionStore::restore`] (startup) and written on
/// establish/clear. `token()` stays synchronous for the API client.
#[derive(Clone)]
pub struct SessionStore {
    state: Arc<RwLock<SessionState>>,
    store: ClientStore,
    bus: SharedBus,
}

impl SessionStore {
    pub fn new(store: ClientStore, bus: SharedBus) -> Self {
        Self {
            state: Arc::new(RwLock::new(SessionState::default())),
            store,
            bus,
        }
    }

    /// Load a persisted session, if any. Returns whether one was found.
    pub async fn restore(&self) -> anyhow::Result<bool> {
        let token = self.store.auth_token().await?;
        let user: Option<UserProfile> = self.store.cached_user().await?;

        let found = token.is_some();
        {
            let mut state = self.write_state();
            state.token = token;
            state.user = user;
        }

        if found {
            tracing::debug!("restored persisted session");
        }
        Ok(found)
    }

    /// Establish a session after a successful login.
    pub async fn establish(&self, token: String, user: UserProfile) -> anyhow::Result<()> {
        self.store.set_auth_token(&token).await?;
        self.store.set_cached_user(&user).await?;

        {
            let mut state = self.write_state();
            state.token = Some(token);
            state.user = Some(user);
        }

        publish_or_log(&self.bus, Notice::SessionChanged);
        Ok(())
    }

    /// Clear the session (logout). Persisted state is removed as well.
    pub async fn clear(&self) -> anyhow::Result<()> {
        self.store.clear_auth_token().await?;
        self.store.clear_cached_user().await?;

        {
            let mut state = self.write_state();
            *state = SessionState::default();
        }

        publish_or_log(&self.bus, Notice::SessionChanged);
        Ok(())
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().token.is_some()
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.read_state().user.clone()
    }

    fn read_state(&self) -> std::sync::RwLockReadGuard<'_, SessionState> {
        self.state.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_state(&self) -> std::sync::RwLockWriteGuard<'_, SessionState> {
        self.state.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl TokenProvider for SessionStore {
    fn token(&self) -> Option<String> {
        self.read_state().token.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mizan_core::UserId;
    use mizan_events::{InMemoryNoticeBus, NoticeBus};
    use mizan_storage::MemoryStore;

    fn profile() -> UserProfile {
        UserProfile {
            id: UserId::new(1),
            name: "Admin".to_string(),
            email: "admin@example.com".to_string(),
            phone: None,
        }
    }

    fn fixture() -> (SessionStore, ClientStore, SharedBus) {
        let store = ClientStore::new(Arc::new(MemoryStore::new()));
        let bus: SharedBus = Arc::new(InMemoryNoticeBus::new());
        (
            SessionStore::new(store.clone(), bus.clone()),
            store,
            bus,
        )
    }

    #[tokio::test]
    async fn establish_persists_and_notifies() {
        let (session, store, bus) = fixture();
        let sub = bus.subscribe();

        session
            .establish("tok-123".to_string(), profile())
            .await
            .unwrap();

        assert!(session.is_authenticated());
        assert_eq!(session.token().as_deref(), Some("tok-123"));
        assert_eq!(store.auth_token().await.unwrap().as_deref(), Some("tok-123"));
        assert_eq!(sub.try_recv().unwrap(), Notice::SessionChanged);
    }

    #[tokio::test]
    async fn restore_picks_up_persisted_session() {
        let (session, store, bus) = fixture();
        session
            .establish("tok-123".to_string(), profile())
            .await
            .unwrap();

        // A fresh store handle simulates a reload.
        let reloaded = SessionStore::new(store, bus);
        assert!(!reloaded.is_authenticated());
        assert!(reloaded.restore().await.unwrap());
        assert!(reloaded.is_authenticated());
        assert_eq!(reloaded.current_user(), Some(profile()));
    }

    #[tokio::test]
    async fn clear_removes_everything() {
        let (session, store, _bus) = fixture();
        session
            .establish("tok-123".to_string(), profile())
            .await
            .unwrap();

        session.clear().await.unwrap();

        assert!(!session.is_authenticated());
        assert_eq!(session.current_user(), None);
        assert_eq!(store.auth_token().await.unwrap(), None);
    }
}
