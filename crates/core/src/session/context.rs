//! Session context handed to every service.

use tokio::sync::RwLock;
use trackfest_shared::config::SessionConfig;

use super::error::SessionError;
use super::store::KeyValueStore;
use super::types::{AccessDenied, Role};

/// Key under which the role is persisted.
pub const ROLE_KEY: &str = "userRole";

/// What `logout` removes from the local store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutScope {
    /// Wipe every key in the store.
    #[default]
    Everything,
    /// Remove only the role key.
    RoleOnly,
}

impl From<&SessionConfig> for LogoutScope {
    fn from(config: &SessionConfig) -> Self {
        if config.clear_all_on_logout {
            Self::Everything
        } else {
            Self::RoleOnly
        }
    }
}

/// The current user's role, cached in memory and persisted through `K`.
///
/// `login` and `logout` are the only mutators. Reads go to the cached value,
/// which is loaded once by [`SessionContext::restore`] and again on each
/// [`SessionContext::refresh`].
#[derive(Debug)]
pub struct SessionContext<K: KeyValueStore> {
    store: K,
    role: RwLock<Option<Role>>,
    logout_scope: LogoutScope,
}

impl<K: KeyValueStore> SessionContext<K> {
    /// Loads the persisted role from `store`.
    ///
    /// An unrecognized persisted value reads as logged out.
    pub async fn restore(store: K, logout_scope: LogoutScope) -> Result<Self, SessionError> {
        let role = read_role(&store).await?;
        Ok(Self {
            store,
            role: RwLock::new(role),
            logout_scope,
        })
    }

    /// Re-reads the persisted role, picking up changes made elsewhere.
    pub async fn refresh(&self) -> Result<Option<Role>, SessionError> {
        let role = read_role(&self.store).await?;
        *self.role.write().await = role;
        Ok(role)
    }

    /// Persists `role` and makes it current.
    pub async fn login(&self, role: Role) -> Result<(), SessionError> {
        self.store.set(ROLE_KEY, role.as_str()).await?;
        *self.role.write().await = Some(role);
        Ok(())
    }

    /// Clears persisted session state according to the logout scope.
    pub async fn logout(&self) -> Result<(), SessionError> {
        match self.logout_scope {
            LogoutScope::Everything => self.store.clear().await?,
            LogoutScope::RoleOnly => self.store.remove(ROLE_KEY).await?,
        }
        *self.role.write().await = None;
        Ok(())
    }

    /// Current role, `None` before any login.
    pub async fn current_role(&self) -> Option<Role> {
        *self.role.read().await
    }

    /// Succeeds only when the session holds `required`.
    pub async fn require(&self, required: Role) -> Result<Role, AccessDenied> {
        match self.current_role().await {
            Some(role) if role == required => Ok(role),
            actual => Err(AccessDenied {
                required: Some(required),
                actual,
            }),
        }
    }

    /// Succeeds for any logged-in session.
    pub async fn require_login(&self) -> Result<Role, AccessDenied> {
        self.current_role().await.ok_or(AccessDenied {
            required: None,
            actual: None,
        })
    }

    /// The backing store.
    pub fn store(&self) -> &K {
        &self.store
    }
}

async fn read_role<K: KeyValueStore>(store: &K) -> Result<Option<Role>, SessionError> {
    Ok(store
        .get(ROLE_KEY)
        .await?
        .as_deref()
        .and_then(Role::parse))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::store::{FileKeyValueStore, InMemoryKeyValueStore};

    #[tokio::test]
    async fn test_role_is_unset_before_login() {
        let session = SessionContext::restore(InMemoryKeyValueStore::new(), LogoutScope::default())
            .await
            .unwrap();
        assert_eq!(session.current_role().await, None);
    }

    #[tokio::test]
    async fn test_login_persists_role() {
        let session = SessionContext::restore(InMemoryKeyValueStore::new(), LogoutScope::default())
            .await
            .unwrap();
        session.login(Role::Treasurer).await.unwrap();

        assert_eq!(session.current_role().await, Some(Role::Treasurer));
        assert_eq!(
            session.store().get(ROLE_KEY).await.unwrap().as_deref(),
            Some("treasurer")
        );
    }

    #[tokio::test]
    async fn test_restore_reads_persisted_role() {
        let store = InMemoryKeyValueStore::new();
        store.set(ROLE_KEY, "student").await.unwrap();

        let session = SessionContext::restore(store, LogoutScope::default())
            .await
            .unwrap();
        assert_eq!(session.current_role().await, Some(Role::Student));
    }

    #[tokio::test]
    async fn test_restore_ignores_unknown_role() {
        let store = InMemoryKeyValueStore::new();
        store.set(ROLE_KEY, "superuser").await.unwrap();

        let session = SessionContext::restore(store, LogoutScope::default())
            .await
            .unwrap();
        assert_eq!(session.current_role().await, None);
    }

    #[tokio::test]
    async fn test_logout_everything_wipes_store() {
        let store = InMemoryKeyValueStore::new();
        store.set("theme", "dark").await.unwrap();
        let session = SessionContext::restore(store, LogoutScope::Everything)
            .await
            .unwrap();
        session.login(Role::Student).await.unwrap();

        session.logout().await.unwrap();

        assert_eq!(session.current_role().await, None);
        assert!(session.store().is_empty().await);
    }

    #[tokio::test]
    async fn test_logout_role_only_keeps_other_keys() {
        let store = InMemoryKeyValueStore::new();
        store.set("theme", "dark").await.unwrap();
        let session = SessionContext::restore(store, LogoutScope::RoleOnly)
            .await
            .unwrap();
        session.login(Role::Student).await.unwrap();

        session.logout().await.unwrap();

        assert_eq!(session.current_role().await, None);
        assert_eq!(session.store().get(ROLE_KEY).await.unwrap(), None);
        assert_eq!(
            session.store().get("theme").await.unwrap().as_deref(),
            Some("dark")
        );
    }

    #[tokio::test]
    async fn test_refresh_picks_up_external_change() {
        let session = SessionContext::restore(InMemoryKeyValueStore::new(), LogoutScope::default())
            .await
            .unwrap();
        session.store().set(ROLE_KEY, "treasurer").await.unwrap();
        assert_eq!(session.current_role().await, None);

        let role = session.refresh().await.unwrap();
        assert_eq!(role, Some(Role::Treasurer));
        assert_eq!(session.current_role().await, Some(Role::Treasurer));
    }

    #[tokio::test]
    async fn test_require_checks_role() {
        let session = SessionContext::restore(InMemoryKeyValueStore::new(), LogoutScope::default())
            .await
            .unwrap();
        assert_eq!(
            session.require(Role::Treasurer).await,
            Err(AccessDenied {
                required: Some(Role::Treasurer),
                actual: None,
            })
        );
        assert!(session.require_login().await.is_err());

        session.login(Role::Student).await.unwrap();
        assert_eq!(
            session.require(Role::Treasurer).await,
            Err(AccessDenied {
                required: Some(Role::Treasurer),
                actual: Some(Role::Student),
            })
        );
        assert_eq!(session.require(Role::Student).await, Ok(Role::Student));
        assert_eq!(session.require_login().await, Ok(Role::Student));
    }

    #[tokio::test]
    async fn test_session_survives_restart_with_file_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let first = SessionContext::restore(FileKeyValueStore::new(&path), LogoutScope::default())
            .await
            .unwrap();
        first.login(Role::Treasurer).await.unwrap();
        drop(first);

        let second = SessionContext::restore(FileKeyValueStore::new(&path), LogoutScope::default())
            .await
            .unwrap();
        assert_eq!(second.current_role().await, Some(Role::Treasurer));

        second.logout().await.unwrap();
        let third = SessionContext::restore(FileKeyValueStore::new(&path), LogoutScope::default())
            .await
            .unwrap();
        assert_eq!(third.current_role().await, None);
    }

    #[test]
    fn test_logout_scope_from_config() {
        let mut config = SessionConfig::default();
        assert_eq!(LogoutScope::from(&config), LogoutScope::Everything);
        config.clear_all_on_logout = false;
        assert_eq!(LogoutScope::from(&config), LogoutScope::RoleOnly);
    }
}
