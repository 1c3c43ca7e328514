use std::sync::Arc;

use tracing::{debug, warn};

use crate::{
    config::TOKEN_TTL_MILLIS,
    error::{Error, Result},
    management::store::{
        CredentialStore, KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP,
    },
    spotify::SpotifyApi,
    types::Credential,
    utils,
};

impl Credential {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: refresh_token.into(),
            issued_at_millis: utils::now_millis(),
        }
    }

    /// Reads the credential fields. `None` when no access token is stored.
    pub async fn load(store: &dyn CredentialStore) -> Result<Option<Self>> {
        let Some(access_token) = store.get(KEY_ACCESS_TOKEN).await? else {
            return Ok(None);
        };

        let refresh_token = store.get(KEY_REFRESH_TOKEN).await?.unwrap_or_default();
        let issued_at_millis = store
            .get(KEY_TOKEN_TIMESTAMP)
            .await?
            .and_then(|ts| ts.trim().parse::<i64>().ok())
            .unwrap_or(0);

        Ok(Some(Self {
            access_token,
            refresh_token,
            issued_at_millis,
        }))
    }

    pub async fn persist(&self, store: &dyn CredentialStore) -> Result<()> {
        store.set(KEY_ACCESS_TOKEN, &self.access_token).await?;
        store.set(KEY_REFRESH_TOKEN, &self.refresh_token).await?;
        store
            .set(KEY_TOKEN_TIMESTAMP, &self.issued_at_millis.to_string())
            .await
    }

    /// Removes all three credential fields. Every removal is attempted even
    /// when an earlier one fails; the first error is returned.
    pub async fn evict(store: &dyn CredentialStore) -> Result<()> {
        let mut first_error = None;
        for key in [KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP] {
            if let Err(e) = store.remove(key).await {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Timestamps from the future are treated as stale.
    pub fn is_stale_at(&self, now_millis: i64) -> bool {
        self.issued_at_millis > now_millis
            || now_millis.saturating_sub(self.issued_at_millis) > TOKEN_TTL_MILLIS
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale_at(utils::now_millis())
    }
}

/// Owns the session credential: hands out valid access tokens, refreshes
/// stale ones through the relay, and evicts everything on auth failure.
#[derive(Clone)]
pub struct TokenManager {
    store: Arc<dyn CredentialStore>,
    api: SpotifyApi,
}

impl TokenManager {
    pub fn new(store: Arc<dyn CredentialStore>, api: SpotifyApi) -> Self {
        TokenManager { store, api }
    }

    /// Stores a freshly issued credential handed over by the login flow.
    pub async fn login(&self, access_token: &str, refresh_token: &str) -> Result<Credential> {
        let credential = Credential::new(access_token, refresh_token);
        credential.persist(self.store.as_ref()).await?;
        Ok(credential)
    }

    pub async fn logout(&self) -> Result<()> {
        self.evict().await
    }

    pub async fn status(&self) -> Result<Option<Credential>> {
        Credential::load(self.store.as_ref()).await
    }

    /// The stored access token as is, without any refresh.
    pub async fn current_access_token(&self) -> Result<Option<String>> {
        Ok(self.store.get(KEY_ACCESS_TOKEN).await?)
    }

    pub async fn get_valid_access_token(&self) -> Result<String> {
        let Some(credential) = Credential::load(self.store.as_ref()).await? else {
            return Err(Error::Unauthenticated);
        };

        if !credential.is_stale() {
            return Ok(credential.access_token);
        }

        debug!(
            issued_at = credential.issued_at_millis,
            "access token is stale, refreshing"
        );
        let refreshed = self.refresh(&credential.refresh_token).await?;
        Ok(refreshed.access_token)
    }

    /// Exchanges the refresh token for a new access token. Any failure clears
    /// the stored credential and reports `Unauthenticated`.
    pub async fn refresh(&self, refresh_token: &str) -> Result<Credential> {
        if refresh_token.trim().is_empty() {
            warn!("no refresh token stored, clearing credential");
            self.evict_quietly().await;
            return Err(Error::Unauthenticated);
        }

        let response = match self.api.refresh_access_token(refresh_token).await {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "token refresh failed, clearing credential");
                self.evict_quietly().await;
                return Err(Error::Unauthenticated);
            }
        };

        let credential = Credential {
            access_token: response.access_token,
            refresh_token: utils::non_empty(response.refresh_token)
                .unwrap_or_else(|| refresh_token.to_string()),
            issued_at_millis: utils::now_millis(),
        };

        if let Err(e) = credential.persist(self.store.as_ref()).await {
            warn!(error = %e, "failed to persist refreshed credential");
            self.evict_quietly().await;
            return Err(e);
        }

        Ok(credential)
    }

    pub async fn evict(&self) -> Result<()> {
        Credential::evict(self.store.as_ref()).await
    }

    async fn evict_quietly(&self) {
        if let Err(e) = self.evict().await {
            warn!(error = %e, "failed to clear stored credential");
        }
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;
    use crate::management::store::MemoryCredentialStore;

    /// Memory store whose `remove` fails for one key.
    struct FailingRemoveStore {
        inner: MemoryCredentialStore,
        failing_key: &'static str,
    }

    #[async_trait]
    impl CredentialStore for FailingRemoveStore {
        async fn get(&self, key: &str) -> Result<Option<String>> {
            self.inner.get(key).await
        }

        async fn set(&self, key: &str, value: &str) -> Result<()> {
            self.inner.set(key, value).await
        }

        async fn remove(&self, key: &str) -> Result<()> {
            if key == self.failing_key {
                return Err(Error::Store("io".to_string()));
            }
            self.inner.remove(key).await
        }
    }

    fn credential_issued_at(issued_at_millis: i64) -> Credential {
        Credential {
            access_token: "a".to_string(),
            refresh_token: "r".to_string(),
            issued_at_millis,
        }
    }

    #[test]
    fn test_fresh_credential_is_not_stale() {
        let credential = Credential::new("a", "r");
        assert!(!credential.is_stale());
    }

    #[test]
    fn test_stale_boundary() {
        let issued = 1_700_000_000_000;
        let credential = credential_issued_at(issued);

        assert!(!credential.is_stale_at(issued));
        assert!(!credential.is_stale_at(issued + 3_540_000));
        assert!(credential.is_stale_at(issued + 3_540_001));
    }

    #[test]
    fn test_out_of_range_timestamps_are_stale() {
        let now = 1_700_000_000_000;

        assert!(credential_issued_at(i64::MIN).is_stale_at(now));
        assert!(credential_issued_at(i64::MAX).is_stale_at(now));
        assert!(credential_issued_at(now + 1).is_stale_at(now));
        assert!(credential_issued_at(-1).is_stale_at(i64::MAX));
    }

    #[tokio::test]
    async fn test_extreme_stored_timestamp_is_stale() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(KEY_ACCESS_TOKEN, "old").await.unwrap();
        store
            .set(KEY_TOKEN_TIMESTAMP, &i64::MIN.to_string())
            .await
            .unwrap();

        let tokens = TokenManager::new(
            store.clone(),
            SpotifyApi::new("http://127.0.0.1:9", "http://127.0.0.1:9/refresh_token"),
        );

        // stale with no refresh token: evicted instead of handed out
        assert!(matches!(
            tokens.get_valid_access_token().await,
            Err(Error::Unauthenticated)
        ));
        assert_eq!(store.get(KEY_ACCESS_TOKEN).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_load_without_access_token_is_none() {
        let store = MemoryCredentialStore::new();
        store.set(KEY_REFRESH_TOKEN, "r").await.unwrap();
        assert!(Credential::load(&store).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_load_defaults_missing_fields() {
        let store = MemoryCredentialStore::new();
        store.set(KEY_ACCESS_TOKEN, "a").await.unwrap();
        store.set(KEY_TOKEN_TIMESTAMP, "garbage").await.unwrap();

        let credential = Credential::load(&store).await.unwrap().unwrap();
        assert_eq!(credential.refresh_token, "");
        assert_eq!(credential.issued_at_millis, 0);
        assert!(credential.is_stale());
    }

    #[tokio::test]
    async fn test_persist_then_evict() {
        let store = MemoryCredentialStore::new();
        let credential = credential_issued_at(123);
        credential.persist(&store).await.unwrap();
        assert_eq!(Credential::load(&store).await.unwrap(), Some(credential));

        Credential::evict(&store).await.unwrap();
        for key in [KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP] {
            assert_eq!(store.get(key).await.unwrap(), None);
        }
    }

    #[tokio::test]
    async fn test_evict_continues_past_failed_removal() {
        for failing_key in [KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP] {
            let store = FailingRemoveStore {
                inner: MemoryCredentialStore::new(),
                failing_key,
            };
            credential_issued_at(1).persist(&store).await.unwrap();

            assert!(matches!(
                Credential::evict(&store).await,
                Err(Error::Store(_))
            ));
            for key in [KEY_ACCESS_TOKEN, KEY_REFRESH_TOKEN, KEY_TOKEN_TIMESTAMP] {
                assert_eq!(
                    store.get(key).await.unwrap().is_some(),
                    key == failing_key,
                    "failing {} checking {}",
                    failing_key,
                    key
                );
            }
        }
    }

    #[tokio::test]
    async fn test_missing_credential_is_unauthenticated() {
        let store: Arc<dyn CredentialStore> = Arc::new(MemoryCredentialStore::new());
        let tokens = TokenManager::new(
            store,
            SpotifyApi::new("http://127.0.0.1:9", "http://127.0.0.1:9/refresh_token"),
        );

        assert!(matches!(
            tokens.get_valid_access_token().await,
            Err(Error::Unauthenticated)
        ));
    }

    #[tokio::test]
    async fn test_stale_without_refresh_token_evicts() {
        let store = Arc::new(MemoryCredentialStore::new());
        store.set(KEY_ACCESS_TOKEN, "old").await.unwrap();
        store.set(KEY_TOKEN_TIMESTAMP, "0").await.unwrap();

        let tokens = TokenManager::new(
            store.clone(),
            SpotifyApi::new("http://127.0.0.1:9", "http://127.0.0.1:9/refresh_token"),
        );

        assert!(matches!(
            tokens.get_valid_access_token().await,
            Err(Error::Unauthenticated)
        ));
        assert_eq!(store.get(KEY_ACCESS_TOKEN).await.unwrap(), None);
    }
}
