//! Shared bearer credentials.
//!
//! The access token authorizes every call; the refresh token renews it once
//! when the server rejects it. Clones of a [`TokenStore`] share the same
//! pair, so a refresh performed by one request is seen by the next.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::types::AuthTokens;

#[derive(Debug, Default)]
struct Tokens {
    access: Option<String>,
    refresh: Option<String>,
}

/// Access/refresh token pair behind an async lock.
#[derive(Debug, Clone, Default)]
pub struct TokenStore {
    inner: Arc<RwLock<Tokens>>,
}

impl TokenStore {
    /// An empty store (signed out).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A store seeded with whichever tokens the caller already has.
    #[must_use]
    pub fn from_parts(access: Option<String>, refresh: Option<String>) -> Self {
        Self { inner: Arc::new(RwLock::new(Tokens { access, refresh })) }
    }

    /// Replace both tokens, e.g. after a login.
    pub async fn set(&self, tokens: AuthTokens) {
        let mut guard = self.inner.write().await;
        guard.access = Some(tokens.access);
        guard.refresh = Some(tokens.refresh);
    }

    /// Store a renewed access token, and the rotated refresh token if the server sent one.
    pub async fn renew(&self, access: String, refresh: Option<String>) {
        let mut guard = self.inner.write().await;
        guard.access = Some(access);
        if refresh.is_some() {
            guard.refresh = refresh;
        }
    }

    /// Forget both tokens (logout or session teardown).
    pub async fn clear(&self) {
        let mut guard = self.inner.write().await;
        guard.access = None;
        guard.refresh = None;
    }

    pub async fn access(&self) -> Option<String> {
        self.inner.read().await.access.clone()
    }

    pub async fn refresh(&self) -> Option<String> {
        self.inner.read().await.refresh.clone()
    }

    /// Both tokens, if both are present.
    pub async fn pair(&self) -> Option<AuthTokens> {
        let guard = self.inner.read().await;
        Some(AuthTokens { access: guard.access.clone()?, refresh: guard.refresh.clone()? })
    }

    /// Whether an access token is held.
    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.access.is_some()
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod tests;
