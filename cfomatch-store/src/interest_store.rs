//! Interest store state machine.
//!
//! Keeps the in-memory set of favorited targets consistent with the server.
//! Observable via a watch channel for UI updates, like the other stores in
//! this workspace.
//!
//! Lifecycle: `Uninitialized` until the first fetch is triggered, `Loading`
//! while a list fetch is in flight, then `Ready` (set replaced wholesale)
//! or `Error` (set cleared to empty, message stored). Mutations update the
//! set only after the server confirms; on failure the set is left exactly
//! as it was.

use std::sync::Arc;

use tokio::sync::{watch, RwLock};
use tracing::{debug, warn};

use cfomatch_client::SessionHandle;
use cfomatch_core::{ApiError, ErrorCode, Interest, InterestStats, InterestsApi, TargetType};

use crate::fallback::FallbackCache;

// ============================================================================
// User-Facing Messages
// ============================================================================

const AUTH_REQUIRED: &str = "Authentication required";
const SESSION_EXPIRED: &str = "Session expired, please sign in again";
const NETWORK_FAILED: &str = "Network error, please try again";
const GENERIC_FAILED: &str = "Something went wrong, please try again";

/// Translates an API failure into a user-facing message. Server-authored
/// messages are shown as-is, whatever their code; synthesized transport,
/// decode, and raw-HTTP messages get generic wording.
fn user_message(error: &ApiError) -> String {
    if error.server_message {
        error.message.clone()
    } else if error.code == ErrorCode::NetworkError {
        NETWORK_FAILED.to_string()
    } else {
        GENERIC_FAILED.to_string()
    }
}

// ============================================================================
// Sync State
// ============================================================================

/// Where the store is in its synchronization lifecycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    /// No fetch attempted yet.
    #[default]
    Uninitialized,
    /// A list fetch is in flight.
    Loading,
    /// The set reflects the last successful fetch.
    Ready,
    /// The last fetch failed; the set is empty and `error` holds a message.
    Error,
}

// ============================================================================
// Inner State
// ============================================================================

/// Internal state for the interest store.
#[derive(Default)]
struct StoreInner {
    /// Synchronization state.
    state: SyncState,
    /// The favorited targets, server-confirmed.
    interests: Vec<Interest>,
    /// Last user-facing error, if any.
    error: Option<String>,
    /// Best-effort IDs loaded from the fallback cache after a failed fetch.
    fallback_ids: Vec<String>,
}

// ============================================================================
// Interest Store
// ============================================================================

/// In-memory favorites set synchronized with the server.
///
/// Generic over [`InterestsApi`] so a root composition point injects the
/// HTTP implementation and tests inject an in-memory one. All operations
/// absorb failures: callers get a boolean and read [`error`](Self::error)
/// for display.
pub struct InterestStore<A: InterestsApi> {
    api: Arc<A>,
    session: SessionHandle,
    fallback: Option<FallbackCache>,
    inner: Arc<RwLock<StoreInner>>,
    notify: watch::Sender<u64>,
    version: Arc<RwLock<u64>>,
}

impl<A: InterestsApi> InterestStore<A> {
    /// Creates a store over the given API and session handle.
    pub fn new(api: Arc<A>, session: SessionHandle) -> Self {
        let (notify, _) = watch::channel(0);
        Self {
            api,
            session,
            fallback: None,
            inner: Arc::new(RwLock::new(StoreInner::default())),
            notify,
            version: Arc::new(RwLock::new(0)),
        }
    }

    /// Enables the on-disk fallback cache.
    pub fn with_fallback(mut self, fallback: FallbackCache) -> Self {
        self.fallback = Some(fallback);
        self
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    /// Returns the synchronization state.
    pub async fn state(&self) -> SyncState {
        self.inner.read().await.state
    }

    /// Returns the current interest set.
    pub async fn interests(&self) -> Vec<Interest> {
        self.inner.read().await.interests.clone()
    }

    /// Returns true when the target is in the local set.
    pub async fn is_interested(&self, target_id: &str) -> bool {
        self.inner
            .read()
            .await
            .interests
            .iter()
            .any(|i| i.target_id == target_id)
    }

    /// Returns the last user-facing error.
    pub async fn error(&self) -> Option<String> {
        self.inner.read().await.error.clone()
    }

    /// Clears the stored error.
    pub async fn clear_error(&self) {
        self.inner.write().await.error = None;
        self.notify_change().await;
    }

    /// Returns the best-effort fallback IDs loaded after a failed fetch.
    pub async fn fallback_ids(&self) -> Vec<String> {
        self.inner.read().await.fallback_ids.clone()
    }

    /// Computes counts over the current set.
    pub async fn stats(&self) -> InterestStats {
        InterestStats::from_interests(&self.inner.read().await.interests)
    }

    /// Subscribes to store changes.
    pub fn subscribe(&self) -> watch::Receiver<u64> {
        self.notify.subscribe()
    }

    async fn notify_change(&self) {
        let mut version = self.version.write().await;
        *version += 1;
        let _ = self.notify.send(*version);
    }

    // ========================================================================
    // Synchronization
    // ========================================================================

    /// Triggers the first list fetch once a session is available.
    ///
    /// Returns true when the store is `Ready` afterwards. Call this when
    /// the actor's session becomes available; subsequent calls are cheap.
    pub async fn ensure_loaded(&self) -> bool {
        if !self.session.is_authenticated() {
            return false;
        }
        let state = self.inner.read().await.state;
        match state {
            SyncState::Uninitialized => self.refetch().await,
            SyncState::Ready => true,
            SyncState::Loading | SyncState::Error => false,
        }
    }

    /// Fetches the list and replaces the set wholesale.
    ///
    /// On failure the set is cleared to empty (never left partially
    /// fetched), a message is stored, and the fallback IDs are loaded from
    /// disk best-effort. Returns true on success.
    pub async fn refetch(&self) -> bool {
        if !self.session.is_authenticated() {
            self.set_error(AUTH_REQUIRED).await;
            return false;
        }

        {
            let mut inner = self.inner.write().await;
            inner.state = SyncState::Loading;
        }
        self.notify_change().await;

        match self.api.list_interests().await {
            Ok(interests) => {
                let ids: Vec<String> = interests.iter().map(|i| i.target_id.clone()).collect();
                {
                    let mut inner = self.inner.write().await;
                    inner.state = SyncState::Ready;
                    inner.interests = interests;
                    inner.error = None;
                    inner.fallback_ids.clear();
                }
                self.notify_change().await;
                debug!(count = ids.len(), "Interest list replaced");

                if let Some(fallback) = &self.fallback {
                    if let Err(e) = fallback.store(&ids).await {
                        warn!(error = %e, "Failed to write fallback cache");
                    }
                }
                true
            }
            Err(error) => {
                let message = if error.is_unauthorized() {
                    SESSION_EXPIRED.to_string()
                } else {
                    user_message(&error)
                };
                let fallback_ids = match &self.fallback {
                    Some(fallback) => fallback.load().await.unwrap_or_default(),
                    None => Vec::new(),
                };
                {
                    let mut inner = self.inner.write().await;
                    inner.state = SyncState::Error;
                    inner.interests.clear();
                    inner.error = Some(message);
                    inner.fallback_ids = fallback_ids;
                }
                self.notify_change().await;
                warn!(code = %error.code, status = error.status, "Interest list fetch failed");
                false
            }
        }
    }

    // ========================================================================
    // Mutations
    // ========================================================================

    /// Favorites a target.
    ///
    /// Idempotent: a target already in the set succeeds without a network
    /// call. The set is updated only once the server confirms; a 409
    /// conflict means the server already holds the relationship and is
    /// treated as success.
    pub async fn add_interest(&self, target_id: &str, target_type: TargetType) -> bool {
        let Some(session) = self.session.current() else {
            self.set_error(AUTH_REQUIRED).await;
            return false;
        };

        if self.is_interested(target_id).await {
            debug!(target_id, "Already favorited, skipping");
            return true;
        }

        match self.api.add_interest(target_id, target_type).await {
            Ok(interest) => {
                self.push_interest(interest).await;
                true
            }
            Err(error) if error.code == ErrorCode::Conflict => {
                // The server already has it; reflect membership locally.
                // Display fields stay empty, they are best-effort anyway.
                debug!(target_id, "Interest already exists on server");
                self.push_interest(Interest::new(session.user_id, target_id, target_type))
                    .await;
                true
            }
            Err(error) => {
                self.set_error(user_message(&error)).await;
                false
            }
        }
    }

    /// Unfavorites a target. The set is filtered only once the server
    /// confirms; on failure it is left unchanged.
    pub async fn remove_interest(&self, target_id: &str) -> bool {
        if !self.session.is_authenticated() {
            self.set_error(AUTH_REQUIRED).await;
            return false;
        }

        match self.api.remove_interest(target_id).await {
            Ok(()) => {
                {
                    let mut inner = self.inner.write().await;
                    inner.interests.retain(|i| i.target_id != target_id);
                    inner.error = None;
                }
                self.notify_change().await;
                debug!(target_id, "Interest removed");
                true
            }
            Err(error) => {
                self.set_error(user_message(&error)).await;
                false
            }
        }
    }

    /// Flips membership for a target, dispatching to add or remove based
    /// on the local set.
    ///
    /// This is not an atomic server-side toggle: the direction is decided
    /// from last-known local membership, so overlapping toggles on the
    /// same target can race and send the same direction twice.
    pub async fn toggle_interest(&self, target_id: &str, target_type: TargetType) -> bool {
        if self.is_interested(target_id).await {
            self.remove_interest(target_id).await
        } else {
            self.add_interest(target_id, target_type).await
        }
    }

    async fn push_interest(&self, interest: Interest) {
        {
            let mut inner = self.inner.write().await;
            inner.interests.push(interest);
            inner.error = None;
        }
        self.notify_change().await;
    }

    async fn set_error(&self, message: impl Into<String>) {
        {
            let mut inner = self.inner.write().await;
            inner.error = Some(message.into());
        }
        self.notify_change().await;
    }
}

impl<A: InterestsApi> Clone for InterestStore<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            session: self.session.clone(),
            fallback: self.fallback.clone(),
            inner: Arc::clone(&self.inner),
            notify: self.notify.clone(),
            version: Arc::clone(&self.version),
        }
    }
}

impl<A: InterestsApi> std::fmt::Debug for InterestStore<A> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterestStore").finish_non_exhaustive()
    }
}

// ============================================================================
// Tests
// ============================================================================
