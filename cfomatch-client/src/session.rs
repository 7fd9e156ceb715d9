//! Session bridge.
//!
//! The authentication session is owned by an external provider; this module
//! only propagates its changes into the fetch client so credential headers
//! stay current. There is no refetch-on-focus or polling; staleness is
//! bounded by explicit session-change events.

use cfomatch_core::Session;
use tokio::sync::watch;
use tracing::debug;

// ============================================================================
// Session Bridge
// ============================================================================

/// Receives session changes from the external auth provider and publishes
/// them to subscribed clients and stores.
#[derive(Debug)]
pub struct SessionBridge {
    tx: watch::Sender<Option<Session>>,
}

impl SessionBridge {
    /// Creates a bridge with no current session.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(None);
        Self { tx }
    }

    /// Pushes the latest session snapshot (or its absence).
    ///
    /// Every call publishes, even when the new value equals the old one;
    /// the provider signals changes by identity, not deep equality.
    pub fn on_session_change(&self, session: Option<Session>) {
        debug!(present = session.is_some(), "Session changed");
        self.tx.send_replace(session);
    }

    /// Subscribes a consumer to session snapshots.
    pub fn subscribe(&self) -> SessionHandle {
        SessionHandle {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SessionBridge {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Session Handle
// ============================================================================

/// Read side of the bridge: snapshot reads plus change notification.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    rx: watch::Receiver<Option<Session>>,
}

impl SessionHandle {
    /// Creates a handle that never carries a session. Useful for clients
    /// talking only to unauthenticated endpoints, and for tests.
    pub fn detached() -> Self {
        SessionBridge::new().subscribe()
    }

    /// Returns the current session snapshot.
    pub fn current(&self) -> Option<Session> {
        self.rx.borrow().clone()
    }

    /// Returns true when a session is present.
    pub fn is_authenticated(&self) -> bool {
        self.rx.borrow().is_some()
    }

    /// Waits for the next published change. Returns false when the bridge
    /// has been dropped.
    pub async fn changed(&mut self) -> bool {
        self.rx.changed().await.is_ok()
    }
}

// ============================================================================
// Tests
// ============================================================================
