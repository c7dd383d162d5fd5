//! Session store — the single owned state cell dependents subscribe to.
//!
//! DESIGN
//! ======
//! One tokio `watch` channel holds the latest [`SessionSnapshot`]. The
//! manager writes through [`SessionStore`]; dependents hold cloned
//! [`SessionWatch`] handles and either read the current snapshot
//! synchronously or await changes. Readiness is one-way: once set it never
//! reverts, including across manager deactivation.

use tokio::sync::watch;

use crate::provider::AuthChange;
use crate::session::{Session, SessionPhase};

// =============================================================================
// SNAPSHOT
// =============================================================================

/// The session value published to dependents, with its readiness flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    /// Latest reconciled session record.
    pub session: Session,
    /// `false` until the first reconciliation; `true` forever after.
    pub ready: bool,
}

impl SessionSnapshot {
    /// Lifecycle phase derived from readiness and the session record.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        if !self.ready {
            SessionPhase::Unknown
        } else if self.session.is_authenticated() {
            SessionPhase::Authenticated
        } else {
            SessionPhase::Anonymous
        }
    }
}

// =============================================================================
// STORE
// =============================================================================

/// Owning side of the session state cell.
pub struct SessionStore {
    tx: watch::Sender<SessionSnapshot>,
}

impl SessionStore {
    /// New store: anonymous session, not ready.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(SessionSnapshot { session: Session::anonymous(), ready: false });
        Self { tx }
    }

    /// Replace the session wholesale from a provider notification.
    ///
    /// Marks the store ready: once a notification has been reconciled the
    /// session contents are trustworthy by definition.
    pub fn reconcile(&self, change: &AuthChange) {
        let session = match change {
            AuthChange::SignedIn(descriptor) => Session::from_descriptor(descriptor),
            AuthChange::SignedOut => Session::anonymous(),
        };
        self.tx.send_modify(|snapshot| {
            snapshot.session = session;
            snapshot.ready = true;
        });
    }

    /// Flip the readiness flag. Idempotent; never reverts.
    pub fn mark_ready(&self) {
        self.tx.send_if_modified(|snapshot| {
            let changed = !snapshot.ready;
            snapshot.ready = true;
            changed
        });
    }

    /// Optimistic sign-out reset: session becomes anonymous, readiness is
    /// left untouched.
    pub fn clear(&self) {
        self.tx.send_if_modified(|snapshot| {
            let changed = snapshot.session.is_authenticated();
            snapshot.session = Session::anonymous();
            changed
        });
    }

    /// Current snapshot, read synchronously.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.tx.borrow().clone()
    }

    /// New read handle onto this store.
    #[must_use]
    pub fn watch(&self) -> SessionWatch {
        SessionWatch { rx: self.tx.subscribe() }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// WATCH HANDLE
// =============================================================================

/// Cheap cloneable read handle onto the session store.
#[derive(Clone)]
pub struct SessionWatch {
    rx: watch::Receiver<SessionSnapshot>,
}

impl SessionWatch {
    /// Current snapshot, read synchronously.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.rx.borrow().clone()
    }

    /// Wait until the snapshot satisfies `accept`, returning that snapshot.
    /// Checks the current value first, so an already-satisfied condition
    /// resolves immediately.
    ///
    /// # Errors
    ///
    /// Returns an error if the store has been dropped.
    pub async fn wait_for(
        &mut self,
        accept: impl FnMut(&SessionSnapshot) -> bool,
    ) -> Result<SessionSnapshot, watch::error::RecvError> {
        let snapshot = self.rx.wait_for(accept).await?;
        Ok((*snapshot).clone())
    }

    /// Wait for the next published snapshot after the last one this handle
    /// observed.
    ///
    /// # Errors
    ///
    /// Returns an error if the store has been dropped.
    pub async fn changed(&mut self) -> Result<SessionSnapshot, watch::error::RecvError> {
        self.rx.changed().await?;
        Ok(self.rx.borrow_and_update().clone())
    }

    /// Wait until the store is ready. Resolves immediately when it already is.
    ///
    /// # Errors
    ///
    /// Returns an error if the store has been dropped.
    pub async fn ready(&mut self) -> Result<SessionSnapshot, watch::error::RecvError> {
        self.wait_for(|snapshot| snapshot.ready).await
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
