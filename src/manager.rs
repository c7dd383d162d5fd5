//! Session manager — subscription lifecycle and credential operations.
//!
//! ARCHITECTURE
//! ============
//! `SessionManager` owns the session store and holds the identity provider
//! behind a trait object. `activate` opens the provider's notification
//! stream and spawns a drain task that reconciles each change into the
//! store wholesale; `deactivate` aborts that task, which drops the stream
//! and unsubscribes. Credential operations forward the configured tenant
//! with every call and propagate provider failures unchanged.
//!
//! TRADE-OFFS
//! ==========
//! Sign-out clears the local session before the provider confirms. A
//! provider-side failure therefore leaves local and remote state
//! inconsistent; the signed-out local view is kept rather than
//! resurrecting a session the user asked to end.

use std::sync::{Arc, Mutex, PoisonError};

use tokio::task::JoinHandle;

use crate::config::SessionConfig;
use crate::provider::{FederatedProvider, IdentityProvider, ProviderError, UserDescriptor};
use crate::store::{SessionSnapshot, SessionStore, SessionWatch};

/// The single subscription point dependents read session state and invoke
/// credential operations through.
pub struct SessionManager {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<SessionStore>,
    config: SessionConfig,
    /// Drain task for the active subscription, if any.
    subscription: Mutex<Option<JoinHandle<()>>>,
}

impl SessionManager {
    #[must_use]
    pub fn new(provider: Arc<dyn IdentityProvider>, config: SessionConfig) -> Self {
        Self { provider, store: Arc::new(SessionStore::new()), config, subscription: Mutex::new(None) }
    }

    /// Construct with [`SessionConfig::from_env`].
    #[must_use]
    pub fn from_env(provider: Arc<dyn IdentityProvider>) -> Self {
        Self::new(provider, SessionConfig::from_env())
    }

    /// Configured tenant scope, if any.
    #[must_use]
    pub fn tenant(&self) -> Option<&str> {
        self.config.tenant.as_deref()
    }

    /// Configured federated provider descriptor.
    #[must_use]
    pub fn federated(&self) -> &FederatedProvider {
        &self.config.federated
    }

    // =========================================================================
    // SUBSCRIPTION LIFECYCLE
    // =========================================================================

    /// Establish the provider subscription and start reconciling.
    ///
    /// Marks the store ready once the subscription is established. At most
    /// one subscription is active at a time: calling this while already
    /// active is a no-op.
    pub fn activate(&self) {
        let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
        if slot.as_ref().is_some_and(|task| !task.is_finished()) {
            return;
        }

        let mut notifications = self.provider.subscribe();
        self.store.mark_ready();

        let store = Arc::clone(&self.store);
        *slot = Some(tokio::spawn(async move {
            while let Some(change) = notifications.recv().await {
                store.reconcile(&change);
            }
        }));
        tracing::debug!("session subscription active");
    }

    /// Cancel the provider subscription.
    ///
    /// No reconciliation happens after this returns, even if the provider
    /// emits further notifications. Readiness and the last reconciled
    /// session are left as they are; `activate` may be called again to open
    /// a fresh subscription.
    pub fn deactivate(&self) {
        let mut slot = self.subscription.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(task) = slot.take() {
            task.abort();
            tracing::debug!("session subscription cancelled");
        }
    }

    // =========================================================================
    // STATE ACCESS
    // =========================================================================

    /// New read handle onto the session store.
    #[must_use]
    pub fn watch(&self) -> SessionWatch {
        self.store.watch()
    }

    /// Current snapshot, read synchronously.
    #[must_use]
    pub fn snapshot(&self) -> SessionSnapshot {
        self.store.snapshot()
    }

    // =========================================================================
    // CREDENTIAL OPERATIONS
    // =========================================================================

    /// Register a new email/password account.
    ///
    /// # Errors
    ///
    /// Propagates the provider's rejection (email in use, weak password, ...).
    pub async fn create_account(&self, email: &str, password: &str) -> Result<UserDescriptor, ProviderError> {
        tracing::debug!(tenant = ?self.tenant(), "issuing account creation");
        let result = self.provider.create_account(self.tenant(), email, password).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "account creation failed");
        }
        result
    }

    /// Authenticate with an email/password pair.
    ///
    /// The session itself updates through the subscription when the
    /// provider emits the resulting state change, not from the returned
    /// descriptor.
    ///
    /// # Errors
    ///
    /// Propagates the provider's rejection (invalid credentials, user not
    /// found, account disabled, ...).
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<UserDescriptor, ProviderError> {
        tracing::debug!(tenant = ?self.tenant(), "issuing sign-in");
        let result = self.provider.sign_in(self.tenant(), email, password).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "sign-in failed");
        }
        result
    }

    /// Authenticate through the configured federated provider.
    ///
    /// # Errors
    ///
    /// Propagates the provider's rejection (popup closed, popup blocked,
    /// network error, ...).
    pub async fn sign_in_federated(&self) -> Result<UserDescriptor, ProviderError> {
        tracing::debug!(provider = %self.config.federated.provider_id, "issuing federated sign-in");
        let result = self.provider.sign_in_federated(self.tenant(), &self.config.federated).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "federated sign-in failed");
        }
        result
    }

    /// Send a password-reset message to the given email.
    ///
    /// # Errors
    ///
    /// Propagates the provider's rejection (user not found, invalid email).
    pub async fn send_password_reset(&self, email: &str) -> Result<(), ProviderError> {
        tracing::debug!(tenant = ?self.tenant(), "issuing password reset");
        let result = self.provider.send_password_reset(self.tenant(), email).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "password reset failed");
        }
        result
    }

    /// Sign out: clear the local session, then end the provider session.
    ///
    /// The local clear happens strictly before the provider call is issued
    /// and is not undone on failure.
    ///
    /// # Errors
    ///
    /// Propagates a provider-side sign-out failure; the local session stays
    /// cleared regardless.
    pub async fn sign_out(&self) -> Result<(), ProviderError> {
        self.store.clear();
        tracing::debug!("local session cleared, confirming sign-out with provider");
        let result = self.provider.sign_out(self.tenant()).await;
        if let Err(e) = &result {
            tracing::warn!(error = %e, "provider sign-out failed; local session stays cleared");
        }
        result
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.deactivate();
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
