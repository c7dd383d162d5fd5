//! Identity-provider seam — notification payloads, request operations, errors.
//!
//! DESIGN
//! ======
//! The provider is a black box behind [`IdentityProvider`]. Tenant scope is
//! passed per call rather than written onto a shared provider handle, so
//! concurrently pending requests can never observe each other's tenant.
//! Subscriptions are plain mpsc receivers; dropping the receiver is the
//! unsubscribe.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

// =============================================================================
// ERROR
// =============================================================================

/// Errors produced by identity-provider request operations.
///
/// These propagate to callers unchanged; this crate adds no retry,
/// backoff, or translation.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Account creation rejected: the email is already registered.
    #[error("email already in use")]
    EmailInUse,

    /// Account creation rejected: the password does not meet provider policy.
    #[error("password too weak")]
    WeakPassword,

    /// Sign-in rejected: the email/password pair is wrong.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// No account exists for the given email.
    #[error("user not found")]
    UserNotFound,

    /// The account exists but has been disabled by an administrator.
    #[error("account disabled")]
    AccountDisabled,

    /// The email address is malformed.
    #[error("invalid email")]
    InvalidEmail,

    /// Federated sign-in: the user closed the consent popup.
    #[error("sign-in popup closed by user")]
    PopupClosed,

    /// Federated sign-in: the browser blocked the consent popup.
    #[error("sign-in popup blocked")]
    PopupBlocked,

    /// The request could not reach the provider.
    #[error("network error: {0}")]
    Network(String),

    /// Any other provider-reported failure.
    #[error("provider error: {0}")]
    Provider(String),
}

// =============================================================================
// NOTIFICATION PAYLOADS
// =============================================================================

/// Basic identity attributes the provider knows about a signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserDescriptor {
    /// Provider-assigned opaque identifier.
    pub id: String,
    /// Email address, when the provider knows one.
    pub email: Option<String>,
}

/// One event on the provider's auth-state notification stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthChange {
    /// A user is signed in (initial state report or a new sign-in).
    SignedIn(UserDescriptor),
    /// No user is signed in.
    SignedOut,
}

/// Descriptor naming the federated identity provider used by
/// [`IdentityProvider::sign_in_federated`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FederatedProvider {
    /// Provider-namespaced id, e.g. `"google.com"`.
    pub provider_id: String,
}

impl FederatedProvider {
    #[must_use]
    pub fn new(provider_id: impl Into<String>) -> Self {
        Self { provider_id: provider_id.into() }
    }

    /// The default federated provider.
    #[must_use]
    pub fn google() -> Self {
        Self::new("google.com")
    }
}

// =============================================================================
// TRAIT
// =============================================================================

/// The external identity authority.
///
/// `tenant` carries the configured tenant scope per call; `None` means the
/// provider's default tenant. Implementations own all protocol detail
/// (token formats, consent popups, transport).
#[async_trait::async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Open a fresh auth-state notification stream.
    ///
    /// Each call is an independent subscription; dropping the receiver
    /// unsubscribes. Events arrive in provider emission order.
    fn subscribe(&self) -> mpsc::UnboundedReceiver<AuthChange>;

    /// Register a new email/password account.
    async fn create_account(
        &self,
        tenant: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<UserDescriptor, ProviderError>;

    /// Authenticate with an email/password pair.
    async fn sign_in(
        &self,
        tenant: Option<&str>,
        email: &str,
        password: &str,
    ) -> Result<UserDescriptor, ProviderError>;

    /// Authenticate through a federated provider (popup/redirect flow).
    async fn sign_in_federated(
        &self,
        tenant: Option<&str>,
        federated: &FederatedProvider,
    ) -> Result<UserDescriptor, ProviderError>;

    /// Send a password-reset message to the given email.
    async fn send_password_reset(&self, tenant: Option<&str>, email: &str) -> Result<(), ProviderError>;

    /// End the provider-side session.
    async fn sign_out(&self, tenant: Option<&str>) -> Result<(), ProviderError>;
}

#[cfg(test)]
#[path = "provider_test.rs"]
mod tests;
