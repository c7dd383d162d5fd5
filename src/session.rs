//! Session record and lifecycle phases.
//!
//! DESIGN
//! ======
//! `Session` is replaced wholesale on every reconciliation, never field-wise
//! mutated. Its fields are private so the "email only when authenticated"
//! invariant is enforced by the constructors rather than by every caller.

use serde::{Deserialize, Serialize};

use crate::provider::UserDescriptor;

/// The locally reconciled record of whether a user is authenticated.
///
/// Invariant: `identity` is set iff a user is signed in; when it is absent,
/// `email` is absent too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    identity: Option<String>,
    email: Option<String>,
}

impl Session {
    /// The signed-out session. Also the construction-time initial value.
    #[must_use]
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A signed-in session for the given opaque identity.
    #[must_use]
    pub fn authenticated(identity: impl Into<String>, email: Option<String>) -> Self {
        Self { identity: Some(identity.into()), email }
    }

    /// Build a signed-in session from a provider notification payload.
    #[must_use]
    pub fn from_descriptor(descriptor: &UserDescriptor) -> Self {
        Self::authenticated(descriptor.id.clone(), descriptor.email.clone())
    }

    /// Opaque identity of the signed-in user, if any.
    #[must_use]
    pub fn identity(&self) -> Option<&str> {
        self.identity.as_deref()
    }

    /// Email of the signed-in user, when known.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Where the session is in its lifecycle.
///
/// `Unknown` covers the window between manager construction and the first
/// provider reconciliation; session contents must not be trusted until the
/// phase leaves `Unknown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Pre-ready: no reconciliation has happened yet.
    Unknown,
    /// Ready, no user signed in.
    Anonymous,
    /// Ready, a user is signed in.
    Authenticated,
}

#[cfg(test)]
#[path = "session_test.rs"]
mod tests;
