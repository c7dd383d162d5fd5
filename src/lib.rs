//! # auth-session
//!
//! Client-side authentication session manager. Tracks the current user's
//! signed-in/signed-out state against an external identity provider,
//! reconciles provider notifications into a single locally owned session
//! record, and exposes that record plus the credential operations
//! (sign-up, sign-in, federated sign-in, sign-out, password reset)
//! through one subscription point.
//!
//! The identity provider itself is a black box behind the
//! [`IdentityProvider`] trait; this crate owns no token formats, consent
//! flows, or wire protocols.

pub mod config;
pub mod manager;
pub mod provider;
pub mod session;
pub mod store;

pub use config::SessionConfig;
pub use manager::SessionManager;
pub use provider::{AuthChange, FederatedProvider, IdentityProvider, ProviderError, UserDescriptor};
pub use session::{Session, SessionPhase};
pub use store::{SessionSnapshot, SessionStore, SessionWatch};
