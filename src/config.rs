//! Session configuration parsed from environment variables.

use crate::provider::FederatedProvider;

/// Federated provider used when `FEDERATED_PROVIDER_ID` is not set.
pub const DEFAULT_FEDERATED_PROVIDER_ID: &str = "google.com";

/// Configuration consumed by [`crate::SessionManager`].
///
/// Read once at construction; immutable for the process lifetime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    /// Tenant scope applied to every credential request. `None` means the
    /// provider's default tenant.
    pub tenant: Option<String>,
    /// Federated provider used by `sign_in_federated`.
    pub federated: FederatedProvider,
}

impl SessionConfig {
    /// Build session config from environment variables.
    ///
    /// Optional:
    /// - `TENANT_ID`: tenant scope; blank/whitespace treated as unset
    /// - `FEDERATED_PROVIDER_ID`: default `"google.com"`
    #[must_use]
    pub fn from_env() -> Self {
        let tenant = normalize(std::env::var("TENANT_ID").ok().as_deref());
        let federated = normalize(std::env::var("FEDERATED_PROVIDER_ID").ok().as_deref())
            .map_or_else(FederatedProvider::google, FederatedProvider::new);
        Self { tenant, federated }
    }
}

impl Default for SessionConfig {
    /// No tenant scope, default federated provider.
    fn default() -> Self {
        Self { tenant: None, federated: FederatedProvider::google() }
    }
}

fn normalize(raw: Option<&str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() { None } else { Some(trimmed.to_string()) }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
