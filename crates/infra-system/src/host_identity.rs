// Host identity provider
// reason: sysinfo for cross-platform host name lookup
use dynaq_core::port::IdentityProvider;
use sysinfo::System;
use tracing::{debug, warn};

/// Environment variable that overrides the host name (e.g. a platform dyno name)
pub const IDENTITY_OVERRIDE_ENV: &str = "DYNAQ_WORKER_ID";

/// Used when neither the override nor the host name is available
pub const FALLBACK_IDENTITY: &str = "localhost";

/// Worker identity: explicit override, else the machine's host name
pub struct HostIdentityProvider {
    override_identity: Option<String>,
}

impl HostIdentityProvider {
    /// Read the override from `DYNAQ_WORKER_ID`
    pub fn from_env() -> Self {
        Self::new(std::env::var(IDENTITY_OVERRIDE_ENV).ok())
    }

    pub fn new(override_identity: Option<String>) -> Self {
        Self {
            override_identity: override_identity
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
        }
    }
}

impl IdentityProvider for HostIdentityProvider {
    fn identity(&self) -> String {
        if let Some(identity) = &self.override_identity {
            debug!(identity = %identity, "Using identity override");
            return identity.clone();
        }

        match System::host_name() {
            Some(name) if !name.trim().is_empty() => name,
            _ => {
                warn!("Host name unavailable, using {}", FALLBACK_IDENTITY);
                FALLBACK_IDENTITY.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_wins() {
        let provider = HostIdentityProvider::new(Some(" web.1 ".to_string()));
        assert_eq!(provider.identity(), "web.1");
    }

    #[test]
    fn test_blank_override_ignored() {
        let provider = HostIdentityProvider::new(Some("  ".to_string()));
        assert!(!provider.identity().is_empty());
    }

    #[test]
    fn test_host_name_used_without_override() {
        let provider = HostIdentityProvider::new(None);
        assert!(!provider.identity().trim().is_empty());
    }
}
