//! Session identifiers attached to search analytics.

use std::sync::OnceLock;

/// Sentinel used when no session store is available.
pub const ANONYMOUS_SESSION: &str = "anonymous";

/// Supplies the opaque session key recorded with each search.
pub trait SessionProvider: Send + Sync {
    fn session_id(&self) -> String;
}

/// Always reports the anonymous sentinel.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedSession;

impl SessionProvider for FixedSession {
    fn session_id(&self) -> String {
        ANONYMOUS_SESSION.to_string()
    }
}

/// Creates a random session id on first use and keeps it for the lifetime
/// of the provider.
#[derive(Debug, Default)]
pub struct GeneratedSession {
    id: OnceLock<String>,
}

impl GeneratedSession {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionProvider for GeneratedSession {
    fn session_id(&self) -> String {
        self.id
            .get_or_init(|| {
                let id = uuid::Uuid::new_v4().to_string();
                tracing::debug!(session_id = %id, "Generated session id");
                id
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_session_is_sentinel() {
        assert_eq!(FixedSession.session_id(), ANONYMOUS_SESSION);
    }

    #[test]
    fn test_generated_session_is_stable() {
        let provider = GeneratedSession::new();
        let first = provider.session_id();

        assert_eq!(first, provider.session_id());
        assert_ne!(first, ANONYMOUS_SESSION);
        assert!(uuid::Uuid::parse_str(&first).is_ok());
    }

    #[test]
    fn test_generated_sessions_differ() {
        assert_ne!(
            GeneratedSession::new().session_id(),
            GeneratedSession::new().session_id()
        );
    }
}
