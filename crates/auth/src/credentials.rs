//! Credential gate that grants the editor capability.
//!
//! The check itself is a collaborator: anything implementing [`SecretVerifier`]
//! can be plugged in. [`SharedSecret`] is the single-shared-secret gate used by
//! the API binary.

use crate::ActorContext;

/// Decides whether a presented secret unlocks the editor capability.
pub trait SecretVerifier: Send + Sync {
    fn verify(&self, presented: &str) -> bool;
}

/// One shared editor secret, compared as plain text.
#[derive(Clone)]
pub struct SharedSecret {
    secret: String,
}

impl SharedSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

impl core::fmt::Debug for SharedSecret {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SharedSecret").finish_non_exhaustive()
    }
}

impl SecretVerifier for SharedSecret {
    fn verify(&self, presented: &str) -> bool {
        !self.secret.is_empty() && presented == self.secret
    }
}

/// Build the actor context for a caller.
///
/// A missing or wrong secret never fails the request; it only withholds the
/// editor capability.
pub fn resolve_actor(
    display_name: Option<&str>,
    presented_secret: Option<&str>,
    verifier: &dyn SecretVerifier,
) -> ActorContext {
    let name = display_name.unwrap_or_default();
    let editor = presented_secret.is_some_and(|s| verifier.verify(s));
    if presented_secret.is_some() && !editor {
        tracing::debug!(actor = name, "editor secret rejected");
    }
    ActorContext::new(name, editor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_secret_grants_editor() {
        let gate = SharedSecret::new("8888");
        let actor = resolve_actor(Some("alice"), Some("8888"), &gate);
        assert!(actor.is_editor());
        assert_eq!(actor.display_name(), "alice");
    }

    #[test]
    fn wrong_or_missing_secret_yields_viewer() {
        let gate = SharedSecret::new("8888");
        assert!(!resolve_actor(Some("alice"), Some("1234"), &gate).is_editor());
        assert!(!resolve_actor(Some("alice"), None, &gate).is_editor());
    }

    #[test]
    fn empty_configured_secret_never_verifies() {
        let gate = SharedSecret::new("");
        assert!(!gate.verify(""));
    }

    #[test]
    fn debug_does_not_leak_secret() {
        let gate = SharedSecret::new("hunter2");
        assert!(!format!("{gate:?}").contains("hunter2"));
    }
}
