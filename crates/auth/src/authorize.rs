use thiserror::Error;

use salesreward_core::DomainError;

use crate::{ActorContext, Capability};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("caller must identify itself to {0}")]
    Anonymous(Capability),

    #[error("forbidden: '{0}' requires the editor capability")]
    Forbidden(Capability),
}

impl From<AuthzError> for DomainError {
    fn from(_: AuthzError) -> Self {
        DomainError::Unauthorized
    }
}

/// Check `actor` against the capability an operation requires.
///
/// - No IO
/// - No panics
/// - No business logic (pure policy check)
pub fn authorize(actor: &ActorContext, required: Capability) -> Result<(), AuthzError> {
    if actor.is_anonymous() {
        return Err(AuthzError::Anonymous(required));
    }
    if required.requires_editor() && !actor.is_editor() {
        return Err(AuthzError::Forbidden(required));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editor_may_do_everything() {
        let actor = ActorContext::editor("admin");
        for cap in [
            Capability::RecordSales,
            Capability::EditCatalog,
            Capability::DeleteSales,
        ] {
            assert_eq!(authorize(&actor, cap), Ok(()));
        }
    }

    #[test]
    fn viewer_may_only_record_sales() {
        let actor = ActorContext::viewer("alice");
        assert_eq!(authorize(&actor, Capability::RecordSales), Ok(()));
        assert_eq!(
            authorize(&actor, Capability::EditCatalog),
            Err(AuthzError::Forbidden(Capability::EditCatalog))
        );
        assert_eq!(
            authorize(&actor, Capability::DeleteSales),
            Err(AuthzError::Forbidden(Capability::DeleteSales))
        );
    }

    #[test]
    fn anonymous_callers_are_rejected_even_with_editor_flag() {
        let actor = ActorContext::new("   ", true);
        assert_eq!(
            authorize(&actor, Capability::EditCatalog),
            Err(AuthzError::Anonymous(Capability::EditCatalog))
        );
    }

    #[test]
    fn maps_to_domain_unauthorized() {
        let err: DomainError = AuthzError::Forbidden(Capability::DeleteSales).into();
        assert_eq!(err, DomainError::Unauthorized);
    }
}
