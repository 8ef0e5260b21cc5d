use crate::model::EntityKind;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DigestError {
    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    #[error("Store unreachable: {0}")]
    StoreUnreachable(String),

    #[error("Stale data, please refresh: {kind} no longer has {}", .ids.join(", "))]
    StaleReference { kind: EntityKind, ids: Vec<String> },

    #[error("A reorder is still in flight for this list")]
    ReorderInFlight,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl DigestError {
    /// Whether the caller's cached list can no longer be trusted and must be
    /// re-fetched from the store before the next interaction.
    pub fn requires_refresh(&self) -> bool {
        matches!(
            self,
            DigestError::StoreUnreachable(_) | DigestError::StaleReference { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, DigestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_reference_lists_missing_ids() {
        let err = DigestError::StaleReference {
            kind: EntityKind::Article,
            ids: vec!["a".into(), "b".into()],
        };
        assert_eq!(
            err.to_string(),
            "Stale data, please refresh: article no longer has a, b"
        );
    }

    #[test]
    fn refresh_required_only_for_store_divergence() {
        assert!(DigestError::StoreUnreachable("down".into()).requires_refresh());
        assert!(DigestError::StaleReference {
            kind: EntityKind::SidebarTab,
            ids: vec![],
        }
        .requires_refresh());
        assert!(!DigestError::ReorderInFlight.requires_refresh());
        assert!(!DigestError::Validation("x".into()).requires_refresh());
    }
}
