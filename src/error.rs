//! Errors surfaced by an editing session.

use api::ApiError;
use api::types::{ProjectId, VariantId};
use editor::EditError;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SessionError {
    /// A backend call failed; local state was left unchanged.
    #[error(transparent)]
    Api(#[from] ApiError),

    /// An edit was rejected by the editor.
    #[error(transparent)]
    Edit(#[from] EditError),

    /// The operation needs a bound project.
    #[error("no project is bound to this session")]
    NoProject,

    #[error("variant {0} is not part of the bound project")]
    UnknownVariant(VariantId),

    #[error("canvas item {0} is not placed")]
    UnknownItem(String),

    /// A variant poll finished for a project that is no longer bound.
    #[error("variant poll for project {0} does not match the bound project")]
    StalePoll(ProjectId),

    /// The session was torn down after credentials expired.
    #[error("session has expired; sign in again")]
    Expired,
}

impl SessionError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Api(e) => e.error_code(),
            Self::Edit(e) => e.error_code(),
            Self::NoProject => "E_NO_PROJECT",
            Self::UnknownVariant(_) => "E_UNKNOWN_VARIANT",
            Self::UnknownItem(_) => "E_UNKNOWN_ITEM",
            Self::StalePoll(_) => "E_STALE_POLL",
            Self::Expired => "E_SESSION_EXPIRED",
        }
    }

    /// Whether the session can no longer be used.
    #[must_use]
    pub fn is_session_expired(&self) -> bool {
        matches!(self, Self::Expired | Self::Api(ApiError::SessionExpired))
    }
}
