//! Why a visitor was not let through.
//!
//! Every variant ends in the same visible outcome (redirect to the login
//! route). The distinction exists for logs and for the CLI's exit report.

use crate::kind::ProviderType;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GuardError {
    /// Nothing stored for this kind. Not a failure, just anonymous.
    #[error("no stored credential")]
    NoCredential,

    #[error("verification rejected with status {status}")]
    VerificationRejected { status: u16 },

    #[error("provider type {actual} does not satisfy required {required}")]
    SubtypeMismatch { required: ProviderType, actual: ProviderType },

    /// Request failed or timed out before a response arrived.
    #[error("verification request failed: {0}")]
    NetworkFailure(String),

    #[error("malformed verification response: {0}")]
    MalformedResponse(String),

    /// The request was aborted from outside (navigation, page unload).
    /// The credential was never judged, so it is kept.
    #[error("verification cancelled")]
    Cancelled,
}

impl GuardError {
    /// Whether the stored credential must be wiped.
    #[must_use]
    pub fn revokes(&self) -> bool {
        !matches!(self, Self::NoCredential | Self::Cancelled)
    }

    /// Stable code used as a structured log field.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoCredential => "E_NO_CREDENTIAL",
            Self::VerificationRejected { .. } => "E_VERIFICATION_REJECTED",
            Self::SubtypeMismatch { .. } => "E_SUBTYPE_MISMATCH",
            Self::NetworkFailure(_) => "E_NETWORK_FAILURE",
            Self::MalformedResponse(_) => "E_MALFORMED_RESPONSE",
            Self::Cancelled => "E_CANCELLED",
        }
    }
}
