use thiserror::Error;

/// Reasons a bearer token could not be turned into a [`crate::RoleSet`].
///
/// Callers map every variant to the same `401` response; the reason string
/// is for logs only.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("malformed token: {0}")]
    MalformedToken(String),

    #[error("invalid roles claim: {0}")]
    InvalidRoleClaim(String),
}
