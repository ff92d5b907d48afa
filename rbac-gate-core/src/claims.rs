use jsonwebtoken::dangerous::insecure_decode;
use serde_json::{Map, Value};

use crate::error::DecodeError;
use crate::roles::RoleSet;

/// Name of the claim holding the caller's roles.
pub const ROLES_CLAIM: &str = "roles";

const BEARER_PREFIX: &str = "Bearer ";

/// Claims decoded from a token payload.
#[derive(Clone, Debug, PartialEq)]
pub struct Claims(Map<String, Value>);

impl Claims {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    /// Extract the roles claim as a [`RoleSet`].
    ///
    /// A missing claim is an error, as is a claim of an unsupported shape.
    pub fn roles(&self) -> Result<RoleSet, DecodeError> {
        match self.get(ROLES_CLAIM) {
            Some(value) => RoleSet::from_claim_value(value),
            None => Err(DecodeError::InvalidRoleClaim(format!(
                "'{ROLES_CLAIM}' claim is missing"
            ))),
        }
    }
}

/// Strip a leading `"Bearer "` if present; other input is returned unchanged.
pub fn strip_bearer_prefix(token: &str) -> &str {
    token.strip_prefix(BEARER_PREFIX).unwrap_or(token)
}

/// Decode the claims of a compact JWT **without verifying its signature**.
///
/// Only the structure is checked: three dot separated segments, a header
/// naming a known signing algorithm, and a JSON object payload. The signature
/// segment is ignored entirely, so anybody can mint a token this function
/// accepts. Do not rely on it for authentication; put real verification in
/// front of it.
pub fn decode_unverified(token: &str) -> Result<Claims, DecodeError> {
    let token_data = insecure_decode::<Map<String, Value>>(token)
        .map_err(|e| DecodeError::MalformedToken(format!("could not parse token: {e}")))?;
    Ok(Claims(token_data.claims))
}

/// Decode a bearer token (with or without the `"Bearer "` prefix) and return
/// the roles it claims. The signature is not verified, see
/// [`decode_unverified`].
pub fn extract_roles(token: &str) -> Result<RoleSet, DecodeError> {
    decode_unverified(strip_bearer_prefix(token))?.roles()
}
