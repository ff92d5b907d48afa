use serde_json::Value;

use crate::error::DecodeError;

/// Ordered list of role names taken from a token's roles claim.
///
/// Order is preserved from the claim; an empty set is valid and simply
/// matches no policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<String>);

impl RoleSet {
    /// Normalize a raw claim value into a role set.
    ///
    /// Accepted shapes:
    /// - a single string, e.g. `"admin"`
    /// - an array whose elements are all strings, e.g. `["admin", "user"]`
    ///
    /// `null`, numbers, booleans, objects and arrays containing any
    /// non-string element are rejected with [`DecodeError::InvalidRoleClaim`].
    pub fn from_claim_value(value: &Value) -> Result<Self, DecodeError> {
        match value {
            Value::String(role) => Ok(Self(vec![role.clone()])),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::String(role) => Ok(role.clone()),
                    other => Err(DecodeError::InvalidRoleClaim(format!(
                        "{value} is invalid, element {other} is not a string"
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Self),
            other => Err(DecodeError::InvalidRoleClaim(format!(
                "{other} is invalid type"
            ))),
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl From<Vec<String>> for RoleSet {
    fn from(roles: Vec<String>) -> Self {
        Self(roles)
    }
}

impl From<&[&str]> for RoleSet {
    fn from(roles: &[&str]) -> Self {
        Self(roles.iter().map(|role| role.to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a RoleSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for RoleSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl std::fmt::Display for RoleSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.0.join(", "))
    }
}
