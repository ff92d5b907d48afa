//! Shared functionality for rbac-gate
//!
//! This crate turns an opaque bearer credential into a list of role names.
//! It has no knowledge of HTTP or of the policy engine; both live in the
//! `rbac-gate` crate.

pub mod claims;
pub mod error;
pub mod roles;

pub use claims::{decode_unverified, extract_roles, strip_bearer_prefix, Claims, ROLES_CLAIM};
pub use error::DecodeError;
pub use roles::RoleSet;
