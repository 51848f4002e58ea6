//! Actor identity and authorization vocabulary.
//!
//! The identity provider hands the application an authenticated user id plus
//! a role attribute. The role arrives as a string and is validated into a
//! closed enumeration at the boundary - the data-access layer never trusts
//! free text.

use serde::{Deserialize, Serialize};

use crate::types::id::UserId;

/// Role attribute attached to an authenticated actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActorRole {
    /// Platform operator: manages categories, subcategories, and stores.
    Admin,
    /// Store owner: manages their own store and its products.
    Seller,
}

impl std::fmt::Display for ActorRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Admin => write!(f, "Admin"),
            Self::Seller => write!(f, "Seller"),
        }
    }
}

/// Error returned when an incoming role string is not a known role.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct RoleParseError(pub String);

impl std::str::FromStr for ActorRole {
    type Err = RoleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "SELLER" => Ok(Self::Seller),
            other => Err(RoleParseError(other.to_owned())),
        }
    }
}

/// The authenticated identity attached to an incoming operation.
///
/// Constructed by the application from whatever its identity provider
/// returns; an unauthenticated caller is represented as the absence of an
/// `Actor` (`Option<&Actor>` in service signatures).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable user id from the identity provider.
    pub user_id: UserId,
    /// Validated role attribute.
    pub role: ActorRole,
}

impl Actor {
    /// Create an actor context.
    #[must_use]
    pub const fn new(user_id: UserId, role: ActorRole) -> Self {
        Self { user_id, role }
    }
}

/// Attributes that must be unique across all records of an entity kind.
///
/// The variant order is the fixed priority in which conflicts are reported
/// (name before url before email before phone), so error messages are
/// deterministic when several fields collide at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    Name,
    Url,
    Email,
    Phone,
}

impl std::fmt::Display for UniqueField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name => write!(f, "name"),
            Self::Url => write!(f, "url"),
            Self::Email => write!(f, "email"),
            Self::Phone => write!(f, "phone"),
        }
    }
}
