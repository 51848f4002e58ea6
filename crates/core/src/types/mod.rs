//! Core types for Vendora.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod actor;
pub mod email;
pub mod id;
pub mod slug;

pub use actor::{Actor, ActorRole, RoleParseError, UniqueField};
pub use email::{Email, EmailError};
pub use id::*;
pub use slug::Slug;
