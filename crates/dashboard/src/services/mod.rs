//! Business logic services for the dashboard.
//!
//! One service per entity kind, each wrapping its injected repository.
//! Every write runs the same fail-fast guard sequence before touching the
//! database: authentication, then role tier, then payload validation, then
//! uniqueness - so a rejected call never leaves a partial write behind.
//!
//! # Services
//!
//! - `categories` - admin-only category management
//! - `sub_categories` - admin-only subcategory management
//! - `stores` - seller store onboarding (admin-only delete)
//! - `products` - seller product/variant creation
//! - `slug` - unique slug generation for products and variants

pub mod categories;
pub mod products;
pub mod slug;
pub mod stores;
pub mod sub_categories;

pub use categories::CategoryService;
pub use products::ProductService;
pub use slug::generate_unique_slug;
pub use stores::StoreService;
pub use sub_categories::SubCategoryService;

use vendora_core::{Actor, ActorRole};

use crate::error::ServiceError;

/// Check authentication, then the required role tier, in that order.
///
/// An absent actor is `Unauthenticated` even when the role would also have
/// been wrong - the failure modes are reported in declaration order.
pub(crate) fn authorize(
    actor: Option<&Actor>,
    required: ActorRole,
) -> Result<&Actor, ServiceError> {
    let actor = actor.ok_or(ServiceError::Unauthenticated)?;
    if actor.role != required {
        return Err(ServiceError::Unauthorized { required });
    }
    Ok(actor)
}

/// Reject blank required payload fields with the given user-facing message.
pub(crate) fn require_field(value: &str, message: &str) -> Result<(), ServiceError> {
    if value.trim().is_empty() {
        return Err(ServiceError::InvalidInput(message.to_owned()));
    }
    Ok(())
}
