//! Unique slug generation for products and variants.

use rand::distr::{Alphanumeric, SampleString};

use vendora_core::Slug;

use crate::db::ProductsRepo;
use crate::error::ServiceError;
use crate::models::SlugKind;

/// Highest numeric suffix tried after the bare slug (`-2`, `-3`, ...).
const MAX_NUMERIC_SUFFIX: u32 = 100;
/// Random suffixes tried once the numeric range is exhausted.
const MAX_RANDOM_ATTEMPTS: u32 = 5;
const RANDOM_SUFFIX_LEN: usize = 6;

/// Produce a slug in `kind`'s namespace that no existing record claims.
///
/// The probe loop is read-only; the UNIQUE constraint on the slug column is
/// what stops two concurrent generators that both saw the same candidate as
/// free. Termination is guaranteed by the bounded suffix ranges.
///
/// # Errors
///
/// - `InvalidInput` when the name normalizes to an empty slug
/// - `SlugExhausted` when every bounded candidate is taken
/// - `Repo` when a lookup fails
pub async fn generate_unique_slug<R>(
    repo: &R,
    kind: SlugKind,
    name: &str,
) -> Result<Slug, ServiceError>
where
    R: ProductsRepo,
{
    let base = Slug::normalize(name);
    if base.is_empty() {
        return Err(ServiceError::InvalidInput(
            "Please provide a usable name.".to_owned(),
        ));
    }

    if !repo.slug_exists(kind, base.as_str()).await? {
        return Ok(base);
    }

    for n in 2..=MAX_NUMERIC_SUFFIX {
        let candidate = base.with_suffix(&n.to_string());
        if !repo.slug_exists(kind, candidate.as_str()).await? {
            return Ok(candidate);
        }
    }

    // The numeric range is gone; a short random tail almost certainly is not.
    for _ in 0..MAX_RANDOM_ATTEMPTS {
        let suffix = Alphanumeric
            .sample_string(&mut rand::rng(), RANDOM_SUFFIX_LEN)
            .to_lowercase();
        let candidate = base.with_suffix(&suffix);
        if !repo.slug_exists(kind, candidate.as_str()).await? {
            return Ok(candidate);
        }
    }

    Err(ServiceError::SlugExhausted(base.into_inner()))
}
