//! URL-safe slug type.
//!
//! Slugs are derived from human-readable display names: lowercased, with
//! runs of non-alphanumeric characters collapsed to a single hyphen and
//! leading/trailing hyphens trimmed. Disambiguation against already-taken
//! slugs is the caller's job (the dashboard's slug generator); this type only
//! owns the normalized representation.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A normalized, URL-safe slug.
///
/// ## Examples
///
/// ```
/// use vendora_core::Slug;
///
/// assert_eq!(Slug::normalize("Red Shoes").as_str(), "red-shoes");
/// assert_eq!(Slug::normalize("  Héllo -- World!  ").as_str(), "h-llo-world");
/// assert!(Slug::normalize("!!!").is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct Slug(String);

impl Slug {
    /// Normalize a display name into a slug.
    ///
    /// The result may be empty when the input contains no ASCII alphanumeric
    /// characters; callers decide whether that is an error.
    #[must_use]
    pub fn normalize(input: &str) -> Self {
        let mut out = String::with_capacity(input.len());
        for ch in input.chars() {
            if ch.is_ascii_alphanumeric() {
                out.push(ch.to_ascii_lowercase());
            } else if !out.ends_with('-') {
                out.push('-');
            }
        }
        Self(out.trim_matches('-').to_owned())
    }

    /// Append a disambiguating suffix, producing `{base}-{suffix}`.
    #[must_use]
    pub fn with_suffix(&self, suffix: &str) -> Self {
        Self(format!("{}-{suffix}", self.0))
    }

    /// Returns true when normalization produced no characters.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the slug as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Slug` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// SQLx support (with postgres feature)
#[cfg(feature = "postgres")]
impl sqlx::Type<sqlx::Postgres> for Slug {
    fn type_info() -> sqlx::postgres::PgTypeInfo {
        <String as sqlx::Type<sqlx::Postgres>>::type_info()
    }

    fn compatible(ty: &sqlx::postgres::PgTypeInfo) -> bool {
        <String as sqlx::Type<sqlx::Postgres>>::compatible(ty)
    }
}

#[cfg(feature = "postgres")]
impl<'r> sqlx::Decode<'r, sqlx::Postgres> for Slug {
    fn decode(value: sqlx::postgres::PgValueRef<'r>) -> Result<Self, sqlx::error::BoxDynError> {
        let s = <String as sqlx::Decode<sqlx::Postgres>>::decode(value)?;
        // Database values were normalized before being written
        Ok(Self(s))
    }
}

#[cfg(feature = "postgres")]
impl sqlx::Encode<'_, sqlx::Postgres> for Slug {
    fn encode_by_ref(
        &self,
        buf: &mut sqlx::postgres::PgArgumentBuffer,
    ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
        <String as sqlx::Encode<sqlx::Postgres>>::encode_by_ref(&self.0, buf)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_basic() {
        assert_eq!(Slug::normalize("Red Shoes").as_str(), "red-shoes");
        assert_eq!(Slug::normalize("Air Max 97").as_str(), "air-max-97");
    }

    #[test]
    fn test_normalize_collapses_runs() {
        assert_eq!(Slug::normalize("a  --  b").as_str(), "a-b");
        assert_eq!(Slug::normalize("Tom & Jerry's").as_str(), "tom-jerry-s");
    }

    #[test]
    fn test_normalize_trims_hyphens() {
        assert_eq!(Slug::normalize("--edge case--").as_str(), "edge-case");
        assert_eq!(Slug::normalize("  padded  ").as_str(), "padded");
    }

    #[test]
    fn test_normalize_non_ascii_becomes_hyphen() {
        assert_eq!(Slug::normalize("Héllo Wörld").as_str(), "h-llo-w-rld");
    }

    #[test]
    fn test_normalize_empty_when_no_alphanumerics() {
        assert!(Slug::normalize("!!!").is_empty());
        assert!(Slug::normalize("").is_empty());
    }

    #[test]
    fn test_with_suffix() {
        let base = Slug::normalize("Red Shoes");
        assert_eq!(base.with_suffix("2").as_str(), "red-shoes-2");
    }

    #[test]
    fn test_serde_roundtrip() {
        let slug = Slug::normalize("Red Shoes");
        let json = serde_json::to_string(&slug).unwrap();
        assert_eq!(json, "\"red-shoes\"");

        let parsed: Slug = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, slug);
    }
}
