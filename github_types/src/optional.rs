//! Constructors for optional resource fields.
//!
//! Resource fields are plain `Option<T>`, serialized with `skip_serializing_if = "Option::is_none"`,
//! so `None` never reaches the wire and `Some(false)` is sent as `false`. These helpers read well
//! when building request bodies:
//!
//! ```
//! use github_core_types::{optional, Repository};
//!
//! let repo = Repository {
//!     name: optional::string("foo"),
//!     private: optional::boolean(true),
//!     ..Default::default()
//! };
//! assert_eq!(repo.private, Some(true));
//! ```

use serde::{Deserialize, Deserializer};

use crate::Timestamp;

pub fn string(value: impl Into<String>) -> Option<String> {
    Some(value.into())
}

pub fn boolean(value: bool) -> Option<bool> {
    Some(value)
}

pub fn int(value: u64) -> Option<u64> {
    Some(value)
}

pub fn timestamp(value: impl Into<Timestamp>) -> Option<Timestamp> {
    Some(value.into())
}

/// Codec for `Option<Option<T>>` fields where JSON `null` carries meaning.
///
/// The outer option is presence on the wire, the inner one is the value: `None` is omitted,
/// `Some(None)` is sent as `null` and `Some(Some(v))` as `v`. Pair it with
/// `#[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "nullable::deserialize")]`.
pub mod nullable {
    use super::*;

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }

    /// Sends an explicit `null`, clearing the field server side.
    pub fn clear<T>() -> Option<Option<T>> {
        Some(None)
    }

    pub fn set<T>(value: T) -> Option<Option<T>> {
        Some(Some(value))
    }
}

/// Decodes a missing key or JSON `null` as `T::default()`, for collection fields.
///
/// Use it as `deserialize_with` together with `default`.
pub fn null_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
