//! Data model for the GitHub v3 API
//!
//! # Overview
//!
//! Every resource mirrors the JSON schema GitHub publishes. Scalar fields are `Option<T>` so that a
//! field which was never set is left out of the encoded body, while a field set to `false`, `0` or
//! `""` is still sent. The [`optional`] module has small constructors for building these values and
//! a `nullable` codec for the few fields where an explicit JSON `null` means "clear this".
//!
//! Timestamps go through [`Timestamp`], which accepts both RFC3339 strings and Unix seconds since
//! GitHub is not consistent about which one it sends.
//!
//! Every resource implements [`Stringify`] (and therefore `Display`), producing a compact rendering
//! for logs which skips unset fields.

#[macro_use]
pub mod stringify;

pub mod optional;
pub mod rate;
pub mod resources;
mod timestamp;

pub use rate::{Rate, RateLimits};
pub use resources::*;
pub use stringify::{stringify, Stringify};
pub use timestamp::Timestamp;
