//! Request and response bodies for the HTTP surface.

pub mod cart;
pub mod product;

pub use cart::{CartDto, CartItemDto, CartItemPayload};
pub use product::{DetailResponse, ProductDto, ProductPayload};

use serde::{Deserialize, Deserializer};

/// Distinguishes an explicit `null` from an absent field when combined with
/// `#[serde(default)]`: absent stays `None`, `null` becomes `Some(None)`.
pub(crate) fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}
