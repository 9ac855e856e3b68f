//! Codec implementations
//!
//! The binary runtime is external; what ships here is a JSON-backed codec
//! that speaks the same [`GdxCodec`](gdxframe_core::GdxCodec) protocol. It
//! makes the session usable and testable without the vendor library.

#[cfg(feature = "serde")]
mod image;
#[cfg(feature = "serde")]
mod json;

#[cfg(feature = "serde")]
pub use image::{ContainerImage, StoredSymbol};
#[cfg(feature = "serde")]
pub use json::JsonCodec;
