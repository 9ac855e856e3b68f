#![no_std]

//! gdxframe core - GDX symbol model definitions
//!
//! This crate provides the pure definitions shared by GDX codecs and the
//! tabular translation layer: symbol kinds, value column layout, the special
//! value table and the [`GdxCodec`] interface. It performs no I/O.

extern crate alloc;

pub mod error;
pub mod format;
pub mod traits;
pub mod validation;

pub use error::*;
pub use format::*;
pub use traits::*;
pub use validation::*;
