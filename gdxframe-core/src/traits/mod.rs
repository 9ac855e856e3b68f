//! Abstract interfaces for GDX runtimes
//!
//! Interface definitions only, implementations live in the `gdxframe` crate.

pub mod codec;

pub use codec::GdxCodec;
