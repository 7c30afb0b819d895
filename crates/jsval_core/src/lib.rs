//! Reflection-driven marshalling between a scripting host's dynamic values and typed Rust values.

/// Dynamic value model, reflection layer, encoder, and decoder.
pub mod marshal;

pub use marshal::{decode, decode_into, decode_into_with, decode_with, encode};
