//! Gardener resource types consumed by the extractor

mod secret_binding;

pub use secret_binding::*;
