//! Adapters between the extractor and the Kubernetes API

pub mod secrets;

pub use secrets::{get_secret_by_reference, ObjectKey, SecretStore};
