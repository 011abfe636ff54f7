//! OpenStack credential extraction for Gardener
//!
//! Resolves Gardener SecretBindings and Kubernetes Secrets into validated
//! OpenStack credentials, and ships a read-only operator reporting which
//! bindings carry usable credentials.

pub mod adapters;
pub mod config;
pub mod controllers;
pub mod crd;
pub mod error;
pub mod metrics;
pub mod openstack;
pub mod reconcilers;

pub use error::{Error, Result};
pub use openstack::{
    extract_credentials, get_credentials, get_credentials_by_secret_binding, Credentials,
};
