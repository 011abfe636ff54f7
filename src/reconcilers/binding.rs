//! Validation logic for SecretBinding resources

use kube::ResourceExt;
use prometheus::core::Collector;
use tracing::{info, warn};

use crate::adapters::SecretStore;
use crate::crd::SecretBinding;
use crate::metrics::CREDENTIALS_VALID;
use crate::openstack::{get_credentials, Credentials};
use crate::Result;

/// Outcome of validating one binding
#[derive(Debug)]
pub enum Validation {
    /// The binding belongs to another provider and was not inspected
    Skipped,
    /// The referenced secret holds usable credentials
    Valid(Credentials),
}

/// Whether a binding should be validated for the given provider type
///
/// Bindings without a provider are validated, since older Gardener
/// versions do not set one.
pub fn is_responsible(binding: &SecretBinding, provider_type: &str) -> bool {
    binding
        .provider_type()
        .map_or(true, |t| t == provider_type)
}

/// Resolve a binding's secret and check it holds OpenStack credentials
pub async fn validate<S: SecretStore>(
    binding: &SecretBinding,
    store: &S,
    provider_type: &str,
) -> Result<Validation> {
    let ns = binding.namespace().unwrap_or_default();
    let name = binding.name_any();

    if !is_responsible(binding, provider_type) {
        info!(
            "Skipping SecretBinding {}/{} with provider type {:?}",
            ns,
            name,
            binding.provider_type()
        );
        forget(&ns, &name);
        return Ok(Validation::Skipped);
    }

    let secret_ref = &binding.secret_ref;
    match get_credentials(store, secret_ref).await {
        Ok(credentials) => {
            CREDENTIALS_VALID
                .with_label_values(&[ns.as_str(), name.as_str()])
                .set(1.0);
            info!("SecretBinding {}/{} resolves to valid credentials", ns, name);
            Ok(Validation::Valid(credentials))
        }
        Err(e) => {
            // Transient API failures keep the last known state
            if e.invalidates_credentials() {
                CREDENTIALS_VALID
                    .with_label_values(&[ns.as_str(), name.as_str()])
                    .set(0.0);
            }
            warn!(
                "SecretBinding {}/{} references secret {}/{} without valid credentials: {}",
                ns,
                name,
                secret_ref.namespace.as_deref().unwrap_or_default(),
                secret_ref.name.as_deref().unwrap_or_default(),
                e
            );
            Err(e)
        }
    }
}

/// Drop the validity gauge of a binding that no longer exists
pub fn forget(namespace: &str, name: &str) {
    let _ = CREDENTIALS_VALID.remove_label_values(&[namespace, name]);
}

/// Drop the validity gauges of all bindings for which `exists` returns false
///
/// Returns the number of removed series.
pub fn prune<F>(exists: F) -> usize
where
    F: Fn(&str, &str) -> bool,
{
    let stale: Vec<(String, String)> = CREDENTIALS_VALID
        .collect()
        .iter()
        .flat_map(|family| family.get_metric())
        .filter_map(|metric| {
            let label = |key: &str| {
                metric
                    .get_label()
                    .iter()
                    .find(|pair| pair.get_name() == key)
                    .map(|pair| pair.get_value().to_string())
            };
            Some((label("namespace")?, label("name")?))
        })
        .filter(|(ns, name)| !exists(ns, name))
        .collect();

    for (ns, name) in &stale {
        forget(ns, name);
    }
    stale.len()
}
