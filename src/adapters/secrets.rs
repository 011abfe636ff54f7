//! Kubernetes secret fetching utilities

use std::fmt;
use std::future::Future;

use k8s_openapi::api::core::v1::{Secret, SecretReference};
use kube::{Api, Client};
use tracing::debug;

use crate::crd::SecretBinding;
use crate::{Error, Result};

/// Namespace/name pair identifying a namespaced object
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectKey {
    pub namespace: String,
    pub name: String,
}

impl ObjectKey {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

/// Read access to the objects the extractor resolves
pub trait SecretStore {
    /// Fetch a SecretBinding by key
    fn get_secret_binding(
        &self,
        key: &ObjectKey,
    ) -> impl Future<Output = Result<SecretBinding>> + Send;

    /// Fetch a Secret by namespace and name
    fn get_secret(&self, key: &ObjectKey) -> impl Future<Output = Result<Secret>> + Send;
}

impl SecretStore for Client {
    async fn get_secret_binding(&self, key: &ObjectKey) -> Result<SecretBinding> {
        let bindings: Api<SecretBinding> = Api::namespaced(self.clone(), &key.namespace);
        Ok(bindings.get(&key.name).await?)
    }

    async fn get_secret(&self, key: &ObjectKey) -> Result<Secret> {
        let secrets: Api<Secret> = Api::namespaced(self.clone(), &key.namespace);
        Ok(secrets.get(&key.name).await?)
    }
}

/// Fetch the secret a reference points to
pub async fn get_secret_by_reference<S: SecretStore>(
    store: &S,
    secret_ref: &SecretReference,
) -> Result<Secret> {
    let key = reference_key(secret_ref)?;
    debug!("Fetching secret {}", key);
    store.get_secret(&key).await
}

/// Turn a secret reference into an object key, rejecting incomplete references
pub fn reference_key(secret_ref: &SecretReference) -> Result<ObjectKey> {
    let name = secret_ref
        .name
        .as_deref()
        .filter(|n| !n.is_empty())
        .ok_or_else(|| Error::InvalidSecretReference("name is not set".to_string()))?;

    let namespace = secret_ref
        .namespace
        .as_deref()
        .filter(|ns| !ns.is_empty())
        .ok_or_else(|| {
            Error::InvalidSecretReference(format!("namespace is not set for secret {}", name))
        })?;

    Ok(ObjectKey::new(namespace, name))
}
