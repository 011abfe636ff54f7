//! Gardener SecretBinding resource (`core.gardener.cloud/v1beta1`)

use k8s_openapi::api::core::v1::{ObjectReference, SecretReference};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use k8s_openapi::NamespaceResourceScope;
use serde::{Deserialize, Serialize};

/// Binds a logical credential name to a concrete secret
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretBinding {
    #[serde(default)]
    pub metadata: ObjectMeta,

    /// Reference to the secret holding the provider credentials
    pub secret_ref: SecretReference,

    /// Quotas applying to users of this binding
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub quotas: Vec<ObjectReference>,

    /// Provider the referenced secret is meant for
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<SecretBindingProvider>,
}

/// Provider information of a SecretBinding
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct SecretBindingProvider {
    /// Provider type, e.g. `openstack`
    #[serde(rename = "type")]
    pub type_: String,
}

impl SecretBinding {
    /// Provider type of the binding, if one is declared
    pub fn provider_type(&self) -> Option<&str> {
        self.provider.as_ref().map(|p| p.type_.as_str())
    }
}

impl k8s_openapi::Resource for SecretBinding {
    const API_VERSION: &'static str = "core.gardener.cloud/v1beta1";
    const GROUP: &'static str = "core.gardener.cloud";
    const KIND: &'static str = "SecretBinding";
    const VERSION: &'static str = "v1beta1";
    const URL_PATH_SEGMENT: &'static str = "secretbindings";
    type Scope = NamespaceResourceScope;
}

impl k8s_openapi::Metadata for SecretBinding {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &ObjectMeta {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut ObjectMeta {
        &mut self.metadata
    }
}
