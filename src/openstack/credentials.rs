//! Extraction of OpenStack credentials from secrets and secret bindings

use std::collections::BTreeMap;
use std::fmt;

use k8s_openapi::api::core::v1::{Secret, SecretReference};
use k8s_openapi::ByteString;
use tracing::debug;

use super::{AUTH_URL, DOMAIN_NAME, PASSWORD, TENANT_ID, TENANT_NAME, USER_NAME};
use crate::adapters::{get_secret_by_reference, ObjectKey, SecretStore};
use crate::{Error, Result};

/// OpenStack credential information
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    domain_name: String,
    tenant_name: String,
    tenant_id: String,
    username: String,
    password: String,
    auth_url: String,
}

impl Credentials {
    pub fn domain_name(&self) -> &str {
        &self.domain_name
    }

    pub fn tenant_name(&self) -> &str {
        &self.tenant_name
    }

    pub fn tenant_id(&self) -> &str {
        &self.tenant_id
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Keystone auth URL; empty when the secret does not carry one
    pub fn auth_url(&self) -> &str {
        &self.auth_url
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("domain_name", &self.domain_name)
            .field("tenant_name", &self.tenant_name)
            .field("tenant_id", &self.tenant_id)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("auth_url", &self.auth_url)
            .finish()
    }
}

/// Resolve the secret a SecretBinding points to and extract its credentials
pub async fn get_credentials_by_secret_binding<S: SecretStore>(
    store: &S,
    secret_binding_key: &ObjectKey,
) -> Result<Credentials> {
    let binding = store.get_secret_binding(secret_binding_key).await?;
    debug!("Resolved secret binding {}", secret_binding_key);
    get_credentials(store, &binding.secret_ref).await
}

/// Fetch the referenced secret and extract its credentials
pub async fn get_credentials<S: SecretStore>(
    store: &S,
    secret_ref: &SecretReference,
) -> Result<Credentials> {
    let secret = get_secret_by_reference(store, secret_ref).await?;
    extract_credentials(&secret)
}

/// Build a credentials object from a provider secret
pub fn extract_credentials(secret: &Secret) -> Result<Credentials> {
    let data = secret.data.as_ref().ok_or(Error::MissingData)?;

    let domain_name = get_required(data, DOMAIN_NAME)?;
    let tenant_name = get_required(data, TENANT_NAME)?;
    let tenant_id = get_required(data, TENANT_ID)?;
    let username = get_required(data, USER_NAME)?;
    let password = get_required(data, PASSWORD)?;
    let auth_url = data
        .get(AUTH_URL)
        .map(|v| String::from_utf8_lossy(&v.0).into_owned())
        .unwrap_or_default();

    Ok(Credentials {
        domain_name,
        tenant_name,
        tenant_id,
        username,
        password,
        auth_url,
    })
}

/// Look up a mandatory key; it must be present, non-empty and UTF-8
fn get_required(data: &BTreeMap<String, ByteString>, key: &'static str) -> Result<String> {
    let value = data.get(key).ok_or(Error::MissingKey(key))?;
    if value.0.is_empty() {
        return Err(Error::EmptyValue(key));
    }
    String::from_utf8(value.0.clone()).map_err(|_| Error::InvalidUtf8(key))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(pairs: &[(&str, &str)]) -> BTreeMap<String, ByteString> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), ByteString(v.as_bytes().to_vec())))
            .collect()
    }

    #[test]
    fn get_required_reports_the_offending_key() {
        let data = data(&[(USER_NAME, "")]);

        assert!(matches!(
            get_required(&data, USER_NAME),
            Err(Error::EmptyValue(USER_NAME))
        ));
        assert!(matches!(
            get_required(&data, PASSWORD),
            Err(Error::MissingKey(PASSWORD))
        ));
    }

    #[test]
    fn get_required_rejects_invalid_utf8() {
        let mut data = BTreeMap::new();
        data.insert(PASSWORD.to_string(), ByteString(vec![0xff, 0xfe]));

        assert!(matches!(
            get_required(&data, PASSWORD),
            Err(Error::InvalidUtf8(PASSWORD))
        ));
    }

    #[test]
    fn debug_output_hides_password() {
        let creds = Credentials {
            domain_name: "d".to_string(),
            tenant_name: "t".to_string(),
            tenant_id: "id".to_string(),
            username: "u".to_string(),
            password: "s3cr3t-value".to_string(),
            auth_url: String::new(),
        };

        let rendered = format!("{:?}", creds);
        assert!(!rendered.contains("s3cr3t-value"));
        assert!(rendered.contains("<redacted>"));
    }
}
