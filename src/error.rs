//! Error types for OpenStack credential extraction

use thiserror::Error;

/// Result type for credential extraction and the operator
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for credential extraction and the operator
#[derive(Debug, Error)]
pub enum Error {
    /// Error returned by the Kubernetes API, passed through unchanged
    #[error(transparent)]
    Kube(#[from] kube::Error),

    /// The secret has no data mapping at all
    #[error("secret does not contain any data")]
    MissingData,

    /// A mandatory key is absent from the secret data
    #[error("secret data does not contain key {0}")]
    MissingKey(&'static str),

    /// A mandatory key is present but its value is empty
    #[error("key {0} may not be empty")]
    EmptyValue(&'static str),

    /// A mandatory value is not valid UTF-8
    #[error("key {0} does not hold valid UTF-8")]
    InvalidUtf8(&'static str),

    /// The secret reference lacks a name or namespace
    #[error("invalid secret reference: {0}")]
    InvalidSecretReference(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    ConfigError(String),
}

impl Error {
    /// Whether the error comes from the secret contents rather than the API
    pub fn is_data_error(&self) -> bool {
        matches!(
            self,
            Error::MissingData
                | Error::MissingKey(_)
                | Error::EmptyValue(_)
                | Error::InvalidUtf8(_)
                | Error::InvalidSecretReference(_)
        )
    }

    /// Whether the API reported the requested object as absent
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Kube(kube::Error::Api(resp)) if resp.code == 404)
    }

    /// Whether the error shows the credentials are unusable, as opposed to unknown
    pub fn invalidates_credentials(&self) -> bool {
        self.is_data_error() || self.is_not_found()
    }

    /// Short label used for logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Kube(_) => "kube",
            Error::MissingData => "missing_data",
            Error::MissingKey(_) => "missing_key",
            Error::EmptyValue(_) => "empty_value",
            Error::InvalidUtf8(_) => "invalid_utf8",
            Error::InvalidSecretReference(_) => "invalid_reference",
            Error::ConfigError(_) => "config",
        }
    }
}
