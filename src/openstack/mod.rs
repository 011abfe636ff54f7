//! OpenStack provider credentials

pub mod credentials;

pub use credentials::*;

/// Secret data key holding the OpenStack domain name
pub const DOMAIN_NAME: &str = "domainName";
/// Secret data key holding the OpenStack tenant (project) name
pub const TENANT_NAME: &str = "tenantName";
/// Secret data key holding the OpenStack tenant (project) ID
pub const TENANT_ID: &str = "tenantID";
/// Secret data key holding the OpenStack user name
pub const USER_NAME: &str = "username";
/// Secret data key holding the OpenStack password
pub const PASSWORD: &str = "password";
/// Secret data key holding the Keystone auth URL (optional)
pub const AUTH_URL: &str = "authURL";

/// Provider type used by Gardener for OpenStack secret bindings
pub const PROVIDER_TYPE: &str = "openstack";
