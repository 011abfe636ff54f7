//! Controller implementations for watching and validating resources

pub mod binding_controller;

use kube::Client;
use std::sync::Arc;

use crate::config::OperatorConfig;

/// Shared context for controllers
pub struct Context {
    /// Kubernetes client
    pub client: Client,
    /// Operator settings
    pub config: OperatorConfig,
}

impl Context {
    /// Create a new context
    pub fn new(client: Client, config: OperatorConfig) -> Arc<Self> {
        Arc::new(Self { client, config })
    }
}
