//! Controller validating the credentials behind SecretBinding resources

use futures::StreamExt;
use kube::{
    runtime::{
        controller::{Action, Controller},
        reflector::{ObjectRef, Store},
        watcher::Config,
    },
    Api, ResourceExt,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, instrument};

use crate::controllers::Context;
use crate::crd::SecretBinding;
use crate::metrics::prometheus::{RECONCILE_DURATION, RECONCILIATIONS, RECONCILIATION_ERRORS};
use crate::reconcilers::binding::{self, Validation};
use crate::Error;

const KIND: &str = "SecretBinding";

/// Run the secret binding controller
pub async fn run(ctx: Arc<Context>) {
    let client = ctx.client.clone();
    let bindings: Api<SecretBinding> = match &ctx.config.watch_namespace {
        Some(ns) => Api::namespaced(client, ns),
        None => Api::all(client),
    };

    info!(
        "Starting SecretBinding controller for provider type {}",
        ctx.config.provider_type
    );

    let controller = Controller::new(bindings, Config::default().any_semantic());
    let pruner = tokio::spawn(prune_deleted(controller.store(), ctx.config.requeue_interval));

    controller
        .shutdown_on_signal()
        .run(reconcile, error_policy, ctx)
        .for_each(|res| async move {
            match res {
                Ok(o) => info!("Reconciled {:?}", o),
                Err(e) => error!("Reconcile failed: {:?}", e),
            }
        })
        .await;

    pruner.abort();
    info!("SecretBinding controller stopped");
}

/// Periodically drop validity gauges of bindings gone from the cache
///
/// Deleted bindings usually vanish from the watch without a final reconcile,
/// since the operator places no finalizer on them.
async fn prune_deleted(store: Store<SecretBinding>, period: Duration) {
    if store.wait_until_ready().await.is_err() {
        return;
    }

    let mut ticker = tokio::time::interval(period);
    loop {
        ticker.tick().await;
        let pruned =
            binding::prune(|ns, name| store.get(&ObjectRef::new(name).within(ns)).is_some());
        if pruned > 0 {
            info!("Dropped validity gauges of {} deleted SecretBindings", pruned);
        }
    }
}

/// Validate a SecretBinding
#[instrument(skip(binding, ctx), fields(name = %binding.name_any(), namespace = binding.namespace().unwrap_or_default()))]
async fn reconcile(binding: Arc<SecretBinding>, ctx: Arc<Context>) -> Result<Action, Error> {
    let start = std::time::Instant::now();
    let ns = binding.namespace().unwrap_or_default();
    let name = binding.name_any();

    RECONCILIATIONS.with_label_values(&[KIND]).inc();

    if binding.metadata.deletion_timestamp.is_some() {
        binding::forget(&ns, &name);
        return Ok(Action::await_change());
    }

    let result = binding::validate(&binding, &ctx.client, &ctx.config.provider_type).await;

    let duration = start.elapsed().as_secs_f64();
    RECONCILE_DURATION.with_label_values(&[KIND]).observe(duration);

    match result {
        Ok(Validation::Skipped) => Ok(Action::await_change()),
        Ok(Validation::Valid(_)) => {
            info!("Validated {}/{} in {:.2}s", ns, name, duration);
            Ok(Action::requeue(ctx.config.requeue_interval))
        }
        Err(e) => {
            RECONCILIATION_ERRORS
                .with_label_values(&[KIND, e.kind()])
                .inc();
            Err(e)
        }
    }
}

/// Error policy for the controller
fn error_policy(binding: Arc<SecretBinding>, err: &Error, ctx: Arc<Context>) -> Action {
    let ns = binding.namespace().unwrap_or_default();
    let name = binding.name_any();

    let action = requeue_after(err, ctx.config.requeue_interval);
    debug!("Requeueing {}/{} after {}: {:?}", ns, name, err.kind(), action);
    action
}

/// API failures are retried soon, broken secret contents only on the regular interval
pub fn requeue_after(err: &Error, interval: Duration) -> Action {
    if err.is_data_error() {
        Action::requeue(interval)
    } else {
        Action::requeue(Duration::from_secs(30))
    }
}
