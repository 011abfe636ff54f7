//! OpenStack credentials operator
//!
//! Watches Gardener SecretBindings and reports, through logs and metrics,
//! whether each one resolves to usable OpenStack credentials.

use kube::Client;
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use openstack_credentials::{
    config::OperatorConfig,
    controllers::{binding_controller, Context},
    metrics,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = OperatorConfig::from_env()?;
    info!(
        metrics_port = config.metrics_port,
        watch_namespace = config.watch_namespace.as_deref().unwrap_or("<all>"),
        provider_type = %config.provider_type,
        requeue_secs = config.requeue_interval.as_secs(),
        "Starting OpenStack credentials operator"
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes API server");

    let metrics_port = config.metrics_port;
    let context = Context::new(client, config);

    let metrics_handle = tokio::spawn(metrics::serve(metrics_port));
    let controller_handle = tokio::spawn(binding_controller::run(context));

    tokio::select! {
        _ = controller_handle => {
            error!("SecretBinding controller exited unexpectedly");
        }
        res = metrics_handle => {
            error!("Metrics server exited unexpectedly: {:?}", res);
        }
        _ = shutdown_signal() => {
            info!("Received shutdown signal, stopping operator");
        }
    }

    metrics::OPERATOR_HEALTH.set(0.0);
    info!("OpenStack credentials operator stopped");
    Ok(())
}

/// Initialize tracing subscriber
fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new("info,openstack_credentials=debug,kube=warn,hyper=warn")
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().json())
        .init();
}

/// Resolve once SIGINT or SIGTERM arrives
async fn shutdown_signal() {
    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Cannot listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        res = signal::ctrl_c() => match res {
            Ok(()) => info!("Received CTRL+C signal"),
            Err(e) => error!("Cannot listen for CTRL+C: {}", e),
        },
        _ = terminate => info!("Received SIGTERM signal"),
    }
}
