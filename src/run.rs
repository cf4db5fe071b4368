//! Application execution logic.
//!
//! This module wires the router scanner, subscription state and Telegram
//! client together and runs the polling and command loops until shutdown.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::signal;

use lanwatch::bot::{
    AccessList, ChangeNotifier, CommandContext, CommandDispatcher, CommandLoop, CommandTable,
    restore_subscriptions,
};
use lanwatch::config::ValidatedConfig;
use lanwatch::device::{AliasTable, DeviceScanner};
use lanwatch::monitor::{MonitorError, PollingLoop};
use lanwatch::notify::Registry;
use lanwatch::router::JnapClient;
use lanwatch::state::FileSubscriptionStore;
use lanwatch::telegram::{TelegramClient, TelegramError};
use lanwatch::transport::{HttpClient, ReqwestClient};

#[cfg(test)]
#[path = "run_tests.rs"]
mod tests;

type Router<H> = JnapClient<H>;
type Telegram<H> = TelegramClient<H>;

/// Error type for runtime execution failures.
#[derive(Debug, Error)]
pub enum RunError {
    /// The router address does not form a JNAP endpoint.
    #[error("Invalid router endpoint: {0}")]
    RouterEndpoint(#[source] url::ParseError),

    /// The Telegram client could not be created.
    #[error("Failed to create Telegram client: {0}")]
    Telegram(#[source] TelegramError),

    /// A change handler failed and the polling loop stopped.
    #[error(transparent)]
    Monitor(#[from] MonitorError),

    /// The command loop returned.
    #[error("Command loop terminated unexpectedly")]
    CommandLoopTerminated,
}

/// Runtime options extracted from validated config.
///
/// This struct holds only the fields needed after wiring, allowing the
/// config's access list to be moved into the dispatcher separately.
struct RuntimeOptions {
    poll_interval: Duration,
}

impl From<&ValidatedConfig> for RuntimeOptions {
    fn from(config: &ValidatedConfig) -> Self {
        Self {
            poll_interval: config.poll_interval,
        }
    }
}

/// The two long-running loops, ready to start.
struct Service<H> {
    polling: PollingLoop<Router<H>, ChangeNotifier<Telegram<H>>>,
    commands: CommandLoop<Telegram<H>, Router<H>, FileSubscriptionStore>,
    restored: usize,
}

/// Executes the main application loop.
///
/// This function:
/// 1. Builds the router scanner and Telegram client on one HTTP client
/// 2. Opens the subscription state and restores stored subscribers
/// 3. Runs the polling and command loops until shutdown signal (Ctrl+C)
///
/// # Errors
///
/// Returns an error if:
/// - The router address or token cannot form a request URL
/// - A change handler fails
/// - The command loop returns
///
/// # Coverage Note
///
/// This function is excluded from coverage because it requires:
/// - A reachable router and Telegram API
/// - Real async runtime with signal handling
#[cfg(not(tarpaulin_include))]
pub async fn execute(config: ValidatedConfig, aliases: AliasTable) -> Result<(), RunError> {
    let options = RuntimeOptions::from(&config);
    let service = assemble(ReqwestClient::new(), config, aliases)?;

    tracing::info!(
        restored = service.restored,
        "Polling router every {}s",
        options.poll_interval.as_secs()
    );

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    tokio::select! {
        biased;

        () = &mut shutdown => {
            tracing::info!("Shutdown signal received, stopping...");
            Ok(())
        }

        result = service.polling.run() => {
            result?;
            Ok(())
        }

        () = service.commands.run() => Err(RunError::CommandLoopTerminated),
    }
}

/// Builds both loops around a shared HTTP client.
///
/// Stored subscribers are restored into the registry before either loop
/// exists, so the first detected change already reaches them.
fn assemble<H>(
    http: H,
    config: ValidatedConfig,
    aliases: AliasTable,
) -> Result<Service<H>, RunError>
where
    H: HttpClient + Clone,
{
    let router =
        JnapClient::new(http.clone(), &config.router_address).map_err(RunError::RouterEndpoint)?;
    let scanner = Arc::new(DeviceScanner::new(router, aliases));

    let store = Arc::new(FileSubscriptionStore::open(config.state_file.clone()));
    let registry = Registry::new();
    let restored = restore(&store, &registry, &config.access_list);

    let telegram = Arc::new(TelegramClient::new(http, &config.token).map_err(RunError::Telegram)?);

    let polling = PollingLoop::new(
        Arc::clone(&scanner),
        registry.reader(),
        ChangeNotifier::new(Arc::clone(&telegram)),
        config.poll_interval,
    );

    let context = CommandContext {
        scanner,
        registry: registry.writer(),
        store,
    };
    let dispatcher = CommandDispatcher::new(CommandTable::standard(), config.access_list, context);
    let commands = CommandLoop::new(telegram, dispatcher);

    Ok(Service {
        polling,
        commands,
        restored,
    })
}

fn restore(store: &FileSubscriptionStore, registry: &Registry, access: &AccessList) -> usize {
    let restored = restore_subscriptions(store, &registry.writer(), access);
    if restored > 0 {
        tracing::info!(restored, "Restored stored subscriptions");
    }
    restored
}

/// Returns a future that completes when a shutdown signal is received.
///
/// A signal handler that cannot be installed is logged and never fires.
///
/// Excluded from coverage - requires OS signal handling.
#[cfg(not(tarpaulin_include))]
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
