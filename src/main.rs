use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use friction::api::{FrictionGateway, Gateway};
use friction::config::Config;
use friction::session::SessionManager;
use friction::store::SessionStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    let gateway: Arc<dyn Gateway> = Arc::new(FrictionGateway::new(config.base_url()?));

    // manual connectivity probe, non-fatal
    match gateway.ping().await {
        Ok(message) => info!("gateway reachable: {}", message),
        Err(e) => warn!("gateway ping failed: {}", e),
    }

    // kick off the brokerage handshake; the session poller picks up the result
    match gateway.login().await {
        Ok(url) => info!("complete the brokerage login in a browser: {}", url),
        Err(e) => warn!("login initiation failed: {}", e),
    }

    let store = Arc::new(SessionStore::new());
    let manager = SessionManager::new(gateway, store.clone(), config.poll_interval());
    let cancel = CancellationToken::new();

    tokio::select! {
        result = manager.run(cancel.clone()) => {
            if let Err(e) = result {
                error!("session manager failed: {}", e);
            }
        }
        _ = signal::ctrl_c() => {
            info!("shutting down ...");
            cancel.cancel();
        }
    }

    let snapshot = store.snapshot();
    info!(
        "final session: logged_in={} profile={} positions={} net / {} day, holdings={}",
        snapshot.is_logged_in,
        snapshot
            .profile
            .as_ref()
            .map(|p| p.user_id.as_str())
            .unwrap_or("-"),
        snapshot.positions.net.len(),
        snapshot.positions.day.len(),
        snapshot.holdings.len(),
    );

    Ok(())
}
