use std::sync::Arc;
use std::time::Duration;

use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::api::Gateway;
use crate::store::SessionStore;

/// Fixed-interval login poll. Runs only while logged out: each tick asks the
/// gateway whether a session exists and writes the answer to the store
/// unconditionally. Stops itself the instant the flag flips true; the
/// supervisor cancels it on teardown.
pub struct LoginPoller {
    gateway: Arc<dyn Gateway>,
    store: Arc<SessionStore>,
    interval: Duration,
}

impl LoginPoller {
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<SessionStore>, interval: Duration) -> Self {
        Self {
            gateway,
            store,
            interval,
        }
    }

    pub async fn run(&self, cancel: CancellationToken) {
        let mut ticker = time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            let logged_in = match self.gateway.check_login().await {
                Ok(logged_in) => logged_in,
                Err(e) => {
                    // swallowed on purpose: the next tick retries, no backoff
                    warn!("login status check failed: {}", e);
                    continue;
                }
            };

            // the supervisor may have torn us down while the request was in
            // flight; a stale completion must not touch the store
            if cancel.is_cancelled() {
                debug!("discarding login poll result received after cancellation");
                break;
            }

            self.store.set_login_state(logged_in);
            if logged_in {
                info!("gateway session established");
                break;
            }
        }
    }
}
