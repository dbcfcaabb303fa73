use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::api::Gateway;
use crate::session::loader::DataLoader;
use crate::session::poller::LoginPoller;
use crate::store::SessionStore;

/// Supervises the session lifecycle: polls for login while logged out, fires
/// the data loaders once per false→true transition, then waits on the login
/// watch channel for the next change. Owns no state of its own.
pub struct SessionManager {
    store: Arc<SessionStore>,
    poller: LoginPoller,
    loader: DataLoader,
}

impl SessionManager {
    pub fn new(
        gateway: Arc<dyn Gateway>,
        store: Arc<SessionStore>,
        poll_interval: Duration,
    ) -> Self {
        Self {
            poller: LoginPoller::new(gateway.clone(), store.clone(), poll_interval),
            loader: DataLoader::new(gateway, store.clone()),
            store,
        }
    }

    pub async fn run(&self, cancel: CancellationToken) -> Result<()> {
        let mut login = self.store.subscribe_login();

        loop {
            if !self.store.is_logged_in() {
                // logged-out phase: poll until the flag flips or we shut down
                let poll_cancel = cancel.child_token();
                tokio::select! {
                    _ = cancel.cancelled() => {
                        poll_cancel.cancel();
                        return Ok(());
                    }
                    _ = self.poller.run(poll_cancel.clone()) => {}
                }
                if cancel.is_cancelled() || !self.store.is_logged_in() {
                    return Ok(());
                }
            }

            // false→true transition: fire each loader exactly once
            self.loader.load_all().await;

            // consume the transition we just handled, then wait for the flag
            // to move again
            let _ = login.borrow_and_update();
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => return Ok(()),
                    changed = login.changed() => {
                        if changed.is_err() {
                            return Ok(());
                        }
                    }
                }
                if !self.store.is_logged_in() {
                    info!("gateway session lost, resuming login polling");
                    break;
                }
            }
        }
    }
}
