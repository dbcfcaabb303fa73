use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::Gateway;
use crate::store::SessionStore;

/// The fetch-then-store operations fired when a session comes up. Failures
/// are logged and swallowed at the call site; the store keeps whatever it
/// held before.
pub struct DataLoader {
    gateway: Arc<dyn Gateway>,
    store: Arc<SessionStore>,
}

impl DataLoader {
    pub fn new(gateway: Arc<dyn Gateway>, store: Arc<SessionStore>) -> Self {
        Self { gateway, store }
    }

    /// Run all three loads concurrently. Called once per false→true login
    /// transition.
    pub async fn load_all(&self) {
        tokio::join!(
            self.load_profile_if_absent(),
            self.load_positions(),
            self.load_holdings(),
        );
    }

    /// Fetch the profile unless one is already present.
    pub async fn load_profile_if_absent(&self) {
        if self.store.profile().is_some() {
            return;
        }
        match self.gateway.get_profile().await {
            Ok(profile) => {
                info!("profile loaded: {}", profile);
                self.store.set_profile(profile);
            }
            Err(e) => warn!("profile fetch failed: {}", e),
        }
    }

    /// Fetch and store the position book wholesale. The ticket issued before
    /// the request ties the completion to its issue order, so an overlapping
    /// newer load cannot be clobbered by this one arriving late.
    pub async fn load_positions(&self) {
        let ticket = self.store.issue_positions_ticket();
        match self.gateway.get_positions().await {
            Ok(book) => {
                let (net, day) = (book.net.len(), book.day.len());
                if self.store.set_positions(book, ticket) {
                    info!("positions updated: {} net / {} day", net, day);
                } else {
                    debug!("discarding stale positions completion (ticket {})", ticket);
                }
            }
            Err(e) => warn!("positions fetch failed: {}", e),
        }
    }

    /// Fetch and store the holdings list wholesale, same ticket guard as
    /// positions.
    pub async fn load_holdings(&self) {
        let ticket = self.store.issue_holdings_ticket();
        match self.gateway.get_holdings().await {
            Ok(holdings) => {
                let count = holdings.len();
                if self.store.set_holdings(holdings, ticket) {
                    info!("holdings updated: {} rows", count);
                } else {
                    debug!("discarding stale holdings completion (ticket {})", ticket);
                }
            }
            Err(e) => warn!("holdings fetch failed: {}", e),
        }
    }
}
