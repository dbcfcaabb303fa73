use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::RwLock;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::model::{Holding, PositionBook, Profile};

/// Monotonic sequence number tying a fetch completion back to the request
/// that issued it. Completions racing out of order are resolved in ticket
/// order, not arrival order.
pub type Ticket = u64;

#[derive(Debug)]
struct Slot<T> {
    value: T,
    applied: Ticket,
    updated_at: Option<DateTime<Utc>>,
}

impl<T: Default> Default for Slot<T> {
    fn default() -> Self {
        Self {
            value: T::default(),
            applied: 0,
            updated_at: None,
        }
    }
}

/// Single source of truth for the client-side session: the login flag, the
/// profile record, the position book, and the holdings list. Mutation is
/// only possible through the named transitions below; everything else is a
/// read-only selector. Login-flag changes are published over a watch channel
/// so consumers can react to transitions instead of polling the store.
pub struct SessionStore {
    login: watch::Sender<bool>,
    profile: RwLock<Slot<Option<Profile>>>,
    positions: RwLock<Slot<PositionBook>>,
    holdings: RwLock<Slot<Vec<Holding>>>,
    position_tickets: AtomicU64,
    holding_tickets: AtomicU64,
}

impl SessionStore {
    pub fn new() -> Self {
        let (login, _) = watch::channel(false);
        Self {
            login,
            profile: RwLock::new(Slot::default()),
            positions: RwLock::new(Slot::default()),
            holdings: RwLock::new(Slot::default()),
            position_tickets: AtomicU64::new(0),
            holding_tickets: AtomicU64::new(0),
        }
    }

    /// Overwrite the login flag with a poll result. The flag is written
    /// unconditionally so it can also flip back to false.
    pub fn set_login_state(&self, logged_in: bool) {
        self.login.send_replace(logged_in);
    }

    pub fn is_logged_in(&self) -> bool {
        *self.login.borrow()
    }

    pub fn subscribe_login(&self) -> watch::Receiver<bool> {
        self.login.subscribe()
    }

    /// Replace the profile record wholesale.
    pub fn set_profile(&self, profile: Profile) {
        let mut slot = self.profile.write().expect("session store lock poisoned");
        slot.value = Some(profile);
        slot.updated_at = Some(Utc::now());
    }

    pub fn profile(&self) -> Option<Profile> {
        self.profile
            .read()
            .expect("session store lock poisoned")
            .value
            .clone()
    }

    pub fn issue_positions_ticket(&self) -> Ticket {
        self.position_tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the position book wholesale. Returns false, leaving the store
    /// untouched, when a completion with a newer ticket has already been
    /// applied.
    pub fn set_positions(&self, book: PositionBook, ticket: Ticket) -> bool {
        let mut slot = self.positions.write().expect("session store lock poisoned");
        if ticket <= slot.applied {
            return false;
        }
        slot.value = book;
        slot.applied = ticket;
        slot.updated_at = Some(Utc::now());
        true
    }

    pub fn positions(&self) -> PositionBook {
        self.positions
            .read()
            .expect("session store lock poisoned")
            .value
            .clone()
    }

    pub fn issue_holdings_ticket(&self) -> Ticket {
        self.holding_tickets.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Replace the holdings list wholesale, with the same ticket guard as
    /// [`SessionStore::set_positions`].
    pub fn set_holdings(&self, holdings: Vec<Holding>, ticket: Ticket) -> bool {
        let mut slot = self.holdings.write().expect("session store lock poisoned");
        if ticket <= slot.applied {
            return false;
        }
        slot.value = holdings;
        slot.applied = ticket;
        slot.updated_at = Some(Utc::now());
        true
    }

    pub fn holdings(&self) -> Vec<Holding> {
        self.holdings
            .read()
            .expect("session store lock poisoned")
            .value
            .clone()
    }

    /// Serializable point-in-time view of the whole session.
    pub fn snapshot(&self) -> SessionSnapshot {
        let positions = self.positions.read().expect("session store lock poisoned");
        let holdings = self.holdings.read().expect("session store lock poisoned");
        SessionSnapshot {
            timestamp: Utc::now(),
            is_logged_in: self.is_logged_in(),
            profile: self.profile(),
            positions: positions.value.clone(),
            positions_updated_at: positions.updated_at,
            holdings: holdings.value.clone(),
            holdings_updated_at: holdings.updated_at,
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub timestamp: DateTime<Utc>,
    pub is_logged_in: bool,
    pub profile: Option<Profile>,
    pub positions: PositionBook,
    pub positions_updated_at: Option<DateTime<Utc>>,
    pub holdings: Vec<Holding>,
    pub holdings_updated_at: Option<DateTime<Utc>>,
}
