pub mod friction;

use async_trait::async_trait;

use crate::model::{Holding, PositionBook, Profile};

pub use self::friction::FrictionGateway;

/// The backend HTTP API this client talks to. The session layer only sees
/// this trait so it can be driven against fakes in tests.
#[async_trait]
pub trait Gateway: Send + Sync {
    /// Start the brokerage login handshake. Returns the identity provider's
    /// redirect URL, which must be completed in a browser.
    async fn login(&self) -> anyhow::Result<String>;
    /// Ask whether a valid session exists right now.
    async fn check_login(&self) -> anyhow::Result<bool>;
    async fn get_profile(&self) -> anyhow::Result<Profile>;
    async fn get_positions(&self) -> anyhow::Result<PositionBook>;
    async fn get_holdings(&self) -> anyhow::Result<Vec<Holding>>;
    /// Opaque side-effecting trigger; the acknowledgment payload is unused.
    async fn watch_nifty50_option(&self) -> anyhow::Result<()>;
    /// Manual connectivity probe.
    async fn ping(&self) -> anyhow::Result<String>;
}
