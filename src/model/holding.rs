use serde::{Deserialize, Serialize};

/// One long-term holding row from the gateway's holdings endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Holding {
    pub tradingsymbol: String,
    pub exchange: String,
    pub product: String,
    pub quantity: i64,
    pub average_price: f64,
    pub last_price: f64,
    pub pnl: f64,
    pub unrealised: f64,
    pub realised: f64,
}

impl Holding {
    pub fn market_value(&self) -> f64 {
        self.quantity as f64 * self.last_price
    }
}
