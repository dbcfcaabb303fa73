use std::fmt;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Point-in-time snapshot of one instrument's quantity/price/P&L, as served
/// by the gateway's positions endpoint. A value object: never mutated in
/// place, only replaced wholesale inside a [`PositionBook`].
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Position {
    pub tradingsymbol: String,
    pub exchange: String,
    pub instrument_token: i64,
    pub product: String,
    pub quantity: i64,
    pub overnight_quantity: i64,
    pub multiplier: f64,
    pub average_price: f64,
    pub close_price: f64,
    pub last_price: f64,
    pub value: f64,
    pub pnl: f64,
    pub m2m: f64,
    pub unrealised: f64,
    pub realised: f64,
    pub buy_quantity: i64,
    pub buy_price: f64,
    pub buy_value: f64,
    pub buy_m2m: f64,
    pub sell_quantity: i64,
    pub sell_price: f64,
    pub sell_value: f64,
    pub sell_m2m: f64,
    pub day_buy_quantity: i64,
    pub day_buy_price: f64,
    pub day_buy_value: f64,
    pub day_sell_quantity: i64,
    pub day_sell_price: f64,
    pub day_sell_value: f64,
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} x{} @ {} pnl {}",
            self.exchange, self.tradingsymbol, self.quantity, self.average_price, self.pnl
        )
    }
}

/// The two ordered position sequences the gateway reports: carried-over net
/// positions and intraday positions.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PositionBook {
    pub net: Vec<Position>,
    pub day: Vec<Position>,
}

impl PositionBook {
    pub fn is_empty(&self) -> bool {
        self.net.is_empty() && self.day.is_empty()
    }
}
