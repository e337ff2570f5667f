//! Domain types shared by the price poller, alert checker and command handlers

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::errors::BotError;

/// Futures symbols the bot tracks
///
/// The set is fixed; each symbol maps to the instrument code the
/// market data provider understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Symbol {
    /// E-mini S&P 500
    #[serde(rename = "ES")]
    Es,
    /// E-mini Nasdaq 100
    #[serde(rename = "NQ")]
    Nq,
    /// Gold
    #[serde(rename = "GC")]
    Gc,
    /// Crude oil
    #[serde(rename = "CL")]
    Cl,
    /// E-mini Dow
    #[serde(rename = "YM")]
    Ym,
    /// Silver
    #[serde(rename = "SI")]
    Si,
}

impl Symbol {
    /// Every tracked symbol, in display order
    pub const ALL: [Symbol; 6] = [
        Symbol::Es,
        Symbol::Nq,
        Symbol::Gc,
        Symbol::Cl,
        Symbol::Ym,
        Symbol::Si,
    ];

    /// Ticker as users type it
    pub fn as_str(&self) -> &'static str {
        match self {
            Symbol::Es => "ES",
            Symbol::Nq => "NQ",
            Symbol::Gc => "GC",
            Symbol::Cl => "CL",
            Symbol::Ym => "YM",
            Symbol::Si => "SI",
        }
    }

    /// Instrument code used by the market data provider
    pub fn provider_code(&self) -> &'static str {
        match self {
            Symbol::Es => "^GSPC",
            Symbol::Nq => "^NDX",
            Symbol::Gc => "GC=F",
            Symbol::Cl => "CL=F",
            Symbol::Ym => "YM=F",
            Symbol::Si => "SI=F",
        }
    }

    /// Human readable instrument name
    pub fn description(&self) -> &'static str {
        match self {
            Symbol::Es => "S&P 500",
            Symbol::Nq => "Nasdaq 100",
            Symbol::Gc => "Gold",
            Symbol::Cl => "Crude Oil",
            Symbol::Ym => "Dow Jones",
            Symbol::Si => "Silver",
        }
    }

    /// Comma separated list of every symbol, for user-facing hints
    pub fn available() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Symbol {
    type Err = BotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|symbol| symbol.as_str() == wanted)
            .ok_or_else(|| BotError::UnknownSymbol(s.trim().to_string()))
    }
}

/// Identity of the chat user who registered an alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RequesterId(pub u64);

impl std::fmt::Display for RequesterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A one-shot upward price alert
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    /// Symbol being watched
    pub symbol: Symbol,
    /// Fires once the price is at or above this level
    pub threshold: Decimal,
    /// Who gets the direct message
    pub requester: RequesterId,
    /// Registration time
    pub created_at: DateTime<Utc>,
}

impl Alert {
    /// Create a new alert registered now
    pub fn new(symbol: Symbol, threshold: Decimal, requester: RequesterId) -> Self {
        Self {
            symbol,
            threshold,
            requester,
            created_at: Utc::now(),
        }
    }

    /// Whether `price` satisfies this alert
    pub fn is_triggered(&self, price: Decimal) -> bool {
        price >= self.threshold
    }
}

/// An alert removed from the registry together with the price that fired it
#[derive(Debug, Clone, PartialEq)]
pub struct TriggeredAlert {
    pub alert: Alert,
    pub price: Decimal,
}

/// Format a price as dollars with two decimal places
pub fn format_usd(value: Decimal) -> String {
    format!("${:.2}", value.round_dp(2))
}
