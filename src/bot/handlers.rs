//! Price commands: `prices`, `trend` and `set_alert`
//!
//! Handlers take raw string arguments and always produce a [`Reply`]; bad
//! input and provider failures become user-visible text, never errors.

use rust_decimal::Decimal;
use std::str::FromStr;
use tracing::{info, warn};

use super::reply::{EmbedColor, EmbedReply, Reply};
use crate::common::errors::{BotError, Result};
use crate::common::traits::SharedProvider;
use crate::common::types::{format_usd, Alert, RequesterId, Symbol};
use crate::config::types::AppSettings;
use crate::market::MarketState;
use crate::yahoo::VALID_RANGES;

/// Number of closes shown when `trend` is given a timeframe
pub const SERIES_TAIL_LEN: usize = 5;

/// Second argument of the `trend` command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrendWindow {
    /// Moving average over this many most recent closes
    Periods(usize),
    /// Raw closes over a provider range such as `5d` or `1mo`
    Timeframe(String),
}

impl FromStr for TrendWindow {
    type Err = BotError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Ok(period) = s.parse::<i64>() {
            return match usize::try_from(period) {
                Ok(period) if period > 0 => Ok(TrendWindow::Periods(period)),
                _ => Err(BotError::InvalidInput(
                    "Period must be a positive whole number.".to_string(),
                )),
            };
        }

        let range = s.to_ascii_lowercase();
        if VALID_RANGES.contains(&range.as_str()) {
            Ok(TrendWindow::Timeframe(range))
        } else {
            Err(BotError::InvalidInput(format!(
                "Unknown window '{}'. Use a number of periods or one of: {}",
                s,
                VALID_RANGES.join(", ")
            )))
        }
    }
}

/// Arithmetic mean of the last `period` values
///
/// Returns `None` when `period` is zero or longer than the series.
pub fn simple_moving_average(closes: &[Decimal], period: usize) -> Option<Decimal> {
    if period == 0 || closes.len() < period {
        return None;
    }
    let window = &closes[closes.len() - period..];
    let sum: Decimal = window.iter().sum();
    Some(sum / Decimal::from(period))
}

/// Handlers for the price-related commands
#[derive(Clone)]
pub struct CommandHandler {
    market: MarketState,
    provider: SharedProvider,
    refresh_interval_secs: u64,
    trend_range: String,
}

impl CommandHandler {
    pub fn new(market: MarketState, provider: SharedProvider, settings: &AppSettings) -> Self {
        Self {
            market,
            provider,
            refresh_interval_secs: settings.poll_interval_seconds,
            trend_range: settings.trend_range.clone(),
        }
    }

    /// Shared market state
    pub fn market(&self) -> &MarketState {
        &self.market
    }

    /// `prices <symbol>`: cached price as an embed
    pub async fn prices(&self, symbol: &str) -> Reply {
        let Ok(symbol) = symbol.parse::<Symbol>() else {
            return Reply::text(format!(
                "Invalid symbol! Available options: {}",
                Symbol::available()
            ));
        };

        match self.market.cache.get(symbol).await {
            None => Reply::text(format!(
                "Real-time data for {} is currently unavailable.",
                symbol
            )),
            Some(price) => EmbedReply::new(
                format!("{} Futures Price", symbol),
                format!("**{}**", format_usd(price)),
                EmbedColor::Blue,
            )
            .with_footer(format!(
                "Updated every {} seconds | Data may be stale | Data from {}",
                self.refresh_interval_secs,
                self.provider.provider_name()
            ))
            .into(),
        }
    }

    /// `set_alert <symbol> <price>`: register a one-shot upward alert
    pub async fn set_alert(&self, symbol: &str, price: &str, requester: RequesterId) -> Reply {
        match self.register_alert(symbol, price, requester).await {
            Ok(alert) => Reply::text(format!(
                "Price alert set for {} at {}",
                alert.symbol,
                format_usd(alert.threshold)
            )),
            Err(BotError::UnknownSymbol(_)) => Reply::text(
                "Invalid symbol! Use the `prices` command to see available symbols.",
            ),
            Err(BotError::PriceUnavailable(symbol)) => Reply::text(format!(
                "No price has been observed for {} yet. Please try again shortly.",
                symbol
            )),
            Err(e) => Reply::text(e.user_message()),
        }
    }

    async fn register_alert(&self, symbol: &str, price: &str, requester: RequesterId) -> Result<Alert> {
        let symbol: Symbol = symbol.parse()?;
        if !self.market.cache.contains(symbol).await {
            return Err(BotError::PriceUnavailable(symbol.to_string()));
        }

        let threshold = parse_price(price)?;
        let alert = Alert::new(symbol, threshold, requester);
        let pending = self.market.registry.register(alert.clone()).await;
        info!(%symbol, %threshold, %requester, pending, "Alert registered");
        Ok(alert)
    }

    /// `trend <symbol> <window>`: moving average or recent closes
    pub async fn trend(&self, symbol: &str, window: &str) -> Reply {
        let Ok(symbol) = symbol.parse::<Symbol>() else {
            return Reply::text(
                "Invalid symbol! Use the `prices` command to see available symbols.",
            );
        };

        let window = match window.parse::<TrendWindow>() {
            Ok(window) => window,
            Err(e) => return Reply::text(e.user_message()),
        };

        match self.compute_trend(symbol, &window).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(%symbol, error = %e, "Trend query failed");
                Reply::text(format!("Error fetching data: {}", e))
            }
        }
    }

    async fn compute_trend(&self, symbol: Symbol, window: &TrendWindow) -> Result<Reply> {
        match window {
            TrendWindow::Periods(period) => {
                let closes = self.provider.close_series(symbol, &self.trend_range).await?;
                let sma = simple_moving_average(&closes, *period).ok_or_else(|| {
                    BotError::InsufficientData(format!(
                        "{} closes available, {} needed",
                        closes.len(),
                        period
                    ))
                })?;
                Ok(Reply::text(format!(
                    "The {}-period SMA for {} is {}",
                    period,
                    symbol,
                    format_usd(sma)
                )))
            }
            TrendWindow::Timeframe(range) => {
                let closes = self.provider.close_series(symbol, range).await?;
                if closes.is_empty() {
                    return Err(BotError::InsufficientData(format!(
                        "no closes returned for {}",
                        range
                    )));
                }
                let tail: Vec<String> = closes[closes.len().saturating_sub(SERIES_TAIL_LEN)..]
                    .iter()
                    .map(|close| format_usd(*close))
                    .collect();
                Ok(Reply::text(format!(
                    "Last {} closes for {} ({}): {}",
                    tail.len(),
                    symbol,
                    range,
                    tail.join(", ")
                )))
            }
        }
    }
}

/// Parse a user-supplied alert price, accepting a leading `$`
fn parse_price(raw: &str) -> Result<Decimal> {
    let cleaned = raw.trim().trim_start_matches('$').replace(',', "");
    let price = Decimal::from_str(&cleaned)
        .map_err(|_| BotError::InvalidInput(format!("Invalid price '{}'.", raw.trim())))?;
    if price <= Decimal::ZERO {
        return Err(BotError::InvalidInput(
            "Target price must be greater than zero.".to_string(),
        ));
    }
    Ok(price)
}
