//! Yahoo module - market data client for the Yahoo Finance chart API

pub mod messages;
pub mod rest;

pub use rest::{YahooFinanceClient, VALID_RANGES};
