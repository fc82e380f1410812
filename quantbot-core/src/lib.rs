//! QuantBot Core — signal engine, domain types, risk management, data sources.
//!
//! This crate contains the computational heart of the trading bot:
//! - Domain types (candles, markets, signals, positions, trades)
//! - Indicator library (EMA, RSI)
//! - Strategy variants and trend detection
//! - Position sizing, trade management, and the open-position store
//! - Market data source trait with CSV and synthetic implementations
//!
//! Everything here is pure computation over caller-supplied data. Live
//! polling, exchange clients, and persistence beyond the in-memory store
//! are external collaborators behind the `data` and `risk` traits.

pub mod data;
pub mod domain;
pub mod indicators;
pub mod risk;
pub mod strategy;
