//! Core domain + application logic for the courier relay bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and the liveness
//! HTTP surface live behind ports implemented in adapter crates.

pub mod autoreply;
pub mod config;
pub mod domain;
pub mod errors;
pub mod liveness;
pub mod logging;
pub mod logs;
pub mod messaging;
pub mod registry;
pub mod relay;
pub mod routing;

pub use errors::{Error, Result};
