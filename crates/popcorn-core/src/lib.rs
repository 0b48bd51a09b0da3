//! Core domain + application logic for the Popcorn movie bot.
//!
//! This crate is intentionally framework-agnostic. Telegram and TMDB live
//! behind ports (traits) implemented in adapter crates.

pub mod audit;
pub mod callback;
pub mod config;
pub mod domain;
pub mod errors;
pub mod formatting;
pub mod gate;
pub mod logging;
pub mod messaging;
pub mod metadata;
pub mod router;
pub mod screens;

#[cfg(test)]
mod testing;

pub use errors::{Error, Result};
