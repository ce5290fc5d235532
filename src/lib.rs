//! Glowline firmware library.
//!
//! Exposes the control core for integration testing.  All ESP-IDF-specific
//! code is guarded by `#[cfg(target_os = "espidf")]` within each module, so
//! the crate builds and tests on the host with simulated peripherals.

#![deny(unused_must_use)]

pub mod adapters;
pub mod animation;
pub mod app;
pub mod channels;
pub mod config;
pub mod drivers;
pub mod error;
pub mod pins;
pub mod ticker;
