//! Core logic for the alvik-ble robot firmware.
//!
//! Everything here is independent of the SoftDevice and the board, so it
//! builds for the target (pulled in by `main.rs`) and for the host (unit
//! and integration tests against [`robot::sim::SimulatedRobot`]).
//!
//! Usage: `cargo test --lib` on the host, `cargo run --release
//! --features embedded` on the nRF52840.
//!
//! Logging goes through the crate's `info!`/`warn!`/`error!`/`debug!`
//! shims: defmt on target, the `log` facade on the host.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod macros;

pub mod ble;
pub mod codec;
pub mod config;
pub mod drive;
pub mod error;
pub mod gatt;
pub mod indicator;
pub mod lifecycle;
pub mod robot;
pub mod supervisor;
pub mod telemetry;

pub use error::{BleError, Error};

// ═══════════════════════════════════════════════════════════════════════════
// Cross-module Tests
// ═══════════════════════════════════════════════════════════════════════════
