//! Core library for the taxpair-engine project.
//!
//! Pure arithmetic and validation for a constant-product pair that charges
//! buy/sell taxes on top of its LP fee: swap fee/tax breakdowns, lens pair
//! health classification and the trade gate built on both. Nothing here
//! performs I/O; the `taxpair-watch` binary supplies already-read payloads.

pub mod config;
pub mod dex;
pub mod errors;
pub mod lens;
pub mod models;
pub mod trade;
pub mod utils;
