//! Domain models for IPv6 address algebra.
//!
//! This module contains the core value types:
//! - [`Address`] - a single 128-bit IPv6 address
//! - [`Network`] - a base address plus prefix length (CIDR block)

mod address;
mod network;

// Re-export public types
pub use address::{distance, get_cidr_mask, lo_mask, Address};
pub use network::Network;
