//! Error types for IPv6 address and network operations.

use thiserror::Error;

/// Errors returned by parsing, construction and collection operations.
///
/// Each failure mode is its own variant so callers can map them to
/// distinct exit codes or messages.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Ipv6Error {
    /// Unparseable text, wrong byte length or an IPv4-mapped value.
    #[error("ipv6: invalid address: {0}")]
    InvalidAddress(String),

    /// Malformed "address/prefix" text.
    #[error("ipv6: invalid cidr: {0}")]
    InvalidCidr(String),

    /// Prefix length outside 0..=128.
    #[error("ipv6: invalid prefix length: {0}")]
    InvalidPrefix(String),

    /// Split target shorter than the network's prefix or longer than 128.
    #[error("ipv6: invalid new prefix /{new_prefix_len} for a /{prefix_len} network")]
    InvalidSplitPrefix { prefix_len: u8, new_prefix_len: u8 },

    /// Split would produce more subnets than the configured ceiling.
    #[error("ipv6: splitting /{prefix_len} into /{new_prefix_len} exceeds {limit} subnets")]
    SplitExcessive {
        prefix_len: u8,
        new_prefix_len: u8,
        limit: u64,
    },

    /// Range start is after range end.
    #[error("ipv6: invalid range {start}-{end}")]
    InvalidRange { start: String, end: String },

    /// Range text that is not of the form `start-end`.
    #[error("ipv6: invalid range format: {0}")]
    InvalidRangeFormat(String),

    /// Operation needs at least one element.
    #[error("ipv6: empty input")]
    EmptyInput,

    /// Two networks overlap where disjoint input was required.
    #[error("ipv6: overlap detected: {a} {b}")]
    Overlap { a: String, b: String },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Ipv6Error>;
