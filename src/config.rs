//! Constants and tunable limits.

/// Length in bytes of an IPv6 address.
pub const BYTE_LEN: usize = 16;

/// Number of bits in an IPv6 address, also the longest valid prefix.
pub const BIT_LEN: u8 = 128;

/// Default ceiling on the number of subnets one split may produce (~1M).
pub const MAX_SPLIT_PARTS: u64 = 1 << 20;

/// Zone label appended to reverse DNS names.
pub const REVERSE_DNS_SUFFIX: &str = "ip6.arpa.";

/// Limits applied when splitting a network.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplitLimits {
    /// Largest number of subnets a split may generate.
    pub max_parts: u64,
}

impl SplitLimits {
    pub fn new(max_parts: u64) -> SplitLimits {
        SplitLimits { max_parts }
    }
}

impl Default for SplitLimits {
    fn default() -> Self {
        SplitLimits {
            max_parts: MAX_SPLIT_PARTS,
        }
    }
}
