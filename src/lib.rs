//! IPv6 address and network algebra.
//!
//! Parsing, formatting and arithmetic on 128-bit addresses, plus the
//! operations over networks used for subnet planning and route
//! summarization: split, summarize, range cover and supernet.
//!
//! ```
//! use ipv6_subnet_calc::{cover_range, Address, Network};
//!
//! let net = Network::parse("2001:db8::/64").unwrap();
//! assert_eq!(net.last_host().to_string(), "2001:db8::ffff:ffff:ffff:ffff");
//!
//! let start = Address::parse("2001:db8::1").unwrap();
//! let end = Address::parse("2001:db8::ff").unwrap();
//! assert_eq!(cover_range(start, end).unwrap().len(), 8);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod processing;

pub use config::SplitLimits;
pub use error::{Ipv6Error, Result};
pub use models::{distance, Address, Network};
pub use processing::{
    check_no_overlaps, cover_range, diff, find_gaps, find_overlaps, split, split_with_limits,
    subnets, subnets_with_limits, summarize, supernet, Gap, NetworkDiff, SubnetIter,
};

/// Parse every CIDR in `cidrs`, stopping at the first invalid one.
pub fn parse_networks<S: AsRef<str>>(cidrs: &[S]) -> Result<Vec<Network>> {
    cidrs.iter().map(|s| Network::parse(s.as_ref())).collect()
}

/// Parse an `"start-end"` address range.
pub fn parse_range(range: &str) -> Result<(Address, Address)> {
    let parts: Vec<&str> = range.trim().split('-').collect();
    if parts.len() != 2 {
        return Err(Ipv6Error::InvalidRangeFormat(range.to_string()));
    }
    Ok((Address::parse(parts[0])?, Address::parse(parts[1])?))
}
