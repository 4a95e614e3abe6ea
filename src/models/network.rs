//! IPv6 network (CIDR block) model.
//!
//! A [`Network`] is a base address plus prefix length. The base is always
//! masked to the prefix, whichever way the value was built.

use super::address::{get_cidr_mask, Address};
use crate::config::{SplitLimits, BIT_LEN};
use crate::error::{Ipv6Error, Result};
use crate::processing::{split_with_limits, subnets_with_limits, SubnetIter};
use num_bigint::{BigInt, BigUint};
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Parse a decimal prefix length in `0..=128`.
fn parse_prefix(text: &str) -> Result<u8> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Ipv6Error::InvalidPrefix(text.to_string()));
    }
    match text.parse::<u32>() {
        Ok(len) if len <= u32::from(BIT_LEN) => Ok(len as u8),
        _ => Err(Ipv6Error::InvalidPrefix(text.to_string())),
    }
}

/// IPv6 network in CIDR notation.
///
/// Ordering is by base address, then by prefix length (shorter first).
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Network {
    base: Address,
    prefix_len: u8,
}

impl Network {
    /// Create a [`Network`], masking `addr` to `prefix_len` bits.
    pub fn new(addr: Address, prefix_len: u8) -> Result<Network> {
        if prefix_len > BIT_LEN {
            return Err(Ipv6Error::InvalidPrefix(prefix_len.to_string()));
        }
        Ok(Network::from_parts(addr, prefix_len))
    }

    /// Callers guarantee `prefix_len <= 128`; the base is still masked.
    pub(crate) fn from_parts(addr: Address, prefix_len: u8) -> Network {
        Network {
            base: addr.mask(prefix_len),
            prefix_len,
        }
    }

    /// Parse `"address/prefix"` text (e.g. `"2001:db8::/64"`).
    pub fn parse(cidr: &str) -> Result<Network> {
        Network::parse_with(cidr, Address::parse)
    }

    fn parse_with(cidr: &str, parse_addr: fn(&str) -> Result<Address>) -> Result<Network> {
        let cidr = cidr.trim();
        let parts: Vec<&str> = cidr.split('/').collect();
        if parts.len() != 2 {
            return Err(Ipv6Error::InvalidCidr(cidr.to_string()));
        }
        let addr = parse_addr(parts[0])?;
        let prefix_len = parse_prefix(parts[1])?;
        Network::new(addr, prefix_len)
    }

    /// Base (network) address.
    pub fn base(&self) -> Address {
        self.base
    }

    pub fn network(&self) -> Address {
        self.base
    }

    pub fn prefix_len(&self) -> u8 {
        self.prefix_len
    }

    /// Number of host bits, `128 - prefix_len`.
    pub fn host_bits(&self) -> u8 {
        BIT_LEN - self.prefix_len
    }

    /// Number of addresses, `2^(128 - prefix_len)`.
    pub fn host_count(&self) -> BigUint {
        BigUint::from(1u8) << u32::from(self.host_bits())
    }

    /// Host count as a power of two, e.g. `"2^64"`.
    pub fn host_count_power(&self) -> String {
        format!("2^{}", self.host_bits())
    }

    /// First address, identical to the base for IPv6.
    pub fn first_host(&self) -> Address {
        self.base
    }

    /// Last address in the network.
    pub fn last_host(&self) -> Address {
        Address::from_raw(self.base.to_bits() | !get_cidr_mask(self.prefix_len))
    }

    pub fn contains_address(&self, addr: Address) -> bool {
        addr.mask(self.prefix_len) == self.base
    }

    /// True if `other` lies entirely inside this network.
    pub fn contains_network(&self, other: &Network) -> bool {
        self.prefix_len <= other.prefix_len && self.contains_address(other.base)
    }

    /// Closed-interval overlap of the two address ranges.
    pub fn overlaps(&self, other: &Network) -> bool {
        self.first_host() <= other.last_host() && other.first_host() <= self.last_host()
    }

    /// Adjacent network of the same size that follows this one (wraps at the top).
    pub fn next(&self) -> Network {
        let addr = self.base.add(&BigInt::from(self.host_count()));
        Network::from_parts(addr, self.prefix_len)
    }

    /// Adjacent network of the same size that precedes this one (wraps at `::`).
    pub fn prev(&self) -> Network {
        let addr = self.base.subtract(&BigInt::from(self.host_count()));
        Network::from_parts(addr, self.prefix_len)
    }

    /// Split into `/new_prefix_len` subnets using the default ceiling.
    pub fn split(&self, new_prefix_len: u8) -> Result<Vec<Network>> {
        split_with_limits(self, new_prefix_len, SplitLimits::default())
    }

    /// Lazily iterate `/new_prefix_len` subnets using the default ceiling.
    pub fn subnets(&self, new_prefix_len: u8) -> Result<SubnetIter> {
        subnets_with_limits(self, new_prefix_len, SplitLimits::default())
    }

    /// Iterate every address in the network, lowest first.
    pub fn hosts(&self) -> impl Iterator<Item = Address> {
        let first = self.first_host().to_bits();
        let last = self.last_host().to_bits();
        (first..=last).map(Address::from_raw)
    }

    /// Up to `limit` addresses starting at the first host, `stride` apart.
    ///
    /// Stops early at the first address that leaves the network. A zero
    /// `stride` yields only the first host, and a zero `limit` yields nothing.
    pub fn enumerate(&self, stride: u64, limit: usize) -> Vec<Address> {
        let mut addrs = Vec::new();
        let mut addr = self.first_host();
        for _ in 0..limit {
            if !self.contains_address(addr) {
                break;
            }
            addrs.push(addr);
            let next = addr.offset(stride);
            if next <= addr {
                // wrapped past the top of the address space
                break;
            }
            addr = next;
        }
        addrs
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.prefix_len)
    }
}

impl FromStr for Network {
    type Err = Ipv6Error;

    fn from_str(s: &str) -> Result<Network> {
        Network::parse(s)
    }
}

impl Serialize for Network {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Network, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Network::parse_with(&s, Address::parse_serialized).map_err(de::Error::custom)
    }
}
