//! IPv6 address utilities.
//!
//! Provides [`Address`], an immutable 128-bit value with parsing, formatting
//! and modular arithmetic, along with the mask helpers used by networks.

use crate::config::{BIT_LEN, BYTE_LEN, REVERSE_DNS_SUFFIX};
use crate::error::{Ipv6Error, Result};
use num_bigint::{BigInt, BigUint, Sign};
use num_traits::ToPrimitive;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::net::Ipv6Addr;
use std::str::FromStr;

/// Convert a prefix length to a network mask as u128.
///
/// # Panics
/// If `len` is greater than 128. Callers validate prefixes first.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(64), 0xFFFF_FFFF_FFFF_FFFF_0000_0000_0000_0000);
/// ```
pub fn get_cidr_mask(len: u8) -> u128 {
    assert!(len <= BIT_LEN, "prefix length /{len} exceeds 128 bits");
    match len {
        0 => 0,
        len => u128::MAX << (BIT_LEN - len),
    }
}

/// Smallest prefix length `addr` is aligned to, from its trailing zero bits.
pub fn lo_mask(addr: Address) -> u8 {
    BIT_LEN - addr.trailing_zeros() as u8
}

/// True for the `::ffff:0:0/96` block that embeds an IPv4 address.
fn is_ipv4_mapped(bits: u128) -> bool {
    bits >> 32 == 0xffff
}

/// Unsigned distance `|a - b|`.
///
/// Computed on the two 64-bit halves with an explicit borrow, so it never
/// depends on argument order.
pub fn distance(a: Address, b: Address) -> BigUint {
    let (lo_addr, hi_addr) = if a <= b { (a, b) } else { (b, a) };
    let (ahi, alo) = lo_addr.hi_lo();
    let (bhi, blo) = hi_addr.hi_lo();
    let (dlo, borrow) = blo.overflowing_sub(alo);
    let dhi = bhi - ahi - borrow as u64;
    BigUint::from(((dhi as u128) << 64) | dlo as u128)
}

/// A single 128-bit IPv6 address.
///
/// Ordering is unsigned big-endian, the same as comparing the 16 octets
/// lexicographically.
///
/// Text, bytes and integers inside the IPv4-mapped block `::ffff:0:0/96` are
/// rejected. Arithmetic wraps over the whole 128-bit space and may land in
/// that block; such results print in hex form and survive a serde round trip,
/// while [`Address::parse`] keeps rejecting them.
#[derive(Eq, PartialEq, Ord, PartialOrd, Debug, Copy, Clone, Hash)]
pub struct Address {
    bits: u128,
}

impl Address {
    /// Smallest address, `::`.
    pub const UNSPECIFIED: Address = Address { bits: 0 };
    /// Largest address, `ffff:...:ffff`.
    pub const MAX: Address = Address { bits: u128::MAX };

    /// Create an [`Address`] from a std address, rejecting IPv4-mapped values.
    pub fn new(ip: Ipv6Addr) -> Result<Address> {
        Address::from_bits(u128::from(ip))
    }

    /// Parse text like `"2001:db8::1"`, ignoring surrounding whitespace.
    pub fn parse(text: &str) -> Result<Address> {
        let ip = Ipv6Addr::from_str(text.trim())
            .map_err(|_| Ipv6Error::InvalidAddress(text.to_string()))?;
        Address::new(ip)
    }

    /// Parse text previously written by `Display`.
    ///
    /// Hex-form values in the IPv4-mapped block are kept, since arithmetic
    /// can produce them. Dotted IPv4-mapped text is still rejected.
    pub(crate) fn parse_serialized(text: &str) -> Result<Address> {
        let ip = Ipv6Addr::from_str(text.trim())
            .map_err(|_| Ipv6Error::InvalidAddress(text.to_string()))?;
        if text.contains('.') {
            return Address::new(ip);
        }
        Ok(Address::from_raw(u128::from(ip)))
    }

    /// Build from a raw 16-byte big-endian buffer.
    pub fn from_bytes(bytes: &[u8]) -> Result<Address> {
        let octets: [u8; BYTE_LEN] = bytes.try_into().map_err(|_| {
            Ipv6Error::InvalidAddress(format!("expected {BYTE_LEN} bytes, got {}", bytes.len()))
        })?;
        Address::from_bits(u128::from_be_bytes(octets))
    }

    /// Build from the native 128-bit value.
    pub fn from_bits(bits: u128) -> Result<Address> {
        if is_ipv4_mapped(bits) {
            return Err(Ipv6Error::InvalidAddress(format!(
                "{} is an IPv4-mapped address",
                Ipv6Addr::from(bits)
            )));
        }
        Ok(Address { bits })
    }

    /// Build from any integer in `0..2^128`.
    pub fn from_integer<T: Into<BigInt>>(value: T) -> Result<Address> {
        let value = value.into();
        if value.sign() == Sign::Minus || value.bits() > u64::from(BIT_LEN) {
            return Err(Ipv6Error::InvalidAddress(format!(
                "{value} is outside 0..2^128"
            )));
        }
        let bits = value
            .magnitude()
            .to_u128()
            .ok_or_else(|| Ipv6Error::InvalidAddress(value.to_string()))?;
        Address::from_bits(bits)
    }

    /// Arithmetic results wrap over the whole space and skip validation.
    pub(crate) const fn from_raw(bits: u128) -> Address {
        Address { bits }
    }

    pub fn to_bits(self) -> u128 {
        self.bits
    }

    pub fn octets(self) -> [u8; BYTE_LEN] {
        self.bits.to_be_bytes()
    }

    pub fn to_integer(self) -> BigUint {
        BigUint::from(self.bits)
    }

    fn hi_lo(self) -> (u64, u64) {
        ((self.bits >> 64) as u64, self.bits as u64)
    }

    fn from_hi_lo(hi: u64, lo: u64) -> Address {
        Address::from_raw(((hi as u128) << 64) | lo as u128)
    }

    fn segments(self) -> [u16; 8] {
        let mut segments = [0u16; 8];
        for (i, segment) in segments.iter_mut().enumerate() {
            *segment = (self.bits >> (112 - 16 * i)) as u16;
        }
        segments
    }

    /// Canonical compressed text.
    ///
    /// The longest run of two or more zero groups collapses to `::`; on a tie
    /// the leftmost run wins.
    pub fn to_compressed_string(self) -> String {
        let segments = self.segments();

        let mut best: Option<(usize, usize)> = None;
        let mut i = 0;
        while i < segments.len() {
            if segments[i] != 0 {
                i += 1;
                continue;
            }
            let start = i;
            while i < segments.len() && segments[i] == 0 {
                i += 1;
            }
            let len = i - start;
            if len >= 2 && best.map_or(true, |(_, best_len)| len > best_len) {
                best = Some((start, len));
            }
        }

        let join = |groups: &[u16]| {
            groups
                .iter()
                .map(|g| format!("{g:x}"))
                .collect::<Vec<String>>()
                .join(":")
        };

        match best {
            Some((start, len)) => format!(
                "{}::{}",
                join(&segments[..start]),
                join(&segments[start + len..])
            ),
            None => join(&segments),
        }
    }

    /// Eight zero-padded 4-digit hex groups joined by `:`.
    pub fn to_expanded_string(self, upper: bool) -> String {
        self.segments()
            .iter()
            .map(|g| {
                if upper {
                    format!("{g:04X}")
                } else {
                    format!("{g:04x}")
                }
            })
            .collect::<Vec<String>>()
            .join(":")
    }

    pub fn expanded(self) -> String {
        self.to_expanded_string(false)
    }

    pub fn expanded_upper(self) -> String {
        self.to_expanded_string(true)
    }

    /// Add a signed delta modulo 2^128. Negative deltas subtract.
    pub fn add(self, delta: &BigInt) -> Address {
        match delta.sign() {
            Sign::Minus => self.sub_magnitude(delta.magnitude()),
            _ => self.add_magnitude(delta.magnitude()),
        }
    }

    /// Subtract a signed delta modulo 2^128. Negative deltas add.
    pub fn subtract(self, delta: &BigInt) -> Address {
        match delta.sign() {
            Sign::Minus => self.add_magnitude(delta.magnitude()),
            _ => self.sub_magnitude(delta.magnitude()),
        }
    }

    /// Add an unsigned 64-bit offset modulo 2^128.
    pub fn offset(self, offset: u64) -> Address {
        self.add_fast(offset)
    }

    fn add_magnitude(self, delta: &BigUint) -> Address {
        match delta.to_u64() {
            Some(d) => self.add_fast(d),
            None => self.add_wide(reduce_mod_2_128(delta)),
        }
    }

    fn sub_magnitude(self, delta: &BigUint) -> Address {
        match delta.to_u64() {
            Some(d) => self.sub_fast(d),
            None => self.sub_wide(reduce_mod_2_128(delta)),
        }
    }

    /// 64-bit delta: the carry only touches the upper half.
    pub(crate) fn add_fast(self, delta: u64) -> Address {
        let (hi, lo) = self.hi_lo();
        let (lo, carry) = lo.overflowing_add(delta);
        Address::from_hi_lo(hi.wrapping_add(carry as u64), lo)
    }

    pub(crate) fn sub_fast(self, delta: u64) -> Address {
        let (hi, lo) = self.hi_lo();
        let (lo, borrow) = lo.overflowing_sub(delta);
        Address::from_hi_lo(hi.wrapping_sub(borrow as u64), lo)
    }

    pub(crate) fn add_wide(self, delta: u128) -> Address {
        Address::from_raw(self.bits.wrapping_add(delta))
    }

    pub(crate) fn sub_wide(self, delta: u128) -> Address {
        Address::from_raw(self.bits.wrapping_sub(delta))
    }

    /// Zero every bit past `prefix_len`.
    ///
    /// # Panics
    /// If `prefix_len` is greater than 128.
    pub fn mask(self, prefix_len: u8) -> Address {
        Address::from_raw(self.bits & get_cidr_mask(prefix_len))
    }

    pub fn compare(&self, other: &Address) -> Ordering {
        self.cmp(other)
    }

    /// Trailing zero bits, 128 for `::`.
    pub fn trailing_zeros(self) -> u32 {
        self.bits.trailing_zeros()
    }

    /// Nibble-reversed `ip6.arpa.` name, e.g. `1.0.0.0. ... .2.ip6.arpa.`.
    pub fn reverse_dns_name(self) -> String {
        let mut name = String::with_capacity(64 + REVERSE_DNS_SUFFIX.len());
        for i in 0..32 {
            let nibble = (self.bits >> (4 * i)) & 0xf;
            name.push_str(&format!("{nibble:x}."));
        }
        name.push_str(REVERSE_DNS_SUFFIX);
        name
    }

    /// Reverse DNS name without the trailing dot, for zone files.
    pub fn reverse_dns_zone(self) -> String {
        let mut name = self.reverse_dns_name();
        name.pop();
        name
    }
}

/// Lower 128 bits of an arbitrary-precision value.
fn reduce_mod_2_128(value: &BigUint) -> u128 {
    let digits = value.to_u64_digits();
    let lo = digits.first().copied().unwrap_or(0);
    let hi = digits.get(1).copied().unwrap_or(0);
    ((hi as u128) << 64) | lo as u128
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_compressed_string())
    }
}

impl FromStr for Address {
    type Err = Ipv6Error;

    fn from_str(s: &str) -> Result<Address> {
        Address::parse(s)
    }
}

impl TryFrom<Ipv6Addr> for Address {
    type Error = Ipv6Error;

    fn try_from(ip: Ipv6Addr) -> Result<Address> {
        Address::new(ip)
    }
}

impl TryFrom<[u8; BYTE_LEN]> for Address {
    type Error = Ipv6Error;

    fn try_from(octets: [u8; BYTE_LEN]) -> Result<Address> {
        Address::from_bits(u128::from_be_bytes(octets))
    }
}

impl From<Address> for Ipv6Addr {
    fn from(addr: Address) -> Ipv6Addr {
        Ipv6Addr::from(addr.bits)
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_compressed_string())
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Address, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Address::parse_serialized(&s).map_err(de::Error::custom)
    }
}
