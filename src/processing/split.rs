//! Splitting a network into equal-sized subnets.
//!
//! Both the eager [`split`] and the lazy [`SubnetIter`] validate the request
//! the same way and walk the same sequence of bases.

use crate::config::{SplitLimits, BIT_LEN};
use crate::error::{Ipv6Error, Result};
use crate::models::{Address, Network};

/// Streams subnets one at a time without materializing the whole list.
///
/// The iterator only moves forward; build a new one to start over.
#[derive(Debug, Clone)]
pub struct SubnetIter {
    remaining: u64,
    current: Address,
    step: u128,
    prefix_len: u8,
}

impl Iterator for SubnetIter {
    type Item = Network;

    fn next(&mut self) -> Option<Network> {
        if self.remaining == 0 {
            return None;
        }
        let subnet = Network::from_parts(self.current, self.prefix_len);
        self.current = self.current.add_wide(self.step);
        self.remaining -= 1;
        Some(subnet)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SubnetIter {}

/// Validate a split request and return the number of subnets it yields.
fn count_parts(network: &Network, new_prefix_len: u8, limits: SplitLimits) -> Result<u64> {
    let prefix_len = network.prefix_len();
    if new_prefix_len < prefix_len || new_prefix_len > BIT_LEN {
        return Err(Ipv6Error::InvalidSplitPrefix {
            prefix_len,
            new_prefix_len,
        });
    }

    let count_bits = new_prefix_len - prefix_len;
    let excessive = Ipv6Error::SplitExcessive {
        prefix_len,
        new_prefix_len,
        limit: limits.max_parts,
    };
    // 2^63 and up cannot be counted in a u64 without overflow
    if count_bits >= 63 {
        log::warn!("refusing to split {network} into /{new_prefix_len}: 2^{count_bits} subnets");
        return Err(excessive);
    }
    let parts = 1u64 << count_bits;
    if parts > limits.max_parts {
        log::warn!(
            "refusing to split {network} into /{new_prefix_len}: {parts} subnets > limit {}",
            limits.max_parts
        );
        return Err(excessive);
    }
    Ok(parts)
}

/// Lazily iterate the `/new_prefix_len` subnets of `network`.
pub fn subnets_with_limits(
    network: &Network,
    new_prefix_len: u8,
    limits: SplitLimits,
) -> Result<SubnetIter> {
    if new_prefix_len == network.prefix_len() {
        return Ok(SubnetIter {
            remaining: 1,
            current: network.base(),
            step: 0,
            prefix_len: new_prefix_len,
        });
    }
    let parts = count_parts(network, new_prefix_len, limits)?;
    Ok(SubnetIter {
        remaining: parts,
        current: network.base(),
        step: 1u128 << (BIT_LEN - new_prefix_len),
        prefix_len: new_prefix_len,
    })
}

/// Lazily iterate subnets using the default ceiling.
pub fn subnets(network: &Network, new_prefix_len: u8) -> Result<SubnetIter> {
    subnets_with_limits(network, new_prefix_len, SplitLimits::default())
}

/// Split `network` into all of its `/new_prefix_len` subnets.
///
/// Splitting to the network's own prefix length returns the network itself.
/// Requests above `limits.max_parts` fail before anything is allocated.
pub fn split_with_limits(
    network: &Network,
    new_prefix_len: u8,
    limits: SplitLimits,
) -> Result<Vec<Network>> {
    let iter = subnets_with_limits(network, new_prefix_len, limits)?;
    let mut result = Vec::new();
    if let Err(err) = result.try_reserve_exact(iter.len()) {
        log::warn!("cannot hold {} subnets of {network}: {err}", iter.len());
        return Err(Ipv6Error::SplitExcessive {
            prefix_len: network.prefix_len(),
            new_prefix_len,
            limit: limits.max_parts,
        });
    }
    result.extend(iter);
    log::debug!(
        "split {network} into {} /{new_prefix_len} subnets",
        result.len()
    );
    Ok(result)
}

/// Split using the default ceiling.
pub fn split(network: &Network, new_prefix_len: u8) -> Result<Vec<Network>> {
    split_with_limits(network, new_prefix_len, SplitLimits::default())
}
