//! Range covering and supernet computation.

use crate::config::{BIT_LEN, BYTE_LEN};
use crate::error::{Ipv6Error, Result};
use crate::models::{lo_mask, Address, Network};

/// floor(log2(end - start + 1)), counting the full space as 2^128.
fn remaining_bits(start: Address, end: Address) -> u32 {
    match (end.to_bits() - start.to_bits()).checked_add(1) {
        Some(remaining) => 127 - remaining.leading_zeros(),
        None => u32::from(BIT_LEN),
    }
}

/// Minimal list of networks exactly covering `[start, end]` inclusive.
///
/// Each block is as large as the current position's alignment and the
/// remaining length both allow.
pub fn cover_range(start: Address, end: Address) -> Result<Vec<Network>> {
    if start > end {
        return Err(Ipv6Error::InvalidRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }

    let mut result = Vec::new();
    let mut cur = start;
    loop {
        let fit_len = BIT_LEN - remaining_bits(cur, end) as u8;
        let block = Network::from_parts(cur, lo_mask(cur).max(fit_len));
        log::trace!("cover_range: {block}");
        result.push(block);

        let last = block.last_host();
        if last >= end {
            break;
        }
        cur = last.offset(1);
    }

    log::debug!(
        "cover_range: {start}-{end} => {} networks",
        result.len()
    );
    Ok(result)
}

/// Number of leading bits `a` and `b` share.
fn common_prefix_len(a: Address, b: Address) -> u8 {
    let (a, b) = (a.octets(), b.octets());
    let mut prefix_len = 0u8;
    for i in 0..BYTE_LEN {
        if a[i] == b[i] {
            prefix_len += 8;
            continue;
        }
        prefix_len += (a[i] ^ b[i]).leading_zeros() as u8;
        break;
    }
    prefix_len
}

/// Smallest single network containing every network in `networks`.
pub fn supernet(networks: &[Network]) -> Result<Network> {
    let first = networks.first().ok_or(Ipv6Error::EmptyInput)?;
    let mut min = first.first_host();
    let mut max = first.last_host();
    for n in &networks[1..] {
        min = min.min(n.first_host());
        max = max.max(n.last_host());
    }

    let prefix_len = common_prefix_len(min, max);
    let result = Network::new(min, prefix_len)?;
    log::debug!(
        "supernet: {} networks ({min} - {max}) => {result}",
        networks.len()
    );
    Ok(result)
}
