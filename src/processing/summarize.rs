//! Summarizing a list of networks into the minimal covering list.

use crate::models::Network;

/// Merge `prev` and `last` into their parent if they are true binary siblings.
fn merge_siblings(prev: &Network, last: &Network) -> Option<Network> {
    let prefix_len = last.prefix_len();
    if prev.prefix_len() != prefix_len || prefix_len == 0 {
        return None;
    }
    if prev.next().base() != last.base() {
        return None;
    }
    // numerically adjacent is not enough, both must sit under the same parent
    let parent_len = prefix_len - 1;
    let parent_base = prev.base().mask(parent_len);
    if parent_base != last.base().mask(parent_len) {
        return None;
    }
    Some(Network::from_parts(parent_base, parent_len))
}

/// Reduce `networks` to the minimal equivalent list.
///
/// Inputs are sorted by base then prefix length. Networks contained in the
/// previously accepted one are dropped, and aligned sibling pairs on top of
/// the work stack are merged upward until no more merges apply.
///
/// # Examples
/// ```
/// use ipv6_subnet_calc::{summarize, Network};
/// let a = Network::parse("2001:db8::/65").unwrap();
/// let result = summarize(&[a, a.next()]);
/// assert_eq!(result, vec![Network::parse("2001:db8::/64").unwrap()]);
/// ```
pub fn summarize(networks: &[Network]) -> Vec<Network> {
    let mut sorted: Vec<Network> = networks
        .iter()
        .map(|n| Network::from_parts(n.base(), n.prefix_len()))
        .collect();
    sorted.sort();

    let mut stack: Vec<Network> = Vec::with_capacity(sorted.len());
    for candidate in sorted {
        if let Some(top) = stack.last() {
            if top.contains_network(&candidate) {
                log::trace!("summarize: {candidate} already covered by {top}");
                continue;
            }
        }
        stack.push(candidate);

        while stack.len() >= 2 {
            let last = stack[stack.len() - 1];
            let prev = stack[stack.len() - 2];
            let Some(parent) = merge_siblings(&prev, &last) else {
                break;
            };
            log::trace!("summarize: merged {prev} + {last} => {parent}");
            stack.truncate(stack.len() - 2);
            stack.push(parent);
        }
    }

    log::debug!(
        "summarize: {} networks => {} networks",
        networks.len(),
        stack.len()
    );
    stack
}
