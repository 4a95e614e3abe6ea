//! Overlapping network detection.
//!
//! Detects networks whose address ranges intersect, either to report them
//! or to reject input that must be disjoint.

use crate::error::{Ipv6Error, Result};
use crate::models::Network;

/// Find overlapping neighbours after sorting by (base, prefix).
///
/// Only consecutive pairs in sorted order are compared. A network nested in
/// a large block may be paired with a sibling instead of the block itself.
pub fn find_overlaps(networks: &[Network]) -> Vec<(Network, Network)> {
    let mut sorted = networks.to_vec();
    sorted.sort();

    let overlaps: Vec<(Network, Network)> = sorted
        .windows(2)
        .filter(|pair| pair[0].overlaps(&pair[1]))
        .map(|pair| (pair[0], pair[1]))
        .collect();

    log::debug!(
        "find_overlaps: {} networks => {} overlapping pairs",
        networks.len(),
        overlaps.len()
    );
    overlaps
}

/// Fail with [`Ipv6Error::Overlap`] on the first pair (in input order) that
/// overlaps, containment included.
pub fn check_no_overlaps(networks: &[Network]) -> Result<()> {
    for (i, a) in networks.iter().enumerate() {
        for b in &networks[i + 1..] {
            if a.overlaps(b) {
                return Err(Ipv6Error::Overlap {
                    a: a.to_string(),
                    b: b.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// Log overlapping pairs as warnings.
pub fn log_overlaps(overlaps: &[(Network, Network)]) {
    if overlaps.is_empty() {
        log::info!("No overlapping networks found.");
        return;
    }

    log::warn!("Found {} overlapping network pair(s):", overlaps.len());
    for (a, b) in overlaps {
        if a.contains_network(b) {
            log::warn!("  {b} is contained in {a}");
        } else {
            log::warn!("  {a} overlaps {b}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(list: &[&str]) -> Vec<Network> {
        list.iter().map(|s| Network::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_find_overlaps() {
        let input = nets(&["2001:db8::/64", "2001:db8::/65", "2001:db8:1::/48"]);
        let overlaps = find_overlaps(&input);
        assert_eq!(overlaps, vec![(input[0], input[1])]);
        log_overlaps(&overlaps);
    }

    #[test]
    fn test_find_overlaps_none() {
        let input = nets(&["2001:db8::/64", "2001:db8:0:1::/64"]);
        assert!(find_overlaps(&input).is_empty());
        assert!(find_overlaps(&[]).is_empty());
    }

    #[test]
    fn test_check_no_overlaps() {
        assert!(check_no_overlaps(&nets(&["2001:db8::/64", "2001:db8:0:1::/64"])).is_ok());
        let err = check_no_overlaps(&nets(&[
            "2001:db8:0:5::/64",
            "2001:db8:1::/48",
            "2001:db8::/48",
        ]))
        .unwrap_err();
        assert_eq!(
            err,
            Ipv6Error::Overlap {
                a: "2001:db8:0:5::/64".to_string(),
                b: "2001:db8::/48".to_string()
            }
        );
    }
}
