//! Combined overlap and gap report for a list of networks.

use super::gap_finder::{find_gaps, Gap};
use super::overlap::find_overlaps;
use crate::models::Network;
use serde::Serialize;

/// Overlapping pairs and uncovered ranges found in one pass over a list.
#[derive(Serialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct NetworkDiff {
    pub overlaps: Vec<(Network, Network)>,
    pub gaps: Vec<Gap>,
}

impl NetworkDiff {
    pub fn is_clean(&self) -> bool {
        self.overlaps.is_empty() && self.gaps.is_empty()
    }
}

/// Report overlaps and gaps between `networks`.
pub fn diff(networks: &[Network]) -> NetworkDiff {
    NetworkDiff {
        overlaps: find_overlaps(networks),
        gaps: find_gaps(networks),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nets(list: &[&str]) -> Vec<Network> {
        list.iter().map(|s| Network::parse(s).unwrap()).collect()
    }

    #[test]
    fn test_diff() {
        let result = diff(&nets(&["2001:db8::/65", "2001:db8::/64", "2001:db8:0:2::/64"]));
        assert_eq!(result.overlaps.len(), 1);
        assert_eq!(result.gaps.len(), 1);
        assert_eq!(result.gaps[0].networks().unwrap(), nets(&["2001:db8:0:1::/64"]));
        assert!(!result.is_clean());
    }

    #[test]
    fn test_diff_clean() {
        assert!(diff(&nets(&["2001:db8::/65", "2001:db8:0:0:8000::/65"])).is_clean());
    }

    #[test]
    fn test_diff_json() {
        let result = diff(&nets(&["2001:db8::/64", "2001:db8:0:2::/64"]));
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "overlaps": [],
                "gaps": [{
                    "start": "2001:db8:0:1::",
                    "end": "2001:db8:0:1:ffff:ffff:ffff:ffff"
                }]
            })
        );
    }
}
