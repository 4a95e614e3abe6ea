//! Gap finding between networks.
//!
//! Identifies unused address ranges between allocated networks.

use super::cover::cover_range;
use crate::error::Result;
use crate::models::{Address, Network};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An inclusive range of addresses not covered by any input network.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap {
    pub start: Address,
    pub end: Address,
}

impl Gap {
    /// The gap as the minimal list of networks that fill it.
    pub fn networks(&self) -> Result<Vec<Network>> {
        cover_range(self.start, self.end)
    }
}

impl fmt::Display for Gap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Find the uncovered ranges between the lowest and highest input network.
///
/// Networks are walked in (base, prefix) order while tracking the highest
/// address covered so far, so a range inside an earlier, larger network is
/// never reported as a gap.
pub fn find_gaps(networks: &[Network]) -> Vec<Gap> {
    let mut sorted = networks.to_vec();
    sorted.sort();

    let mut gaps = Vec::new();
    let mut covered_to: Option<Address> = None;
    for n in &sorted {
        if let Some(last) = covered_to {
            if last < n.first_host() && last.offset(1) < n.first_host() {
                let gap = Gap {
                    start: last.offset(1),
                    end: n.first_host().sub_fast(1),
                };
                log::trace!("find_gaps: {gap} before {n}");
                gaps.push(gap);
            }
        }
        covered_to = Some(covered_to.map_or(n.last_host(), |last| last.max(n.last_host())));
    }

    log::debug!(
        "find_gaps: {} networks => {} gaps",
        networks.len(),
        gaps.len()
    );
    gaps
}
