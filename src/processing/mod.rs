//! Network collection processing.
//!
//! This module contains the algorithms that operate over networks:
//! - [`split`] - Partitioning a network into equal subnets
//! - [`summarize`] - Merging networks into the minimal covering list
//! - [`cover`] - Covering an address range, and supernets
//! - [`gap_finder`] / [`overlap`] / [`diff`] - Gap and overlap analysis

mod cover;
mod diff;
mod gap_finder;
mod overlap;
mod split;
mod summarize;

// Re-export public functions
pub use cover::{cover_range, supernet};
pub use diff::{diff, NetworkDiff};
pub use gap_finder::{find_gaps, Gap};
pub use overlap::{check_no_overlaps, find_overlaps, log_overlaps};
pub use split::{split, split_with_limits, subnets, subnets_with_limits, SubnetIter};
pub use summarize::summarize;
