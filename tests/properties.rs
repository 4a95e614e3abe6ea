//! Property tests for address arithmetic and network algorithms.

use ipv6_subnet_calc::{cover_range, distance, split, summarize, supernet, Address, Network};
use num_bigint::{BigInt, BigUint};
use proptest::prelude::*;

/// Any 128-bit value outside the IPv4-mapped block.
fn any_address() -> impl Strategy<Value = Address> {
    any::<u128>()
        .prop_filter("not IPv4-mapped", |bits| bits >> 32 != 0xffff)
        .prop_map(|bits| Address::from_bits(bits).unwrap())
}

fn any_network() -> impl Strategy<Value = Network> {
    (any_address(), 0u8..=128).prop_map(|(addr, len)| Network::new(addr, len).unwrap())
}

/// Networks small enough to split and cover quickly.
fn small_network() -> impl Strategy<Value = Network> {
    (any_address(), 112u8..=128).prop_map(|(addr, len)| Network::new(addr, len).unwrap())
}

/// Several networks packed into one /112 so they interact.
fn clustered_networks() -> impl Strategy<Value = Vec<Network>> {
    (any_address(), prop::collection::vec((any::<u16>(), 112u8..=128), 0..24)).prop_map(
        |(base, items)| {
            let base = base.mask(112);
            items
                .into_iter()
                .map(|(offset, len)| Network::new(base.offset(offset as u64), len).unwrap())
                .collect()
        },
    )
}

fn covered(nets: &[Network], addr: Address) -> bool {
    nets.iter().any(|n| n.contains_address(addr))
}

proptest! {
    #[test]
    fn compressed_text_round_trips(addr in any_address()) {
        let value = addr.to_integer();
        let back = Address::parse(&Address::from_integer(value.clone()).unwrap().to_string()).unwrap();
        prop_assert_eq!(back.to_integer(), value);
    }

    #[test]
    fn expanded_text_round_trips(addr in any_address()) {
        prop_assert_eq!(Address::parse(&addr.expanded()).unwrap(), addr);
        prop_assert_eq!(Address::parse(&addr.expanded_upper()).unwrap(), addr);
    }

    #[test]
    fn compressed_matches_std(addr in any_address()) {
        let std_text = std::net::Ipv6Addr::from(addr).to_string();
        prop_assert_eq!(addr.to_string(), std_text);
    }

    #[test]
    fn mask_is_idempotent(addr in any_address(), len in 0u8..=128) {
        prop_assert_eq!(addr.mask(len).mask(len), addr.mask(len));
    }

    #[test]
    fn add_then_subtract_is_identity(addr in any_address(), delta in any::<i128>()) {
        let delta = BigInt::from(delta);
        prop_assert_eq!(addr.add(&delta).subtract(&delta), addr);
    }

    #[test]
    fn add_matches_bignum(addr in any_address(), delta in any::<i128>()) {
        let modulus = BigInt::from(1u8) << 128u32;
        let expected = ((BigInt::from(addr.to_integer()) + delta) % &modulus + &modulus) % &modulus;
        let result = addr.add(&BigInt::from(delta));
        prop_assert_eq!(BigInt::from(result.to_integer()), expected);
    }

    #[test]
    fn offset_matches_add(addr in any_address(), delta in any::<u64>()) {
        prop_assert_eq!(addr.offset(delta), addr.add(&BigInt::from(delta)));
    }

    #[test]
    fn distance_is_symmetric(a in any_address(), b in any_address()) {
        prop_assert_eq!(distance(a, b), distance(b, a));
    }

    #[test]
    fn distance_after_add(addr in any_address(), k in any::<u64>()) {
        prop_assume!(addr.to_bits().checked_add(k as u128).is_some());
        let moved = addr.add(&BigInt::from(k));
        prop_assert_eq!(distance(addr, moved), BigUint::from(k));
    }

    #[test]
    fn next_prev_round_trip(net in any_network()) {
        prop_assert_eq!(net.next().prev(), net);
        prop_assert_eq!(net.prev().next(), net);
        if net.prefix_len() > 0 {
            prop_assert!(!net.next().overlaps(&net));
        }
    }

    #[test]
    fn split_covers_exactly(net in small_network(), extra in 0u8..=8) {
        let new_len = (net.prefix_len() + extra).min(128);
        let subs = split(&net, new_len).unwrap();
        prop_assert_eq!(subs.len(), 1usize << (new_len - net.prefix_len()));
        prop_assert_eq!(subs[0].first_host(), net.first_host());
        prop_assert_eq!(subs[subs.len() - 1].last_host(), net.last_host());
        for pair in subs.windows(2) {
            prop_assert!(!pair[0].overlaps(&pair[1]));
            prop_assert_eq!(pair[0].last_host().offset(1), pair[1].first_host());
        }
        let lazy: Vec<Network> = net.subnets(new_len).unwrap().collect();
        prop_assert_eq!(lazy, subs);
    }

    #[test]
    fn split_same_prefix_is_identity(net in any_network()) {
        prop_assert_eq!(split(&net, net.prefix_len()).unwrap(), vec![net]);
    }

    #[test]
    fn summarize_covers_inputs(nets in clustered_networks()) {
        let output = summarize(&nets);
        for n in &nets {
            prop_assert!(output.iter().any(|o| o.contains_network(n)));
        }
        for (i, a) in output.iter().enumerate() {
            for b in &output[i + 1..] {
                prop_assert!(!a.overlaps(b));
            }
        }
        // output never reaches past the input blocks
        for o in &output {
            prop_assert!(covered(&nets, o.first_host()));
            prop_assert!(covered(&nets, o.last_host()));
        }
        prop_assert_eq!(summarize(&output), output);
    }

    #[test]
    fn cover_range_is_exact(start in any_address(), len in any::<u32>()) {
        prop_assume!(start.to_bits().checked_add(len as u128).is_some());
        let end = start.offset(len as u64);
        let cover = cover_range(start, end).unwrap();
        prop_assert_eq!(cover[0].first_host(), start);
        prop_assert_eq!(cover[cover.len() - 1].last_host(), end);
        for pair in cover.windows(2) {
            prop_assert_eq!(pair[0].last_host().offset(1), pair[1].first_host());
        }
        prop_assert!(cover.len() <= 2 * 128);
        prop_assert_eq!(summarize(&cover), cover);
    }

    #[test]
    fn supernet_contains_all(nets in prop::collection::vec(any_network(), 1..8)) {
        let sup = supernet(&nets).unwrap();
        for n in &nets {
            prop_assert!(sup.contains_network(n));
        }
        if sup.prefix_len() < 128 {
            let lower = split(&sup, sup.prefix_len() + 1).unwrap();
            prop_assert!(!nets.iter().all(|n| lower[0].contains_network(n)));
            prop_assert!(!nets.iter().all(|n| lower[1].contains_network(n)));
        }
    }
}
