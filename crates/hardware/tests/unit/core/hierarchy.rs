//! # Cache Hierarchy Tests
//!
//! Counter accumulation across I1/D1/LL, the single-line fetch path, and
//! straddling data references.

use cachesim_core::common::{CacheHitType, ConfigError};
use cachesim_core::config::{CacheConfig, CacheHierarchyConfig};
use cachesim_core::core::CacheHierarchy;
use cachesim_core::stats::AccessCounters;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use crate::common::{brute_force_used, init_tracing, tiny_hierarchy};

fn counters(
    accesses: u64,
    l1_misses: u64,
    ll_misses: u64,
    l1_words: u64,
    ll_words: u64,
) -> AccessCounters {
    AccessCounters {
        accesses,
        l1_misses,
        ll_misses,
        l1_words,
        ll_words,
    }
}

#[test]
fn from_config_rejects_invalid_geometry() {
    let config = CacheHierarchyConfig {
        l1_i: CacheConfig::new(2 * 64, 1, 8),
        ..tiny_hierarchy()
    };
    assert!(matches!(
        CacheHierarchy::from_config(&config),
        Err(ConfigError::Geometry { level: "I1", .. })
    ));
}

#[test]
fn fetch_sequence_one_miss_then_hits() {
    init_tracing();
    let mut caches = CacheHierarchy::from_config(&tiny_hierarchy()).unwrap();
    let mut cc = AccessCounters::default();

    let mut last_l1_words = 0;
    let mut outcomes = Vec::new();
    for addr in [1, 8, 32] {
        assert!(caches.is_fast_path(addr, 4));
        outcomes.push(caches.fetch_single_line(addr, 4, &mut cc));
        assert!(cc.l1_words > last_l1_words);
        last_l1_words = cc.l1_words;
    }

    assert_eq!(
        outcomes,
        vec![CacheHitType::LlMiss, CacheHitType::L1Hit, CacheHitType::L1Hit]
    );
    // I1 holds words {0,1} then {0,1,2} then {0,1,2,8}.
    assert_eq!(cc, counters(3, 1, 1, 2 + 3 + 4, 2));
}

#[test]
fn fetch_sequence_with_conflicts() {
    let mut caches = CacheHierarchy::from_config(&tiny_hierarchy()).unwrap();
    let mut cc = AccessCounters::default();

    let refs = [
        (1, CacheHitType::LlMiss),
        (8, CacheHitType::L1Hit),
        (32, CacheHitType::L1Hit),
        // Block 2 maps to I1 set 0 and LL set 0.
        (2 * 64 + 32, CacheHitType::LlMiss),
        (2 * 64 + 12, CacheHitType::L1Hit),
        // Block 0 was evicted from I1 but is still in LL way 1.
        (48, CacheHitType::L1Miss),
    ];
    for (addr, expected) in refs {
        assert_eq!(caches.fetch_single_line(addr, 4, &mut cc), expected);
    }

    assert_eq!(caches.i1().set_tags(0), &[0]);
    assert_eq!(caches.ll().set_tags(0), &[0, 2]);
    assert_eq!(caches.i1().total_used(), 1);
    // LL block 0 only saw the two missing fetches: words {0,1} and {12}.
    assert_eq!(caches.ll().total_used(), 4);
    assert_eq!(cc, counters(6, 3, 2, 2 + 3 + 4 + 1 + 2 + 1, 2 + 3 + 4));
}

#[test]
fn generic_fetch_matches_fast_path() {
    let mut fast = CacheHierarchy::new(&tiny_hierarchy());
    let mut generic = fast.clone();
    let mut fast_cc = AccessCounters::default();
    let mut generic_cc = AccessCounters::default();

    for addr in [1, 8, 32, 160, 140, 48] {
        let a = fast.fetch_single_line(addr, 4, &mut fast_cc);
        let b = generic.fetch(addr, 4, &mut generic_cc);
        assert_eq!(a, b);
    }
    assert_eq!(fast_cc, generic_cc);
    assert_eq!(fast, generic);
}

#[test]
fn fast_path_requires_matching_line_sizes() {
    let config = CacheHierarchyConfig {
        ll: CacheConfig::new(8 * 32, 2, 32),
        ..tiny_hierarchy()
    };
    let caches = CacheHierarchy::new(&config);
    assert!(!caches.is_fast_path(0, 4));

    let caches = CacheHierarchy::new(&tiny_hierarchy());
    assert!(caches.is_fast_path(0, 4));
    assert!(caches.is_fast_path(60, 4));
    assert!(!caches.is_fast_path(62, 4));
}

#[test]
fn straddling_data_reference_is_one_verdict() {
    let mut caches = CacheHierarchy::new(&tiny_hierarchy());
    let mut cc = AccessCounters::default();

    // Both halves miss everywhere: still a single miss at each level.
    assert_eq!(caches.data(60, 8, &mut cc), CacheHitType::LlMiss);
    assert_eq!(cc.accesses, 1);
    assert_eq!(cc.l1_misses, 1);
    assert_eq!(cc.ll_misses, 1);
    assert_eq!(caches.d1().total_used(), 2);
    assert_eq!(caches.ll().total_used(), 2);
}

#[test]
fn straddling_data_reference_misses_if_one_half_misses() {
    let mut caches = CacheHierarchy::new(&tiny_hierarchy());
    let mut cc = AccessCounters::default();

    assert_eq!(caches.data(0, 4, &mut cc), CacheHitType::LlMiss);
    // Block 0 hits in D1, block 1 misses: one D1 miss, then LL misses on block 1.
    assert_eq!(caches.data(60, 8, &mut cc), CacheHitType::LlMiss);
    assert_eq!(caches.data(62, 4, &mut cc), CacheHitType::L1Hit);

    assert_eq!(cc.accesses, 3);
    assert_eq!(cc.l1_misses, 2);
    assert_eq!(cc.ll_misses, 2);
    // D1 words after each reference: 1, 3, 3. LL after each miss: 1, 3.
    assert_eq!(cc.l1_words, 1 + 3 + 3);
    assert_eq!(cc.ll_words, 1 + 3);
}

#[test]
fn instruction_and_data_share_only_ll() {
    let mut caches = CacheHierarchy::new(&tiny_hierarchy());
    let mut icc = AccessCounters::default();
    let mut dcc = AccessCounters::default();

    assert_eq!(caches.data(0, 4, &mut dcc), CacheHitType::LlMiss);
    // D1 holds block 0 but I1 does not; LL does.
    assert_eq!(caches.fetch(0, 4, &mut icc), CacheHitType::L1Miss);
    assert_eq!(caches.fetch(0, 4, &mut icc), CacheHitType::L1Hit);

    assert_eq!(icc, counters(2, 1, 0, 1 + 1, 1));
    assert_eq!(dcc, counters(1, 1, 1, 1, 1));
}

fn fetch_stream() -> impl Strategy<Value = Vec<(u64, u8)>> {
    prop::collection::vec((0u64..1024, prop_oneof![Just(2u8), Just(4), Just(6), Just(16)]), 1..200)
}

proptest! {
    #[test]
    fn fast_path_is_behaviour_equivalent(refs in fetch_stream()) {
        let config = CacheHierarchyConfig {
            l1_i: CacheConfig::new(4 * 2 * 64, 2, 64),
            l1_d: CacheConfig::new(2 * 64, 1, 64),
            ll: CacheConfig::new(8 * 4 * 64, 4, 64),
        };
        let mut generic = CacheHierarchy::new(&config);
        let mut mixed = generic.clone();
        let mut generic_cc = AccessCounters::default();
        let mut mixed_cc = AccessCounters::default();

        for (addr, size) in refs {
            let a = generic.fetch(addr, size, &mut generic_cc);
            let b = if mixed.is_fast_path(addr, size) {
                mixed.fetch_single_line(addr, size, &mut mixed_cc)
            } else {
                mixed.fetch(addr, size, &mut mixed_cc)
            };
            prop_assert_eq!(a, b);
            prop_assert_eq!(generic.i1().total_used(), brute_force_used(generic.i1()));
            prop_assert_eq!(generic.ll().total_used(), brute_force_used(generic.ll()));
        }
        prop_assert_eq!(generic_cc, mixed_cc);
        prop_assert_eq!(generic, mixed);
    }
}
