use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_match_fixed_refetch_window() {
    let cfg = PollConfig::from_lookup(lookup(&[]));
    assert_eq!(cfg, PollConfig::default());
    assert_eq!(cfg.base_delay(1), Duration::from_millis(2000));
}

#[test]
fn overrides_are_parsed() {
    let cfg = PollConfig::from_lookup(lookup(&[
        ("VARIANT_POLL_INITIAL_MS", "500"),
        ("VARIANT_POLL_MAX_MS", "3000"),
        ("VARIANT_POLL_MAX_ATTEMPTS", "10"),
    ]));
    assert_eq!((cfg.initial_delay_ms, cfg.max_delay_ms, cfg.max_attempts), (500, 3000, 10));
}

#[test]
fn max_is_raised_to_initial() {
    let cfg = PollConfig::from_lookup(lookup(&[("VARIANT_POLL_INITIAL_MS", "5000"), ("VARIANT_POLL_MAX_MS", "100")]));
    assert_eq!(cfg.max_delay_ms, 5000);
}

#[test]
fn garbage_falls_back_to_default() {
    let cfg = PollConfig::from_lookup(lookup(&[("VARIANT_POLL_MAX_ATTEMPTS", "-1")]));
    assert_eq!(cfg.max_attempts, DEFAULT_POLL_MAX_ATTEMPTS);
}

#[test]
fn base_delay_doubles_then_caps() {
    let cfg = PollConfig::default();
    let delays: Vec<u64> = (1..=6).map(|n| u64::try_from(cfg.base_delay(n).as_millis()).unwrap()).collect();
    assert_eq!(delays, [2000, 4000, 8000, 16_000, 16_000, 16_000]);
}

#[test]
fn base_delay_survives_huge_attempts() {
    let cfg = PollConfig::default();
    assert_eq!(cfg.base_delay(u32::MAX), Duration::from_millis(DEFAULT_POLL_MAX_MS));
    assert_eq!(cfg.base_delay(0), Duration::from_millis(DEFAULT_POLL_INITIAL_MS));
}
