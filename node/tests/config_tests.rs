use std::collections::HashMap;

use nrt_kernel::config::DEFAULT_TOKEN_NAME;
use nrt_node::config::NodeConfig;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let cfg = NodeConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg.bind_addr.port(), 3000);
    assert!(cfg.ledger_url.is_none());
    assert!(cfg.auth_token.is_none());
    assert_eq!(cfg.token_name, DEFAULT_TOKEN_NAME);
    assert_eq!(cfg.sampler.data_quality.min(), 45);
    assert_eq!(cfg.sampler.data_quality.max(), 100);
}

#[test]
fn test_env_overrides() {
    let cfg = NodeConfig::from_lookup(lookup(&[
        ("NRT_BIND_ADDR", "0.0.0.0:8080"),
        ("NRT_LEDGER_URL", "http://localhost:9000"),
        ("NRT_AUTH_TOKEN", "tok"),
        ("NRT_MARKET_ADDRESS", "addr_test1market"),
        ("NRT_NOISE_RANGE", "30..129"),
        ("NRT_QUALITY_RANGE", "50..=60"),
        ("NRT_RNG_SEED", "17"),
    ]))
    .unwrap();

    assert_eq!(cfg.bind_addr.to_string(), "0.0.0.0:8080");
    assert_eq!(cfg.ledger_url.as_deref(), Some("http://localhost:9000"));
    assert_eq!(cfg.auth_token.as_deref(), Some("tok"));
    assert_eq!(cfg.market_address.as_deref(), Some("addr_test1market"));
    assert_eq!(cfg.sampler.noise_level.max(), 129);
    assert_eq!(cfg.sampler.data_quality.min(), 50);
    assert_eq!(cfg.rng_seed, Some(17));
}

#[test]
fn test_empty_values_are_unset() {
    let cfg = NodeConfig::from_lookup(lookup(&[("NRT_AUTH_TOKEN", ""), ("NRT_LEDGER_URL", "")])).unwrap();
    assert!(cfg.auth_token.is_none());
    assert!(cfg.ledger_url.is_none());
}

#[test]
fn test_bad_values_rejected() {
    assert!(NodeConfig::from_lookup(lookup(&[("NRT_BIND_ADDR", "nowhere")])).is_err());
    assert!(NodeConfig::from_lookup(lookup(&[("NRT_QUALITY_RANGE", "100..45")])).is_err());
    assert!(NodeConfig::from_lookup(lookup(&[("NRT_SCRIPT_HEX", "zz")])).is_err());
    assert!(NodeConfig::from_lookup(lookup(&[("NRT_RNG_SEED", "-1")])).is_err());
}

#[test]
fn test_token_name_length_limit() {
    let name = "N".repeat(32);
    let cfg = NodeConfig::from_lookup(lookup(&[("NRT_TOKEN_NAME", name.as_str())])).unwrap();
    assert_eq!(cfg.token_name, name);

    let too_long = "N".repeat(33);
    assert!(NodeConfig::from_lookup(lookup(&[("NRT_TOKEN_NAME", too_long.as_str())])).is_err());
    // multi-byte characters count in bytes
    let wide = "é".repeat(17);
    assert!(NodeConfig::from_lookup(lookup(&[("NRT_TOKEN_NAME", wide.as_str())])).is_err());
    let cfg = NodeConfig::from_lookup(lookup(&[("NRT_TOKEN_NAME", "")])).unwrap();
    assert_eq!(cfg.token_name, DEFAULT_TOKEN_NAME);
}
