use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("QUICKSHOP_STORE_URL", "https://shop.example.com");
    m
}

#[test]
fn parse_environment_known_values() {
    assert_eq!(
        parse_environment("development").unwrap(),
        Environment::Development
    );
    assert_eq!(parse_environment("test").unwrap(), Environment::Test);
    assert_eq!(
        parse_environment("production").unwrap(),
        Environment::Production
    );
}

#[test]
fn parse_environment_unknown_fails() {
    let err = parse_environment("staging").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "QUICKSHOP_ENV"));
}

#[test]
fn build_app_config_fails_without_store_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "QUICKSHOP_STORE_URL"),
        "expected MissingEnvVar(QUICKSHOP_STORE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_store_url_as_missing() {
    let mut map = HashMap::new();
    map.insert("QUICKSHOP_STORE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_store_url_without_scheme() {
    let mut map = HashMap::new();
    map.insert("QUICKSHOP_STORE_URL", "shop.example.com");
    let result = build_app_config(lookup_from_map(&map));
    let Err(ConfigError::InvalidEnvVar { var, .. }) = &result else {
        panic!("expected InvalidEnvVar(QUICKSHOP_STORE_URL), got: {result:?}");
    };
    assert_eq!(var, "QUICKSHOP_STORE_URL");
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.store_url, "https://shop.example.com");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "quickshop/0.1 (quick-view)");
    assert!(cfg.promo_product.is_none());
    assert_eq!(cfg.promo_first_value, "Black");
    assert_eq!(cfg.promo_second_value, "Medium");
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("QUICKSHOP_REQUEST_TIMEOUT_SECS", "5");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 5);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("QUICKSHOP_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    let Err(ConfigError::InvalidEnvVar { var, .. }) = &result else {
        panic!("expected InvalidEnvVar(QUICKSHOP_REQUEST_TIMEOUT_SECS), got: {result:?}");
    };
    assert_eq!(var, "QUICKSHOP_REQUEST_TIMEOUT_SECS");
}

#[test]
fn request_timeout_zero_rejected() {
    let mut map = full_env();
    map.insert("QUICKSHOP_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(
        result,
        Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "QUICKSHOP_REQUEST_TIMEOUT_SECS"
    ));
}

#[test]
fn user_agent_override() {
    let mut map = full_env();
    map.insert("QUICKSHOP_USER_AGENT", "custom-agent/2.0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.user_agent, "custom-agent/2.0");
}

#[test]
fn promotion_disabled_without_product() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.promotion_rule().is_none());
}

#[test]
fn promotion_blank_product_is_disabled() {
    let mut map = full_env();
    map.insert("QUICKSHOP_PROMO_PRODUCT", "  ");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert!(cfg.promo_product.is_none());
}

#[test]
fn promotion_rule_built_from_overrides() {
    let mut map = full_env();
    map.insert("QUICKSHOP_PROMO_PRODUCT", "gift-tote");
    map.insert("QUICKSHOP_PROMO_FIRST_VALUE", "Red");
    map.insert("QUICKSHOP_PROMO_SECOND_VALUE", "Large");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    let rule = cfg.promotion_rule().expect("expected a promotion rule");
    assert_eq!(rule.product_ref(), "gift-tote");
    assert_eq!(rule.first_value(), "Red");
    assert_eq!(rule.second_value(), "Large");
}
