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
    m.insert("ILHA_API_BASE_URL", "https://visitmaio.example/");
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
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "ILHA_ENV"));
}

#[test]
fn build_app_config_fails_without_api_base_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "ILHA_API_BASE_URL"),
        "expected MissingEnvVar(ILHA_API_BASE_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_treats_blank_api_base_url_as_missing() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ILHA_API_BASE_URL", "   ");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::MissingEnvVar(_))));
}

#[test]
fn build_app_config_rejects_non_http_base_url() {
    let mut map: HashMap<&str, &str> = HashMap::new();
    map.insert("ILHA_API_BASE_URL", "ftp://visitmaio.example");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ILHA_API_BASE_URL"),
        "got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_defaults() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).expect("config should build");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.api_base_url, "https://visitmaio.example");
    assert_eq!(cfg.cache_dir.to_str(), Some("./.cache/ilha"));
    assert_eq!(cfg.request_timeout_secs, 15);
    assert_eq!(cfg.user_agent, "ilha/0.1 (visitor-guide)");
    assert!(cfg.revalidate_cache);
    assert_eq!(
        cfg.transfer_fallback_path.to_str(),
        Some("./config/transfers.yaml")
    );
    assert_eq!(cfg.island_label, "Maio");
    assert_eq!(cfg.lang, Lang::Pt);
}

#[test]
fn endpoint_joins_without_double_slash() {
    let map = full_env();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(
        cfg.endpoint("/api/receitas"),
        "https://visitmaio.example/api/receitas"
    );
    assert_eq!(
        cfg.endpoint("api/places"),
        "https://visitmaio.example/api/places"
    );
}

#[test]
fn request_timeout_override() {
    let mut map = full_env();
    map.insert("ILHA_REQUEST_TIMEOUT_SECS", "60");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.request_timeout_secs, 60);
}

#[test]
fn request_timeout_invalid() {
    let mut map = full_env();
    map.insert("ILHA_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ILHA_REQUEST_TIMEOUT_SECS"),
        "got: {result:?}"
    );
}

#[test]
fn revalidate_cache_accepts_common_spellings() {
    for (raw, expected) in [("false", false), ("0", false), ("YES", true), ("on", true)] {
        let mut map = full_env();
        map.insert("ILHA_REVALIDATE_CACHE", raw);
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.revalidate_cache, expected, "raw value {raw}");
    }
}

#[test]
fn revalidate_cache_invalid() {
    let mut map = full_env();
    map.insert("ILHA_REVALIDATE_CACHE", "sometimes");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ILHA_REVALIDATE_CACHE")
    );
}

#[test]
fn lang_override_and_invalid() {
    let mut map = full_env();
    map.insert("ILHA_LANG", "en");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.lang, Lang::En);

    map.insert("ILHA_LANG", "kea");
    let result = build_app_config(lookup_from_map(&map));
    assert!(matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "ILHA_LANG"));
}

#[test]
fn island_label_override() {
    let mut map = full_env();
    map.insert("ILHA_ISLAND_LABEL", "Boa Vista");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.island_label, "Boa Vista");
}
