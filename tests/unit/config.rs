use super::*;

use std::collections::HashMap;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_without_overrides() {
    let opts = EvalOpts::from_lookup(lookup(&[]));
    assert_eq!(opts, EvalOpts::default());
    assert_eq!(opts.max_surface_dim, 16384);
    assert_eq!(opts.max_blur_radius, 256);
    assert!(opts.derive_alpha);
}

#[test]
fn env_overrides_are_applied() {
    let opts = EvalOpts::from_lookup(lookup(&[
        ("RASTERFX_MAX_SURFACE_DIM", "512"),
        ("RASTERFX_MAX_BLUR_RADIUS", "8"),
        ("RASTERFX_DERIVE_ALPHA", "off"),
    ]));
    assert_eq!(opts.max_surface_dim, 512);
    assert_eq!(opts.max_blur_radius, 8);
    assert!(!opts.derive_alpha);
}

#[test]
fn unparseable_overrides_fall_back() {
    let opts = EvalOpts::from_lookup(lookup(&[
        ("RASTERFX_MAX_SURFACE_DIM", "0"),
        ("RASTERFX_MAX_BLUR_RADIUS", "lots"),
        ("RASTERFX_DERIVE_ALPHA", "maybe"),
    ]));
    assert_eq!(opts, EvalOpts::default());
}

#[test]
fn serde_fills_missing_fields() {
    let opts: EvalOpts = serde_json::from_str(r#"{"max_blur_radius":3}"#).unwrap();
    assert_eq!(opts.max_blur_radius, 3);
    assert_eq!(opts.max_surface_dim, 16384);
    assert!(opts.derive_alpha);
}

#[test]
fn zero_blur_radius_override_is_ignored() {
    let opts = EvalOpts::from_lookup(lookup(&[("RASTERFX_MAX_BLUR_RADIUS", "0")]));
    assert_eq!(opts.max_blur_radius, 256);
}
