//! Integration tests for config types, the Point helper and scalar utilities.

use std::io::Write;

use hypemaths::utils::{is_close, linspace, round_to};
use hypemaths::{LinalgError, MathConfig, Point, RoundingMode, Tolerance, Vector};

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn math_config_default_values() {
    let cfg = MathConfig::default();
    assert_eq!(cfg.mean_decimals, 2);
    assert_eq!(cfg.rounding, RoundingMode::HalfAwayFromZero);
    assert!(cfg.tolerance.relative > 0.0);
    assert!(cfg.tolerance.absolute > 0.0);
}

#[test]
fn rounding_mode_from_str() {
    let mode: RoundingMode = "half_even".parse().unwrap();
    assert_eq!(mode, RoundingMode::HalfEven);
    let mode: RoundingMode = "Half-Away-From-Zero".parse().unwrap();
    assert_eq!(mode, RoundingMode::HalfAwayFromZero);
    assert!("truncate".parse::<RoundingMode>().is_err());
}

#[test]
fn math_config_partial_json_uses_defaults() {
    let json = r#"{"mean_decimals": 4, "rounding": "half_even"}"#;
    let cfg = MathConfig::from_json_str(json).unwrap();
    assert_eq!(cfg.mean_decimals, 4);
    assert_eq!(cfg.rounding, RoundingMode::HalfEven);
    assert_eq!(cfg.tolerance, Tolerance::default());
}

#[test]
fn math_config_round_trips_json() {
    let cfg = MathConfig::new(Tolerance::new(1e-6, 1e-9), 3, RoundingMode::HalfEven);
    let json = serde_json::to_string(&cfg).unwrap();
    assert!(json.contains("half_even"));
    let back = MathConfig::from_json_str(&json).unwrap();
    assert_eq!(cfg, back);
}

#[test]
fn math_config_bad_json_errors() {
    let err = MathConfig::from_json_str("{\"mean_decimals\": \"two\"}").unwrap_err();
    assert!(err.to_string().contains("math config"));
}

#[test]
fn math_config_from_file() {
    let path = std::env::temp_dir().join(format!("hypemaths-config-{}.json", std::process::id()));
    {
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, "{{\"tolerance\": {{\"relative\": 0.001, \"absolute\": 0.0}}}}").unwrap();
    }
    let cfg = MathConfig::from_json_file(&path).unwrap();
    assert!((cfg.tolerance.relative - 0.001).abs() < 1e-12);
    assert_eq!(cfg.mean_decimals, 2);
    std::fs::remove_file(&path).unwrap();

    assert!(MathConfig::from_json_file(&path).is_err());
}

#[test]
fn config_drives_vector_mean() {
    let cfg = MathConfig::new(Tolerance::default(), 4, RoundingMode::HalfEven);
    let y = Vector::new(vec![1.7, 2.6, 3.0]).unwrap();
    assert_eq!(y.mean_with_config(&cfg).unwrap(), 2.4333);
}

// ---------------------------------------------------------------------------
// Utilities
// ---------------------------------------------------------------------------

#[test]
fn linspace_includes_both_ends() {
    let xs = linspace(0.0, 1.0, 5).unwrap();
    assert_eq!(xs, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    assert!(matches!(
        linspace(0.0, 1.0, 1),
        Err(LinalgError::InvalidArgument(_))
    ));
}

#[test]
fn round_to_modes() {
    assert_eq!(round_to(0.125, 2, RoundingMode::HalfEven).unwrap(), 0.12);
    assert_eq!(round_to(0.125, 2, RoundingMode::HalfAwayFromZero).unwrap(), 0.13);
    assert_eq!(round_to(1.0 / 3.0, 20, RoundingMode::HalfEven).unwrap(), 1.0 / 3.0);
}

#[test]
fn is_close_respects_tolerance() {
    let tol = Tolerance::new(1e-3, 0.0);
    assert!(is_close(1000.0, 1000.5, &tol));
    assert!(!is_close(1000.0, 1002.0, &tol));
}

// ---------------------------------------------------------------------------
// Point
// ---------------------------------------------------------------------------

#[test]
fn point_distance_and_tuple() {
    let a = Point::new(0.0, 0.0);
    let b = Point::from((3.0, 4.0));
    assert!((a.distance_to(&b) - 5.0).abs() < 1e-12);
    assert_eq!(b.to_tuple(), (3.0, 4.0));
    assert_eq!(b.to_string(), "Point(3, 4)");
}
