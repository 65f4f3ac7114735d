//! Full validation reports across the metric families.

use curv::constants::{M_EARTH, M_SUN};
use curv::{
    CheckStatus, ConsistencyChecker, DiagonalMetric, ExprMetric, LapseMetric, MetricError,
    Minkowski, PhysicalConstants, PhysicalValidator, Schwarzschild, ValidationReport,
};

#[test]
fn every_family_validates_green() {
    let c = PhysicalConstants::si();
    let validator = PhysicalValidator::default();

    let reports = [
        validator.validate(&Minkowski::new(c, 1.0), "minkowski"),
        validator.validate(&Schwarzschild::new(M_SUN, c), "schwarzschild_sun"),
        validator.validate(&LapseMetric::calibrated(M_SUN, c), "lapse_sun"),
        validator.validate(&LapseMetric::calibrated(M_EARTH, c), "lapse_earth"),
    ];
    for report in &reports {
        assert!(report.all_green(), "{}", report.report());
    }
}

#[test]
fn expr_backend_validates_green() {
    let c = PhysicalConstants::si();
    let report = PhysicalValidator::default()
        .validate(&ExprMetric::schwarzschild(M_SUN, c), "expr_schwarzschild");
    assert!(report.all_green(), "{}", report.report());
}

#[test]
fn acausal_metric_is_flagged_not_aborted() {
    // Light cone opens past c; causality must fail while the remaining
    // checks still run and report.
    let m = DiagonalMetric::four_d(
        PhysicalConstants::geometrized(),
        |_| -4.0,
        |_| 1.0,
        1.0,
    );
    let report = PhysicalValidator::default().validate(&m, "acausal");
    assert!(!report.all_green());
    let failures = report.failures();
    assert!(failures.iter().any(|c| c.name == "causality"));
    // The batch kept going past the failure.
    assert!(report.checks.len() > 5);
}

#[test]
fn unevaluable_region_fails_one_check_not_the_batch() {
    // g_rr is NaN over part of the declared domain, so the compatibility
    // residual cannot be measured there. That must surface as a failed
    // check inside a complete report, never as an early return.
    let m = DiagonalMetric::four_d(
        PhysicalConstants::geometrized(),
        |_| -1.0,
        |r| if r < 5.0 { f64::NAN } else { 1.0 },
        1.0,
    );
    let report = PhysicalValidator::default().validate(&m, "partial_nan");
    assert!(!report.all_green());
    assert_eq!(report.checks.len(), 9, "{}", report.report());
    assert!(report
        .failures()
        .iter()
        .any(|c| c.name == "metric_compatibility"));
}

#[test]
fn assert_mode_stops_on_inconsistent_partials() {
    let m = DiagonalMetric::four_d(
        PhysicalConstants::geometrized(),
        |r| -(1.0 + 1.0 / r),
        |r| 1.0 + 0.5 / r,
        1.0,
    )
    .with_derivatives(|_| 7.0, |_| -3.0);
    let checker = ConsistencyChecker {
        assert_mode: true,
        ..ConsistencyChecker::default()
    };
    let err = checker.run_all(&m, "broken").unwrap_err();
    assert!(matches!(err, MetricError::ToleranceExceeded { .. }));
}

#[test]
fn report_serializes_and_round_trips() {
    let c = PhysicalConstants::si();
    let report = PhysicalValidator::default()
        .validate(&Schwarzschild::new(M_SUN, c), "schwarzschild_sun");
    let json = serde_json::to_string_pretty(&report).unwrap();
    let back: ValidationReport = serde_json::from_str(&json).unwrap();
    assert_eq!(back.metric, report.metric);
    assert_eq!(back.checks.len(), report.checks.len());
    assert!(back.all_green());
    assert!(back
        .checks
        .iter()
        .all(|c| c.status == CheckStatus::Pass));
}

#[test]
fn report_text_is_human_readable() {
    let c = PhysicalConstants::si();
    let report = PhysicalValidator::default()
        .validate(&LapseMetric::calibrated(M_EARTH, c), "lapse_earth");
    let text = report.report();
    assert!(text.contains("lapse_earth"));
    assert!(text.contains("all green"));
    assert!(text.lines().count() >= report.checks.len() + 2);
}
