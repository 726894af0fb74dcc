//! Integration tests for the outside rule.
//!
//! Exercises the predicate through the public API with literal ranges,
//! multiple ranges, and sibling-field references.

use assert_matches::assert_matches;
use chrono::{Duration, TimeZone, Utc};
use serde_json::{json, Map, Value};

use datefence_core::evaluator::FieldRule;
use datefence_core::outside::{
    check_outside, DateOrReference, OutsideError, OutsideParams, RangeDescriptor, RangeSet,
    Reference, SiblingFields,
};
use datefence_core::types::Timestamp;

fn t() -> Timestamp {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 26, 53).unwrap() + Duration::milliseconds(589)
}

fn days(n: i64) -> Timestamp {
    t() + Duration::days(n)
}

fn no_refs(_: &Reference) -> Option<Timestamp> {
    None
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

fn ms(ts: Timestamp) -> i64 {
    ts.timestamp_millis()
}

// ---------------------------------------------------------------------------
// Literal ranges
// ---------------------------------------------------------------------------

/// A candidate before or after the range passes and comes back unchanged.
#[test]
fn date_outside_single_range_passes() {
    let ranges: RangeSet = RangeDescriptor::new(days(3), days(4)).into();

    for candidate in [days(2), days(6)] {
        let returned = check_outside(candidate, &ranges, &no_refs).expect("should pass");
        assert_eq!(ms(returned), ms(candidate));
    }
}

#[test]
fn date_inside_single_range_fails() {
    let ranges: RangeSet = RangeDescriptor::new(days(3), days(5)).into();
    assert_matches!(
        check_outside(days(4), &ranges, &no_refs),
        Err(OutsideError::Outside { .. })
    );
}

#[test]
fn boundaries_are_inclusive_lower_exclusive_upper() {
    let ranges: RangeSet = RangeDescriptor::new(t(), days(1)).into();
    let one_ms = Duration::milliseconds(1);

    let cases = [
        (t() - one_ms, true),
        (t(), false),
        (t() + one_ms, false),
        (days(1) - one_ms, false),
        (days(1), true),
        (days(1) + one_ms, true),
    ];

    for (candidate, should_pass) in cases {
        assert_eq!(
            check_outside(candidate, &ranges, &no_refs).is_ok(),
            should_pass,
            "candidate {candidate}"
        );
    }
}

#[test]
fn date_outside_every_range_passes() {
    let ranges = RangeSet::try_from(vec![
        RangeDescriptor::new(days(3), days(4)),
        RangeDescriptor::new(days(8), days(16)),
    ])
    .unwrap();

    for candidate in [days(1), days(7), days(17)] {
        assert_eq!(check_outside(candidate, &ranges, &no_refs), Ok(candidate));
    }
    for candidate in [days(3), days(10), days(16) - Duration::milliseconds(1)] {
        assert!(check_outside(candidate, &ranges, &no_refs).is_err());
    }
}

/// Pass iff outside every range, regardless of range order.
#[test]
fn exclusion_law_holds_over_a_grid() {
    let spans = [(2, 5), (4, 9), (12, 13)];
    let forward = RangeSet::try_from(
        spans
            .iter()
            .map(|&(a, b)| RangeDescriptor::new(days(a), days(b)))
            .collect::<Vec<_>>(),
    )
    .unwrap();
    let reversed = RangeSet::try_from(
        spans
            .iter()
            .rev()
            .map(|&(a, b)| RangeDescriptor::new(days(a), days(b)))
            .collect::<Vec<_>>(),
    )
    .unwrap();

    for hours in -24..(15 * 24) {
        let candidate = t() + Duration::hours(hours);
        let expected = spans
            .iter()
            .all(|&(a, b)| candidate < days(a) || candidate >= days(b));

        assert_eq!(check_outside(candidate, &forward, &no_refs).is_ok(), expected);
        assert_eq!(check_outside(candidate, &reversed, &no_refs).is_ok(), expected);
    }
}

#[test]
fn repeated_checks_agree() {
    let ranges: RangeSet = RangeDescriptor::new(days(3), days(5)).into();
    for candidate in [days(1), days(4)] {
        let first = check_outside(candidate, &ranges, &no_refs);
        let second = check_outside(candidate, &ranges, &no_refs);
        assert_eq!(first, second);
    }
}

// ---------------------------------------------------------------------------
// References
// ---------------------------------------------------------------------------

fn ref_params() -> OutsideParams {
    OutsideParams::new(RangeDescriptor::new(
        DateOrReference::reference("fromRef"),
        DateOrReference::reference("toRef"),
    ))
}

#[test]
fn references_to_present_siblings_pass_outside() {
    let parent = object(json!({
        "fromRef": ms(days(3)),
        "toRef": ms(days(4)),
    }));

    let returned = ref_params()
        .check(days(2), &SiblingFields::new(&parent))
        .expect("should pass");
    assert_eq!(returned, days(2));
}

#[test]
fn references_to_present_siblings_fail_inside() {
    let parent = object(json!({
        "fromRef": ms(days(3)),
        "toRef": ms(days(5)),
    }));

    assert_matches!(
        ref_params().check(days(4), &SiblingFields::new(&parent)),
        Err(OutsideError::Outside { from, to, .. }) if from == days(3) && to == days(5)
    );
}

#[test]
fn missing_from_reference_is_a_reference_error_for_any_candidate() {
    let params = OutsideParams::new(RangeDescriptor::new(
        DateOrReference::reference("NOT_EXISTS"),
        DateOrReference::reference("toRef"),
    ));
    let parent = object(json!({
        "fromRef": ms(days(3)),
        "toRef": ms(days(5)),
    }));

    for candidate in [days(-100), days(4), days(100)] {
        assert_matches!(
            params.check(candidate, &SiblingFields::new(&parent)),
            Err(OutsideError::RefError { reference }) if reference.key() == "NOT_EXISTS"
        );
    }
}

#[test]
fn missing_to_reference_is_a_reference_error() {
    let params = OutsideParams::new(RangeDescriptor::new(
        DateOrReference::reference("fromRef"),
        DateOrReference::reference("NOT_EXISTS"),
    ));
    let parent = object(json!({ "fromRef": ms(days(3)), "toRef": ms(days(5)) }));

    assert_matches!(
        params.check(days(4), &SiblingFields::new(&parent)),
        Err(OutsideError::RefError { .. })
    );
}

#[test]
fn mixed_literal_and_reference_boundaries() {
    let params = OutsideParams::from_json(json!({
        "ranges": [
            { "from": ms(days(3)), "to": { "ref": "window.end" } },
            { "from": { "ref": "window.reopen" }, "to": ms(days(30)) }
        ]
    }))
    .unwrap();
    let parent = object(json!({
        "window": { "end": ms(days(5)), "reopen": ms(days(20)) }
    }));
    let fields = SiblingFields::new(&parent);

    assert!(params.check(days(2), &fields).is_ok());
    assert!(params.check(days(4), &fields).is_err());
    assert!(params.check(days(10), &fields).is_ok());
    assert!(params.check(days(25), &fields).is_err());
    assert!(params.check(days(30), &fields).is_ok());
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

#[test]
fn record_with_sibling_references_validates_end_to_end() {
    let rule = FieldRule::from_json_str(
        r#"{
            "field": "date",
            "params": { "ranges": { "from": { "ref": "fromRef" }, "to": { "ref": "toRef" } } }
        }"#,
    )
    .unwrap();

    let outside = object(json!({
        "fromRef": "2025-01-04T00:00:00Z",
        "toRef": "2025-01-05T00:00:00Z",
        "date": "2025-01-03T00:00:00Z"
    }));
    assert!(rule.evaluate(&outside).is_valid);

    let bad_ref = object(json!({
        "toRef": "2025-01-05T00:00:00Z",
        "date": "2025-01-03T00:00:00Z"
    }));
    let result = rule.evaluate(&bad_ref);
    assert!(!result.is_valid);
    assert_eq!(result.errors[0].rule_type, "date.outsideRefError");
}
