//! Tests for predicate rules and their builders.

use std::sync::Arc;

use chrono::{Local, NaiveDate, TimeZone, Utc};
use regex::Regex;

use super::rules;
use super::{Condition, DateTimeKind, Moment, RuleBuilder};
use crate::error::RuleError;
use crate::lazy::{LazyEntities, LazyEntity, LazyReference};
use crate::rule::{Rule, RuleRef};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum Code {
    E1,
    E2,
    E3,
    TooSmall,
    TooLarge,
    WrongKind,
}

// =========================================================================
// Builder preconditions
// =========================================================================

#[test]
fn build_without_error_code_fails() {
    let result = rules::not_null::<Code, str>(Some("x")).build();
    assert_eq!(result.unwrap_err(), RuleError::MissingArgument("validation_error"));
}

#[test]
fn invalid_pattern_fails_at_build() {
    let result = rules::pattern::<Code>("(unclosed", Some("x")).error(Code::E1).build();
    assert!(matches!(result, Err(RuleError::InvalidPattern { ref pattern, .. }) if pattern == "(unclosed"));
}

#[test]
fn invalid_pattern_is_reported_before_missing_error_code() {
    let result = rules::pattern::<Code>("[", Some("x")).build();
    assert!(matches!(result, Err(RuleError::InvalidPattern { .. })));
}

#[test]
fn custom_condition_can_be_built() {
    #[derive(Debug)]
    struct AlwaysFails;

    impl Condition for AlwaysFails {
        fn is_violated(&self) -> bool {
            true
        }
    }

    let rule = RuleBuilder::new(AlwaysFails).error(Code::E1).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E1]);
    assert_eq!(rule.error(), &Code::E1);
}

// =========================================================================
// Pattern rules
// =========================================================================

#[test]
fn pattern_mismatch_returns_error() {
    let rule = rules::pattern(r"^\d+$", Some("12a45")).error(Code::E1).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E1]);
}

#[test]
fn pattern_match_returns_no_error() {
    let rule = rules::pattern(r"^\d+$", Some("12345")).error(Code::E1).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn pattern_null_with_nulls_allowed_returns_no_error() {
    let rule = rules::pattern(r"^\d+$", None)
        .error(Code::E1)
        .null_allowed(true)
        .build()
        .unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn pattern_null_with_nulls_disallowed_fails_construction() {
    let result = rules::pattern(r"^\d+$", None).error(Code::E1).build();
    assert_eq!(result.unwrap_err(), RuleError::NullValue("value"));
}

#[test]
fn precompiled_regex_is_reused() {
    let digits = Regex::new(r"^\d+$").unwrap();
    let good = rules::matching(&digits, Some("42")).error(Code::E1).build().unwrap();
    let bad = rules::matching(&digits, Some("4x2")).error(Code::E1).build().unwrap();

    assert!(good.validate().is_empty());
    assert_eq!(bad.validate().as_slice(), &[Code::E1]);
    assert_eq!(good.condition().as_str(), r"^\d+$");
}

// =========================================================================
// Length rules
// =========================================================================

#[test]
fn maximum_length_allows_short_value() {
    let rule = rules::maximum_length(1, Some("")).error(Code::E2).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn maximum_length_rejects_long_value() {
    let rule = rules::maximum_length(1, Some("ab")).error(Code::E2).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E2]);
}

#[test]
fn maximum_length_counts_characters() {
    let rule = rules::maximum_length(2, Some("éé")).error(Code::E2).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn minimum_length_rejects_short_value() {
    let rule = rules::minimum_length(1, Some("")).error(Code::E2).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E2]);
}

#[test]
fn minimum_length_allows_long_enough_value() {
    let rule = rules::minimum_length(1, Some("12")).error(Code::E2).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn length_null_handling_follows_null_allowed() {
    let allowed = rules::minimum_length(1, None)
        .error(Code::E2)
        .null_allowed(true)
        .build()
        .unwrap();
    assert!(allowed.validate().is_empty());

    let disallowed = rules::maximum_length::<Code>(1, None).error(Code::E2).build();
    assert_eq!(disallowed.unwrap_err(), RuleError::NullValue("value"));
}

// =========================================================================
// Not-null rules
// =========================================================================

#[test]
fn not_null_reports_absent_value() {
    let rule = rules::not_null(None::<&str>).error(Code::E3).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E3]);
}

#[test]
fn not_null_accepts_present_value() {
    let rule = rules::not_null(Some(&5)).error(Code::E3).build().unwrap();
    assert!(rule.validate().is_empty());
}

// =========================================================================
// Range rules
// =========================================================================

#[test]
fn minimum_value_rejects_smaller_value() {
    let rule = rules::minimum_value(10, Some(9)).error(Code::TooSmall).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::TooSmall]);
}

#[test]
fn minimum_value_is_inclusive() {
    let rule = rules::minimum_value(10, Some(10)).error(Code::TooSmall).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn maximum_value_rejects_larger_value() {
    let rule = rules::maximum_value(1.5, Some(2.0)).error(Code::TooLarge).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::TooLarge]);

    let rule = rules::maximum_value(1.5, Some(1.5)).error(Code::TooLarge).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn absent_value_never_fails_range() {
    // Range rules take no null-allowed flag; absence is a not-null concern.
    let rule = rules::minimum_value(10, None).error(Code::TooSmall).build().unwrap();
    assert!(rule.validate().is_empty());

    let rule = rules::range::<Code, i32>(None, Some(1), Some(2)).error(Code::TooSmall).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn range_checks_both_bounds() {
    let build = |value| {
        rules::range(Some(value), Some(1), Some(3))
            .error(Code::TooLarge)
            .build()
            .unwrap()
    };
    assert_eq!(build(0).validate().as_slice(), &[Code::TooLarge]);
    assert!(build(1).validate().is_empty());
    assert!(build(3).validate().is_empty());
    assert_eq!(build(4).validate().as_slice(), &[Code::TooLarge]);
}

#[test]
fn nan_fails_every_bound() {
    let rule = rules::minimum_value(0.0, Some(f64::NAN)).error(Code::TooSmall).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::TooSmall]);

    let rule = rules::maximum_value(1.0, Some(f64::NAN)).error(Code::TooLarge).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::TooLarge]);

    let rule = rules::range(Some(f64::NAN), Some(0.0), Some(1.0))
        .error(Code::TooLarge)
        .build()
        .unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::TooLarge]);
}

// =========================================================================
// Date-time kind rules
// =========================================================================

#[test]
fn date_time_kind_matches() {
    let moment = Moment::from(Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap());
    let rule = rules::date_time_kind(DateTimeKind::Utc, Some(moment))
        .error(Code::WrongKind)
        .build()
        .unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn date_time_kind_mismatch_returns_error() {
    let naive = NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(3, 4, 5)
        .unwrap();
    let rule = rules::date_time_kind(DateTimeKind::Utc, Some(naive.into()))
        .error(Code::WrongKind)
        .build()
        .unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::WrongKind]);

    let local = Moment::from(Local::now());
    let rule = rules::date_time_kind(DateTimeKind::Unspecified, Some(local))
        .error(Code::WrongKind)
        .build()
        .unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::WrongKind]);
}

#[test]
fn date_time_kind_null_handling_follows_null_allowed() {
    let allowed = rules::date_time_kind(DateTimeKind::Local, None)
        .error(Code::WrongKind)
        .null_allowed(true)
        .build()
        .unwrap();
    assert!(allowed.validate().is_empty());

    let disallowed = rules::date_time_kind::<Code>(DateTimeKind::Local, None)
        .error(Code::WrongKind)
        .build();
    assert_eq!(disallowed.unwrap_err(), RuleError::NullValue("value"));
}

// =========================================================================
// Lazy reference rules
// =========================================================================

#[test]
fn lazy_entity_loaded_with_null_returns_error() {
    let entity: LazyEntity<String> = LazyEntity::loaded(None);
    let rule = rules::lazy_not_null(Some(&entity)).error(Code::E3).build().unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E3]);
}

#[test]
fn null_lazy_entity_reference_returns_error() {
    let rule = rules::lazy_not_null(None::<&LazyEntity<String>>)
        .error(Code::E3)
        .build()
        .unwrap();
    assert_eq!(rule.validate().as_slice(), &[Code::E3]);
}

#[test]
fn loaded_lazy_entity_with_value_passes() {
    let entity = LazyEntity::from(1);
    let rule = rules::lazy_not_null(Some(&entity)).error(Code::E3).build().unwrap();
    assert!(rule.validate().is_empty());
}

#[test]
fn unloaded_lazy_entity_passes_without_loading() {
    let entity: LazyEntity<u32> = LazyEntity::new(|| None);
    let rule = rules::lazy_not_null(Some(&entity)).error(Code::E3).build().unwrap();

    assert!(rule.validate().is_empty());
    assert!(!entity.is_loaded());
}

#[test]
fn lazy_entities_follow_the_same_policy() {
    let absent: LazyEntities<u8> = LazyEntities::loaded(None);
    let present = LazyEntities::from(vec![1u8]);
    let unloaded: LazyEntities<u8> = LazyEntities::new(|| None);

    let check = |entities: Option<&LazyEntities<u8>>| {
        rules::lazy_not_null(entities)
            .error(Code::E3)
            .build()
            .unwrap()
            .validate()
            .into_vec()
    };

    assert_eq!(check(Some(&absent)), vec![Code::E3]);
    assert_eq!(check(None), vec![Code::E3]);
    assert!(check(Some(&present)).is_empty());
    assert!(check(Some(&unloaded)).is_empty());
}

// =========================================================================
// Closure rules
// =========================================================================

#[test]
fn predicate_rule_reports_error_when_closure_returns_false() {
    let total = 7;
    let even = rules::predicate(move || total % 2 == 0).error(Code::E1).build().unwrap();
    let small = rules::predicate(move || total < 10).error(Code::E2).build().unwrap();

    assert_eq!(even.validate().as_slice(), &[Code::E1]);
    assert!(small.validate().is_empty());
}

// =========================================================================
// Composition
// =========================================================================

#[test]
fn not_null_dependency_suppresses_length_check() {
    let name: Option<&str> = None;
    let present: RuleRef<Code> = rules::not_null(name).error(Code::E3).into_ref().unwrap();
    let length = rules::maximum_length(1, name)
        .error(Code::E2)
        .null_allowed(true)
        .depends_on(&present)
        .stop_on(Code::E3)
        .build()
        .unwrap();

    assert_eq!(length.validate().as_slice(), &[Code::E3]);
}

#[test]
fn unrelated_dependency_error_is_merged() {
    let format: RuleRef<Code> = rules::pattern(r"^[a-z]+$", Some("AB"))
        .error(Code::E1)
        .into_ref()
        .unwrap();
    let length = rules::maximum_length(1, Some("AB"))
        .error(Code::E2)
        .depends_on(&format)
        .stop_on(Code::E3)
        .build()
        .unwrap();

    assert_eq!(length.validate().as_slice(), &[Code::E1, Code::E2]);
}

#[test]
fn built_rules_are_shareable_across_threads() {
    let rule: RuleRef<Code> = rules::pattern(r"^\d+$", Some("12a45"))
        .error(Code::E1)
        .into_ref()
        .unwrap();

    let handle = {
        let rule = Arc::clone(&rule);
        std::thread::spawn(move || rule.validate().into_vec())
    };
    assert_eq!(handle.join().unwrap(), vec![Code::E1]);
}
