//! Constructors for the built-in rule kinds.
//!
//! Each returns a [`RuleBuilder`]; finish it with an error code and
//! [`RuleBuilder::build`] or [`RuleBuilder::into_ref`].

use regex::Regex;

use super::conditions::{KindMatches, Length, NotNull, Pattern, Predicate, Range};
use super::kind::{DateTimeKind, Moment};
use super::RuleBuilder;
use crate::lazy::LazyReference;
use crate::rule::ValidationError;

/// Error iff the value is absent.
pub fn not_null<E: ValidationError, T: ?Sized>(value: Option<&T>) -> RuleBuilder<E, NotNull> {
    RuleBuilder::new(NotNull::new(value.is_some()))
}

/// Error iff the value is present and below `minimum`.
pub fn minimum_value<E, T>(minimum: T, value: Option<T>) -> RuleBuilder<E, Range<T>>
where
    E: ValidationError,
    T: PartialOrd + Send + Sync + 'static,
{
    RuleBuilder::new(Range::new(value, Some(minimum), None))
}

/// Error iff the value is present and above `maximum`.
pub fn maximum_value<E, T>(maximum: T, value: Option<T>) -> RuleBuilder<E, Range<T>>
where
    E: ValidationError,
    T: PartialOrd + Send + Sync + 'static,
{
    RuleBuilder::new(Range::new(value, None, Some(maximum)))
}

/// Error iff the value is present and outside whichever bounds are given.
pub fn range<E, T>(value: Option<T>, minimum: Option<T>, maximum: Option<T>) -> RuleBuilder<E, Range<T>>
where
    E: ValidationError,
    T: PartialOrd + Send + Sync + 'static,
{
    RuleBuilder::new(Range::new(value, minimum, maximum))
}

/// Error iff the value is present and does not match `pattern`.
///
/// An invalid pattern is reported by [`RuleBuilder::build`].
pub fn pattern<E: ValidationError>(pattern: &str, value: Option<&str>) -> RuleBuilder<E, Pattern> {
    RuleBuilder::from_result(Pattern::new(pattern, value))
}

/// Like [`pattern`], reusing an already compiled regex.
pub fn matching<E: ValidationError>(regex: &Regex, value: Option<&str>) -> RuleBuilder<E, Pattern> {
    RuleBuilder::new(Pattern::with_regex(regex.clone(), value))
}

/// Error iff the value is present and shorter than `minimum` characters.
pub fn minimum_length<E: ValidationError>(minimum: usize, value: Option<&str>) -> RuleBuilder<E, Length> {
    RuleBuilder::new(Length::new(value, Some(minimum), None))
}

/// Error iff the value is present and longer than `maximum` characters.
pub fn maximum_length<E: ValidationError>(maximum: usize, value: Option<&str>) -> RuleBuilder<E, Length> {
    RuleBuilder::new(Length::new(value, None, Some(maximum)))
}

/// Error iff the value is present and not of the given kind.
pub fn date_time_kind<E: ValidationError>(
    kind: DateTimeKind,
    value: Option<Moment>,
) -> RuleBuilder<E, KindMatches> {
    RuleBuilder::new(KindMatches::new(kind, value))
}

/// Error iff the reference is absent, or already loaded with an absent value.
///
/// A reference that has not loaded yet passes; it is not loaded as a side
/// effect. The state is captured when this is called.
pub fn lazy_not_null<E, L>(reference: Option<&L>) -> RuleBuilder<E, NotNull>
where
    E: ValidationError,
    L: LazyReference + ?Sized,
{
    let present = match reference.map(|r| r.peek()) {
        None => false,
        Some(None) => true,
        Some(Some(value)) => value.is_some(),
    };
    RuleBuilder::new(NotNull::new(present))
}

/// Error iff `is_valid` returns `false`.
pub fn predicate<E, F>(is_valid: F) -> RuleBuilder<E, Predicate<F>>
where
    E: ValidationError,
    F: Fn() -> bool + Send + Sync + 'static,
{
    RuleBuilder::new(Predicate::new(is_valid))
}
