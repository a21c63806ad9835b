//! Condition families for predicate rules.

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;

use super::Condition;
use super::kind::{DateTimeKind, Moment};
use crate::error::{Result, RuleError};

/// Fails when the value is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotNull {
    present: bool,
}

impl NotNull {
    pub fn new(present: bool) -> Self {
        Self { present }
    }
}

impl Condition for NotNull {
    fn is_violated(&self) -> bool {
        !self.present
    }
}

/// Fails when a present value lies outside the optional bounds (inclusive).
///
/// An absent value never fails.
#[derive(Debug, Clone, PartialEq)]
pub struct Range<T> {
    value: Option<T>,
    minimum: Option<T>,
    maximum: Option<T>,
}

impl<T: PartialOrd> Range<T> {
    pub fn new(value: Option<T>, minimum: Option<T>, maximum: Option<T>) -> Self {
        Self {
            value,
            minimum,
            maximum,
        }
    }
}

impl<T> Condition for Range<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    fn is_violated(&self) -> bool {
        let Some(value) = &self.value else {
            return false;
        };
        // Incomparable values (NaN) fail every bound.
        let below = self
            .minimum
            .as_ref()
            .is_some_and(|min| !matches!(value.partial_cmp(min), Some(Ordering::Greater | Ordering::Equal)));
        let above = self
            .maximum
            .as_ref()
            .is_some_and(|max| !matches!(value.partial_cmp(max), Some(Ordering::Less | Ordering::Equal)));
        below || above
    }
}

/// Fails when a present string does not match a regular expression.
#[derive(Clone)]
pub struct Pattern {
    regex: Regex,
    value: Option<String>,
}

impl Pattern {
    /// Compile `pattern` and capture `value`.
    ///
    /// # Returns
    ///
    /// * `Err(RuleError::InvalidPattern)` - If the pattern fails to compile
    pub fn new(pattern: &str, value: Option<&str>) -> Result<Self> {
        let regex = Regex::new(pattern).map_err(|e| RuleError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self::with_regex(regex, value))
    }

    /// Capture `value` against an already compiled regex.
    pub fn with_regex(regex: Regex, value: Option<&str>) -> Self {
        Self {
            regex,
            value: value.map(str::to_string),
        }
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pattern")
            .field("pattern", &self.regex.as_str())
            .field("value", &self.value)
            .finish()
    }
}

impl Condition for Pattern {
    fn value_absent(&self) -> bool {
        self.value.is_none()
    }

    fn is_violated(&self) -> bool {
        self.value
            .as_deref()
            .is_some_and(|value| !self.regex.is_match(value))
    }
}

/// Fails when a present string is shorter than the minimum or longer than the
/// maximum. Length is measured in characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Length {
    value: Option<String>,
    minimum: Option<usize>,
    maximum: Option<usize>,
}

impl Length {
    pub fn new(value: Option<&str>, minimum: Option<usize>, maximum: Option<usize>) -> Self {
        Self {
            value: value.map(str::to_string),
            minimum,
            maximum,
        }
    }
}

impl Condition for Length {
    fn value_absent(&self) -> bool {
        self.value.is_none()
    }

    fn is_violated(&self) -> bool {
        let Some(value) = &self.value else {
            return false;
        };
        let length = value.chars().count();
        self.minimum.is_some_and(|min| length < min) || self.maximum.is_some_and(|max| length > max)
    }
}

/// Fails when a present moment is not of the required kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindMatches {
    kind: DateTimeKind,
    value: Option<Moment>,
}

impl KindMatches {
    pub fn new(kind: DateTimeKind, value: Option<Moment>) -> Self {
        Self { kind, value }
    }
}

impl Condition for KindMatches {
    fn value_absent(&self) -> bool {
        self.value.is_none()
    }

    fn is_violated(&self) -> bool {
        self.value.is_some_and(|moment| moment.kind() != self.kind)
    }
}

/// Fails when the closure returns `false`. The closure must be pure.
#[derive(Clone)]
pub struct Predicate<F> {
    is_valid: F,
}

impl<F> Predicate<F>
where
    F: Fn() -> bool,
{
    pub fn new(is_valid: F) -> Self {
        Self { is_valid }
    }
}

impl<F> fmt::Debug for Predicate<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate(<fn>)")
    }
}

impl<F> Condition for Predicate<F>
where
    F: Fn() -> bool + Send + Sync + 'static,
{
    fn is_violated(&self) -> bool {
        !(self.is_valid)()
    }
}
