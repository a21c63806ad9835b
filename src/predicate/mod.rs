//! Predicate rules: one rule type for every condition family.
//!
//! A [`PredicateRule`] pairs a [`Condition`] (the own check over a captured
//! value) with the error code to report and the rule's dependency links.
//! Rules are built through [`RuleBuilder`], usually obtained from one of the
//! constructors in [`rules`]:
//!
//! ```
//! use rulegraph::{Rule, rules};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
//! enum Code { NameMissing, NameTooLong }
//!
//! let name: Option<&str> = Some("a very long name");
//! let present = rules::not_null(name).error(Code::NameMissing).into_ref()?;
//! let length = rules::maximum_length(8, name)
//!     .error(Code::NameTooLong)
//!     .null_allowed(true)
//!     .depends_on(&present)
//!     .stop_on(Code::NameMissing)
//!     .build()?;
//!
//! assert_eq!(length.validate().as_slice(), &[Code::NameTooLong]);
//! # Ok::<(), rulegraph::error::RuleError>(())
//! ```

mod conditions;
mod kind;
pub mod rules;

#[cfg(test)]
mod tests;

use std::fmt;
use std::sync::Arc;

use crate::error::{Result, RuleError};
use crate::rule::{Rule, RuleLinks, RuleRef, ValidationError};

pub use conditions::{KindMatches, Length, NotNull, Pattern, Predicate, Range};
pub use kind::{DateTimeKind, Moment};

/// The own check of a predicate rule.
pub trait Condition: Send + Sync + 'static {
    /// Whether the value under test is absent.
    ///
    /// Conditions that treat absence as their own failure (not-null checks)
    /// or as a pass (range checks) keep the default.
    fn value_absent(&self) -> bool {
        false
    }

    /// Whether the captured value fails this condition.
    fn is_violated(&self) -> bool;
}

/// A rule whose own check is a [`Condition`].
pub struct PredicateRule<E: ValidationError, C> {
    links: RuleLinks<E>,
    error: E,
    condition: C,
}

impl<E: ValidationError, C> PredicateRule<E, C> {
    /// The error reported when the condition is violated.
    pub fn error(&self) -> &E {
        &self.error
    }

    pub fn condition(&self) -> &C {
        &self.condition
    }
}

impl<E: ValidationError, C: Condition> Rule<E> for PredicateRule<E, C> {
    fn links(&self) -> &RuleLinks<E> {
        &self.links
    }

    fn check(&self) -> Option<E> {
        self.condition
            .is_violated()
            .then(|| self.error.clone())
    }
}

impl<E: ValidationError, C: fmt::Debug> fmt::Debug for PredicateRule<E, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PredicateRule")
            .field("error", &self.error)
            .field("condition", &self.condition)
            .field("links", &self.links)
            .finish()
    }
}

/// Fluent construction of a [`PredicateRule`].
///
/// All precondition checks run in [`RuleBuilder::build`], so an invalid
/// combination of arguments never yields a rule.
pub struct RuleBuilder<E: ValidationError, C> {
    condition: Result<C>,
    error: Option<E>,
    null_allowed: bool,
    links: RuleLinks<E>,
}

impl<E: ValidationError, C: Condition> RuleBuilder<E, C> {
    pub fn new(condition: C) -> Self {
        Self::from_result(Ok(condition))
    }

    pub(crate) fn from_result(condition: Result<C>) -> Self {
        Self {
            condition,
            error: None,
            null_allowed: false,
            links: RuleLinks::new(),
        }
    }

    /// The error to report when the condition is violated. Required.
    pub fn error(mut self, error: E) -> Self {
        self.error = Some(error);
        self
    }

    /// Whether an absent value is acceptable. Defaults to `false`.
    pub fn null_allowed(mut self, allowed: bool) -> Self {
        self.null_allowed = allowed;
        self
    }

    pub fn depends_on(mut self, rule: &RuleRef<E>) -> Self {
        self.links = self.links.depends_on(rule);
        self
    }

    pub fn stop_on(mut self, error: E) -> Self {
        self.links = self.links.stop_on(error);
        self
    }

    pub fn stop_on_any<I: IntoIterator<Item = E>>(mut self, errors: I) -> Self {
        self.links = self.links.stop_on_any(errors);
        self
    }

    /// Check preconditions and build the rule.
    ///
    /// # Returns
    ///
    /// * `Err(RuleError::InvalidPattern)` - The condition could not be constructed
    /// * `Err(RuleError::MissingArgument)` - No error code was supplied
    /// * `Err(RuleError::NullValue)` - The value is absent and null is disallowed
    pub fn build(self) -> Result<PredicateRule<E, C>> {
        let condition = self.condition?;
        let error = self
            .error
            .ok_or(RuleError::MissingArgument("validation_error"))?;

        if !self.null_allowed && condition.value_absent() {
            return Err(RuleError::NullValue("value"));
        }

        Ok(PredicateRule {
            links: self.links,
            error,
            condition,
        })
    }

    /// Build the rule and wrap it for use as a dependency.
    pub fn into_ref(self) -> Result<RuleRef<E>> {
        Ok(Arc::new(self.build()?))
    }
}
