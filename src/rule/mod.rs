//! The rule contract and its dependency-aware evaluation.
//!
//! A rule checks one property of a captured value and reports at most one
//! error code. Rules may depend on other rules:
//! - dependencies are validated first, in registration order
//! - if any dependency error is in the rule's stop set, the rule's own check
//!   is skipped and only the dependency errors are returned
//! - otherwise the own-check result is merged into the dependency errors
//!
//! Errors are deduplicated by value at every merge point. There is no
//! memoization across calls and no cycle detection: dependency graphs must be
//! acyclic.

mod error_set;


use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;

pub use error_set::ErrorSet;

/// A caller-supplied error code, such as an enum variant.
///
/// The engine only compares, orders and clones these values.
pub trait ValidationError: Ord + Clone + fmt::Debug + Send + Sync + 'static {}

impl<T> ValidationError for T where T: Ord + Clone + fmt::Debug + Send + Sync + 'static {}

/// Shared handle to a rule. Rules are shared between every rule that depends
/// on them.
pub type RuleRef<E> = Arc<dyn Rule<E>>;

/// A single validation unit.
///
/// Implementors supply their dependency wiring through [`Rule::links`] and
/// their own check through [`Rule::check`]. The provided [`Rule::validate`]
/// runs the evaluation algorithm and should not be overridden.
pub trait Rule<E: ValidationError>: Send + Sync {
    /// Dependencies and stop set, fixed at construction.
    fn links(&self) -> &RuleLinks<E>;

    /// The rule's own check. Must be pure.
    fn check(&self) -> Option<E>;

    /// Validate dependencies, then (unless short-circuited) this rule.
    fn validate(&self) -> ErrorSet<E> {
        evaluate(self)
    }
}

/// Run the evaluation algorithm for `rule`.
pub fn evaluate<E, R>(rule: &R) -> ErrorSet<E>
where
    E: ValidationError,
    R: Rule<E> + ?Sized,
{
    let links = rule.links();
    let mut errors = ErrorSet::new();

    for dependency in &links.dependencies {
        errors.extend(dependency.validate());
    }

    if errors.intersects(&links.stop_set) {
        tracing::trace!(
            dependency_errors = ?errors,
            stop_set = ?links.stop_set,
            "stop error reported by dependency, skipping own check"
        );
        return errors;
    }

    if let Some(error) = rule.check() {
        tracing::trace!(?error, "rule check failed");
        errors.insert(error);
    }

    errors
}

/// Dependencies and stop set of a rule.
pub struct RuleLinks<E: ValidationError> {
    dependencies: Vec<RuleRef<E>>,
    stop_set: BTreeSet<E>,
}

impl<E: ValidationError> RuleLinks<E> {
    pub fn new() -> Self {
        Self {
            dependencies: Vec::new(),
            stop_set: BTreeSet::new(),
        }
    }

    /// Add a dependency. Dependencies are validated in the order added.
    pub fn depends_on(mut self, rule: &RuleRef<E>) -> Self {
        self.dependencies.push(Arc::clone(rule));
        self
    }

    /// Add an error that suppresses the own check when a dependency reports it.
    pub fn stop_on(mut self, error: E) -> Self {
        self.stop_set.insert(error);
        self
    }

    pub fn stop_on_any<I: IntoIterator<Item = E>>(mut self, errors: I) -> Self {
        self.stop_set.extend(errors);
        self
    }

    pub fn dependencies(&self) -> &[RuleRef<E>] {
        &self.dependencies
    }

    pub fn stop_set(&self) -> &BTreeSet<E> {
        &self.stop_set
    }
}

impl<E: ValidationError> Default for RuleLinks<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ValidationError> Clone for RuleLinks<E> {
    fn clone(&self) -> Self {
        Self {
            dependencies: self.dependencies.clone(),
            stop_set: self.stop_set.clone(),
        }
    }
}

impl<E: ValidationError> fmt::Debug for RuleLinks<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleLinks")
            .field("dependencies", &self.dependencies.len())
            .field("stop_set", &self.stop_set)
            .finish()
    }
}
