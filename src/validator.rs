//! Running several top-level rules as one validation pass.

use std::fmt;
use std::marker::PhantomData;

use crate::config::Config;
use crate::failure::ValidationFailure;
use crate::error::Result;
use crate::rule::{ErrorSet, RuleRef, ValidationError};

/// Validates a list of top-level rules and merges their errors.
///
/// Holds no mutable state; a single instance may be shared freely between
/// threads. Every supplied rule is evaluated, even after earlier rules have
/// reported errors.
pub struct RuleValidator<E> {
    config: Config,
    _errors: PhantomData<fn() -> E>,
}

impl<E: ValidationError> RuleValidator<E> {
    /// A validator with the default configuration.
    pub const DEFAULT: RuleValidator<E> = RuleValidator {
        config: Config::DEFAULT,
        _errors: PhantomData,
    };

    pub fn new() -> Self {
        Self::DEFAULT
    }

    /// A validator wording its failures by `config`.
    ///
    /// Fails with [`RuleError::Config`](crate::error::RuleError::Config) when
    /// the config does not pass [`Config::validate`].
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            _errors: PhantomData,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Validate every rule and return the distinct errors in order of first
    /// occurrence. An empty rule list yields no errors.
    pub fn collect_errors(&self, rules: &[RuleRef<E>]) -> ErrorSet<E> {
        let mut errors = ErrorSet::new();

        for rule in rules {
            errors.extend(rule.validate());
        }

        tracing::debug!(
            rules = rules.len(),
            errors = errors.len(),
            "validated rules"
        );
        errors
    }

    /// Validate every rule and convert any errors into a failure.
    ///
    /// `failure_factory` is invoked only when at least one error exists.
    pub fn validate_or_raise<F, X>(
        &self,
        rules: &[RuleRef<E>],
        failure_factory: F,
    ) -> std::result::Result<(), X>
    where
        F: FnOnce(ErrorSet<E>) -> X,
    {
        let errors = self.collect_errors(rules);

        if errors.is_empty() {
            return Ok(());
        }

        Err(failure_factory(errors))
    }

    /// Validate every rule, raising a [`ValidationFailure`] worded by this
    /// validator's config.
    pub fn validate_or_fail(&self, rules: &[RuleRef<E>]) -> std::result::Result<(), ValidationFailure<E>> {
        self.validate_or_raise(rules, |errors| {
            let message = self.config.failure_message_for(&errors);
            ValidationFailure::with_message(errors, message)
        })
    }
}

impl<E: ValidationError> Default for RuleValidator<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for RuleValidator<E> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            _errors: PhantomData,
        }
    }
}

impl<E> fmt::Debug for RuleValidator<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleValidator")
            .field("config", &self.config)
            .finish()
    }
}
