//! rulegraph: declarative validation rules with dependencies.
//!
//! Each rule checks one property of a captured value and reports a
//! caller-defined error code on failure. Rules can depend on other rules and
//! name a stop set: when a dependency reports an error from the stop set, the
//! dependent rule skips its own check instead of piling on derived errors.
//!
//! ```
//! use rulegraph::{Rule, RuleValidator, rules};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
//! enum CustomerError {
//!     NameMissing,
//!     NameTooLong,
//!     PostcodeInvalid,
//! }
//!
//! let name: Option<&str> = None;
//! let postcode = Some("12a45");
//!
//! let name_present = rules::not_null(name)
//!     .error(CustomerError::NameMissing)
//!     .into_ref()?;
//! let name_length = rules::maximum_length(40, name)
//!     .error(CustomerError::NameTooLong)
//!     .null_allowed(true)
//!     .depends_on(&name_present)
//!     .stop_on(CustomerError::NameMissing)
//!     .into_ref()?;
//! let postcode_format = rules::pattern(r"^\d{5}$", postcode)
//!     .error(CustomerError::PostcodeInvalid)
//!     .into_ref()?;
//!
//! let errors = RuleValidator::new().collect_errors(&[name_length, postcode_format]);
//! assert_eq!(
//!     errors.as_slice(),
//!     &[CustomerError::NameMissing, CustomerError::PostcodeInvalid]
//! );
//! # Ok::<(), rulegraph::error::RuleError>(())
//! ```

pub mod config;
pub mod error;
pub mod events;
pub mod failure;
pub mod lazy;
pub mod predicate;
pub mod rule;
pub mod validator;

pub use config::Config;
pub use error::{Result, RuleError};
pub use failure::ValidationFailure;
pub use lazy::{LazyEntities, LazyEntity, LazyReference};
pub use predicate::{Condition, DateTimeKind, Moment, PredicateRule, RuleBuilder, rules};
pub use rule::{ErrorSet, Rule, RuleLinks, RuleRef, ValidationError};
pub use validator::RuleValidator;
