//! Configuration errors.
//!
//! Validation at construction is the only fallible boundary in this crate;
//! every derivation past it is a total function over already-valid data.

use crate::spec::Section;
use thiserror::Error;

/// Resolver result type.
pub type Result<T> = std::result::Result<T, ConfigurationError>;

/// Errors raised while turning a validated document into a
/// [`Specification`](crate::Specification).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "single-run specification cannot contain a `{section}` section; \
         use a sweep specification for parameter search"
    )]
    SectionNotAllowed { section: Section },

    #[error("environment declares more than one framework: `{first}` and `{second}`")]
    AmbiguousFramework {
        first: &'static str,
        second: &'static str,
    },
}
