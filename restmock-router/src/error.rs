//! Error types for rule construction, registration, and resolution.

use derive_more::{Display, Error, From};

/// An opaque error payload produced by caller-supplied predicates and
/// matchers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised when a literal resource identifier fails validation.
///
/// Raised at construction time only; an identifier that constructs
/// successfully never fails at match time.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum IdentifierError {
    /// Identifier is the empty string.
    #[display(fmt = "resource identifier must not be empty")]
    Empty,

    /// Identifier contains a path separator.
    #[display(fmt = "resource identifier must not contain '/'")]
    Separator,

    /// Identifier contains a character that is not valid in a URI segment.
    #[display(fmt = "invalid URI segment character {:?} in resource identifier", _0)]
    InvalidCharacter(#[error(not(source))] char),
}

/// Errors raised when sub-resource composition rules are violated.
///
/// Raised at build time only.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[non_exhaustive]
pub enum CompositionError {
    /// The child setting is already scoped under a parent identifier; only
    /// one nesting level is supported.
    #[display(fmt = "sub-resource settings cannot be nested under another sub-resource")]
    AlreadyNested,
}

/// Errors raised while evaluating rules against a single request.
///
/// An evaluation failure is isolated to the request being resolved; the
/// rule registry is left untouched and continues to serve subsequent
/// requests.
#[derive(Debug, Display)]
#[non_exhaustive]
pub enum MatchError {
    /// A caller-supplied identifier predicate failed.
    #[display(fmt = "identifier predicate evaluation failed: {}", source)]
    IdPredicate { source: BoxError },

    /// A caller-supplied request matcher failed.
    #[display(fmt = "request matcher evaluation failed: {}", source)]
    RequestMatcher { source: BoxError },
}

impl std::error::Error for MatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MatchError::IdPredicate { source } | MatchError::RequestMatcher { source } => {
                Some(source.as_ref())
            }
        }
    }
}

/// Errors raised while registering rules into a router.
///
/// Raised at registration time, never at resolution time.
#[derive(Debug, Display, Error, From)]
#[non_exhaustive]
pub enum RegistryError {
    /// The resource root name failed identifier validation.
    #[display(fmt = "invalid resource root: {}", _0)]
    Root(IdentifierError),

    /// Strict mode rejected a rule that structurally overlaps an
    /// earlier-registered rule.
    #[from(ignore)]
    #[display(fmt = "duplicate {} rule for resource /{}", method, root)]
    Duplicate {
        #[error(not(source))]
        method: http::Method,
        root: String,
    },
}
