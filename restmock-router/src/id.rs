//! Resource identifier matchers.

use std::fmt;
use std::sync::Arc;

use tracing::error;

use crate::error::{BoxError, IdentifierError, MatchError};

/// RFC 3986 `pchar` characters allowed in an identifier beyond ASCII
/// alphanumerics. `%` is handled separately so escapes are checked as
/// complete hex pairs.
const SEGMENT_EXTRA: &[u8] = b"-._~!$&'()*+,;=:@";

type Predicate = Arc<dyn Fn(&str) -> Result<bool, BoxError> + Send + Sync>;

#[derive(Clone)]
enum IdKind {
    Exact(String),
    Any,
    Predicate(Predicate),
}

/// Decides whether the identifier segment of a REST path selects a rule.
///
/// A matcher is one of a closed set of strategies: exact comparison against
/// a validated literal, a match-anything wildcard, or a caller-supplied
/// predicate. Matchers are immutable once constructed and borrow nothing
/// from the requests they are evaluated against.
///
/// # Examples
/// ```
/// use restmock_router::RestIdMatcher;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let exact = RestIdMatcher::exact("42")?;
/// assert!(exact.matches("42")?);
/// assert!(!exact.matches("7")?);
///
/// assert!(RestIdMatcher::any().matches("anything")?);
///
/// let even = RestIdMatcher::predicate(|seg| Ok(seg.parse::<u64>()? % 2 == 0));
/// assert!(even.matches("42")?);
/// assert!(even.matches("not-a-number").is_err());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RestIdMatcher {
    kind: IdKind,
}

impl RestIdMatcher {
    /// Constructs a matcher that accepts exactly the literal `id`.
    ///
    /// The literal is validated eagerly: it must be non-empty, must not
    /// contain `/`, and must use only characters valid in a URI segment.
    /// A rejected literal never reaches match time.
    pub fn exact(id: impl Into<String>) -> Result<RestIdMatcher, IdentifierError> {
        let id = id.into();
        validate_identifier(&id)?;
        Ok(RestIdMatcher {
            kind: IdKind::Exact(id),
        })
    }

    /// Constructs a matcher that accepts every identifier segment.
    pub fn any() -> RestIdMatcher {
        RestIdMatcher { kind: IdKind::Any }
    }

    /// Constructs a matcher around a caller-supplied predicate.
    ///
    /// The predicate may fail; a failure surfaces as a [`MatchError`] for
    /// the request being resolved and is not retried.
    pub fn predicate<F>(f: F) -> RestIdMatcher
    where
        F: Fn(&str) -> Result<bool, BoxError> + Send + Sync + 'static,
    {
        RestIdMatcher {
            kind: IdKind::Predicate(Arc::new(f)),
        }
    }

    /// Evaluates this matcher against a candidate identifier segment.
    pub fn matches(&self, segment: &str) -> Result<bool, MatchError> {
        match &self.kind {
            IdKind::Exact(id) => Ok(id == segment),
            IdKind::Any => Ok(true),
            IdKind::Predicate(f) => f(segment).map_err(|source| {
                error!("identifier predicate failed on {:?}: {}", segment, source);
                MatchError::IdPredicate { source }
            }),
        }
    }

    /// Returns true if some identifier segment could satisfy both `self`
    /// and `other`.
    ///
    /// Predicates cannot be compared without a request, so they never
    /// overlap statically.
    pub(crate) fn overlaps(&self, other: &RestIdMatcher) -> bool {
        match (&self.kind, &other.kind) {
            (IdKind::Any, _) | (_, IdKind::Any) => true,
            (IdKind::Exact(a), IdKind::Exact(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Debug for RestIdMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IdKind::Exact(id) => f.debug_tuple("Exact").field(id).finish(),
            IdKind::Any => f.write_str("Any"),
            IdKind::Predicate(_) => f.write_str("Predicate"),
        }
    }
}

/// Checks a literal identifier against the URI-segment character set.
///
/// Resource root and sub-resource collection names obey the same rules as
/// item identifiers, so registration goes through this check as well.
pub fn validate_identifier(id: &str) -> Result<(), IdentifierError> {
    if id.is_empty() {
        return Err(IdentifierError::Empty);
    }

    let bytes = id.as_bytes();
    let mut skip = 0usize;
    for (i, ch) in id.char_indices() {
        if skip > 0 {
            skip -= 1;
            continue;
        }

        match ch {
            '/' => return Err(IdentifierError::Separator),
            '%' => match (bytes.get(i + 1), bytes.get(i + 2)) {
                (Some(hi), Some(lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit() => {
                    // hex digits are single-byte chars
                    skip = 2;
                }
                _ => return Err(IdentifierError::InvalidCharacter('%')),
            },
            c if c.is_ascii_alphanumeric() => {}
            c if c.is_ascii() && SEGMENT_EXTRA.contains(&(c as u8)) => {}
            c => return Err(IdentifierError::InvalidCharacter(c)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn literal_validation() {
        assert!(validate_identifier("validId123").is_ok());
        assert!(validate_identifier("item-1.2_3~").is_ok());
        assert!(validate_identifier("a%2Fb").is_ok());

        assert_eq!(validate_identifier(""), Err(IdentifierError::Empty));
        assert_eq!(validate_identifier("a/b"), Err(IdentifierError::Separator));
        assert_eq!(
            validate_identifier("a b"),
            Err(IdentifierError::InvalidCharacter(' '))
        );
        assert_eq!(
            validate_identifier("a%2"),
            Err(IdentifierError::InvalidCharacter('%'))
        );
        assert_eq!(
            validate_identifier("a%zz"),
            Err(IdentifierError::InvalidCharacter('%'))
        );
        assert_eq!(
            validate_identifier("tüv"),
            Err(IdentifierError::InvalidCharacter('ü'))
        );
    }

    #[test]
    fn exact_rejects_invalid_literal() {
        assert!(RestIdMatcher::exact("42").is_ok());
        assert!(matches!(
            RestIdMatcher::exact(""),
            Err(IdentifierError::Empty)
        ));
        assert!(matches!(
            RestIdMatcher::exact("a/b"),
            Err(IdentifierError::Separator)
        ));
    }

    #[test]
    fn exact_matches_literal_only() {
        let matcher = RestIdMatcher::exact("42").unwrap();
        assert!(matcher.matches("42").unwrap());
        assert!(!matcher.matches("7").unwrap());
        assert!(!matcher.matches("420").unwrap());
    }

    #[test]
    fn any_matches_everything() {
        let matcher = RestIdMatcher::any();
        assert!(matcher.matches("42").unwrap());
        assert!(matcher.matches("anything-goes").unwrap());
    }

    #[test]
    fn predicate_failure_surfaces() {
        let matcher = RestIdMatcher::predicate(|seg| {
            if seg == "bad" {
                Err("broken fixture".into())
            } else {
                Ok(seg.len() == 2)
            }
        });

        assert!(matcher.matches("42").unwrap());
        assert!(!matcher.matches("421").unwrap());

        let err = matcher.matches("bad").unwrap_err();
        assert!(matches!(err, MatchError::IdPredicate { .. }));
    }

    #[test]
    fn overlap_rules() {
        let any = RestIdMatcher::any;
        let exact = |id| RestIdMatcher::exact(id).unwrap();
        let pred = || RestIdMatcher::predicate(|_| Ok(true));

        assert!(any().overlaps(&any()));
        assert!(any().overlaps(&exact("42")));
        assert!(any().overlaps(&pred()));
        assert!(exact("42").overlaps(&exact("42")));
        assert!(!exact("42").overlaps(&exact("7")));
        assert!(!exact("42").overlaps(&pred()));
        assert!(!pred().overlaps(&pred()));
    }
}
