//! Registered rules: method, scope, composition, and the match check.

use std::fmt;

use http::Method;

use crate::error::{CompositionError, IdentifierError, MatchError};
use crate::id::{validate_identifier, RestIdMatcher};
use crate::path::RestPath;
use crate::request::{MockRequest, RequestMatcher};

/// How a rule addresses its resource.
#[derive(Debug, Clone)]
pub enum Scope {
    /// The rule matches the collection itself: no identifier segment
    /// beyond the resource root.
    Collection,

    /// The rule matches one item, selected by an identifier matcher.
    Single(RestIdMatcher),
}

/// Binding of a sub-resource to one parent item.
///
/// For `/orders/{id}/items/...` the parent matcher selects `{id}` and
/// `collection` names the nested collection (`items`).
#[derive(Debug, Clone)]
pub struct ParentScope {
    id: RestIdMatcher,
    collection: String,
}

impl ParentScope {
    /// Creates a parent binding for the given nested collection name.
    ///
    /// The collection name obeys the same validation rules as literal
    /// identifiers.
    pub fn new(
        id: RestIdMatcher,
        collection: impl Into<String>,
    ) -> Result<ParentScope, IdentifierError> {
        let collection = collection.into();
        validate_identifier(&collection)?;
        Ok(ParentScope { id, collection })
    }

    /// The parent identifier matcher.
    #[inline]
    pub fn id(&self) -> &RestIdMatcher {
        &self.id
    }

    /// The nested collection name.
    #[inline]
    pub fn collection(&self) -> &str {
        &self.collection
    }
}

/// One registered rule: a method, a scope, an optional extra request
/// matcher, and the response behavior it routes to.
///
/// `T` is the opaque response behavior owned by the configuring layer;
/// this crate never inspects it. Settings are immutable once built and
/// registered.
///
/// # Examples
/// ```
/// use http::Method;
/// use restmock_router::{MockRequest, RestIdMatcher, RestSetting};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let setting = RestSetting::single(Method::GET, RestIdMatcher::exact("42")?, "behavior");
///
/// let req = MockRequest::new(Method::GET, "/users/42");
/// assert!(setting.matches("users", &req)?);
///
/// let req = MockRequest::new(Method::DELETE, "/users/42");
/// assert!(!setting.matches("users", &req)?);
/// # Ok(())
/// # }
/// ```
pub struct RestSetting<T> {
    method: Method,
    scope: Scope,
    parent: Option<ParentScope>,
    matcher: Option<Box<dyn RequestMatcher>>,
    behavior: T,
}

impl<T> RestSetting<T> {
    /// Creates a setting with the given method and scope.
    pub fn new(method: Method, scope: Scope, behavior: T) -> RestSetting<T> {
        RestSetting {
            method,
            scope,
            parent: None,
            matcher: None,
            behavior,
        }
    }

    /// Creates a collection-scoped setting.
    pub fn collection(method: Method, behavior: T) -> RestSetting<T> {
        RestSetting::new(method, Scope::Collection, behavior)
    }

    /// Creates a single-item setting.
    pub fn single(method: Method, id: RestIdMatcher, behavior: T) -> RestSetting<T> {
        RestSetting::new(method, Scope::Single(id), behavior)
    }

    /// Attaches an extra request matcher, combined with the method and
    /// scope checks by logical AND.
    pub fn with_request_matcher(mut self, matcher: Box<dyn RequestMatcher>) -> RestSetting<T> {
        self.matcher = Some(matcher);
        self
    }

    /// Scopes this setting under a parent item, turning it into a
    /// sub-resource rule.
    ///
    /// Only one nesting level is supported; scoping an already-scoped
    /// setting fails.
    pub fn scoped_under(mut self, parent: ParentScope) -> Result<RestSetting<T>, CompositionError> {
        if self.parent.is_some() {
            return Err(CompositionError::AlreadyNested);
        }
        self.parent = Some(parent);
        Ok(self)
    }

    /// Rule method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Rule scope.
    #[inline]
    pub fn scope(&self) -> &Scope {
        &self.scope
    }

    /// Parent binding, if this is a sub-resource rule.
    #[inline]
    pub fn parent(&self) -> Option<&ParentScope> {
        self.parent.as_ref()
    }

    /// The bound response behavior.
    #[inline]
    pub fn behavior(&self) -> &T {
        &self.behavior
    }

    /// Decides whether this rule governs `req` when registered under the
    /// resource root `root`.
    ///
    /// Checks run cheapest first: method equality, then path shape
    /// (including the parent binding for sub-resource rules), then the
    /// extra request matcher. Caller-supplied matchers never see a request
    /// that is structurally ineligible. The check is a pure predicate over
    /// the request and the rule's static state.
    pub fn matches(&self, root: &str, req: &MockRequest) -> Result<bool, MatchError> {
        if req.method() != self.method {
            return Ok(false);
        }

        let path = match RestPath::parse(req.path()) {
            Some(path) if path.root() == root => path,
            _ => return Ok(false),
        };

        // index of the segment the scope applies to; a parent binding
        // consumes the parent id and the nested collection name first
        let base = match &self.parent {
            Some(parent) => {
                let id = match path.segment(1) {
                    Some(id) => id,
                    None => return Ok(false),
                };
                if !parent.id.matches(id)? {
                    return Ok(false);
                }
                if path.segment(2) != Some(parent.collection()) {
                    return Ok(false);
                }
                3
            }
            None => 1,
        };

        let scope_ok = match &self.scope {
            Scope::Collection => path.segment_count() == base,
            Scope::Single(matcher) => match path.segment(base) {
                Some(id) if path.segment_count() == base + 1 => matcher.matches(id)?,
                _ => false,
            },
        };
        if !scope_ok {
            return Ok(false);
        }

        match &self.matcher {
            Some(matcher) => matcher.matches(req),
            None => Ok(true),
        }
    }

    /// Structural overlap check used by strict-mode registration.
    ///
    /// Rules carrying extra request matchers never overlap statically:
    /// their behavior cannot be compared without a request.
    pub(crate) fn overlaps(&self, other: &RestSetting<T>) -> bool {
        if self.method != other.method {
            return false;
        }
        if self.matcher.is_some() || other.matcher.is_some() {
            return false;
        }

        let parents_overlap = match (&self.parent, &other.parent) {
            (None, None) => true,
            (Some(a), Some(b)) => a.collection == b.collection && a.id.overlaps(&b.id),
            _ => false,
        };
        if !parents_overlap {
            return false;
        }

        match (&self.scope, &other.scope) {
            (Scope::Collection, Scope::Collection) => true,
            (Scope::Single(a), Scope::Single(b)) => a.overlaps(b),
            _ => false,
        }
    }
}

impl<T> fmt::Debug for RestSetting<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestSetting")
            .field("method", &self.method)
            .field("scope", &self.scope)
            .field("parent", &self.parent)
            .field("has_matcher", &self.matcher.is_some())
            .finish_non_exhaustive()
    }
}
