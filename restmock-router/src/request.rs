//! Normalized requests and extra request matchers.

use bytes::Bytes;
use http::header::HeaderMap;
use http::Method;

use crate::error::{BoxError, MatchError};

/// A normalized inbound request, as seen by the matching core.
///
/// The transport layer builds one `MockRequest` per inbound request; this
/// crate only reads it. The path is expected in origin-form and already
/// normalized (percent-decoding is the transport's business).
///
/// # Examples
/// ```
/// use http::Method;
/// use restmock_router::MockRequest;
///
/// let req = MockRequest::new(Method::GET, "/users/42");
/// assert_eq!(req.method(), &Method::GET);
/// assert_eq!(req.path(), "/users/42");
/// ```
#[derive(Debug, Clone)]
pub struct MockRequest {
    method: Method,
    path: String,
    headers: HeaderMap,
    body: Bytes,
}

impl MockRequest {
    /// Creates a request with an empty header map and body.
    pub fn new(method: Method, path: impl Into<String>) -> MockRequest {
        MockRequest {
            method,
            path: path.into(),
            headers: HeaderMap::new(),
            body: Bytes::new(),
        }
    }

    /// Request method.
    #[inline]
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Request path in origin-form.
    #[inline]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Request headers.
    #[inline]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Mutable request headers.
    #[inline]
    pub fn headers_mut(&mut self) -> &mut HeaderMap {
        &mut self.headers
    }

    /// Request body bytes.
    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Replaces the request body.
    pub fn set_body(&mut self, body: impl Into<Bytes>) {
        self.body = body.into();
    }
}

impl<B> From<http::Request<B>> for MockRequest
where
    B: Into<Bytes>,
{
    fn from(req: http::Request<B>) -> MockRequest {
        let (parts, body) = req.into_parts();
        MockRequest {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers: parts.headers,
            body: body.into(),
        }
    }
}

/// An additional constraint a rule places on requests beyond method and
/// path shape.
///
/// Matchers are evaluated only after a rule's method and scope checks have
/// passed, so expensive checks never run against structurally ineligible
/// requests. Implementations must be pure: no side effects, no request
/// mutation.
///
/// Closures of type `Fn(&MockRequest) -> bool` implement this trait
/// directly; [`try_fn_matcher`] adapts fallible closures.
pub trait RequestMatcher: Send + Sync {
    /// Returns true if the request satisfies this constraint.
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError>;
}

impl RequestMatcher for Box<dyn RequestMatcher> {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        (**self).matches(req)
    }
}

impl<F> RequestMatcher for F
where
    F: Fn(&MockRequest) -> bool + Send + Sync,
{
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        Ok((self)(req))
    }
}

/// Creates a request matcher from an infallible closure.
///
/// # Examples
/// ```
/// use restmock_router::{fn_matcher, MockRequest, RequestMatcher};
///
/// let has_body = fn_matcher(|req: &MockRequest| !req.body().is_empty());
/// let req = MockRequest::new(http::Method::POST, "/users");
/// assert!(!has_body.matches(&req).unwrap());
/// ```
pub fn fn_matcher<F>(f: F) -> impl RequestMatcher
where
    F: Fn(&MockRequest) -> bool + Send + Sync,
{
    FnMatcher(f)
}

struct FnMatcher<F: Fn(&MockRequest) -> bool + Send + Sync>(F);

impl<F> RequestMatcher for FnMatcher<F>
where
    F: Fn(&MockRequest) -> bool + Send + Sync,
{
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        Ok((self.0)(req))
    }
}

/// Creates a request matcher from a fallible closure.
///
/// A failure surfaces as a [`MatchError`] for the request being resolved
/// and is not retried.
pub fn try_fn_matcher<F>(f: F) -> impl RequestMatcher
where
    F: Fn(&MockRequest) -> Result<bool, BoxError> + Send + Sync,
{
    TryFnMatcher(f)
}

struct TryFnMatcher<F: Fn(&MockRequest) -> Result<bool, BoxError> + Send + Sync>(F);

impl<F> RequestMatcher for TryFnMatcher<F>
where
    F: Fn(&MockRequest) -> Result<bool, BoxError> + Send + Sync,
{
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        (self.0)(req).map_err(|source| MatchError::RequestMatcher { source })
    }
}
