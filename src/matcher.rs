//! Extra request matchers.
//!
//! Matchers constrain a rule beyond its method and path shape: a header
//! that must be present, a body the request must carry, or an arbitrary
//! predicate. They are evaluated only after a rule's method and scope
//! checks have passed, and are combined with those checks by logical AND.
//!
//! Fundamentally a matcher is a predicate over the normalized request;
//! the interface is the [`RequestMatcher`] trait, and plain closures of
//! type `Fn(&MockRequest) -> bool` implement it directly. The combinators
//! [`all_of`], [`any_of`] and [`not`] compose matchers where a single
//! `.request(..)` slot is not expressive enough.
//!
//! # Examples
//! ```
//! use restmock::matcher::{header, json_body};
//! use restmock::post;
//! use serde_json::json;
//!
//! let created = post()
//!     .request(header("content-type", "application/json"))
//!     .response("created");
//!
//! let strict = post()
//!     .request(json_body(json!({ "name": "jane" })))
//!     .response("created jane");
//! ```

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use restmock_router::{MatchError, MockRequest, RequestMatcher};

pub use restmock_router::{fn_matcher, try_fn_matcher};

/// Creates a matcher that requires the header `name` to be present with
/// exactly the value `value`.
///
/// # Examples
/// ```
/// use restmock::matcher::header;
/// use restmock::get;
///
/// let guarded = get().request(header("x-api-key", "secret")).response(());
/// ```
pub fn header(name: &'static str, value: &'static str) -> impl RequestMatcher {
    HeaderMatcher(
        HeaderName::try_from(name).unwrap(),
        HeaderValue::from_static(value),
    )
}

struct HeaderMatcher(HeaderName, HeaderValue);

impl RequestMatcher for HeaderMatcher {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        Ok(req.headers().get(&self.0).map_or(false, |val| val == self.1))
    }
}

/// Creates a matcher that requires the header `name` to be present, with
/// any value.
pub fn header_exists(name: &'static str) -> impl RequestMatcher {
    let name = HeaderName::try_from(name).unwrap();
    move |req: &MockRequest| req.headers().contains_key(&name)
}

/// Creates a matcher that requires the request body to equal `body`
/// byte for byte.
pub fn body(body: impl Into<Bytes>) -> impl RequestMatcher {
    BodyMatcher(body.into())
}

struct BodyMatcher(Bytes);

impl RequestMatcher for BodyMatcher {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        Ok(req.body() == self.0.as_ref())
    }
}

/// Creates a matcher that compares the request body against `expected` as
/// JSON.
///
/// The comparison is structural, so key order and whitespace do not
/// matter. A body that is not valid JSON simply does not match; it is not
/// an evaluation failure.
pub fn json_body(expected: serde_json::Value) -> impl RequestMatcher {
    JsonBodyMatcher(expected)
}

struct JsonBodyMatcher(serde_json::Value);

impl RequestMatcher for JsonBodyMatcher {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        match serde_json::from_slice::<serde_json::Value>(req.body()) {
            Ok(value) => Ok(value == self.0),
            Err(err) => {
                log::trace!("request body is not valid JSON: {}", err);
                Ok(false)
            }
        }
    }
}

/// Creates a matcher that matches if all added matchers match.
///
/// # Examples
/// ```
/// use restmock::matcher::{all_of, body, header};
/// use restmock::post;
///
/// let setting = post()
///     .request(all_of(header("content-type", "text/plain")).and(body("hello")))
///     .response(());
/// ```
pub fn all_of(matcher: impl RequestMatcher + 'static) -> AllOf {
    AllOf {
        matchers: vec![Box::new(matcher)],
    }
}

/// A collection of matchers that match if all of them match.
///
/// Construct with [`all_of`].
pub struct AllOf {
    matchers: Vec<Box<dyn RequestMatcher>>,
}

impl AllOf {
    /// Adds another matcher to the conjunction.
    pub fn and(mut self, matcher: impl RequestMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl RequestMatcher for AllOf {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        for matcher in &self.matchers {
            if !matcher.matches(req)? {
                return Ok(false);
            }
        }
        Ok(true)
    }
}

/// Creates a matcher that matches if any added matcher matches.
pub fn any_of(matcher: impl RequestMatcher + 'static) -> AnyOf {
    AnyOf {
        matchers: vec![Box::new(matcher)],
    }
}

/// A collection of matchers that match if at least one of them matches.
///
/// Construct with [`any_of`].
pub struct AnyOf {
    matchers: Vec<Box<dyn RequestMatcher>>,
}

impl AnyOf {
    /// Adds another matcher to the disjunction.
    pub fn or(mut self, matcher: impl RequestMatcher + 'static) -> Self {
        self.matchers.push(Box::new(matcher));
        self
    }
}

impl RequestMatcher for AnyOf {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        for matcher in &self.matchers {
            if matcher.matches(req)? {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

/// Inverts the outcome of a matcher. Evaluation failures are not
/// inverted; they still fail the resolution.
pub fn not(matcher: impl RequestMatcher + 'static) -> impl RequestMatcher {
    NotMatcher(Box::new(matcher))
}

struct NotMatcher(Box<dyn RequestMatcher>);

impl RequestMatcher for NotMatcher {
    fn matches(&self, req: &MockRequest) -> Result<bool, MatchError> {
        Ok(!self.0.matches(req)?)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::test::TestRequest;

    #[test]
    fn header_match() {
        let req = TestRequest::get()
            .uri("/users")
            .insert_header("x-api-key", "secret")
            .to_request();

        assert!(header("x-api-key", "secret").matches(&req).unwrap());
        assert!(!header("x-api-key", "other").matches(&req).unwrap());
        assert!(!header("x-token", "secret").matches(&req).unwrap());

        assert!(header_exists("x-api-key").matches(&req).unwrap());
        assert!(!header_exists("x-token").matches(&req).unwrap());
    }

    #[test]
    fn body_match() {
        let req = TestRequest::post()
            .uri("/users")
            .set_payload("hello")
            .to_request();

        assert!(body("hello").matches(&req).unwrap());
        assert!(!body("goodbye").matches(&req).unwrap());
    }

    #[test]
    fn json_body_is_structural() {
        let req = TestRequest::post()
            .uri("/users")
            .set_payload(r#"{ "name": "jane",  "age": 7 }"#)
            .to_request();

        assert!(json_body(json!({ "age": 7, "name": "jane" }))
            .matches(&req)
            .unwrap());
        assert!(!json_body(json!({ "name": "joe" })).matches(&req).unwrap());

        let req = TestRequest::post().uri("/users").set_payload("not json").to_request();
        assert!(!json_body(json!({})).matches(&req).unwrap());
    }

    #[test]
    fn combinators() {
        let req = TestRequest::post()
            .uri("/users")
            .insert_header("x-a", "1")
            .set_payload("hello")
            .to_request();

        assert!(all_of(header("x-a", "1")).and(body("hello")).matches(&req).unwrap());
        assert!(!all_of(header("x-a", "1")).and(body("nope")).matches(&req).unwrap());

        assert!(any_of(header("x-b", "2")).or(body("hello")).matches(&req).unwrap());
        assert!(!any_of(header("x-b", "2")).or(body("nope")).matches(&req).unwrap());

        assert!(not(header("x-b", "2")).matches(&req).unwrap());
        assert!(!not(header("x-a", "1")).matches(&req).unwrap());
    }
}
