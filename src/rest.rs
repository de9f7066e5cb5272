//! Rule builders mirroring REST verb semantics.
//!
//! Collection-scoped builders ([`get`], [`post`], [`head`]) create rules
//! that match the resource as a whole; single-item builders ([`get_id`],
//! [`put_id`], [`delete_id`], [`head_id`], [`patch_id`]) create rules that
//! select one item through an identifier matcher. [`id`] starts the
//! composition of sub-resource rules under a parent item.
//!
//! Every builder finishes with [`response`](RestSettingBuilder::response),
//! binding the rule to its canned response behavior.

use http::Method;
use restmock_router::{
    BoxError, CompositionError, IdentifierError, ParentScope, RequestMatcher, RestIdMatcher,
    RestSetting, Scope,
};

/// Conversion into a [`RestIdMatcher`].
///
/// Implemented for string literals (validated eagerly, like every literal
/// identifier) and for built matchers (pass-through), so single-item
/// builders accept both: `get_id("42")` and `get_id(any_id())`.
pub trait IntoIdMatcher {
    /// Performs the conversion.
    fn into_id_matcher(self) -> Result<RestIdMatcher, IdentifierError>;
}

impl IntoIdMatcher for RestIdMatcher {
    fn into_id_matcher(self) -> Result<RestIdMatcher, IdentifierError> {
        Ok(self)
    }
}

impl IntoIdMatcher for &str {
    fn into_id_matcher(self) -> Result<RestIdMatcher, IdentifierError> {
        RestIdMatcher::exact(self)
    }
}

impl IntoIdMatcher for String {
    fn into_id_matcher(self) -> Result<RestIdMatcher, IdentifierError> {
        RestIdMatcher::exact(self)
    }
}

impl IntoIdMatcher for &String {
    fn into_id_matcher(self) -> Result<RestIdMatcher, IdentifierError> {
        RestIdMatcher::exact(self.as_str())
    }
}

/// Constructs an exact-literal identifier matcher.
///
/// The literal must be non-empty, contain no `/`, and use only characters
/// valid in a URI segment.
pub fn eq_id(id: impl Into<String>) -> Result<RestIdMatcher, IdentifierError> {
    RestIdMatcher::exact(id)
}

/// Constructs the match-anything identifier matcher.
pub fn any_id() -> RestIdMatcher {
    RestIdMatcher::any()
}

/// Constructs an identifier matcher from a fallible predicate.
///
/// A predicate failure fails resolution for that request; see
/// [`MatchError`](restmock_router::MatchError).
pub fn id_predicate<F>(f: F) -> RestIdMatcher
where
    F: Fn(&str) -> Result<bool, BoxError> + Send + Sync + 'static,
{
    RestIdMatcher::predicate(f)
}

/// Builder for one rule; completed by binding a response behavior.
///
/// # Examples
/// ```
/// use restmock::matcher::header;
/// use restmock::put_id;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let setting = put_id("42")?
///     .request(header("content-type", "application/json"))
///     .response("updated");
/// # Ok(())
/// # }
/// ```
pub struct RestSettingBuilder {
    method: Method,
    scope: Scope,
    matcher: Option<Box<dyn RequestMatcher>>,
}

impl RestSettingBuilder {
    fn all(method: Method) -> RestSettingBuilder {
        RestSettingBuilder {
            method,
            scope: Scope::Collection,
            matcher: None,
        }
    }

    fn single(method: Method, id: RestIdMatcher) -> RestSettingBuilder {
        RestSettingBuilder {
            method,
            scope: Scope::Single(id),
            matcher: None,
        }
    }

    /// Adds an extra request constraint, ANDed with the method and scope
    /// checks.
    pub fn request(mut self, matcher: impl RequestMatcher + 'static) -> Self {
        self.matcher = Some(Box::new(matcher));
        self
    }

    /// Binds the response behavior, completing the rule.
    pub fn response<T>(self, behavior: T) -> RestSetting<T> {
        let setting = RestSetting::new(self.method, self.scope, behavior);
        match self.matcher {
            Some(matcher) => setting.with_request_matcher(matcher),
            None => setting,
        }
    }
}

macro_rules! collection_rule {
    ($method_fn:ident, $method_const:ident) => {
        #[doc = concat!(
            "Creates a collection-scoped `",
            stringify!($method_const),
            "` rule builder: the rule matches requests addressing the resource as a whole.",
        )]
        pub fn $method_fn() -> RestSettingBuilder {
            RestSettingBuilder::all(Method::$method_const)
        }
    };
}

macro_rules! single_rule {
    ($method_fn:ident, $method_const:ident) => {
        #[doc = concat!(
            "Creates a single-item `",
            stringify!($method_const),
            "` rule builder: the rule matches requests whose identifier segment satisfies `id`.",
        )]
        ///
        /// Literal identifiers are validated here, not at match time.
        pub fn $method_fn(id: impl IntoIdMatcher) -> Result<RestSettingBuilder, IdentifierError> {
            Ok(RestSettingBuilder::single(
                Method::$method_const,
                id.into_id_matcher()?,
            ))
        }
    };
}

collection_rule!(get, GET);
collection_rule!(post, POST);
collection_rule!(head, HEAD);

single_rule!(get_id, GET);
single_rule!(put_id, PUT);
single_rule!(delete_id, DELETE);
single_rule!(head_id, HEAD);
single_rule!(patch_id, PATCH);

/// Starts composing sub-resource rules under a parent item.
///
/// # Examples
/// ```
/// use restmock::{any_id, get, id};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// // rules for GET /orders/{any}/items
/// let settings = id(any_id())?
///     .name("items")?
///     .settings(vec![get().response("order items")])?;
/// # Ok(())
/// # }
/// ```
pub fn id(parent: impl IntoIdMatcher) -> Result<SubResourceBuilder, IdentifierError> {
    Ok(SubResourceBuilder {
        parent: parent.into_id_matcher()?,
    })
}

/// Builder produced by [`id`]; names the nested collection next.
pub struct SubResourceBuilder {
    parent: RestIdMatcher,
}

impl SubResourceBuilder {
    /// Names the nested collection. The name obeys the same validation
    /// rules as literal identifiers.
    pub fn name(
        self,
        collection: impl Into<String>,
    ) -> Result<SubResourceSettings, IdentifierError> {
        Ok(SubResourceSettings {
            parent: ParentScope::new(self.parent, collection)?,
        })
    }
}

/// A parent binding ready to scope child settings.
pub struct SubResourceSettings {
    parent: ParentScope,
}

impl SubResourceSettings {
    /// Scopes `settings` under the parent binding.
    ///
    /// Fails if any child setting is itself already parent-scoped; only
    /// one nesting level is supported.
    pub fn settings<T>(
        self,
        settings: Vec<RestSetting<T>>,
    ) -> Result<Vec<RestSetting<T>>, CompositionError> {
        settings
            .into_iter()
            .map(|setting| setting.scoped_under(self.parent.clone()))
            .collect()
    }
}
