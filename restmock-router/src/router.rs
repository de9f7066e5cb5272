//! Ordered rule registry and resolver.

use tracing::{debug, trace};

use crate::error::{MatchError, RegistryError};
use crate::id::validate_identifier;
use crate::request::MockRequest;
use crate::setting::RestSetting;

struct Rule<T> {
    root: String,
    setting: RestSetting<T>,
}

/// The rule registry for one server instance.
///
/// Rules are kept in registration order and resolution is a linear
/// first-match scan: authors control precedence purely through the order
/// in which they register rules. Rule sets in this domain are small (tens
/// of entries), so no index is built — an index could change the
/// observable match order, which must stay linear for rule authors.
///
/// A router is created at configuration time, immutable for the server's
/// lifetime, and safe to share read-only across request-handling threads.
///
/// # Examples
/// ```
/// use http::Method;
/// use restmock_router::{MockRequest, RestSetting, Router};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut rules = Router::build();
/// rules.push("users", RestSetting::collection(Method::GET, "list"))?;
/// let router = rules.finish();
///
/// let req = MockRequest::new(Method::GET, "/users");
/// assert_eq!(router.resolve(&req)?, Some(&"list"));
/// # Ok(())
/// # }
/// ```
pub struct Router<T> {
    rules: Vec<Rule<T>>,
}

impl<T> Router<T> {
    /// Constructs a new [`RouterBuilder`] with an empty rule list.
    pub fn build() -> RouterBuilder<T> {
        RouterBuilder {
            rules: Vec::new(),
            strict: false,
        }
    }

    /// Finds the response behavior of the first registered rule that
    /// matches `req`.
    ///
    /// `Ok(None)` means no rule governs the request — a normal outcome;
    /// the caller's transport layer decides the default response.
    /// Resolving against an empty registry always returns `Ok(None)`.
    ///
    /// An evaluation failure in a caller-supplied predicate aborts
    /// resolution for this request only; the registry remains usable.
    pub fn resolve(&self, req: &MockRequest) -> Result<Option<&T>, MatchError> {
        for rule in &self.rules {
            if rule.setting.matches(&rule.root, req)? {
                trace!(
                    "request {} {} matched {} rule under /{}",
                    req.method(),
                    req.path(),
                    rule.setting.method(),
                    rule.root,
                );
                return Ok(Some(rule.setting.behavior()));
            }
        }

        trace!("request {} {} matched no rule", req.method(), req.path());
        Ok(None)
    }

    /// Number of registered rules.
    #[inline]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// Builder for an ordered rule list.
pub struct RouterBuilder<T> {
    rules: Vec<Rule<T>>,
    strict: bool,
}

impl<T> RouterBuilder<T> {
    /// Rejects structurally overlapping rules at registration time.
    ///
    /// By default overlapping rules are permitted and resolved by
    /// registration order.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Appends a rule for the resource rooted at `root`.
    ///
    /// The root name obeys the same validation rules as literal
    /// identifiers. In strict mode, a rule that structurally overlaps an
    /// earlier-registered rule is rejected.
    pub fn push(
        &mut self,
        root: impl Into<String>,
        setting: RestSetting<T>,
    ) -> Result<(), RegistryError> {
        let root = root.into();
        validate_identifier(&root)?;

        if self.strict
            && self
                .rules
                .iter()
                .any(|rule| rule.root == root && rule.setting.overlaps(&setting))
        {
            return Err(RegistryError::Duplicate {
                method: setting.method().clone(),
                root,
            });
        }

        debug!("registered {} rule under /{}", setting.method(), root);
        self.rules.push(Rule { root, setting });
        Ok(())
    }

    /// Finishes configuration and creates the immutable router.
    pub fn finish(self) -> Router<T> {
        Router { rules: self.rules }
    }
}

#[cfg(test)]
mod tests {
    use http::Method;

    use super::*;
    use crate::id::RestIdMatcher;

    fn get(path: &str) -> MockRequest {
        MockRequest::new(Method::GET, path)
    }

    #[test]
    fn empty_registry_resolves_to_none() {
        let router: Router<&str> = Router::build().finish();
        assert_eq!(router.resolve(&get("/users")).unwrap(), None);
        assert!(router.is_empty());
    }

    #[test]
    fn first_registered_rule_wins() {
        let mut rules = Router::build();
        rules
            .push(
                "users",
                RestSetting::single(Method::GET, RestIdMatcher::any(), "any"),
            )
            .unwrap();
        rules
            .push(
                "users",
                RestSetting::single(Method::GET, RestIdMatcher::exact("42").unwrap(), "exact"),
            )
            .unwrap();
        let router = rules.finish();

        // both rules match; registration order decides
        assert_eq!(router.resolve(&get("/users/42")).unwrap(), Some(&"any"));
    }

    #[test]
    fn later_rules_match_when_earlier_ones_do_not() {
        let mut rules = Router::build();
        rules
            .push("users", RestSetting::collection(Method::GET, "list"))
            .unwrap();
        rules
            .push(
                "users",
                RestSetting::single(Method::GET, RestIdMatcher::exact("42").unwrap(), "item"),
            )
            .unwrap();
        let router = rules.finish();

        assert_eq!(router.resolve(&get("/users")).unwrap(), Some(&"list"));
        assert_eq!(router.resolve(&get("/users/42")).unwrap(), Some(&"item"));
        assert_eq!(router.resolve(&get("/users/7")).unwrap(), None);
    }

    #[test]
    fn root_names_are_validated() {
        let mut rules = Router::build();
        let err = rules
            .push("a/b", RestSetting::collection(Method::GET, ()))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Root(_)));
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let mut rules = Router::build().strict();
        rules
            .push("users", RestSetting::collection(Method::GET, "first"))
            .unwrap();

        let err = rules
            .push("users", RestSetting::collection(Method::GET, "second"))
            .unwrap_err();
        assert!(matches!(err, RegistryError::Duplicate { .. }));

        // different root or method is not a duplicate
        rules
            .push("accounts", RestSetting::collection(Method::GET, "ok"))
            .unwrap();
        rules
            .push("users", RestSetting::collection(Method::POST, "ok"))
            .unwrap();
    }

    #[test]
    fn default_mode_permits_overlap() {
        let mut rules = Router::build();
        rules
            .push("users", RestSetting::collection(Method::GET, "first"))
            .unwrap();
        rules
            .push("users", RestSetting::collection(Method::GET, "second"))
            .unwrap();
        let router = rules.finish();

        assert_eq!(router.resolve(&get("/users")).unwrap(), Some(&"first"));
    }

    #[test]
    fn failed_predicate_leaves_registry_usable() {
        let mut rules = Router::build();
        rules
            .push(
                "users",
                RestSetting::single(
                    Method::GET,
                    RestIdMatcher::predicate(|_| Err("broken".into())),
                    "pred",
                ),
            )
            .unwrap();
        rules
            .push("accounts", RestSetting::collection(Method::GET, "list"))
            .unwrap();
        let router = rules.finish();

        assert!(router.resolve(&get("/users/42")).is_err());
        // the failure was isolated to that request
        assert_eq!(router.resolve(&get("/accounts")).unwrap(), Some(&"list"));
    }

    #[test]
    fn router_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Router<String>>();
    }
}
