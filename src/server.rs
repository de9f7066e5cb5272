//! Per-instance rule sets and the dispatch entry point.

use restmock_router::{MatchError, MockRequest, RegistryError, RestSetting, Router};

/// A configured mock-server rule set.
///
/// `RestServer` is the boundary handed to the transport layer: it owns the
/// immutable rule registry for one server instance and resolves each
/// inbound request to the response behavior of the first matching rule.
///
/// Instances are plain values with explicit construction and teardown;
/// two servers in the same test process never share rule state. After
/// [`finish`](RestServerBuilder::finish) a server is immutable and safe
/// to share read-only across request-handling threads.
///
/// # Examples
/// ```
/// use restmock::test::TestRequest;
/// use restmock::{any_id, get, get_id, id, RestServer};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let server = RestServer::builder()
///     .resource(
///         "users",
///         vec![
///             get().response("all users"),
///             get_id("42")?.response("user 42"),
///         ],
///     )?
///     .resource(
///         "orders",
///         id(any_id())?
///             .name("items")?
///             .settings(vec![get().response("order items")])?,
///     )?
///     .finish();
///
/// let req = TestRequest::get().uri("/orders/9/items").to_request();
/// assert_eq!(server.resolve(&req)?, Some(&"order items"));
/// # Ok(())
/// # }
/// ```
pub struct RestServer<T> {
    router: Router<T>,
}

impl<T> RestServer<T> {
    /// Begins configuring a new server instance.
    pub fn builder() -> RestServerBuilder<T> {
        RestServerBuilder {
            builder: Router::build(),
        }
    }

    /// Resolves `req` to the behavior of the first matching rule, in
    /// registration order.
    ///
    /// `Ok(None)` means no rule governs the request; the transport layer
    /// supplies its 404-equivalent. An evaluation failure in a
    /// caller-supplied predicate fails this resolution only — the rule
    /// set stays intact for subsequent requests.
    pub fn resolve(&self, req: &MockRequest) -> Result<Option<&T>, MatchError> {
        self.router.resolve(req)
    }

    /// Number of registered rules.
    pub fn rules(&self) -> usize {
        self.router.len()
    }
}

/// Builder for [`RestServer`].
///
/// Rules are consumed once per configured resource, in author-specified
/// order; that order is the precedence order at resolution time.
pub struct RestServerBuilder<T> {
    builder: restmock_router::RouterBuilder<T>,
}

impl<T> RestServerBuilder<T> {
    /// Rejects structurally overlapping rules at registration time.
    ///
    /// By default overlapping rules are permitted and resolved by
    /// registration order.
    pub fn strict(mut self) -> Self {
        self.builder = self.builder.strict();
        self
    }

    /// Registers `settings` for the resource rooted at `name`, preserving
    /// their order.
    ///
    /// The root name obeys the same validation rules as literal
    /// identifiers. Registration failures are fatal to configuration —
    /// a misconfigured fixture should not silently continue.
    pub fn resource(
        mut self,
        name: &str,
        settings: Vec<RestSetting<T>>,
    ) -> Result<Self, RegistryError> {
        let count = settings.len();
        for setting in settings {
            self.builder.push(name, setting)?;
        }
        log::debug!("configured resource /{} with {} rules", name, count);
        Ok(self)
    }

    /// Finishes configuration; the rule set is immutable afterwards.
    pub fn finish(self) -> RestServer<T> {
        RestServer {
            router: self.builder.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::TestRequest;
    use crate::{get, get_id};

    #[test]
    fn servers_do_not_share_state() {
        let users = RestServer::builder()
            .resource("users", vec![get().response("users")])
            .unwrap()
            .finish();
        let orders = RestServer::builder()
            .resource("orders", vec![get().response("orders")])
            .unwrap()
            .finish();

        let req = TestRequest::get().uri("/users").to_request();
        assert_eq!(users.resolve(&req).unwrap(), Some(&"users"));
        assert_eq!(orders.resolve(&req).unwrap(), None);
    }

    #[test]
    fn strict_mode_rejects_duplicates() {
        let result = RestServer::builder()
            .strict()
            .resource(
                "users",
                vec![
                    get_id("42").unwrap().response("first"),
                    get_id("42").unwrap().response("second"),
                ],
            );
        assert!(matches!(result, Err(RegistryError::Duplicate { .. })));
    }

    #[test]
    fn invalid_root_fails_configuration() {
        let result = RestServer::builder().resource("a b", vec![get().response(())]);
        assert!(matches!(result, Err(RegistryError::Root(_))));
    }
}
