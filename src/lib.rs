//! restmock is the rule matching and dispatch core of a declarative HTTP
//! mock server for automated testing.
//!
//! Authors register expected REST interactions — an HTTP method, a
//! resource identifier pattern, and optional extra request constraints —
//! bound to canned response behaviors. At request time [`RestServer`]
//! decides which single registered rule, if any, governs the request and
//! hands back its behavior; the transport layer around this crate turns
//! that behavior into wire bytes (or a 404-equivalent when no rule
//! matches).
//!
//! # Examples
//! ```
//! use restmock::test::TestRequest;
//! use restmock::{get, get_id, RestServer};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let server = RestServer::builder()
//!     .resource(
//!         "users",
//!         vec![
//!             get().response("all users"),
//!             get_id("42")?.response("user 42"),
//!         ],
//!     )?
//!     .finish();
//!
//! let req = TestRequest::get().uri("/users").to_request();
//! assert_eq!(server.resolve(&req)?, Some(&"all users"));
//!
//! let req = TestRequest::get().uri("/users/42").to_request();
//! assert_eq!(server.resolve(&req)?, Some(&"user 42"));
//!
//! let req = TestRequest::get().uri("/users/7").to_request();
//! assert_eq!(server.resolve(&req)?, None);
//! # Ok(())
//! # }
//! ```
//!
//! To get started navigating the API, consider these pages first:
//!
//! * [`RestServer`]: one configured rule set — built once, then resolved
//!   against for every inbound request.
//! * The rule builders [`get`], [`get_id`], [`post`] and friends, which
//!   mirror REST verb semantics for collections and single items.
//! * [`id`]: composition of sub-resource rules under a parent item.
//! * [`matcher`]: extra request constraints (headers, bodies, closures).
//! * [`test`]: a request builder for exercising rule sets in tests.
//!
//! Rules never overlap implicitly: resolution is strictly first-registered
//! wins, so precedence is exactly the order in which rules were written
//! down. Registration happens once at configuration time; afterwards a
//! server is immutable and safe to share across request threads.

mod rest;
mod server;

pub mod matcher;

pub use restmock_router::{
    fn_matcher, try_fn_matcher, validate_identifier, BoxError, CompositionError,
    IdentifierError, MatchError, MockRequest, ParentScope, RegistryError, RequestMatcher,
    RestIdMatcher, RestPath, RestSetting, Router, RouterBuilder, Scope,
};

pub use self::rest::{
    any_id, delete_id, eq_id, get, get_id, head, head_id, id, id_predicate, patch_id, post,
    put_id, IntoIdMatcher, RestSettingBuilder, SubResourceBuilder, SubResourceSettings,
};
pub use self::server::{RestServer, RestServerBuilder};
