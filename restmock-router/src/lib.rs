//! REST resource matching and rule resolution.
//!
//! This crate is the decision core of a declarative HTTP mock server. It
//! knows nothing about sockets or wire formats; it answers one question:
//! given the rules an author registered, which single rule — if any —
//! governs an incoming request?
//!
//! The building blocks, leaf first:
//! - [`RestIdMatcher`]: does a path segment select an item?
//! - [`RestPath`]: a request path decomposed into REST segments.
//! - [`MockRequest`] and [`RequestMatcher`]: the normalized request handed
//!   over by the transport layer, and extra constraints on it.
//! - [`RestSetting`]: one registered rule, bound to an opaque response
//!   behavior.
//! - [`Router`]: the ordered rule registry with first-match resolution.
//!
//! # Examples
//! ```
//! use http::Method;
//! use restmock_router::{MockRequest, RestIdMatcher, RestSetting, Router};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut rules = Router::build();
//! rules.push("users", RestSetting::collection(Method::GET, "all users"))?;
//! rules.push(
//!     "users",
//!     RestSetting::single(Method::GET, RestIdMatcher::exact("42")?, "user 42"),
//! )?;
//! let router = rules.finish();
//!
//! let req = MockRequest::new(Method::GET, "/users/42");
//! assert_eq!(router.resolve(&req)?, Some(&"user 42"));
//!
//! let req = MockRequest::new(Method::GET, "/users/7");
//! assert_eq!(router.resolve(&req)?, None);
//! # Ok(())
//! # }
//! ```

#![deny(rust_2018_idioms, nonstandard_style)]

mod error;
mod id;
mod path;
mod request;
mod router;
mod setting;

pub use self::error::{
    BoxError, CompositionError, IdentifierError, MatchError, RegistryError,
};
pub use self::id::{validate_identifier, RestIdMatcher};
pub use self::path::RestPath;
pub use self::request::{fn_matcher, try_fn_matcher, MockRequest, RequestMatcher};
pub use self::router::{Router, RouterBuilder};
pub use self::setting::{ParentScope, RestSetting, Scope};
