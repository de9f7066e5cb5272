//! REST path decomposition.

/// A request path split into its REST segments.
///
/// The shapes this crate routes are flat: `/root`, `/root/{id}`,
/// `/root/{id}/child` and `/root/{id}/child/{id}`. `RestPath` does not
/// interpret segments; it exposes them positionally so settings can apply
/// their own matching logic.
///
/// Segments are matched individually and no normalization is applied:
/// `/users/` decomposes into `["users", ""]`, which satisfies neither the
/// collection shape (`["users"]`) nor a single-item shape (an empty
/// identifier segment is never extracted). This is consistent with
/// RFC 3986 §3.3; percent-decoding and slash normalization belong to the
/// transport layer that hands over the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RestPath<'a> {
    segments: Vec<&'a str>,
}

impl<'a> RestPath<'a> {
    /// Decomposes `path` into slash-separated segments.
    ///
    /// Returns `None` unless the path is origin-form (starts with `/`);
    /// such requests can never match a registered rule.
    ///
    /// # Examples
    /// ```
    /// use restmock_router::RestPath;
    ///
    /// let path = RestPath::parse("/orders/1/items").unwrap();
    /// assert_eq!(path.root(), "orders");
    /// assert_eq!(path.segment(1), Some("1"));
    /// assert_eq!(path.segment(2), Some("items"));
    /// assert_eq!(path.segment(3), None);
    ///
    /// assert!(RestPath::parse("orders").is_none());
    /// ```
    pub fn parse(path: &'a str) -> Option<RestPath<'a>> {
        let rel = path.strip_prefix('/')?;
        Some(RestPath {
            segments: rel.split('/').collect(),
        })
    }

    /// Returns the resource root segment.
    #[inline]
    pub fn root(&self) -> &str {
        self.segments[0]
    }

    /// Returns segment `idx` if it exists and is non-empty.
    ///
    /// Identifier extraction goes through this accessor; an empty segment
    /// means extraction is impossible and the rule cannot match.
    #[inline]
    pub fn segment(&self, idx: usize) -> Option<&str> {
        self.segments.get(idx).copied().filter(|seg| !seg.is_empty())
    }

    /// Number of segments, counting empty ones.
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collection_shape() {
        let path = RestPath::parse("/users").unwrap();
        assert_eq!(path.root(), "users");
        assert_eq!(path.segment_count(), 1);
        assert_eq!(path.segment(1), None);
    }

    #[test]
    fn single_item_shape() {
        let path = RestPath::parse("/users/42").unwrap();
        assert_eq!(path.root(), "users");
        assert_eq!(path.segment(1), Some("42"));
        assert_eq!(path.segment_count(), 2);
    }

    #[test]
    fn trailing_slash_is_not_normalized() {
        let path = RestPath::parse("/users/").unwrap();
        assert_eq!(path.segment_count(), 2);
        // the empty trailing segment is never extracted as an identifier
        assert_eq!(path.segment(1), None);
    }

    #[test]
    fn empty_segments_do_not_extract() {
        let path = RestPath::parse("/users//items").unwrap();
        assert_eq!(path.segment_count(), 3);
        assert_eq!(path.segment(1), None);
        assert_eq!(path.segment(2), Some("items"));
    }

    #[test]
    fn non_origin_form_is_rejected() {
        assert!(RestPath::parse("users/42").is_none());
        assert!(RestPath::parse("").is_none());
    }

    #[test]
    fn bare_slash() {
        let path = RestPath::parse("/").unwrap();
        assert_eq!(path.root(), "");
        assert_eq!(path.segment_count(), 1);
    }
}
