//! Ambient request context.
//!
//! [`RequestContext`] is the read-only snapshot of the current HTTP request
//! that form construction consumes: the method, the path, and the query
//! string. Forms capture the request URI once at construction time to use as
//! their action attribute; nothing here is re-evaluated later.

use http::Method;

/// A read-only snapshot of the current request.
///
/// Instances are built once per request by the hosting application and
/// passed by reference into form construction.
///
/// # Examples
///
/// ```
/// use formwork_core::request::RequestContext;
///
/// let request = RequestContext::builder()
///     .method(http::Method::POST)
///     .path("/accounts/signup")
///     .query_string("ref=footer")
///     .build();
///
/// assert_eq!(request.path(), "/accounts/signup");
/// assert_eq!(request.full_path(), "/accounts/signup?ref=footer");
/// ```
#[derive(Debug, Clone)]
pub struct RequestContext {
    method: Method,
    path: String,
    query_string: String,
}

impl RequestContext {
    /// Creates a new [`RequestContextBuilder`].
    pub fn builder() -> RequestContextBuilder {
        RequestContextBuilder::default()
    }

    /// Returns the request method.
    pub fn method(&self) -> &Method {
        &self.method
    }

    /// Returns the request path.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the raw query string (without the leading `?`).
    pub fn query_string(&self) -> &str {
        &self.query_string
    }

    /// Returns the path plus query string, the value a form uses as its
    /// action attribute.
    pub fn full_path(&self) -> String {
        if self.query_string.is_empty() {
            self.path.clone()
        } else {
            format!("{}?{}", self.path, self.query_string)
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self {
            method: Method::GET,
            path: "/".to_string(),
            query_string: String::new(),
        }
    }
}

/// Builder for [`RequestContext`].
#[derive(Debug, Default)]
pub struct RequestContextBuilder {
    method: Option<Method>,
    path: Option<String>,
    query_string: Option<String>,
}

impl RequestContextBuilder {
    /// Sets the request method.
    #[must_use]
    pub fn method(mut self, method: Method) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the request path.
    #[must_use]
    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the query string (without the leading `?`).
    #[must_use]
    pub fn query_string(mut self, query_string: impl Into<String>) -> Self {
        self.query_string = Some(query_string.into());
        self
    }

    /// Builds the [`RequestContext`], defaulting to `GET /`.
    pub fn build(self) -> RequestContext {
        let defaults = RequestContext::default();
        RequestContext {
            method: self.method.unwrap_or(defaults.method),
            path: self.path.unwrap_or(defaults.path),
            query_string: self.query_string.unwrap_or(defaults.query_string),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let request = RequestContext::builder().build();
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.path(), "/");
        assert_eq!(request.query_string(), "");
        assert_eq!(request.full_path(), "/");
    }

    #[test]
    fn test_builder_full() {
        let request = RequestContext::builder()
            .method(Method::POST)
            .path("/profile/edit")
            .query_string("tab=privacy")
            .build();
        assert_eq!(request.method(), &Method::POST);
        assert_eq!(request.full_path(), "/profile/edit?tab=privacy");
    }

    #[test]
    fn test_full_path_without_query() {
        let request = RequestContext::builder().path("/search").build();
        assert_eq!(request.full_path(), "/search");
    }
}
