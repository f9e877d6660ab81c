//! The per-request view handed to handlers.

use std::collections::HashMap;

use http::Method;

use crate::http::body::ParsedBody;

/// Everything a handler gets to see about a matched request: the method and
/// path, the named path captures, the parsed query map, and the tagged body.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Request method.
    pub method: Method,
    /// Request path, without the query string.
    pub path: String,
    /// Named captures from the matched route pattern.
    pub params: HashMap<String, String>,
    /// Parsed query parameters; empty when the request had no query string.
    pub query: HashMap<String, String>,
    /// The request body after the read-and-parse step.
    pub body: ParsedBody,
}

impl RequestContext {
    /// A named path capture, when the matched pattern has one.
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }

    /// A query parameter value, when the request carried one.
    pub fn query_value(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }
}
