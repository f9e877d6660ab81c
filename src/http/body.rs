//! JSON request-body handling.

use http_body_util::BodyExt;
use serde_json::Value;

/// A request body after the read-and-parse step.
///
/// Parse failures, empty bodies, and failed reads all collapse into
/// [`ParsedBody::Invalid`]; they never fail the request on their own. The
/// handler that needs the body decides what a missing or malformed one means.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedBody {
    /// The body parsed as JSON.
    Valid(Value),
    /// The body was empty, unreadable, or not valid JSON.
    Invalid,
}

impl ParsedBody {
    /// The parsed body as a JSON object, when it is one.
    pub fn as_object(&self) -> Option<&serde_json::Map<String, Value>> {
        match self {
            Self::Valid(Value::Object(map)) => Some(map),
            _ => None,
        }
    }

    /// Looks up a top-level field of the body object.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.as_object()?.get(name)
    }
}

/// Reads `body` to completion and parses it as JSON.
///
/// Runs before dispatch: no handler observes a request whose body is still
/// streaming in.
pub async fn read_json_body<B>(body: B) -> ParsedBody
where
    B: hyper::body::Body,
{
    let bytes = match body.collect().await {
        Ok(collected) => collected.to_bytes(),
        Err(_) => return ParsedBody::Invalid,
    };
    match serde_json::from_slice(&bytes) {
        Ok(value) => ParsedBody::Valid(value),
        Err(_) => ParsedBody::Invalid,
    }
}
