//! Response construction helpers.
//!
//! Every helper sets `content-type: application/json`, including the helpers
//! that produce an empty body. Error bodies all take the same
//! `{ "message": string }` shape.

use bytes::Bytes;
use http::header::{HeaderValue, CONTENT_TYPE};
use http::{Response, StatusCode};
use http_body_util::Full;
use serde_json::{json, Value};

use crate::error::TaskError;

/// The response type every handler produces.
pub type HttpResponse = Response<Full<Bytes>>;

/// Marks `response` as JSON. Applied by the dispatcher to every outgoing
/// response, whatever built it.
pub fn ensure_json_content_type(response: &mut HttpResponse) {
    response
        .headers_mut()
        .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
}

/// A response with the given status and no body.
pub fn empty_response(status: StatusCode) -> HttpResponse {
    let mut response = Response::new(Full::new(Bytes::new()));
    *response.status_mut() = status;
    ensure_json_content_type(&mut response);
    response
}

/// A response carrying `body` serialized as JSON.
pub fn json_response(status: StatusCode, body: &Value) -> HttpResponse {
    let bytes = Bytes::from(serde_json::to_vec(body).unwrap_or_default());
    let mut response = Response::new(Full::new(bytes));
    *response.status_mut() = status;
    ensure_json_content_type(&mut response);
    response
}

/// An error response with the standard `{ "message": ... }` body.
pub fn message_response(status: StatusCode, message: &str) -> HttpResponse {
    json_response(status, &json!({ "message": message }))
}

/// A 400 rendering of a domain error; the body message is the error display.
pub fn client_error(error: &TaskError) -> HttpResponse {
    message_response(StatusCode::BAD_REQUEST, &error.to_string())
}

/// The empty-bodied 404 written when no route matches.
pub fn not_found() -> HttpResponse {
    empty_response(StatusCode::NOT_FOUND)
}

/// The single 500 shape written when a storage call fails.
pub fn internal_error() -> HttpResponse {
    message_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
}
