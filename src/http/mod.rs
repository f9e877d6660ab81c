//! The request-dispatch engine.
//!
//! This module is the hand-rolled core of the service: path templates compile
//! into typed matchers ([`route`]), query strings parse into plain maps
//! ([`query`]), request bodies are read and tagged before dispatch ([`body`]),
//! and an ordered first-match [`Router`] hands the enriched
//! [`RequestContext`] to the winning [`RouteHandler`]. [`server`] wires the
//! router onto a TCP listener with hyper.

pub mod body;
pub mod query;
pub mod request;
pub mod response;
pub mod route;
pub mod router;
pub mod server;

pub use body::{read_json_body, ParsedBody};
pub use request::RequestContext;
pub use response::HttpResponse;
pub use route::{RouteMatch, RoutePattern};
pub use router::{RouteHandler, Router};
pub use server::serve;
