//! Ordered request dispatch.
//!
//! The router holds `{method, pattern, handler}` entries in registration
//! order. Dispatch reads the body first, then scans for the first entry whose
//! method and pattern both match. The matched handler fully produces the
//! response; the router itself writes only the 404 for unmatched requests and
//! the 500 for storage faults that escape a handler.

use std::sync::Arc;

use async_trait::async_trait;
use http::{Method, Request};

use crate::http::body::read_json_body;
use crate::http::query::parse_query;
use crate::http::request::RequestContext;
use crate::http::response::{ensure_json_content_type, internal_error, not_found, HttpResponse};
use crate::http::route::RoutePattern;
use crate::store::StoreError;

/// A handler bound to one route.
///
/// Validation failures and other client errors are rendered to responses
/// inside the handler; only storage faults cross this boundary as errors.
#[async_trait]
pub trait RouteHandler: Send + Sync {
    /// Produces the response for a matched request.
    ///
    /// # Errors
    ///
    /// [`StoreError`] when a storage call fails; the dispatcher answers with
    /// the 500 catch-all.
    async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError>;
}

struct Route {
    method: Method,
    pattern: RoutePattern,
    handler: Arc<dyn RouteHandler>,
}

/// An ordered route registry.
///
/// ```no_run
/// use std::sync::Arc;
/// use http::Method;
/// use tasklite::handlers::CreateTask;
/// use tasklite::http::Router;
/// use tasklite::store::{InMemoryTaskStore, TaskStore};
///
/// let store: Arc<dyn TaskStore> = Arc::new(InMemoryTaskStore::new());
/// let router = Router::new().route(Method::POST, "/tasks", CreateTask::new(store));
/// ```
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// An empty router.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a route. Registration order is match order: when two
    /// patterns both match a request, the earlier registration wins.
    pub fn route(
        mut self,
        method: Method,
        template: &str,
        handler: impl RouteHandler + 'static,
    ) -> Self {
        self.routes.push(Route {
            method,
            pattern: RoutePattern::compile(template),
            handler: Arc::new(handler),
        });
        self
    }

    /// Dispatches one request to the first matching route.
    pub async fn dispatch<B>(&self, request: Request<B>) -> HttpResponse
    where
        B: hyper::body::Body + Send,
        B::Data: Send,
    {
        let (parts, raw_body) = request.into_parts();
        let target = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str().to_string())
            .unwrap_or_else(|| parts.uri.path().to_string());

        // The body is read to completion before any route is considered.
        let body = read_json_body(raw_body).await;

        for route in &self.routes {
            if route.method != parts.method {
                continue;
            }
            let Some(matched) = route.pattern.matches(&target) else {
                continue;
            };

            let ctx = RequestContext {
                method: parts.method.clone(),
                path: parts.uri.path().to_string(),
                params: matched.params,
                query: matched.query.as_deref().map(parse_query).unwrap_or_default(),
                body,
            };
            let mut response = match route.handler.handle(ctx).await {
                Ok(response) => response,
                Err(error) => {
                    tracing::error!(
                        method = %parts.method,
                        path = %parts.uri.path(),
                        %error,
                        "storage failure while handling request"
                    );
                    internal_error()
                }
            };
            ensure_json_content_type(&mut response);
            return response;
        }

        tracing::debug!(method = %parts.method, path = %parts.uri.path(), "no route matched");
        not_found()
    }
}

#[cfg(test)]
mod tests {
    use bytes::Bytes;
    use http::header::CONTENT_TYPE;
    use http::StatusCode;
    use http_body_util::{BodyExt, Full};
    use serde_json::json;

    use super::*;
    use crate::http::response::json_response;

    struct Tagged(&'static str);

    #[async_trait]
    impl RouteHandler for Tagged {
        async fn handle(&self, _ctx: RequestContext) -> Result<HttpResponse, StoreError> {
            Ok(json_response(StatusCode::OK, &json!({ "tag": self.0 })))
        }
    }

    struct Failing;

    #[async_trait]
    impl RouteHandler for Failing {
        async fn handle(&self, _ctx: RequestContext) -> Result<HttpResponse, StoreError> {
            Err(StoreError::backend("disk on fire"))
        }
    }

    struct EchoContext;

    #[async_trait]
    impl RouteHandler for EchoContext {
        async fn handle(&self, ctx: RequestContext) -> Result<HttpResponse, StoreError> {
            Ok(json_response(
                StatusCode::OK,
                &json!({
                    "id": ctx.param("id"),
                    "title": ctx.query_value("title"),
                    "has_body": ctx.body.as_object().is_some(),
                }),
            ))
        }
    }

    fn request(method: Method, target: &str, body: &str) -> Request<Full<Bytes>> {
        Request::builder()
            .method(method)
            .uri(target)
            .body(Full::new(Bytes::copy_from_slice(body.as_bytes())))
            .unwrap()
    }

    async fn body_json(response: HttpResponse) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn first_registration_wins_when_two_routes_match() {
        let router = Router::new()
            .route(Method::GET, "/tasks/:id", Tagged("param"))
            .route(Method::GET, "/tasks/all", Tagged("literal"));

        let response = router.dispatch(request(Method::GET, "/tasks/all", "")).await;
        assert_eq!(body_json(response).await, json!({ "tag": "param" }));
    }

    #[tokio::test]
    async fn method_must_match_as_well_as_the_pattern() {
        let router = Router::new().route(Method::POST, "/tasks", Tagged("post"));
        let response = router.dispatch(request(Method::GET, "/tasks", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unmatched_requests_get_an_empty_404() {
        let router = Router::new().route(Method::GET, "/tasks", Tagged("tasks"));
        let response = router.dispatch(request(Method::GET, "/nowhere", "")).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert!(bytes.is_empty());
    }

    #[tokio::test]
    async fn the_context_carries_params_query_and_body() {
        let router = Router::new().route(Method::PUT, "/tasks/:id", EchoContext);
        let response = router
            .dispatch(request(
                Method::PUT,
                "/tasks/42?title=laundry",
                r#"{"title":"x"}"#,
            ))
            .await;
        assert_eq!(
            body_json(response).await,
            json!({ "id": "42", "title": "laundry", "has_body": true })
        );
    }

    #[tokio::test]
    async fn a_storage_failure_becomes_exactly_one_500() {
        let router = Router::new().route(Method::GET, "/tasks", Failing);
        let response = router.dispatch(request(Method::GET, "/tasks", "")).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "message": "Internal server error." })
        );
    }

    #[tokio::test]
    async fn every_response_carries_the_json_content_type() {
        let router = Router::new()
            .route(Method::GET, "/ok", Tagged("ok"))
            .route(Method::GET, "/fail", Failing);

        for target in ["/ok", "/fail", "/missing"] {
            let response = router.dispatch(request(Method::GET, target, "")).await;
            assert_eq!(
                response.headers().get(CONTENT_TYPE).unwrap(),
                "application/json",
                "missing content-type for {target}"
            );
        }
    }
}
