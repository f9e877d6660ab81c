//! HTTP/1.1 serving.

use std::sync::Arc;

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use tokio::net::{TcpListener, ToSocketAddrs};

use crate::http::router::Router;

/// Binds `addr` and serves the router until the process exits.
///
/// One task per connection; each request on a connection is dispatched
/// through [`Router::dispatch`]. Connection-level failures (resets,
/// half-finished requests) are logged and dropped without affecting other
/// connections.
///
/// # Errors
///
/// Returns an error when the listener cannot bind or an accept fails.
pub async fn serve(router: Router, addr: impl ToSocketAddrs) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %listener.local_addr()?, "listening");

    let router = Arc::new(router);
    loop {
        let (stream, peer) = listener.accept().await?;
        let router = Arc::clone(&router);
        tokio::spawn(async move {
            let service = service_fn(move |request| {
                let router = Arc::clone(&router);
                async move { Ok::<_, std::convert::Infallible>(router.dispatch(request).await) }
            });
            if let Err(error) = http1::Builder::new()
                .serve_connection(TokioIo::new(stream), service)
                .await
            {
                tracing::debug!(%peer, %error, "connection closed with error");
            }
        });
    }
}
