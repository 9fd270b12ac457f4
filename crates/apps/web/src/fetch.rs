use dashboard::{HttpResponse, LocalBoxFuture, Transport, TransportError};
use gloo_net::http::Request;

/// [`Transport`] over the browser's `fetch`, relative to the page origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct FetchTransport;

impl Transport for FetchTransport {
    fn get(&self, path: String) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let resp = Request::get(&path)
                .send()
                .await
                .map_err(|e| TransportError::with_source(e.to_string(), e))?;
            let status = resp.status();
            // An unreadable body is handled like an unparseable one.
            let body = resp.binary().await.unwrap_or_default();
            Ok(HttpResponse::new(status, body))
        })
    }
}
