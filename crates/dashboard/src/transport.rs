//! HTTP seam between the dashboard and the lookup API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::future::Future;
use std::pin::Pin;

use airquality::{Payload, Query, server_error_message};

use crate::error::RequestError;
use crate::sequence::CancelToken;

/// Boxed future without a `Send` bound; browser fetches are thread-local.
pub type LocalBoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + 'a>>;

/// Status and raw body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Error type for transport failures (no HTTP response at all).
#[derive(Debug)]
pub struct TransportError {
    pub message: String,
    pub source: Option<Box<dyn std::error::Error + 'static>>,
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for TransportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_deref()
    }
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl std::error::Error + 'static,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}

/// Issues GET requests against the lookup API.
pub trait Transport {
    /// GET `path`, a path plus query string relative to the API origin.
    fn get(&self, path: String) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>>;
}

/// Runs one lookup and decodes its payload.
///
/// A success status with an unreadable body still yields a (empty) payload.
/// A non-success status yields the body's `error` message when it has one.
pub async fn fetch_payload<T>(
    transport: &T,
    query: &Query,
    token: &CancelToken,
) -> Result<Payload, RequestError>
where
    T: Transport + ?Sized,
{
    if token.is_cancelled() {
        return Err(RequestError::Cancelled);
    }

    let response = transport
        .get(query.path())
        .await
        .map_err(|e| RequestError::Transport(e.to_string()))?;

    if token.is_cancelled() {
        return Err(RequestError::Cancelled);
    }

    if !response.is_success() {
        return Err(RequestError::Server {
            status: response.status,
            message: server_error_message(&response.body),
        });
    }

    Ok(Payload::from_body(&response.body))
}

/// In-memory transport with canned responses, for tests and demos.
///
/// Unknown paths answer 404 with an empty body.
#[derive(Debug, Default)]
pub struct MemoryTransport {
    routes: HashMap<String, Result<HttpResponse, String>>,
    requests: RefCell<Vec<String>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, query: &Query, response: HttpResponse) -> Self {
        self.routes.insert(query.path(), Ok(response));
        self
    }

    pub fn fail(mut self, query: &Query, message: impl Into<String>) -> Self {
        self.routes.insert(query.path(), Err(message.into()));
        self
    }

    /// Paths requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }
}

impl Transport for MemoryTransport {
    fn get(&self, path: String) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        self.requests.borrow_mut().push(path.clone());
        let outcome = match self.routes.get(&path) {
            Some(Ok(response)) => Ok(response.clone()),
            Some(Err(message)) => Err(TransportError::new(message.clone())),
            None => Ok(HttpResponse::new(404, Vec::new())),
        };
        Box::pin(async move { outcome })
    }
}

#[cfg(test)]
mod tests {
    use super::{HttpResponse, MemoryTransport, fetch_payload};
    use crate::error::RequestError;
    use crate::sequence::CancelToken;
    use airquality::Query;
    use foundation::LatLng;

    #[test]
    fn success_decodes_payload() {
        let q = Query::coordinates("1", "2");
        let t = MemoryTransport::new().respond(
            &q,
            HttpResponse::new(200, r#"{"latitude": 1, "longitude": 2, "airnow_observations": []}"#),
        );
        let payload = pollster::block_on(fetch_payload(&t, &q, &CancelToken::new())).unwrap();
        assert_eq!(payload.position(), LatLng::new(1.0, 2.0));
        assert_eq!(t.requests(), vec![q.path()]);
    }

    #[test]
    fn success_with_garbage_body_is_empty_payload() {
        let q = Query::coordinates("1", "2");
        let t = MemoryTransport::new().respond(&q, HttpResponse::new(200, "not json"));
        let payload = pollster::block_on(fetch_payload(&t, &q, &CancelToken::new())).unwrap();
        assert_eq!(payload, Default::default());
    }

    #[test]
    fn failure_status_carries_server_message() {
        let q = Query::address("nowhere");
        let t = MemoryTransport::new().respond(
            &q,
            HttpResponse::new(404, r#"{"error":"No geocoding results for that address"}"#),
        );
        let err = pollster::block_on(fetch_payload(&t, &q, &CancelToken::new())).unwrap_err();
        assert_eq!(
            err,
            RequestError::Server {
                status: 404,
                message: Some("No geocoding results for that address".to_string()),
            }
        );
    }

    #[test]
    fn transport_failure_keeps_message() {
        let q = Query::address("x");
        let t = MemoryTransport::new().fail(&q, "connection refused");
        let err = pollster::block_on(fetch_payload(&t, &q, &CancelToken::new())).unwrap_err();
        assert_eq!(err, RequestError::Transport("connection refused".to_string()));
    }

    #[test]
    fn cancelled_token_skips_the_request() {
        let q = Query::address("x");
        let t = MemoryTransport::new();
        let token = CancelToken::new();
        token.cancel();
        let err = pollster::block_on(fetch_payload(&t, &q, &token)).unwrap_err();
        assert_eq!(err, RequestError::Cancelled);
        assert!(t.requests().is_empty());
    }
}
