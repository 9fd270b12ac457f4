use dashboard::{HttpResponse, LocalBoxFuture, Transport, TransportError};
use reqwest::Client;

/// [`Transport`] over a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base: String,
}

impl HttpTransport {
    pub fn new(client: Client, base: impl Into<String>) -> Self {
        Self {
            client,
            base: base.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base.trim_end_matches('/'))
    }
}

impl Transport for HttpTransport {
    fn get(&self, path: String) -> LocalBoxFuture<'_, Result<HttpResponse, TransportError>> {
        Box::pin(async move {
            let url = self.url(&path);
            tracing::debug!(%url, "GET");
            let resp = self
                .client
                .get(&url)
                .send()
                .await
                .map_err(|e| TransportError::with_source(format!("{url}: {e}"), e))?;
            let status = resp.status().as_u16();
            // An unreadable body is handled like an unparseable one.
            let body = match resp.bytes().await {
                Ok(bytes) => bytes.to_vec(),
                Err(err) => {
                    tracing::warn!(%url, error = %err, "response body unreadable");
                    Vec::new()
                }
            };
            Ok(HttpResponse::new(status, body))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::HttpTransport;
    use reqwest::Client;

    #[test]
    fn url_joins_base_and_path() {
        let t = HttpTransport::new(Client::new(), "http://127.0.0.1:5000/");
        assert_eq!(
            t.url("/api/air-quality?address=x"),
            "http://127.0.0.1:5000/api/air-quality?address=x"
        );
    }
}
