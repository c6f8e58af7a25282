//! DNS over HTTPS client, one instance per server descriptor.

use crate::prelude::{
    ClientFactory, QueryClient, QueryError, ResolveOptions, Transport, TransportError,
};
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use dohfan_proto::packet::{Query, Record, RecordType, Response};
use std::sync::Arc;

/// Expand a bare host like `1.1.1.1` into the well-known DoH endpoint.
/// Anything already carrying a scheme is used untouched.
fn endpoint(server: &str) -> String {
    if server.contains("://") {
        server.to_string()
    } else {
        format!("https://{server}/dns-query")
    }
}

/// Production [`Transport`] backed by reqwest.
#[derive(Debug, Default)]
pub struct HttpsTransport {
    client: reqwest::Client,
}

#[async_trait::async_trait]
impl Transport for HttpsTransport {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
        let response = self
            .client
            .get(url)
            .header("accept", "application/dns-message")
            .send()
            .await
            .map_err(|error| TransportError::Connection(error.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Status(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|error| TransportError::Connection(error.to_string()))?;

        Ok(body.to_vec())
    }
}

pub struct DohClient {
    url: String,
    transport: Arc<dyn Transport>,
}

impl DohClient {
    pub fn new(server: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            url: endpoint(server),
            transport,
        }
    }
}

#[async_trait::async_trait]
impl QueryClient for DohClient {
    async fn query(
        &self,
        domain: &str,
        rtype: RecordType,
        options: &ResolveOptions,
    ) -> Result<Vec<Record>, QueryError> {
        let mut query = Query::new(domain, rtype);
        query.recursion_desired = options.recursion_desired;

        // the id stays at 0 so identical questions produce identical urls,
        // which keeps the GET exchange cacheable along the path (rfc 8484)
        let encoded = URL_SAFE_NO_PAD.encode(query.encode()?);
        let url = format!("{}?dns={}", self.url, encoded);

        let body = self.transport.get(&url).await?;
        let response = Response::decode(&body)?;

        tracing::trace!(
            server = %self.url,
            code = ?response.response_code,
            answers = response.answers.len(),
            "doh exchange done"
        );

        // a non-NoError response code is not a transport failure: the server
        // answered, there just may be nothing in the answer section
        Ok(response.answers)
    }
}

/// Binds the shared transport into per-server [`DohClient`] instances.
pub struct DohClientFactory {
    transport: Arc<dyn Transport>,
}

impl DohClientFactory {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }
}

impl ClientFactory for DohClientFactory {
    fn create(&self, server: &str) -> Box<dyn QueryClient> {
        Box::new(DohClient::new(server, Arc::clone(&self.transport)))
    }
}

#[cfg(test)]
mod tests {
    use super::{endpoint, DohClient};
    use crate::prelude::{QueryClient, QueryError, ResolveOptions, Transport, TransportError};
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    use base64::Engine;
    use dohfan_proto::packet::{Query, Record, RecordType};
    use std::collections::HashMap;
    use std::net::Ipv4Addr;
    use std::sync::Arc;

    #[derive(Debug, Default)]
    struct MockTransport {
        responses: HashMap<String, Result<Vec<u8>, TransportError>>,
    }

    impl MockTransport {
        fn with_response(mut self, url: &str, response: Result<Vec<u8>, TransportError>) -> Self {
            self.responses.insert(url.to_string(), response);
            self
        }
    }

    #[async_trait::async_trait]
    impl Transport for MockTransport {
        async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError> {
            if let Some(found) = self.responses.get(url) {
                found.clone()
            } else {
                Err(TransportError::Connection(format!("unexpected url {url}")))
            }
        }
    }

    fn single_a_response() -> Vec<u8> {
        #[rustfmt::skip]
        let data = vec![
            0x00, 0x00, // id
            0x81, 0x80, // response, no error
            0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x00,
            // question
            3, b'f', b'o', b'o', 3, b'b', b'a', b'r', 0,
            0x00, 0x01, 0x00, 0x01,
            // answer
            0xC0, 0x0C,
            0x00, 0x01, 0x00, 0x01,
            0x00, 0x00, 0x01, 0x2C,
            0x00, 0x04,
            1, 2, 3, 4,
        ];
        data
    }

    fn query_url(base: &str, domain: &str, rtype: RecordType) -> String {
        let encoded = URL_SAFE_NO_PAD.encode(Query::new(domain, rtype).encode().unwrap());
        format!("{base}?dns={encoded}")
    }

    #[test]
    fn endpoint_should_expand_bare_host() {
        assert_eq!(endpoint("1.1.1.1"), "https://1.1.1.1/dns-query");
        assert_eq!(
            endpoint("https://dns.google/resolve"),
            "https://dns.google/resolve"
        );
    }

    #[tokio::test]
    async fn client_should_query_and_decode() {
        let url = query_url("https://1.1.1.1/dns-query", "foo.bar", RecordType::A);
        let transport = MockTransport::default().with_response(&url, Ok(single_a_response()));
        let client = DohClient::new("1.1.1.1", Arc::new(transport));

        let answers = client
            .query("foo.bar", RecordType::A, &ResolveOptions::default())
            .await
            .unwrap();
        assert_eq!(
            answers,
            vec![Record::A {
                domain: String::from("foo.bar"),
                addr: Ipv4Addr::new(1, 2, 3, 4),
                ttl: 300,
            }]
        );
    }

    #[tokio::test]
    async fn client_should_forward_status_error() {
        let url = query_url("https://1.1.1.1/dns-query", "foo.bar", RecordType::A);
        let transport =
            MockTransport::default().with_response(&url, Err(TransportError::Status(502)));
        let client = DohClient::new("1.1.1.1", Arc::new(transport));

        let error = client
            .query("foo.bar", RecordType::A, &ResolveOptions::default())
            .await
            .unwrap_err();
        assert_eq!(error, QueryError::Transport(TransportError::Status(502)));
        assert_eq!(error.code(), "ESTATUS");
    }

    #[tokio::test]
    async fn client_should_fail_on_garbage_body() {
        let url = query_url("https://1.1.1.1/dns-query", "foo.bar", RecordType::A);
        let transport = MockTransport::default().with_response(&url, Ok(vec![0x00, 0x01]));
        let client = DohClient::new("1.1.1.1", Arc::new(transport));

        let error = client
            .query("foo.bar", RecordType::A, &ResolveOptions::default())
            .await
            .unwrap_err();
        assert_eq!(error.code(), "EDECODE");
    }
}
