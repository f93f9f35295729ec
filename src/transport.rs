//! Blocking HTTP transport.
//!
//! A thin layer over a `ureq` agent carrying the configured timeout and,
//! when credentials are present, a precomputed basic-auth header. Used for
//! the WSDL fetch at construction and for envelope POSTs afterwards.

use crate::config::Credentials;
use crate::error::TransportError;
use base64::{engine::general_purpose, Engine as _};
use std::time::Duration;

/// An HTTP response with its status preserved.
///
/// SOAP faults arrive with HTTP error statuses (typically 500), so POST
/// responses keep the status instead of treating 4xx/5xx as transport
/// failures.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

/// Blocking HTTP transport with optional basic authentication.
#[derive(Debug, Clone)]
pub struct Transport {
    agent: ureq::Agent,
    auth_header: Option<String>,
}

impl Transport {
    /// Create a transport with the given timeout, attaching basic auth
    /// when credentials are supplied.
    pub fn new(timeout: Duration, credentials: Option<&Credentials>) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self {
            agent,
            auth_header: credentials.map(basic_auth_header),
        }
    }

    /// Fetch a document. Any HTTP error status is a failure here; this is
    /// only used for the WSDL document.
    pub fn get(&self, url: &str) -> Result<String, TransportError> {
        let mut request = self.agent.get(url);
        if let Some(header) = &self.auth_header {
            request = request.set("Authorization", header);
        }

        let response = request.call().map_err(|e| TransportError::Http {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        response.into_string().map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }

    /// POST a request body, returning status and body even for HTTP error
    /// statuses. Only transport-level failures are errors.
    pub fn post(
        &self,
        url: &str,
        content_type: &str,
        soap_action: Option<&str>,
        body: &str,
    ) -> Result<HttpResponse, TransportError> {
        let mut request = self.agent.post(url).set("Content-Type", content_type);
        if let Some(header) = &self.auth_header {
            request = request.set("Authorization", header);
        }
        if let Some(action) = soap_action {
            request = request.set("SOAPAction", action);
        }

        // ureq returns Err(Error::Status) for 4xx/5xx responses; recover
        // the body in that case so fault envelopes can be parsed
        let response = match request.send_string(body) {
            Ok(response) => response,
            Err(ureq::Error::Status(_, response)) => response,
            Err(e) => {
                return Err(TransportError::Http {
                    url: url.to_string(),
                    reason: e.to_string(),
                })
            }
        };

        let status = response.status();
        let body = response.into_string().map_err(|e| TransportError::Body {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(HttpResponse { status, body })
    }
}

fn basic_auth_header(credentials: &Credentials) -> String {
    let pair = format!("{}:{}", credentials.username, credentials.password);
    format!("Basic {}", general_purpose::STANDARD.encode(pair))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header_encoding() {
        let credentials = Credentials {
            username: "user".to_string(),
            password: "pass".to_string(),
        };
        // base64("user:pass")
        assert_eq!(basic_auth_header(&credentials), "Basic dXNlcjpwYXNz");
    }

    #[test]
    fn test_transport_without_credentials_has_no_auth_header() {
        let transport = Transport::new(Duration::from_secs(5), None);
        assert!(transport.auth_header.is_none());
    }

    #[test]
    fn test_get_unresolvable_host_fails() {
        let transport = Transport::new(Duration::from_secs(1), None);
        let result = transport.get("http://nonexistent.invalid/service?wsdl");
        assert!(matches!(result, Err(TransportError::Http { .. })));
    }
}
