//! reqwest-backed [`Transport`].

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use tenant_fetch_types::{QueryParams, TransportResponse};
use url::Url;

use crate::{Transport, TransportError};

const CONNECT_TIMEOUT_SECS: u64 = 30;

/// Upper bound on the response body kept in [`TransportError::Status`].
pub const MAX_ERROR_BODY_BYTES: usize = 32 * 1024;

/// HTTP transport bound to one API root.
///
/// Addresses are joined onto the root with exactly one `/` between them.
/// Absolute `http(s)://` addresses bypass the root.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    root_url: String,
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(root_url: &str) -> Result<Self, TransportError> {
        Self::builder(root_url).build()
    }

    #[must_use]
    pub fn builder(root_url: impl Into<String>) -> HttpTransportBuilder {
        HttpTransportBuilder {
            root_url: root_url.into(),
            user_agent: None,
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            timeout: None,
            headers: Vec::new(),
        }
    }

    #[must_use]
    pub fn root_url(&self) -> &str {
        &self.root_url
    }

    /// Full URL for `address`.
    #[must_use]
    pub fn url_for(&self, address: &str) -> String {
        join_url(&self.root_url, address)
    }

    async fn send(
        &self,
        address: &str,
        params: &QueryParams,
    ) -> Result<TransportResponse, TransportError> {
        let url = self.url_for(address);
        let pairs = params.to_pairs();
        tracing::debug!(%url, params = pairs.len(), "GET");

        let mut request = self.client.get(&url);
        if !pairs.is_empty() {
            request = request.query(&pairs);
        }

        let response = request
            .send()
            .await
            .map_err(|e| TransportError::request(address, e))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| TransportError::request(address, e))?;

        if !status.is_success() {
            return Err(TransportError::Status {
                address: address.to_string(),
                status: status.as_u16(),
                body: error_body_excerpt(&body),
            });
        }

        let data = if body.iter().all(u8::is_ascii_whitespace) {
            Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|e| TransportError::Decode {
                address: address.to_string(),
                source: Arc::new(e),
            })?
        };

        Ok(TransportResponse::new(status.as_u16(), data))
    }
}

impl Transport for HttpTransport {
    type Error = TransportError;

    async fn get(
        &self,
        address: &str,
        params: &QueryParams,
    ) -> Result<TransportResponse, TransportError> {
        self.send(address, params).await
    }
}

#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    root_url: String,
    user_agent: Option<String>,
    connect_timeout: Duration,
    timeout: Option<Duration>,
    headers: Vec<(String, String)>,
}

impl HttpTransportBuilder {
    #[must_use]
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Whole-request timeout. Unset means none.
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Header sent with every request, e.g. the tenant's bearer token.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn build(self) -> Result<HttpTransport, TransportError> {
        Url::parse(&self.root_url).map_err(|e| TransportError::InvalidRootUrl {
            url: self.root_url.clone(),
            reason: e.to_string(),
        })?;

        let mut default_headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let invalid = || TransportError::InvalidHeader { name: name.clone() };
            let header_name = HeaderName::from_bytes(name.as_bytes()).map_err(|_| invalid())?;
            let mut header_value = HeaderValue::from_str(value).map_err(|_| invalid())?;
            if header_name == AUTHORIZATION {
                header_value.set_sensitive(true);
            }
            default_headers.insert(header_name, header_value);
        }

        let mut builder = reqwest::Client::builder()
            .connect_timeout(self.connect_timeout)
            .default_headers(default_headers);
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Build(Arc::new(e)))?;

        Ok(HttpTransport {
            root_url: self.root_url,
            client,
        })
    }
}

fn join_url(root: &str, address: &str) -> String {
    if address.starts_with("http://") || address.starts_with("https://") {
        return address.to_string();
    }
    let root = root.trim_end_matches('/');
    let address = address.trim_start_matches('/');
    if address.is_empty() {
        return root.to_string();
    }
    format!("{root}/{address}")
}

fn error_body_excerpt(body: &[u8]) -> String {
    let mut text = String::from_utf8_lossy(body).into_owned();
    if text.len() > MAX_ERROR_BODY_BYTES {
        let mut cut = MAX_ERROR_BODY_BYTES;
        while !text.is_char_boundary(cut) {
            cut -= 1;
        }
        text.truncate(cut);
        text.push_str("...");
    }
    text
}
