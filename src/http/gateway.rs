//! Synchronous HTTP gateway.
//!
//! Every network call in the system is a single blocking request/response
//! exchange. The [`HttpGateway`] trait captures that exchange so the pipeline
//! steps stay independent of the concrete client; [`ReqwestGateway`] is the
//! production implementation.

use std::time::Duration;

use thiserror::Error;
use tracing::debug;

/// Default timeout applied to every outbound request.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

/// Body of a multipart upload: a JSON manifest part named `resources` plus a
/// binary part named `application` carrying the bundle bytes.
#[derive(Debug, Clone)]
pub struct MultipartPayload {
    pub resources: String,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    Empty,
    Json(String),
    Multipart(MultipartPayload),
}

/// An outbound request, built up with the chained constructors below.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub basic_auth: Option<(String, String)>,
    pub bearer: Option<String>,
    pub body: RequestBody,
}

impl HttpRequest {
    fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            basic_auth: None,
            bearer: None,
            body: RequestBody::Empty,
        }
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    pub fn put(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, url)
    }

    pub fn accept_json(mut self) -> Self {
        if !self.headers.iter().any(|(name, _)| *name == "Accept") {
            self.headers.push(("Accept", "application/json".to_string()));
        }
        self
    }

    pub fn json_body(mut self, body: String) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    pub fn multipart(mut self, payload: MultipartPayload) -> Self {
        self.body = RequestBody::Multipart(payload);
        self
    }

    pub fn with_basic_auth(mut self, username: &str, password: &str) -> Self {
        self.basic_auth = Some((username.to_string(), password.to_string()));
        self
    }

    pub fn with_bearer(mut self, token: &str) -> Self {
        self.bearer = Some(token.to_string());
        self
    }
}

/// A completed exchange. Non-2xx statuses are returned, not raised; callers
/// decide what each status means for their step.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Transport-level failure: the exchange itself did not complete.
#[derive(Debug, Error)]
#[error("HTTP request to {url} failed: {message}")]
pub struct GatewayError {
    pub url: String,
    pub message: String,
}

impl GatewayError {
    pub fn new(url: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            message: message.into(),
        }
    }
}

/// One blocking request/response exchange.
pub trait HttpGateway: Send + Sync {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError>;
}

/// Production gateway backed by a pooled blocking `reqwest` client.
pub struct ReqwestGateway {
    client: reqwest::blocking::Client,
}

impl ReqwestGateway {
    pub fn new(timeout: Duration) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { client }
    }
}

impl Default for ReqwestGateway {
    fn default() -> Self {
        Self::new(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }
}

impl HttpGateway for ReqwestGateway {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, GatewayError> {
        let url = request.url.clone();
        debug!("{} {}", request.method.as_str(), url);

        let method = match request.method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, &url);
        for (name, value) in &request.headers {
            builder = builder.header(*name, value.as_str());
        }
        if let Some((username, password)) = &request.basic_auth {
            builder = builder.basic_auth(username, Some(password));
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(body) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body),
            RequestBody::Multipart(payload) => {
                let data = reqwest::blocking::multipart::Part::bytes(payload.bytes)
                    .file_name(payload.file_name)
                    .mime_str("application/zip")
                    .map_err(|e| GatewayError::new(&url, e.to_string()))?;
                let form = reqwest::blocking::multipart::Form::new()
                    .text("resources", payload.resources)
                    .part("application", data);
                builder.multipart(form)
            }
        };

        let response = builder
            .send()
            .map_err(|e| GatewayError::new(&url, e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .map_err(|e| GatewayError::new(&url, e.to_string()))?
            .to_vec();

        Ok(HttpResponse { status, body })
    }
}
