//! HTTP client for the review API.
//!
//! One [`ApiClient`] is built at startup from [`ApiConfig`] and cloned into
//! each resource hook. Requests are never retried; a failed call surfaces
//! to the caller, which decides whether the user retries.

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::{Error, Result};

/// Error body returned by the API on failure.
#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

/// Configured HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Builds a client from the config and an optional bearer token.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig, token: Option<String>) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url(),
            token: token.filter(|t| !t.is_empty()),
        })
    }

    /// The joined base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns true if requests carry a bearer token.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        debug!("{} {}", method, path);
        let builder = self.http.request(method, format!("{}{path}", self.base_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// `GET` a JSON resource.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] on 404, [`Error::Server`] on other non-2xx
    /// statuses, and [`Error::Timeout`] or [`Error::Network`] when the
    /// request does not complete.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.request(Method::GET, path).send().await?;
        decode(response).await
    }

    /// `POST` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::POST, path).json(body).send().await?;
        decode(response).await
    }

    /// `POST` a JSON body with an explicit `Accept` header.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn post_accepting<B, T>(&self, path: &str, body: &B, accept: &'static str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path)
            .header(ACCEPT, accept)
            .json(body)
            .send()
            .await?;
        decode(response).await
    }

    /// `PATCH` a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn patch<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.request(Method::PATCH, path).json(body).send().await?;
        decode(response).await
    }

    /// `DELETE` a resource, ignoring the response body.
    ///
    /// # Errors
    ///
    /// See [`ApiClient::get`].
    pub async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path).send().await?;
        check(response).await.map(drop)
    }
}

/// Maps non-2xx responses to errors.
async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().path().to_string();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.message,
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string(),
    };
    warn!("{} from {}: {}", status, url, message);

    if status == StatusCode::NOT_FOUND {
        Err(Error::NotFound(message))
    } else {
        Err(Error::Server {
            status: status.as_u16(),
            message,
        })
    }
}

/// Checks the status, then decodes the JSON body.
///
/// An empty body decodes as JSON `null`, so mutations returning nothing can
/// target `serde_json::Value` or `Option<T>`.
async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = check(response).await?;
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_str("null")?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}
