//! Common utilities for the RightScale API client
//!
//! Provides shared functionality used across all resource modules.

pub mod filter;
pub mod params;
pub mod timestamp;
pub mod validation;

use crate::config::ClientConfig;
use crate::error::RightScaleError;
use crate::hrefs;
use params::Params;
use reqwest::header::{ACCEPT, LOCATION};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Redirects re-issued before a 3xx is treated as a failure
const MAX_REDIRECTS: usize = 3;

/// Link entry embedded in every RightScale media type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    pub rel: String,
    pub href: String,
}

/// Action entry advertised by a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub rel: String,
}

/// Result of a POST: the `Location` header (if any) and the raw body
#[derive(Debug, Clone, Default)]
pub struct PostResponse {
    pub location: Option<String>,
    pub body: String,
}

impl PostResponse {
    /// Id of the created resource, taken from the last segment of `Location`
    pub fn created_id(&self) -> Option<String> {
        self.location.as_deref().map(hrefs::id_from_href).map(str::to_string)
    }
}

/// HTTP client wrapper carrying the session cookies and API version header
///
/// The base URL moves to the shard the API redirects to, since the session
/// cookies set there are only sent back to that host.
#[derive(Debug)]
pub struct HttpClient {
    client: Client,
    base_url: RwLock<String>,
    api_version: String,
}

impl HttpClient {
    /// Create a new HTTP client wrapper
    ///
    /// Redirects are not followed automatically: the API expects the same
    /// verb and parameters to be re-sent to the redirect target.
    pub fn new(config: &ClientConfig) -> Result<Self, RightScaleError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        Ok(Self {
            client,
            base_url: RwLock::new(config.api_url.trim_end_matches('/').to_string()),
            api_version: config.api_version.clone(),
        })
    }

    /// Get the base URL
    pub fn base_url(&self) -> String {
        self.base_url.read().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Build a full URL from a path
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http") {
            path.to_string()
        } else {
            format!("{}{}", self.base_url(), path)
        }
    }

    /// URL to re-issue a redirected request against
    ///
    /// A target without its own query string gets the original query back.
    fn redirect_url(&self, target: &str, query: &Params) -> String {
        let url = self.build_url(target);
        if query.is_empty() || url.contains('?') {
            url
        } else {
            format!("{}?{}", url, Self::build_query_string(query))
        }
    }

    /// Point later requests at the origin of `url` if it differs from the base
    fn rebase(&self, url: &str) {
        let Ok(parsed) = Url::parse(url) else {
            return;
        };
        let origin = parsed.origin();
        let mut base = self.base_url.write().unwrap_or_else(PoisonError::into_inner);
        if Url::parse(&base).is_ok_and(|current| current.origin() == origin) {
            return;
        }
        let origin = origin.ascii_serialization();
        info!("API base URL moved from {} to {}", base, origin);
        *base = origin;
    }

    /// Build query string from parameters
    pub fn build_query_string(params: &Params) -> String {
        params
            .pairs()
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Make a GET request and decode the JSON body
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: &Params) -> Result<T, RightScaleError> {
        let response = self.send(Method::GET, path, query, None).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            debug!(
                "error decoding response from {}: {} - Response (first 500 chars): {}",
                path,
                e,
                body.chars().take(500).collect::<String>()
            );
            RightScaleError::Serialization(e)
        })
    }

    /// Make a form-encoded POST request
    pub async fn post(&self, path: &str, form: &Params) -> Result<PostResponse, RightScaleError> {
        let response = self.send(Method::POST, path, &Params::new(), Some(form)).await?;
        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await?;
        Ok(PostResponse { location, body })
    }

    /// POST and return the id of the created resource from `Location`
    pub async fn post_for_id(&self, path: &str, form: &Params) -> Result<String, RightScaleError> {
        self.post(path, form)
            .await?
            .created_id()
            .ok_or_else(|| RightScaleError::MissingLocation(format!("POST {path}")))
    }

    /// Make a form-encoded PUT request
    pub async fn put(&self, path: &str, form: &Params) -> Result<(), RightScaleError> {
        self.send(Method::PUT, path, &Params::new(), Some(form)).await?;
        Ok(())
    }

    /// Make a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), RightScaleError> {
        self.send(Method::DELETE, path, &Params::new(), None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &Params,
        form: Option<&Params>,
    ) -> Result<Response, RightScaleError> {
        let mut url = self.build_url(path);
        if !query.is_empty() {
            url = format!("{}?{}", url, Self::build_query_string(query));
        }

        let mut redirects = 0;
        loop {
            // query strings may carry credentials (session/accounts)
            debug!("{} {}", method, url.split('?').next().unwrap_or(&url));

            let mut request = self
                .client
                .request(method.clone(), &url)
                .header("X-API-Version", &self.api_version)
                .header(ACCEPT, "application/json");
            if let Some(form) = form {
                request = request.form(form.pairs());
            }
            let response = request.send().await?;

            if response.status().is_redirection() && redirects < MAX_REDIRECTS {
                if let Some(target) = response.headers().get(LOCATION).and_then(|v| v.to_str().ok()) {
                    warn!("{} {} redirected to {}, re-issuing", method, path, target);
                    url = self.redirect_url(target, query);
                    redirects += 1;
                    continue;
                }
            }

            let response = check_status(&method, path, response).await?;
            if redirects > 0 {
                self.rebase(&url);
            }
            return Ok(response);
        }
    }
}

/// Map non-success status codes to the appropriate error variant
async fn check_status(method: &Method, path: &str, response: Response) -> Result<Response, RightScaleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(match status {
        StatusCode::NOT_FOUND => RightScaleError::NotFound(format!("{method} {path} - {body}")),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            RightScaleError::Authentication(format!("{method} {path}: {status} - {body}"))
        }
        _ => RightScaleError::Api {
            status: status.as_u16(),
            message: format!("{method} {path} failed: {body}"),
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(url: &str) -> HttpClient {
        HttpClient::new(&ClientConfig::new(url)).unwrap()
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = http("https://my.rightscale.com/");
        assert_eq!(client.base_url(), "https://my.rightscale.com");
        assert_eq!(client.build_url("/api/clouds"), "https://my.rightscale.com/api/clouds");
    }

    #[test]
    fn absolute_urls_are_used_as_is() {
        let client = http("https://my.rightscale.com");
        assert_eq!(
            client.build_url("https://us-3.rightscale.com/api/session"),
            "https://us-3.rightscale.com/api/session"
        );
    }

    #[test]
    fn query_string_encodes_keys_and_values() {
        let mut params = Params::new();
        params.push("filter[]", "name==web server");
        params.push("view", "default");
        assert_eq!(
            HttpClient::build_query_string(&params),
            "filter%5B%5D=name%3D%3Dweb%20server&view=default"
        );
    }

    #[test]
    fn redirect_keeps_original_query() {
        let client = http("https://my.rightscale.com");
        let mut query = Params::new();
        query.push("email", "ops@example.com");

        assert_eq!(
            client.redirect_url("https://us-3.rightscale.com/api/session/accounts", &query),
            "https://us-3.rightscale.com/api/session/accounts?email=ops%40example.com"
        );
        // A target carrying its own query is used as given
        assert_eq!(
            client.redirect_url("https://us-3.rightscale.com/api/session/accounts?x=1", &query),
            "https://us-3.rightscale.com/api/session/accounts?x=1"
        );
        assert_eq!(client.redirect_url("/api/session", &Params::new()), "https://my.rightscale.com/api/session");
    }

    #[test]
    fn rebase_moves_to_redirect_origin() {
        let client = http("https://my.rightscale.com");
        client.rebase("https://my.rightscale.com/api/session");
        assert_eq!(client.base_url(), "https://my.rightscale.com");

        client.rebase("https://us-3.rightscale.com/api/session?x=1");
        assert_eq!(client.base_url(), "https://us-3.rightscale.com");
        assert_eq!(client.build_url("/api/clouds"), "https://us-3.rightscale.com/api/clouds");
    }

    #[test]
    fn created_id_comes_from_location() {
        let response = PostResponse {
            location: Some("/api/clouds/1/ip_addresses/ABC123".to_string()),
            body: String::new(),
        };
        assert_eq!(response.created_id().as_deref(), Some("ABC123"));
        assert!(PostResponse::default().created_id().is_none());
    }
}
