//! Blocking JSON fetch.
//!
//! One request, no retries. HTTP error statuses are not failures: their body
//! is parsed like any other. Every failure surfaces as a [`FetchError`] whose
//! message is `Failed to fetch`; the underlying cause is its `source()`.

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;
use url::Url;

/// Client-level settings shared by every request.
#[derive(Clone, Debug)]
pub struct FetchConfig {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: "just-dom/0.1".to_string(),
        }
    }
}

/// Per-request settings.
#[derive(Clone, Debug)]
pub struct FetchOptions {
    pub method: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            headers: Vec::new(),
            body: None,
        }
    }
}

impl FetchOptions {
    pub fn method(mut self, method: &str) -> Self {
        self.method = method.to_ascii_uppercase();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Serializes `value` as the body and sets `Content-Type: application/json`
    /// unless a content type was already given.
    pub fn json(mut self, value: &Value) -> Self {
        if !self
            .headers
            .iter()
            .any(|(k, _)| k.eq_ignore_ascii_case("content-type"))
        {
            self.headers
                .push(("Content-Type".to_string(), "application/json".to_string()));
        }
        self.body = Some(value.to_string());
        self
    }
}

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to fetch")]
    InvalidUrl(#[source] url::ParseError),
    #[error("Failed to fetch")]
    Request(#[source] Box<ureq::Error>),
    #[error("Failed to fetch")]
    Read(#[source] std::io::Error),
    #[error("Failed to fetch")]
    Decode(#[source] serde_json::Error),
}

/// Fetches `url` and parses the body as JSON, with the default client settings.
pub fn fetch_json(url: &str, options: &FetchOptions) -> Result<Value, FetchError> {
    fetch_json_with(url, options, &FetchConfig::default())
}

/// Same as [`fetch_json`], deserializing into `T`.
pub fn fetch_as<T: DeserializeOwned>(url: &str, options: &FetchOptions) -> Result<T, FetchError> {
    let value = fetch_json(url, options)?;
    serde_json::from_value(value).map_err(|err| {
        log::warn!(target: "net.fetch", "{url}: unexpected JSON shape: {err}");
        FetchError::Decode(err)
    })
}

pub fn fetch_json_with(
    url: &str,
    options: &FetchOptions,
    config: &FetchConfig,
) -> Result<Value, FetchError> {
    let result = fetch_inner(url, options, config);
    if let Err(err) = &result {
        let cause = std::error::Error::source(err)
            .map(ToString::to_string)
            .unwrap_or_default();
        log::warn!(target: "net.fetch", "{} {url}: {err}: {cause}", options.method);
    }
    result
}

fn fetch_inner(url: &str, options: &FetchOptions, config: &FetchConfig) -> Result<Value, FetchError> {
    let start = Instant::now();
    let parsed = Url::parse(url).map_err(FetchError::InvalidUrl)?;

    let agent = ureq::AgentBuilder::new()
        .timeout(config.timeout)
        .user_agent(&config.user_agent)
        .build();
    let mut request = agent.request_url(&options.method, &parsed);
    for (name, value) in &options.headers {
        request = request.set(name, value);
    }
    let sent = match &options.body {
        Some(body) => request.send_string(body),
        None => request.call(),
    };
    let response = match sent {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            log::debug!(target: "net.fetch", "{parsed}: HTTP {code}, parsing body anyway");
            response
        }
        Err(err) => return Err(FetchError::Request(Box::new(err))),
    };
    let status = response.status();
    let text = response.into_string().map_err(FetchError::Read)?;
    let value = serde_json::from_str(&text).map_err(FetchError::Decode)?;
    log::debug!(
        target: "net.fetch",
        "{} {parsed} -> {status}, {} bytes in {} ms",
        options.method,
        text.len(),
        start.elapsed().as_millis()
    );
    Ok(value)
}

/// Runs [`fetch_json_with`] on a worker thread and hands the result to `cb`.
pub fn spawn_fetch_json(
    url: String,
    options: FetchOptions,
    config: FetchConfig,
    cb: Arc<dyn Fn(Result<Value, FetchError>) + Send + Sync>,
) -> thread::JoinHandle<()> {
    thread::spawn(move || cb(fetch_json_with(&url, &options, &config)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_builder() {
        let opts = FetchOptions::default()
            .method("post")
            .header("X-Trace", "1")
            .json(&serde_json::json!({ "a": 1 }));
        assert_eq!(opts.method, "POST");
        assert_eq!(opts.body.as_deref(), Some(r#"{"a":1}"#));
        assert_eq!(opts.headers.len(), 2);
    }

    #[test]
    fn json_keeps_explicit_content_type() {
        let opts = FetchOptions::default()
            .header("content-type", "application/vnd.api+json")
            .json(&Value::Null);
        assert_eq!(opts.headers.len(), 1);
    }

    #[test]
    fn invalid_url_is_a_uniform_failure() {
        let err = fetch_json("not a url", &FetchOptions::default()).unwrap_err();
        assert!(matches!(err, FetchError::InvalidUrl(_)));
        assert_eq!(err.to_string(), "Failed to fetch");
        assert!(std::error::Error::source(&err).is_some());
    }
}
