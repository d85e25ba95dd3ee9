//! Contact form submission endpoint

use std::fmt::Debug;
use std::time::Duration;

use futures::future::{BoxFuture, FutureExt};
use reqwest::{header::CONTENT_TYPE, Client};
use url::Url;

pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid origin {origin}: {source}")]
    InvalidOrigin {
        origin: String,
        #[source]
        source: url::ParseError,
    },

    #[error("invalid endpoint path {path}: {source}")]
    InvalidPath {
        path: String,
        #[source]
        source: url::ParseError,
    },

    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("endpoint unreachable: {0}")]
    Unreachable(String),
}

/// Posts URL-encoded form bodies and reports the HTTP status.
/// Any status is a successful transport; only a missing response is an error.
pub trait FormTransport: Debug + Send + Sync {
    fn post_form(&self, path: &str, body: String) -> BoxFuture<'static, Result<u16, TransportError>>;
}

/// `reqwest`-backed transport posting relative to the page origin
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    origin: Url,
}

impl HttpTransport {
    pub fn new(origin: &str) -> Result<Self, TransportError> {
        let origin = Url::parse(origin).map_err(|source| TransportError::InvalidOrigin {
            origin: origin.to_string(),
            source,
        })?;
        let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
        tracing::info!(%origin, "form transport ready");
        Ok(Self { client, origin })
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    /// Resolve an endpoint path against the origin, as a relative `fetch` would
    pub fn resolve(&self, path: &str) -> Result<Url, TransportError> {
        self.origin
            .join(path)
            .map_err(|source| TransportError::InvalidPath {
                path: path.to_string(),
                source,
            })
    }
}

impl FormTransport for HttpTransport {
    fn post_form(&self, path: &str, body: String) -> BoxFuture<'static, Result<u16, TransportError>> {
        let client = self.client.clone();
        let target = self.resolve(path);
        async move {
            let target = target?;
            tracing::debug!(%target, "posting form");
            let response = client
                .post(target)
                .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
                .body(body)
                .send()
                .await?;
            Ok(response.status().as_u16())
        }
        .boxed()
    }
}
