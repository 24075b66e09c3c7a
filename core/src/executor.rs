//! The transport seam between `ApiProvider` and the network.
//!
//! # Design
//! `RequestExecutor` has a single method: send a fully-built `HttpRequest`
//! and hand back whatever came back as an `HttpResponse`. It does not look at
//! status codes and never retries; that keeps the provider's logic testable
//! with `mock::MockExecutor` and lets callers bring their own transport.

use std::future::Future;
use std::sync::Arc;

use crate::error::TransportError;
use crate::http::{HttpRequest, HttpResponse};

/// Performs one HTTP round-trip.
pub trait RequestExecutor {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send;
}

impl<E: RequestExecutor> RequestExecutor for &E {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}

impl<E: RequestExecutor> RequestExecutor for Arc<E> {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        (**self).execute(request)
    }
}

#[cfg(feature = "reqwest")]
pub use self::reqwest_executor::ReqwestExecutor;

#[cfg(feature = "reqwest")]
mod reqwest_executor {
    use tracing::debug;

    use super::RequestExecutor;
    use crate::error::TransportError;
    use crate::http::{HttpMethod, HttpRequest, HttpResponse};

    /// Default executor backed by a `reqwest::Client`.
    ///
    /// Connection reuse, TLS and timeouts are whatever the wrapped client is
    /// configured with.
    #[derive(Debug, Clone, Default)]
    pub struct ReqwestExecutor {
        client: reqwest::Client,
    }

    impl ReqwestExecutor {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_client(client: reqwest::Client) -> Self {
            Self { client }
        }
    }

    impl From<HttpMethod> for reqwest::Method {
        fn from(method: HttpMethod) -> Self {
            match method {
                HttpMethod::Get => reqwest::Method::GET,
                HttpMethod::Post => reqwest::Method::POST,
                HttpMethod::Put => reqwest::Method::PUT,
                HttpMethod::Patch => reqwest::Method::PATCH,
                HttpMethod::Delete => reqwest::Method::DELETE,
            }
        }
    }

    impl RequestExecutor for ReqwestExecutor {
        async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
            let mut builder = self
                .client
                .request(request.method.into(), request.url.as_str());
            for (name, value) in &request.headers {
                builder = builder.header(name.as_str(), value.as_str());
            }
            if let Some(body) = request.body {
                builder = builder.body(body);
            }

            let response = builder.send().await.map_err(transport_error)?;
            let status = response.status().as_u16();
            let headers = response
                .headers()
                .iter()
                .filter_map(|(name, value)| match value.to_str() {
                    Ok(value) => Some((name.as_str().to_string(), value.to_string())),
                    Err(_) => {
                        debug!(header = %name, "dropping non-UTF-8 header");
                        None
                    }
                })
                .collect();
            let body = response.bytes().await.map_err(transport_error)?.to_vec();

            Ok(HttpResponse {
                status,
                headers,
                body,
            })
        }
    }

    fn transport_error(err: reqwest::Error) -> TransportError {
        let message = err.to_string();
        if err.is_timeout() {
            TransportError::Timeout(message)
        } else if err.is_connect() {
            TransportError::Connection(message)
        } else if err.is_builder() {
            TransportError::InvalidRequest(message)
        } else if err.is_body() || err.is_decode() {
            TransportError::InvalidResponse(message)
        } else {
            TransportError::Io(message)
        }
    }

}
