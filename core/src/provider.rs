//! Builds wire requests from endpoints, dispatches them, and unpacks the
//! responses.
//!
//! # Design
//! `ApiProvider` holds only a `Configuration` and an executor and keeps no
//! state between calls, so one provider can serve any number of concurrent
//! requests. Each call is split the same way:
//!
//! - `build_*` turns an `Endpoint` into an `HttpRequest` (pure).
//! - the executor performs the round-trip (the only `.await`).
//! - `parse*` validates the status and decodes the body (pure).
//!
//! The `request*`/`fetch*` methods chain the three. The pure halves are
//! public so a caller that does its own I/O can still use them.
//!
//! # Query parameter precedence
//! Parameters passed at call time are merged *under* the endpoint's own
//! parameters: on a key collision the endpoint value is sent and the
//! call-time value is dropped.

use std::collections::BTreeMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn, Span};
use url::Url;

use crate::config::Configuration;
use crate::endpoint::{Endpoint, Parameters};
use crate::error::ApiError;
use crate::executor::RequestExecutor;
use crate::http::{HttpRequest, HttpResponse};
use crate::link::parse_link_header;
use crate::paged::Paged;

const CONTENT_TYPE: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone)]
pub struct ApiProvider<E> {
    config: Configuration,
    executor: E,
}

#[cfg(feature = "reqwest")]
impl ApiProvider<crate::executor::ReqwestExecutor> {
    /// A provider that sends requests with a default `reqwest::Client`.
    pub fn new(config: Configuration) -> Self {
        Self::with_executor(config, crate::executor::ReqwestExecutor::new())
    }
}

impl<E> ApiProvider<E> {
    pub fn with_executor(config: Configuration, executor: E) -> Self {
        Self { config, executor }
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Build the request for `endpoint`, sending the endpoint's own body (if
    /// any).
    ///
    /// `overrides` are extra query parameters; the endpoint's parameters win
    /// on a key collision.
    pub fn build_request(
        &self,
        endpoint: &Endpoint,
        overrides: Option<&Parameters>,
    ) -> Result<HttpRequest, ApiError> {
        let parameters = merge_parameters(endpoint, overrides);
        let url = self.url_for(endpoint.path(), &parameters)?;

        let mut request = HttpRequest {
            method: endpoint.method(),
            url: url.into(),
            headers: Vec::new(),
            body: None,
        };
        for (name, value) in self.config.request_headers() {
            request.set_header(name, value);
        }
        if let Some(body) = endpoint.body() {
            if let Some(content_type) = endpoint.content_type() {
                request.set_header(CONTENT_TYPE, content_type);
            }
            request.body = Some(body.to_vec());
        }
        Ok(request)
    }

    /// Build the request for `endpoint` with `body` encoded as JSON.
    pub fn build_json_request<S>(
        &self,
        endpoint: &Endpoint,
        body: &S,
        overrides: Option<&Parameters>,
    ) -> Result<HttpRequest, ApiError>
    where
        S: Serialize + ?Sized,
    {
        let body = serde_json::to_vec(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.build_raw_request(endpoint, body, JSON_CONTENT_TYPE, overrides)
    }

    /// Build the request for `endpoint` with raw `body` bytes sent as
    /// `content_type`. Replaces any body declared on the endpoint.
    pub fn build_raw_request(
        &self,
        endpoint: &Endpoint,
        body: impl Into<Vec<u8>>,
        content_type: &str,
        overrides: Option<&Parameters>,
    ) -> Result<HttpRequest, ApiError> {
        let mut request = self.build_request(endpoint, overrides)?;
        request.set_header(CONTENT_TYPE, content_type);
        request.body = Some(body.into());
        Ok(request)
    }

    /// Check the status of a response whose body is not needed.
    pub fn parse_empty(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response)
    }

    /// Check the status and decode the JSON body into `T`.
    pub fn parse<T: DeserializeOwned>(&self, response: HttpResponse) -> Result<T, ApiError> {
        check_status(&response)?;
        decode(&response)
    }

    /// Like [`parse`](Self::parse), and also turn the response's `Link`
    /// headers into endpoints derived from `endpoint`.
    pub fn parse_page<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        response: HttpResponse,
    ) -> Result<Paged<T>, ApiError> {
        check_status(&response)?;
        let data = decode(&response)?;
        Ok(Paged::new(data, self.page_links(endpoint, &response)))
    }

    /// Endpoints for every related page advertised by `response`, keyed by
    /// relation name.
    ///
    /// Each link target's path and query replace those of `endpoint`; its
    /// method and body carry over. Relative targets resolve against the URL
    /// of `endpoint` itself. Relation names are lowercased. Links without a
    /// `rel` are ignored, and when several links share a relation the first
    /// one wins.
    pub fn page_links(
        &self,
        endpoint: &Endpoint,
        response: &HttpResponse,
    ) -> BTreeMap<String, Endpoint> {
        let mut links = BTreeMap::new();
        let base = match self.url_for(endpoint.path(), &merge_parameters(endpoint, None)) {
            Ok(url) => url,
            Err(e) => {
                debug!(error = %e, "resolving links against the configured host");
                self.config.host().clone()
            }
        };

        for link in response.header_values("Link").flat_map(parse_link_header) {
            let mut relations = link.relations().peekable();
            if relations.peek().is_none() {
                debug!(link = link.target(), "skipping link without rel");
                continue;
            }

            let url = match base.join(link.target()) {
                Ok(url) if !url.cannot_be_a_base() => url,
                Ok(url) => {
                    warn!(link = %url, "skipping link that is not a hierarchical URL");
                    continue;
                }
                Err(e) => {
                    warn!(link = link.target(), error = %e, "skipping unresolvable link");
                    continue;
                }
            };
            let parameters: Parameters = url.query_pairs().into_owned().collect();
            let parameters = (!parameters.is_empty()).then_some(parameters);
            let page = endpoint.replacing(url.path(), parameters);

            for relation in relations {
                links
                    .entry(relation)
                    .or_insert_with(|| page.clone());
            }
        }

        links
    }

    fn url_for(&self, path: &str, parameters: &Parameters) -> Result<Url, ApiError> {
        if !path.starts_with('/') {
            return Err(ApiError::MalformedRequest(format!(
                "path {path:?} must begin with '/'"
            )));
        }

        let mut url = self.config.host().clone();
        if url.cannot_be_a_base() {
            return Err(ApiError::MalformedRequest(format!(
                "host {url} cannot carry a path"
            )));
        }
        url.set_path(path);
        url.set_query(None);
        url.set_fragment(None);
        if !parameters.is_empty() {
            url.query_pairs_mut().extend_pairs(parameters);
        }
        Ok(url)
    }
}

impl<E: RequestExecutor> ApiProvider<E> {
    /// Call an endpoint that returns no meaningful body.
    pub async fn request(
        &self,
        endpoint: &Endpoint,
        overrides: Option<&Parameters>,
    ) -> Result<(), ApiError> {
        let request = self.build_request(endpoint, overrides)?;
        let response = self.perform(request).await?;
        self.parse_empty(response)
    }

    /// Call an endpoint with a JSON body, ignoring the response body.
    pub async fn request_json<S>(
        &self,
        endpoint: &Endpoint,
        body: &S,
        overrides: Option<&Parameters>,
    ) -> Result<(), ApiError>
    where
        S: Serialize + ?Sized,
    {
        let request = self.build_json_request(endpoint, body, overrides)?;
        let response = self.perform(request).await?;
        self.parse_empty(response)
    }

    /// Call an endpoint and decode its JSON response into `T`.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        overrides: Option<&Parameters>,
    ) -> Result<T, ApiError> {
        let request = self.build_request(endpoint, overrides)?;
        let response = self.perform(request).await?;
        self.parse(response)
    }

    /// Send `body` as JSON and decode the JSON response into `T`.
    pub async fn fetch_json<S, T>(
        &self,
        endpoint: &Endpoint,
        body: &S,
        overrides: Option<&Parameters>,
    ) -> Result<T, ApiError>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_json_request(endpoint, body, overrides)?;
        let response = self.perform(request).await?;
        self.parse(response)
    }

    /// Send raw bytes as `content_type` and decode the JSON response into `T`.
    pub async fn fetch_raw<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        body: impl Into<Vec<u8>>,
        content_type: &str,
        overrides: Option<&Parameters>,
    ) -> Result<T, ApiError> {
        let request = self.build_raw_request(endpoint, body, content_type, overrides)?;
        let response = self.perform(request).await?;
        self.parse(response)
    }

    /// Fetch one page of a paginated resource along with its page links.
    pub async fn fetch_page<T: DeserializeOwned>(
        &self,
        endpoint: &Endpoint,
        overrides: Option<&Parameters>,
    ) -> Result<Paged<T>, ApiError> {
        let request = self.build_request(endpoint, overrides)?;
        let response = self.perform(request).await?;
        self.parse_page(endpoint, response)
    }

    #[instrument(
        name = "api_request",
        skip_all,
        fields(
            http.method = %request.method,
            http.url = %request.url,
            http.status_code = tracing::field::Empty,
        )
    )]
    async fn perform(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let response = self.executor.execute(request).await?;
        Span::current().record("http.status_code", response.status);
        debug!(bytes = response.body.len(), "response received");
        Ok(response)
    }
}

fn merge_parameters(endpoint: &Endpoint, overrides: Option<&Parameters>) -> Parameters {
    let mut merged = overrides.cloned().unwrap_or_default();
    if let Some(own) = endpoint.parameters() {
        merged.extend(own.iter().map(|(k, v)| (k.clone(), v.clone())));
    }
    merged
}

fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.text(),
    })
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_slice(&response.body).map_err(|e| ApiError::Decode {
        message: e.to_string(),
        body: response.text(),
    })
}
