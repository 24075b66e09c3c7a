//! Declarative description of a logical API call.
//!
//! An `Endpoint` says *what* to call (path, method, query parameters and an
//! optional body) but not *where*: the host comes from `Configuration` when
//! the provider builds the wire request. The expected response type is
//! chosen at call time, e.g. `provider.fetch::<User>(&endpoint, None)`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::http::HttpMethod;

/// Query parameters, kept sorted so generated query strings are stable.
pub type Parameters = BTreeMap<String, String>;

/// Immutable description of an API call.
///
/// ```
/// use apibuilder_core::{Endpoint, HttpMethod};
///
/// let endpoint = Endpoint::new("/repos")
///     .with_method(HttpMethod::Post)
///     .with_parameter("per_page", 50);
/// assert_eq!(endpoint.path(), "/repos");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Endpoint {
    path: String,
    #[serde(default)]
    method: HttpMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    parameters: Option<Parameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    body: Option<Vec<u8>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    content_type: Option<String>,
}

impl Endpoint {
    /// A `GET` endpoint at `path`. The path is checked when the request is
    /// built, not here.
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            method: HttpMethod::Get,
            parameters: None,
            body: None,
            content_type: None,
        }
    }

    pub fn with_method(mut self, method: HttpMethod) -> Self {
        self.method = method;
        self
    }

    /// Replace all query parameters. Values are stringified with `Display`.
    pub fn with_parameters<I, K, V>(mut self, parameters: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        self.parameters = Some(
            parameters
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        );
        self
    }

    /// Add a single query parameter, replacing a previous value for `key`.
    pub fn with_parameter(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.parameters
            .get_or_insert_with(Parameters::new)
            .insert(key.into(), value.to_string());
        self
    }

    /// Attach a raw body sent with `content_type`.
    pub fn with_body(mut self, body: impl Into<Vec<u8>>, content_type: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self.content_type = Some(content_type.into());
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn parameters(&self) -> Option<&Parameters> {
        self.parameters.as_ref()
    }

    pub fn body(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// A copy of this endpoint pointing at `path` with `parameters`.
    ///
    /// Method, body and content type are preserved. Used to turn a page link
    /// discovered on a response into the endpoint for that page.
    pub fn replacing(&self, path: impl Into<String>, parameters: Option<Parameters>) -> Self {
        Self {
            path: path.into(),
            method: self.method,
            parameters,
            body: self.body.clone(),
            content_type: self.content_type.clone(),
        }
    }
}
