//! Host and static headers shared by every request of a provider.

use std::collections::BTreeMap;

use url::Url;

use crate::error::ApiError;

/// Environment variable holding the API host, e.g. `https://api.example.com`.
pub const HOST_ENV: &str = "APIBUILDER_HOST";
/// Optional environment variable sent verbatim as the `Authorization` header.
pub const AUTHORIZATION_ENV: &str = "APIBUILDER_AUTHORIZATION";

/// Where requests go and which headers they always carry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Configuration {
    host: Url,
    request_headers: BTreeMap<String, String>,
}

impl Configuration {
    /// Parse `host` into a configuration with no static headers.
    ///
    /// The host must be an absolute `http` or `https` URL with a hostname.
    /// Any path, query or fragment on it is ignored when requests are built.
    pub fn new(host: &str) -> Result<Self, ApiError> {
        let host = Url::parse(host)
            .map_err(|e| ApiError::Configuration(format!("invalid host {host:?}: {e}")))?;
        Self::from_url(host)
    }

    pub fn from_url(host: Url) -> Result<Self, ApiError> {
        if !matches!(host.scheme(), "http" | "https") {
            return Err(ApiError::Configuration(format!(
                "unsupported scheme {:?}",
                host.scheme()
            )));
        }
        if host.host_str().is_none() {
            return Err(ApiError::Configuration(format!("host {host} has no hostname")));
        }
        Ok(Self {
            host,
            request_headers: BTreeMap::new(),
        })
    }

    /// Read the configuration from `APIBUILDER_HOST` and, when set,
    /// `APIBUILDER_AUTHORIZATION`.
    pub fn from_env() -> Result<Self, ApiError> {
        let host = std::env::var(HOST_ENV)
            .map_err(|_| ApiError::Configuration(format!("{HOST_ENV} is not set")))?;
        let config = Self::new(&host)?;
        Ok(match std::env::var(AUTHORIZATION_ENV) {
            Ok(token) if !token.is_empty() => config.with_header("Authorization", token),
            _ => config,
        })
    }

    /// Add a header applied to every request, replacing a previous value
    /// whose name differs only in case.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        self.request_headers
            .retain(|existing, _| !existing.eq_ignore_ascii_case(&name));
        self.request_headers.insert(name, value.into());
        self
    }

    pub fn host(&self) -> &Url {
        &self.host
    }

    pub fn scheme(&self) -> &str {
        self.host.scheme()
    }

    pub fn hostname(&self) -> Option<&str> {
        self.host.host_str()
    }

    pub fn request_headers(&self) -> &BTreeMap<String, String> {
        &self.request_headers
    }
}
