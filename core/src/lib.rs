//! Typed HTTP API client builder.
//!
//! # Overview
//! Describe an API call as an [`Endpoint`], then let an [`ApiProvider`]
//! build the wire request, send it through a [`RequestExecutor`], validate
//! the status and decode the JSON body into the type you ask for. Paginated
//! resources come back as [`Paged`] values whose `Link` headers have already
//! been turned into endpoints for the neighbouring pages.
//!
//! ```no_run
//! use apibuilder_core::{ApiProvider, Configuration, Endpoint};
//!
//! #[derive(serde::Deserialize)]
//! struct Repo {
//!     name: String,
//! }
//!
//! # async fn run() -> Result<(), apibuilder_core::ApiError> {
//! let config = Configuration::new("https://api.github.com")?
//!     .with_header("User-Agent", "apibuilder");
//! let provider = ApiProvider::new(config);
//!
//! let mut endpoint = Some(Endpoint::new("/orgs/rust-lang/repos"));
//! while let Some(current) = endpoint {
//!     let page = provider.fetch_page::<Vec<Repo>>(&current, None).await?;
//!     for repo in &page.data {
//!         println!("{}", repo.name);
//!     }
//!     endpoint = page.next().cloned();
//! }
//! # Ok(())
//! # }
//! ```
//!
//! # Design
//! - `ApiProvider` is stateless; it holds a `Configuration` and an executor
//!   and can be shared across concurrent calls.
//! - Request building and response parsing are pure and public, so the
//!   executor is the only I/O boundary.
//! - The default executor wraps `reqwest` (feature `reqwest`, on by
//!   default); `mock::MockExecutor` replays a programmed result for tests.

pub mod config;
pub mod endpoint;
pub mod error;
pub mod executor;
pub mod http;
pub mod link;
pub mod mock;
pub mod paged;
pub mod provider;

pub use config::Configuration;
pub use endpoint::{Endpoint, Parameters};
pub use error::{ApiError, TransportError};
#[cfg(feature = "reqwest")]
pub use executor::ReqwestExecutor;
pub use executor::RequestExecutor;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use link::{parse_link_header, Link};
pub use paged::Paged;
pub use provider::ApiProvider;
