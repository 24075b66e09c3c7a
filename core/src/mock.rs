//! Deterministic `RequestExecutor` for tests.
//!
//! `MockExecutor` answers every request with the same programmed result and
//! records what it was asked to send, so request construction can be
//! asserted after a full provider round-trip without touching the network.

use std::future::{ready, Future};
use std::sync::{Mutex, PoisonError};

use crate::error::TransportError;
use crate::executor::RequestExecutor;
use crate::http::{HttpRequest, HttpResponse};

#[derive(Debug)]
pub struct MockExecutor {
    result: Result<HttpResponse, TransportError>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl MockExecutor {
    pub fn new(result: Result<HttpResponse, TransportError>) -> Self {
        Self {
            result,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `response`.
    pub fn responding(response: HttpResponse) -> Self {
        Self::new(Ok(response))
    }

    /// Fail every request with `error`.
    pub fn failing(error: TransportError) -> Self {
        Self::new(Err(error))
    }

    /// Requests received so far, oldest first.
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn last_request(&self) -> Option<HttpRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }
}

impl RequestExecutor for MockExecutor {
    fn execute(
        &self,
        request: HttpRequest,
    ) -> impl Future<Output = Result<HttpResponse, TransportError>> + Send {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request);
        ready(self.result.clone())
    }
}
