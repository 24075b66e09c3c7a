//! One page of a paginated resource.

use std::collections::BTreeMap;

use crate::endpoint::Endpoint;

/// Decoded page data plus endpoints for the adjacent pages, keyed by link
/// relation ("next", "prev", "first", "last", ...).
#[derive(Debug, Clone, PartialEq)]
pub struct Paged<T> {
    pub data: T,
    pub page_links: BTreeMap<String, Endpoint>,
}

impl<T> Paged<T> {
    pub fn new(data: T, page_links: BTreeMap<String, Endpoint>) -> Self {
        Self { data, page_links }
    }

    pub fn link(&self, relation: &str) -> Option<&Endpoint> {
        self.page_links.get(relation)
    }

    pub fn next(&self) -> Option<&Endpoint> {
        self.link("next")
    }

    pub fn prev(&self) -> Option<&Endpoint> {
        self.link("prev")
    }

    pub fn first(&self) -> Option<&Endpoint> {
        self.link("first")
    }

    pub fn last(&self) -> Option<&Endpoint> {
        self.link("last")
    }

    pub fn into_data(self) -> T {
        self.data
    }
}
