use serde::{Deserialize, Serialize};

use crate::dictionary::EntryId;
use crate::engine::rating::Rating;

/// Default page size of a [`SearchRequest`].
pub const DEFAULT_LIMIT: usize = 100;

/// One matching entry with its best rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SearchHit {
    pub entry: EntryId,
    pub rating: Rating,
}

/// Paged search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,

    /// Maximum number of hits to return.
    #[serde(default = "default_limit")]
    pub limit: usize,

    /// Number of hits to skip before returning (for pagination).
    #[serde(default)]
    pub offset: usize,
}

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequest {
            query: query.into(),
            limit: DEFAULT_LIMIT,
            offset: 0,
        }
    }

    pub fn builder(query: impl Into<String>) -> SearchRequestBuilder {
        SearchRequestBuilder::new(query)
    }
}

pub struct SearchRequestBuilder {
    request: SearchRequest,
}

impl SearchRequestBuilder {
    pub fn new(query: impl Into<String>) -> Self {
        SearchRequestBuilder {
            request: SearchRequest::new(query),
        }
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.request.limit = limit;
        self
    }

    pub fn offset(mut self, offset: usize) -> Self {
        self.request.offset = offset;
        self
    }

    pub fn build(self) -> SearchRequest {
        self.request
    }
}

/// One page of hits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    /// Hits on this page, best first.
    pub hits: Vec<SearchHit>,
    /// Number of matching entries across all pages.
    pub total: usize,
}

impl SearchResults {
    /// Cut one page out of a complete, already ordered hit list.
    pub fn paginate(hits: Vec<SearchHit>, request: &SearchRequest) -> Self {
        let total = hits.len();
        let hits = hits
            .into_iter()
            .skip(request.offset)
            .take(request.limit)
            .collect();
        SearchResults { hits, total }
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }
}
