//! Pagination query parameters for listing endpoints.

use axum::extract::Query;
use serde::Deserialize;
use skilldir_const::limits::{DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};

/// Raw `?limit=&offset=` query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PaginationParams {
    /// Items per page (defaults applied by [`PaginationParams::validate`])
    pub limit: Option<usize>,
    /// Items to skip
    pub offset: Option<usize>,
}

/// Extractor alias used by listing handlers
pub type PaginationQuery = Query<PaginationParams>;

/// Validated pagination window
#[derive(Debug, Clone, Copy)]
pub struct ValidatedPagination {
    pub limit: usize,
    pub offset: usize,
}

impl PaginationParams {
    /// Apply defaults and clamp the limit to the allowed maximum
    pub fn validate(&self) -> ValidatedPagination {
        ValidatedPagination {
            limit: self.limit.unwrap_or(DEFAULT_PAGE_LIMIT).clamp(1, MAX_PAGE_LIMIT),
            offset: self.offset.unwrap_or(0),
        }
    }
}
