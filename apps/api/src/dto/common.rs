use mentor_application::{ListQuery, Page};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Health response payload.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/health-response.ts"
)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Query parameters accepted by paged listings.
#[derive(Debug, Default, Deserialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/list-query-params.ts"
)]
pub struct ListQueryParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl From<ListQueryParams> for ListQuery {
    fn from(params: ListQueryParams) -> Self {
        Self {
            page: params.page.unwrap_or_default(),
            size: params.size,
            sort_by: params.sort,
        }
    }
}

/// One page of a listing.
#[derive(Debug, Serialize, TS)]
#[ts(
    export,
    export_to = "../../../../packages/api-types/src/generated/page-response.ts"
)]
pub struct PageResponse<T> {
    pub content: Vec<T>,
    pub page: u32,
    pub size: u32,
    pub total_elements: u64,
    pub total_pages: u64,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            page: page.page(),
            size: page.size(),
            total_elements: page.total_elements(),
            total_pages: page.total_pages(),
            content: page.into_items(),
        }
    }
}
