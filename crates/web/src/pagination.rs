use axum::http::Uri;
use drones_storage::dto::common::{PaginatedResponse, PaginationParams};

use crate::error::WebError;

/// Wraps one page of results in the list envelope, with links relative to the request URI.
pub fn paginate<T>(
    uri: &Uri,
    pagination: &PaginationParams,
    results: Vec<T>,
    total_items: i64,
) -> Result<PaginatedResponse<T>, WebError> {
    if pagination.is_out_of_range(total_items) {
        return Err(WebError::InvalidPage);
    }

    let (next, previous) = pagination.links(uri.path(), uri.query(), total_items);

    Ok(PaginatedResponse::new(results, total_items, next, previous))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_builds_links_from_uri() {
        let uri: Uri = "/drone-categories/?name=Hexacopter&page_size=1".parse().unwrap();
        let pagination = PaginationParams {
            page: 1,
            page_size: 1,
        };

        let response = paginate(&uri, &pagination, vec!["Hexacopter"], 2).unwrap();
        assert_eq!(response.count, 2);
        assert_eq!(
            response.next.as_deref(),
            Some("/drone-categories/?name=Hexacopter&page_size=1&page=2")
        );
        assert_eq!(response.previous, None);
    }

    #[test]
    fn test_paginate_rejects_pages_past_the_end() {
        let uri: Uri = "/drones/?page=3".parse().unwrap();
        let pagination = PaginationParams {
            page: 3,
            page_size: 50,
        };

        let result = paginate::<String>(&uri, &pagination, Vec::new(), 10);
        assert!(matches!(result, Err(WebError::InvalidPage)));
    }
}
