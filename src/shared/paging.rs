//! Builds [`PagedResponse`] envelopes with navigation links.

use url::Url;

use super::errors::InfraError;
use super::pagination::PaginationFilter;
use super::response::PagedResponse;

/// Turns a route plus page coordinates into an absolute link.
#[derive(Debug, Clone)]
pub struct UriService {
    base: Url,
}

impl UriService {
    pub fn new(base_url: &str) -> Result<Self, InfraError> {
        Ok(Self {
            base: Url::parse(base_url)?,
        })
    }

    pub fn page_uri(&self, route: &str, page_number: u64, page_size: u32) -> String {
        let mut url = self.base.clone();
        let path = format!(
            "{}/{}",
            self.base.path().trim_end_matches('/'),
            route.trim_start_matches('/')
        );
        url.set_path(&path);
        url.query_pairs_mut()
            .clear()
            .append_pair("pageNumber", &page_number.to_string())
            .append_pair("pageSize", &page_size.to_string());
        url.into()
    }
}

pub fn total_pages(total_records: u64, page_size: u32) -> u64 {
    if page_size == 0 {
        return 0;
    }
    total_records.div_ceil(page_size as u64)
}

/// Wraps an already-sliced page into a succeeded envelope.
///
/// `total_records` must be the size of the filtered, unpaged set.
pub fn build_page<T>(
    data: Vec<T>,
    filter: &PaginationFilter,
    total_records: u64,
    uri: &UriService,
    route: &str,
) -> PagedResponse<T> {
    let page_number = filter.page_number() as u64;
    let page_size = filter.page_size();
    let total_pages = total_pages(total_records, page_size);

    let link = |n: u64| uri.page_uri(route, n, page_size);

    let next_page = (page_number >= 1 && page_number < total_pages).then(|| link(page_number + 1));
    let previous_page =
        (page_number > 1 && page_number <= total_pages).then(|| link(page_number - 1));
    let last_page = (total_pages > 0).then(|| link(total_pages));

    PagedResponse {
        data,
        page_number: filter.page_number(),
        page_size,
        total_pages,
        total_records,
        first_page: Some(link(1)),
        last_page,
        next_page,
        previous_page,
        succeeded: true,
        message: None,
        errors: Vec::new(),
        not_found: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uri() -> UriService {
        UriService::new("http://localhost:8080").unwrap()
    }

    #[test]
    fn page_uri_appends_paging_query() {
        let u = uri().page_uri("/api/v1/users", 2, 10);
        assert_eq!(u, "http://localhost:8080/api/v1/users?pageNumber=2&pageSize=10");
    }

    #[test]
    fn page_uri_keeps_base_path_prefix() {
        let u = UriService::new("https://example.com/assets/")
            .unwrap()
            .page_uri("api/v1/assets", 1, 5);
        assert_eq!(u, "https://example.com/assets/api/v1/assets?pageNumber=1&pageSize=5");
    }

    #[test]
    fn rejects_relative_base() {
        assert!(UriService::new("/not/absolute").is_err());
    }

    #[test]
    fn total_pages_uses_ceiling_division() {
        assert_eq!(total_pages(25, 10), 3);
        assert_eq!(total_pages(30, 10), 3);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(10, 0), 0);
    }

    #[test]
    fn first_page_has_no_previous_link() {
        let f = PaginationFilter::new(1, 10);
        let page = build_page(vec![0; 10], &f, 25, &uri(), "/api/v1/users");
        assert_eq!(page.total_pages, 3);
        assert!(page.previous_page.is_none());
        assert_eq!(
            page.next_page.as_deref(),
            Some("http://localhost:8080/api/v1/users?pageNumber=2&pageSize=10")
        );
        assert_eq!(
            page.last_page.as_deref(),
            Some("http://localhost:8080/api/v1/users?pageNumber=3&pageSize=10")
        );
    }

    #[test]
    fn last_page_has_no_next_link() {
        let f = PaginationFilter::new(3, 10);
        let page = build_page(vec![0; 5], &f, 25, &uri(), "/api/v1/users");
        assert!(page.next_page.is_none());
        assert_eq!(
            page.previous_page.as_deref(),
            Some("http://localhost:8080/api/v1/users?pageNumber=2&pageSize=10")
        );
        assert_eq!(page.data.len(), 5);
    }

    #[test]
    fn empty_result_has_no_navigation() {
        let f = PaginationFilter::new(1, 10);
        let page = build_page(Vec::<u8>::new(), &f, 0, &uri(), "/api/v1/users");
        assert_eq!(page.total_pages, 0);
        assert!(page.next_page.is_none());
        assert!(page.previous_page.is_none());
        assert!(page.last_page.is_none());
        assert!(page.first_page.is_some());
        assert!(page.succeeded);
    }

    #[test]
    fn page_past_the_end_links_nowhere() {
        let f = PaginationFilter::new(7, 10);
        let page = build_page(Vec::<u8>::new(), &f, 25, &uri(), "/api/v1/users");
        assert!(page.next_page.is_none());
        assert!(page.previous_page.is_none());
        assert_eq!(page.page_number, 7);
    }
}
