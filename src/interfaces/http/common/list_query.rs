//! Query-string extractor for list endpoints.
//!
//! Parameter names are matched case-insensitively and ignoring `_` and `-`,
//! so `pageNumber`, `page_number` and `PAGE-NUMBER` all reach the field
//! renamed `pagenumber` on the query struct.

use axum::extract::{FromRequestParts, Query};
use axum::http::request::Parts;
use axum::http::Uri;
use serde::de::DeserializeOwned;
use url::form_urlencoded;

use super::ApiError;

#[derive(Debug)]
pub struct ListQuery<T>(pub T);

/// Lowercases `key` and drops `_` and `-`.
pub fn normalize_key(key: &str) -> String {
    key.chars()
        .filter(|c| *c != '_' && *c != '-')
        .flat_map(char::to_lowercase)
        .collect()
}

/// Rewrites every key of a raw query string with [`normalize_key`].
/// Empty values are dropped so they read as "not supplied".
pub fn normalize_query(raw: &str) -> String {
    let mut out = form_urlencoded::Serializer::new(String::new());
    for (key, value) in form_urlencoded::parse(raw.as_bytes()) {
        if value.trim().is_empty() {
            continue;
        }
        out.append_pair(&normalize_key(&key), &value);
    }
    out.finish()
}

impl<S, T> FromRequestParts<S> for ListQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query = normalize_query(parts.uri.query().unwrap_or_default());
        let uri: Uri = format!("/?{}", query)
            .parse()
            .map_err(|e| ApiError::bad_request(format!("Invalid query: {}", e)))?;
        let Query(value) = Query::<T>::try_from_uri(&uri)?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    use crate::application::dto::UserListQuery;

    async fn extract(uri: &str) -> Result<UserListQuery, ApiError> {
        let (mut parts, _) = Request::builder().uri(uri).body(()).unwrap().into_parts();
        ListQuery::<UserListQuery>::from_request_parts(&mut parts, &())
            .await
            .map(|ListQuery(q)| q)
    }

    #[test]
    fn keys_ignore_case_and_separators() {
        assert_eq!(normalize_key("pageNumber"), "pagenumber");
        assert_eq!(normalize_key("page_size"), "pagesize");
        assert_eq!(normalize_key("IS-DESCENDING"), "isdescending");
    }

    #[test]
    fn values_survive_normalization() {
        assert_eq!(normalize_query("Search=j%20o&orderBy="), "search=j+o");
    }

    #[tokio::test]
    async fn mixed_spellings_reach_the_same_fields() {
        let q = extract("/users?pageNumber=2&page_size=5&ISDESCENDING=true&OrderBy=username&search=jo")
            .await
            .unwrap();
        assert_eq!(q.page_number, Some(2));
        assert_eq!(q.page_size, Some(5));
        assert_eq!(q.is_descending, Some(true));
        assert_eq!(q.order_by.as_deref(), Some("username"));
        assert_eq!(q.search.as_deref(), Some("jo"));
    }

    #[tokio::test]
    async fn no_query_string_gives_defaults() {
        let q = extract("/users").await.unwrap();
        assert_eq!(q.page_number, None);
        assert_eq!(q.search, None);
    }

    #[tokio::test]
    async fn non_numeric_page_is_rejected() {
        assert!(extract("/users?pageNumber=two").await.is_err());
    }
}
