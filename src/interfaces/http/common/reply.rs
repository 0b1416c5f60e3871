//! Envelope → HTTP status mapping
//!
//! Succeeded → 200 (201 for creations), not found → 404, any other failure → 400.
//! The body is the envelope in every case.

use axum::http::StatusCode;
use axum::Json;

use crate::shared::{PagedResponse, Response};

pub type Reply<T> = (StatusCode, Json<Response<T>>);
pub type PageReply<T> = (StatusCode, Json<PagedResponse<T>>);

fn status(succeeded: bool, not_found: bool, ok: StatusCode) -> StatusCode {
    if succeeded {
        ok
    } else if not_found {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    }
}

pub fn reply<T>(response: Response<T>) -> Reply<T> {
    (status(response.succeeded, response.is_not_found(), StatusCode::OK), Json(response))
}

pub fn created<T>(response: Response<T>) -> Reply<T> {
    (status(response.succeeded, response.is_not_found(), StatusCode::CREATED), Json(response))
}

pub fn reply_page<T>(page: PagedResponse<T>) -> PageReply<T> {
    (status(page.succeeded, page.is_not_found(), StatusCode::OK), Json(page))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::DomainError;

    #[test]
    fn statuses_follow_the_envelope() {
        assert_eq!(created(Response::success(1)).0, StatusCode::CREATED);
        assert_eq!(reply(Response::success(1)).0, StatusCode::OK);

        let missing: Response<u8> = DomainError::not_found("Asset", 7).into();
        assert_eq!(reply(missing).0, StatusCode::NOT_FOUND);

        let invalid: Response<u8> = DomainError::validation("bad").into();
        assert_eq!(created(invalid).0, StatusCode::BAD_REQUEST);

        let conflict: PagedResponse<u8> = DomainError::Conflict("dup".into()).into();
        assert_eq!(reply_page(conflict).0, StatusCode::BAD_REQUEST);
    }
}
