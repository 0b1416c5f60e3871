//! Return request domain entity

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::common::{Location, ReturnRequestState};
use crate::domain::specification::{cmp_opt_text, cmp_text, Identified, Searchable, SortField};
use crate::domain::{DomainError, DomainResult};

/// Request to give an accepted assignment's asset back.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnRequest {
    pub id: Uuid,
    pub assignment_id: Uuid,
    pub requested_by: Uuid,
    pub accepted_by: Option<Uuid>,
    pub returned_date: Option<NaiveDate>,
    pub state: ReturnRequestState,
    pub location: Location,
    pub is_deleted: bool,
    pub created_on: DateTime<Utc>,
}

impl ReturnRequest {
    pub fn new(assignment_id: Uuid, requested_by: Uuid, location: Location) -> Self {
        Self {
            id: Uuid::new_v4(),
            assignment_id,
            requested_by,
            accepted_by: None,
            returned_date: None,
            state: ReturnRequestState::WaitingForReturning,
            location,
            is_deleted: false,
            created_on: Utc::now(),
        }
    }

    pub fn is_open(&self) -> bool {
        !self.is_deleted && self.state == ReturnRequestState::WaitingForReturning
    }

    pub fn complete(&mut self, accepted_by: Uuid, returned_date: NaiveDate) -> DomainResult<()> {
        self.ensure_open()?;
        self.state = ReturnRequestState::Completed;
        self.accepted_by = Some(accepted_by);
        self.returned_date = Some(returned_date);
        Ok(())
    }

    pub fn cancel(&mut self) -> DomainResult<()> {
        self.ensure_open()?;
        self.is_deleted = true;
        Ok(())
    }

    fn ensure_open(&self) -> DomainResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(DomainError::InvalidState(
                "Return request is no longer waiting for returning.".into(),
            ))
        }
    }
}

/// Return request joined with the fields shown in lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnRequestDetail {
    pub request: ReturnRequest,
    pub asset_code: String,
    pub asset_name: String,
    pub assigned_date: NaiveDate,
    pub requested_by_username: String,
    pub accepted_by_username: Option<String>,
}

impl Identified for ReturnRequestDetail {
    fn id(&self) -> Uuid {
        self.request.id
    }
}

impl Searchable for ReturnRequestDetail {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.asset_code.as_str()),
            Cow::Borrowed(self.asset_name.as_str()),
            Cow::Borrowed(self.requested_by_username.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnRequestSortField {
    AssetCode,
    AssetName,
    RequestedBy,
    AssignedDate,
    AcceptedBy,
    ReturnedDate,
    State,
}

impl SortField<ReturnRequestDetail> for ReturnRequestSortField {
    const DEFAULT: Self = Self::AssetCode;
    const ALL: &'static [Self] = &[
        Self::AssetCode,
        Self::AssetName,
        Self::RequestedBy,
        Self::AssignedDate,
        Self::AcceptedBy,
        Self::ReturnedDate,
        Self::State,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::AssetCode => "assetCode",
            Self::AssetName => "assetName",
            Self::RequestedBy => "requestedBy",
            Self::AssignedDate => "assignedDate",
            Self::AcceptedBy => "acceptedBy",
            Self::ReturnedDate => "returnedDate",
            Self::State => "state",
        }
    }

    fn compare(self, a: &ReturnRequestDetail, b: &ReturnRequestDetail) -> Ordering {
        match self {
            Self::AssetCode => cmp_text(&a.asset_code, &b.asset_code),
            Self::AssetName => cmp_text(&a.asset_name, &b.asset_name),
            Self::RequestedBy => cmp_text(&a.requested_by_username, &b.requested_by_username),
            Self::AssignedDate => a.assigned_date.cmp(&b.assigned_date),
            Self::AcceptedBy => cmp_opt_text(
                a.accepted_by_username.as_deref(),
                b.accepted_by_username.as_deref(),
            ),
            Self::ReturnedDate => a.request.returned_date.cmp(&b.request.returned_date),
            Self::State => a.request.state.cmp(&b.request.state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ReturnRequest {
        ReturnRequest::new(Uuid::new_v4(), Uuid::new_v4(), Location::DaNang)
    }

    #[test]
    fn complete_records_acceptor_and_date() {
        let mut r = request();
        let admin = Uuid::new_v4();
        let today = NaiveDate::from_ymd_opt(2024, 7, 3).unwrap();
        r.complete(admin, today).unwrap();
        assert_eq!(r.state, ReturnRequestState::Completed);
        assert_eq!(r.accepted_by, Some(admin));
        assert_eq!(r.returned_date, Some(today));
        assert!(!r.is_open());
    }

    #[test]
    fn closed_requests_reject_further_changes() {
        let mut r = request();
        r.cancel().unwrap();
        assert!(r.is_deleted);
        assert!(r.cancel().is_err());
        assert!(r
            .complete(Uuid::new_v4(), NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .is_err());
    }
}
