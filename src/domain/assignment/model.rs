//! Assignment domain entity and its state machine

use std::borrow::Cow;
use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::domain::common::{AssignmentState, Location};
use crate::domain::specification::{cmp_text, Identified, Searchable, SortField};
use crate::domain::{DomainError, DomainResult};

impl AssignmentState {
    /// `Accepted` and `Declined` can never change again.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Accepted | Self::Declined)
    }
}

/// An asset handed to a user by an admin.
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    pub id: Uuid,
    pub asset_id: Uuid,
    pub assigned_to: Uuid,
    pub assigned_by: Uuid,
    pub assigned_date: NaiveDate,
    pub note: String,
    pub state: AssignmentState,
    pub location: Location,
    /// Open or completed return request, if one was raised
    pub return_request_id: Option<Uuid>,
    pub is_deleted: bool,
    pub created_by: String,
    pub created_on: DateTime<Utc>,
}

impl Assignment {
    pub fn new(
        asset_id: Uuid,
        assigned_to: Uuid,
        assigned_by: Uuid,
        assigned_date: NaiveDate,
        note: impl Into<String>,
        location: Location,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            asset_id,
            assigned_to,
            assigned_by,
            assigned_date,
            note: note.into().trim().to_string(),
            state: AssignmentState::WaitingForAcceptance,
            location,
            return_request_id: None,
            is_deleted: false,
            created_by: assigned_by.to_string(),
            created_on: Utc::now(),
        }
    }

    /// Applies a state change requested by the assignee.
    ///
    /// Leaves `self` untouched when the transition is rejected.
    pub fn change_state(&mut self, new_state: AssignmentState) -> DomainResult<()> {
        if self.state.is_terminal() {
            return Err(DomainError::InvalidState(
                "Assignment state cannot be changed.".into(),
            ));
        }
        if new_state == AssignmentState::WaitingForAcceptance {
            return Err(DomainError::InvalidState(
                "Assignment is already waiting for acceptance.".into(),
            ));
        }
        self.state = new_state;
        Ok(())
    }

    pub fn can_request_return(&self) -> bool {
        !self.is_deleted && self.state == AssignmentState::Accepted && self.return_request_id.is_none()
    }
}

impl Identified for Assignment {
    fn id(&self) -> Uuid {
        self.id
    }
}

/// Assignment joined with the asset and user fields shown in lists.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentDetail {
    pub assignment: Assignment,
    pub asset_code: String,
    pub asset_name: String,
    pub specification: String,
    pub assigned_to_username: String,
    pub assigned_by_username: String,
}

impl Identified for AssignmentDetail {
    fn id(&self) -> Uuid {
        self.assignment.id
    }
}

impl Searchable for AssignmentDetail {
    fn search_fields(&self) -> Vec<Cow<'_, str>> {
        vec![
            Cow::Borrowed(self.asset_code.as_str()),
            Cow::Borrowed(self.asset_name.as_str()),
            Cow::Borrowed(self.assigned_to_username.as_str()),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentSortField {
    AssetCode,
    AssetName,
    AssignedTo,
    AssignedBy,
    AssignedDate,
    State,
}

impl SortField<AssignmentDetail> for AssignmentSortField {
    const DEFAULT: Self = Self::AssignedDate;
    const ALL: &'static [Self] = &[
        Self::AssetCode,
        Self::AssetName,
        Self::AssignedTo,
        Self::AssignedBy,
        Self::AssignedDate,
        Self::State,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::AssetCode => "assetCode",
            Self::AssetName => "assetName",
            Self::AssignedTo => "assignedTo",
            Self::AssignedBy => "assignedBy",
            Self::AssignedDate => "assignedDate",
            Self::State => "state",
        }
    }

    fn compare(self, a: &AssignmentDetail, b: &AssignmentDetail) -> Ordering {
        match self {
            Self::AssetCode => cmp_text(&a.asset_code, &b.asset_code),
            Self::AssetName => cmp_text(&a.asset_name, &b.asset_name),
            Self::AssignedTo => cmp_text(&a.assigned_to_username, &b.assigned_to_username),
            Self::AssignedBy => cmp_text(&a.assigned_by_username, &b.assigned_by_username),
            Self::AssignedDate => a.assignment.assigned_date.cmp(&b.assignment.assigned_date),
            Self::State => a.assignment.state.cmp(&b.assignment.state),
        }
    }
}
