//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.
//!
//! Mandatory scopes (location or assignee, soft-delete) are applied in SQL;
//! the caller's [`QuerySpecification`](crate::domain::specification::QuerySpecification)
//! is then evaluated over the scoped rows.

pub mod asset_repository;
pub mod assignment_repository;
pub mod repository_provider;
pub mod return_request_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;

use sea_orm::{DbErr, TransactionError};

use crate::domain::{DomainError, DomainResult};

// ── Conversion helpers ──────────────────────────────────────────

/// Reads an enum column stored as its variant name.
pub(crate) fn parse_column<E>(
    column: &'static str,
    raw: &str,
    parse: fn(&str) -> Option<E>,
) -> DomainResult<E> {
    parse(raw).ok_or_else(|| {
        DomainError::Storage(format!("Unexpected value '{}' in column {}", raw, column))
    })
}

/// Maps unique-constraint violations to `Conflict`.
pub(crate) fn insert_err(e: DbErr, what: &str) -> DomainError {
    let msg = e.to_string();
    if msg.contains("UNIQUE") || msg.contains("duplicate") {
        DomainError::Conflict(format!("{} already exists", what))
    } else {
        e.into()
    }
}

pub(crate) fn tx_err(e: TransactionError<DomainError>) -> DomainError {
    match e {
        TransactionError::Connection(db) => db.into(),
        TransactionError::Transaction(e) => e,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Location;

    #[test]
    fn bad_enum_values_are_storage_errors() {
        assert_eq!(parse_column("location", "DaNang", Location::parse).unwrap(), Location::DaNang);
        let err = parse_column("location", "Paris", Location::parse).unwrap_err();
        assert!(err.is_unexpected());
    }

    #[test]
    fn unique_violations_become_conflicts() {
        let err = insert_err(
            DbErr::Custom("UNIQUE constraint failed: users.username".into()),
            "User",
        );
        assert!(matches!(err, DomainError::Conflict(_)));

        let err = insert_err(DbErr::Custom("disk I/O error".into()), "User");
        assert!(matches!(err, DomainError::Storage(_)));
    }
}
