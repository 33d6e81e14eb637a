//! Student gateway contract.
//!
//! Handlers talk to storage only through [`StudentStore`]. Every write is
//! committed before the call returns.

use async_trait::async_trait;
use domain::models::{Student, StudentFields};
use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by a [`StudentStore`].
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Student {0} not found")]
    NotFound(Uuid),

    #[error("Conflicting write on student {0}")]
    Conflict(Uuid),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence gateway for the Student entity.
#[async_trait]
pub trait StudentStore: Send + Sync {
    /// All students currently stored, in no guaranteed order.
    async fn list(&self) -> StoreResult<Vec<Student>>;

    async fn get(&self, id: Uuid) -> StoreResult<Student>;

    /// Inserts a new student; the store assigns the identifier.
    async fn create(&self, fields: StudentFields) -> StoreResult<Student>;

    /// Replaces the mutable fields of an existing student.
    async fn update(&self, id: Uuid, fields: StudentFields) -> StoreResult<Student>;

    async fn delete(&self, id: Uuid) -> StoreResult<()>;

    /// Round-trips to the backing store without touching data.
    async fn ping(&self) -> StoreResult<()>;
}

/// Returns true when the database rejected a write because of a concurrent
/// transaction (serialization failure or deadlock).
pub fn is_write_conflict(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => matches!(
            db_err.code().as_deref(),
            Some("40001") | Some("40P01")
        ),
        _ => false,
    }
}

/// Outcome of an update that lost a write conflict, given whether the row
/// still exists after the competing transaction.
pub fn reconcile_write_conflict(id: Uuid, still_exists: bool) -> StoreError {
    if still_exists {
        StoreError::Conflict(id)
    } else {
        StoreError::NotFound(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    /// Database error carrying only a SQLSTATE code.
    #[derive(Debug)]
    struct SqlState(&'static str);

    impl fmt::Display for SqlState {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "SQLSTATE {}", self.0)
        }
    }

    impl StdError for SqlState {}

    impl sqlx::error::DatabaseError for SqlState {
        fn message(&self) -> &str {
            "could not serialize access"
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.0))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> sqlx::error::ErrorKind {
            sqlx::error::ErrorKind::Other
        }
    }

    fn db_error(code: &'static str) -> sqlx::Error {
        sqlx::Error::Database(Box::new(SqlState(code)))
    }

    #[test]
    fn test_serialization_failure_and_deadlock_are_conflicts() {
        assert!(is_write_conflict(&db_error("40001")));
        assert!(is_write_conflict(&db_error("40P01")));
    }

    #[test]
    fn test_other_database_codes_are_not_conflicts() {
        // unique_violation, not_null_violation
        assert!(!is_write_conflict(&db_error("23505")));
        assert!(!is_write_conflict(&db_error("23502")));
    }

    #[test]
    fn test_reconcile_existing_row_is_conflict() {
        let id = Uuid::new_v4();
        assert!(matches!(
            reconcile_write_conflict(id, true),
            StoreError::Conflict(conflicted) if conflicted == id
        ));
    }

    #[test]
    fn test_reconcile_deleted_row_is_not_found() {
        let id = Uuid::new_v4();
        assert!(matches!(
            reconcile_write_conflict(id, false),
            StoreError::NotFound(missing) if missing == id
        ));
    }

    #[test]
    fn test_store_error_display() {
        let id = Uuid::nil();
        assert_eq!(
            StoreError::NotFound(id).to_string(),
            "Student 00000000-0000-0000-0000-000000000000 not found"
        );
        assert_eq!(
            StoreError::Conflict(id).to_string(),
            "Conflicting write on student 00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn test_store_error_from_sqlx() {
        let err: StoreError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, StoreError::Database(_)));
    }

    #[test]
    fn test_non_database_errors_are_not_conflicts() {
        assert!(!is_write_conflict(&sqlx::Error::RowNotFound));
        assert!(!is_write_conflict(&sqlx::Error::PoolTimedOut));
    }
}
