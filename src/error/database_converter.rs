use crate::error::AppError;
use diesel::result::{DatabaseErrorKind, Error as DieselError};

/// Name of the partial unique index enforcing (job_name, args) uniqueness
/// among enabled schedules. Must match the migration.
pub const SCHEDULE_UNIQUE_CONSTRAINT: &str = "unique_schedule_name_args";

/// Converts diesel errors to structured AppError variants.
///
/// The schedule uniqueness invariant is enforced by the database, not by
/// in-process locking; under concurrent schedule attempts for the same
/// (name, args) pair exactly one insert succeeds and the rest surface here
/// as a unique violation. Classification is by error kind and constraint
/// name, never by message text.
pub struct DatabaseErrorConverter;

impl DatabaseErrorConverter {
    pub fn convert_diesel_error(error: DieselError, operation: &str) -> AppError {
        match error {
            DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
                match info.constraint_name() {
                    Some(SCHEDULE_UNIQUE_CONSTRAINT) => AppError::DuplicateJobNameArgs,
                    _ => AppError::Database {
                        operation: operation.to_string(),
                        source: anyhow::Error::msg(format!(
                            "unique constraint violation: {}",
                            info.message()
                        )),
                    },
                }
            }
            DieselError::DatabaseError(_, info) => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::msg(info.message().to_string()),
            },
            other => AppError::Database {
                operation: operation.to_string(),
                source: anyhow::Error::from(other),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use diesel::result::{DatabaseErrorKind, Error as DieselError};

    struct MockDatabaseErrorInfo {
        message: String,
        constraint_name: Option<String>,
    }

    impl diesel::result::DatabaseErrorInformation for MockDatabaseErrorInfo {
        fn message(&self) -> &str {
            &self.message
        }

        fn details(&self) -> Option<&str> {
            None
        }

        fn hint(&self) -> Option<&str> {
            None
        }

        fn table_name(&self) -> Option<&str> {
            None
        }

        fn column_name(&self) -> Option<&str> {
            None
        }

        fn constraint_name(&self) -> Option<&str> {
            self.constraint_name.as_deref()
        }

        fn statement_position(&self) -> Option<i32> {
            None
        }
    }

    fn unique_violation(constraint: Option<&str>) -> DieselError {
        let info = MockDatabaseErrorInfo {
            message: "duplicate key value violates unique constraint".to_string(),
            constraint_name: constraint.map(String::from),
        };
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, Box::new(info))
    }

    #[test]
    fn schedule_unique_violation_becomes_duplicate() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            unique_violation(Some(SCHEDULE_UNIQUE_CONSTRAINT)),
            "insert schedule",
        );
        assert!(matches!(result, AppError::DuplicateJobNameArgs));
        assert_eq!(result.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn unrelated_unique_violation_stays_generic() {
        let result = DatabaseErrorConverter::convert_diesel_error(
            unique_violation(Some("audit_pkey")),
            "insert audit",
        );
        match result {
            AppError::Database { operation, .. } => assert_eq!(operation, "insert audit"),
            other => panic!("expected Database error, got {other:?}"),
        }
    }

    #[test]
    fn other_database_errors_stay_generic() {
        let info = MockDatabaseErrorInfo {
            message: "deadlock detected".to_string(),
            constraint_name: None,
        };
        let error =
            DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, Box::new(info));
        let result = DatabaseErrorConverter::convert_diesel_error(error, "insert schedule");
        assert_eq!(result.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
