//! Storage error translation.
//!
//! This is the only place that looks at SQLite result codes. Callers above
//! the store only ever see [`TrackerError`] kinds.

use rusqlite::ffi;

use crate::error::{TrackerError, TrackerResult};

/// Store operations whose failures carry domain meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    CreateUser,
    UpdateUser,
    DeleteUser,
    StartTask,
    EndTask,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Constraint {
    Unique,
    ForeignKey,
}

fn violated_constraint(err: &rusqlite::Error) -> Option<Constraint> {
    match err {
        rusqlite::Error::SqliteFailure(e, _) => match e.extended_code {
            ffi::SQLITE_CONSTRAINT_UNIQUE => Some(Constraint::Unique),
            ffi::SQLITE_CONSTRAINT_FOREIGNKEY => Some(Constraint::ForeignKey),
            _ => None,
        },
        _ => None,
    }
}

/// Map a failed statement to a domain error kind.
pub fn translate(op: StoreOp, err: rusqlite::Error) -> TrackerError {
    match (op, violated_constraint(&err)) {
        (StoreOp::CreateUser | StoreOp::UpdateUser, Some(Constraint::Unique)) => {
            TrackerError::UserAlreadyExists
        }
        (StoreOp::StartTask, Some(Constraint::ForeignKey)) => TrackerError::UserDoesNotExist,
        _ => TrackerError::internal(err),
    }
}

/// A by-id write that touched no row means the target is missing.
pub fn expect_affected(op: StoreOp, affected: usize) -> TrackerResult<()> {
    if affected > 0 {
        return Ok(());
    }
    Err(match op {
        StoreOp::EndTask => TrackerError::TaskDoesNotExist,
        _ => TrackerError::UserDoesNotExist,
    })
}

/// A report with no rows is its own outcome rather than an empty list.
pub fn expect_report_rows<T>(rows: Vec<T>) -> TrackerResult<Vec<T>> {
    if rows.is_empty() {
        Err(TrackerError::NoTasksForUser)
    } else {
        Ok(rows)
    }
}

impl From<rusqlite::Error> for TrackerError {
    fn from(err: rusqlite::Error) -> Self {
        TrackerError::internal(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn failure(code: i32, msg: &str) -> rusqlite::Error {
        rusqlite::Error::SqliteFailure(ffi::Error::new(code), Some(msg.to_string()))
    }

    #[test]
    fn unique_violation_on_user_writes() {
        let msg = "UNIQUE constraint failed: users.passport_number";
        for op in [StoreOp::CreateUser, StoreOp::UpdateUser] {
            let err = translate(op, failure(ffi::SQLITE_CONSTRAINT_UNIQUE, msg));
            assert_eq!(err.code(), ErrorCode::UserAlreadyExists);
        }
    }

    #[test]
    fn foreign_key_violation_on_task_start() {
        let err = translate(
            StoreOp::StartTask,
            failure(ffi::SQLITE_CONSTRAINT_FOREIGNKEY, "FOREIGN KEY constraint failed"),
        );
        assert_eq!(err.code(), ErrorCode::UserDoesNotExist);
    }

    #[test]
    fn everything_else_is_internal() {
        let err = translate(StoreOp::CreateUser, failure(ffi::SQLITE_BUSY, "database is locked"));
        assert_eq!(err.code(), ErrorCode::InternalError);
        assert_eq!(err.to_string(), "internal error");

        let err = translate(
            StoreOp::DeleteUser,
            failure(ffi::SQLITE_CONSTRAINT_UNIQUE, "UNIQUE constraint failed"),
        );
        assert_eq!(err.code(), ErrorCode::InternalError);

        let err = translate(StoreOp::EndTask, rusqlite::Error::QueryReturnedNoRows);
        assert_eq!(err.code(), ErrorCode::InternalError);
    }

    #[test]
    fn zero_affected_rows() {
        assert!(expect_affected(StoreOp::DeleteUser, 1).is_ok());
        assert_eq!(
            expect_affected(StoreOp::UpdateUser, 0).unwrap_err().code(),
            ErrorCode::UserDoesNotExist
        );
        assert_eq!(
            expect_affected(StoreOp::DeleteUser, 0).unwrap_err().code(),
            ErrorCode::UserDoesNotExist
        );
        assert_eq!(
            expect_affected(StoreOp::EndTask, 0).unwrap_err().code(),
            ErrorCode::TaskDoesNotExist
        );
    }

    #[test]
    fn empty_report() {
        assert_eq!(
            expect_report_rows(Vec::<u8>::new()).unwrap_err().code(),
            ErrorCode::NoTasksForUser
        );
        assert_eq!(expect_report_rows(vec![1]).unwrap(), vec![1]);
    }
}
