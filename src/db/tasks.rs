//! Task lifecycle and per-user duration reports.

use chrono::{DateTime, SubsecRound, Utc};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter};
use uuid::Uuid;

use super::error::{expect_affected, expect_report_rows, translate, StoreOp};
use super::{timestamp_column, Database};
use crate::error::TrackerResult;
use crate::query::{Condition, TimeRange};
use crate::report;
use crate::timestamp;
use crate::types::{Task, TaskSummary};

impl Database {
    /// Start a task for `user_id` now.
    pub fn start_task(&self, user_id: &str) -> TrackerResult<Task> {
        self.start_task_at(user_id, timestamp::now())
    }

    /// Start a task with an explicit creation time.
    pub fn start_task_at(&self, user_id: &str, created_at: DateTime<Utc>) -> TrackerResult<Task> {
        let id = Uuid::new_v4().to_string();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO tasks (id, user_id, created_at) VALUES (?1, ?2, ?3)",
                params![id, user_id, timestamp::to_storage(&created_at)],
            )
            .map_err(|e| translate(StoreOp::StartTask, e))?;

            Ok(Task {
                id,
                user_id: user_id.to_string(),
                created_at: created_at.trunc_subsecs(0),
                finished_at: None,
            })
        })
    }

    /// Finish an in-progress task now, returning the completion time.
    pub fn end_task(&self, task_id: &str) -> TrackerResult<DateTime<Utc>> {
        self.end_task_at(task_id, timestamp::now())
    }

    /// Finish an in-progress task at an explicit time.
    ///
    /// Ending a task twice is reported the same as ending a missing one.
    pub fn end_task_at(
        &self,
        task_id: &str,
        finished_at: DateTime<Utc>,
    ) -> TrackerResult<DateTime<Utc>> {
        let stored = timestamp::to_storage(&finished_at);

        self.with_conn(|conn| {
            let affected = conn
                .execute(
                    "UPDATE tasks SET finished_at = ?1 WHERE id = ?2 AND finished_at IS NULL",
                    params![stored, task_id],
                )
                .map_err(|e| translate(StoreOp::EndTask, e))?;
            expect_affected(StoreOp::EndTask, affected)?;
            Ok(finished_at.trunc_subsecs(0))
        })
    }

    /// Duration report for one user's tasks within `range`.
    ///
    /// Longest first; in-progress tasks last, newest first among equals.
    pub fn task_report(&self, user_id: &str, range: &TimeRange) -> TrackerResult<Vec<TaskSummary>> {
        let condition =
            Condition::clause("user_id = ?", [Value::Text(user_id.to_string())]).and(range.condition());
        let sql = format!(
            "SELECT id, created_at, finished_at FROM tasks
             WHERE {}
             ORDER BY unixepoch(finished_at) - unixepoch(created_at) DESC NULLS LAST,
                      created_at DESC, id ASC",
            condition.to_sql()
        );

        let rows = self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(condition.params()), |row| {
                    let id: String = row.get(0)?;
                    let created_at: String = row.get(1)?;
                    let finished_at: Option<String> = row.get(2)?;
                    Ok(report::summarize(
                        id,
                        timestamp_column(1, &created_at)?,
                        finished_at
                            .as_deref()
                            .map(|raw| timestamp_column(2, raw))
                            .transpose()?,
                    ))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(rows)
        })?;

        expect_report_rows(rows)
    }
}
