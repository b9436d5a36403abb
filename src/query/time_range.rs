//! Report time-window bounds.

use chrono::{DateTime, Utc};
use rusqlite::types::Value;

use super::condition::Condition;
use crate::error::TrackerResult;
use crate::timestamp;

/// Optional report window: tasks created at or after `start` and finished
/// at or before `end`. Either bound may be missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl TimeRange {
    /// Parse raw RFC 3339 bounds; empty strings count as absent.
    pub fn parse(start: Option<&str>, end: Option<&str>) -> TrackerResult<Self> {
        let bound = |field: &str, raw: Option<&str>| match raw {
            None | Some("") => Ok(None),
            Some(s) => timestamp::parse_rfc3339(field, s).map(Some),
        };
        Ok(Self {
            start: bound("startTime", start)?,
            end: bound("endTime", end)?,
        })
    }

    /// Predicate over the task table's `created_at`/`finished_at` columns.
    ///
    /// An end bound excludes in-progress tasks since their `finished_at` is NULL.
    /// A fractional start bound is rounded up, an end bound down.
    pub fn condition(&self) -> Condition {
        let start = self.start.map(|ts| {
            Condition::clause(
                "created_at >= ?",
                [Value::Text(timestamp::to_storage(&timestamp::ceil_secs(&ts)))],
            )
        });
        let end = self.end.map(|ts| {
            Condition::clause("finished_at <= ?", [Value::Text(timestamp::to_storage(&ts))])
        });
        start.into_iter().chain(end).collect()
    }
}
