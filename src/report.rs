//! Per-task duration summaries.

use chrono::{DateTime, TimeDelta, Utc};

use crate::types::TaskSummary;

/// Render an elapsed duration as `"{hours}h{minutes}m"`.
///
/// The duration is rounded to the nearest minute (half a minute rounds up)
/// before splitting, so hours are not capped at 24 and minutes are `0..60`.
pub fn format_duration(elapsed: TimeDelta) -> String {
    let secs = elapsed.num_seconds().max(0);
    let minutes = (secs + 30) / 60;
    format!("{}h{}m", minutes / 60, minutes % 60)
}

/// Build the report row for one task.
pub fn summarize(
    id: String,
    created_at: DateTime<Utc>,
    finished_at: Option<DateTime<Utc>>,
) -> TaskSummary {
    TaskSummary {
        id,
        created_at,
        finished_at,
        summary_time: finished_at.map(|end| format_duration(end - created_at)),
    }
}
