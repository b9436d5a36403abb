//! Async tracker operations over the blocking SQLite store.

use chrono::{DateTime, Utc};
use tracing::{debug, error, info, warn};

use crate::db::Database;
use crate::error::{TrackerError, TrackerResult};
use crate::query::{Pagination, TimeRange, UserFilter};
use crate::types::{NewUser, Task, TaskSummary, User, UserInfo, UserPatch};

/// The operations exposed to the transport layer.
#[derive(Clone)]
pub struct Tracker {
    db: Database,
}

impl Tracker {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Run one store call on the blocking pool.
    async fn run<F, T>(&self, f: F) -> TrackerResult<T>
    where
        F: FnOnce(&Database) -> TrackerResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let db = self.db.clone();
        tokio::task::spawn_blocking(move || f(&db))
            .await
            .map_err(|e| TrackerError::internal(anyhow::anyhow!("store task join error: {e}")))?
    }

    pub async fn create_user(&self, user: NewUser) -> TrackerResult<User> {
        let user = self.run(move |db| db.create_user(user)).await.inspect_err(log_failure)?;
        info!(user_id = %user.id, "Created user");
        Ok(user)
    }

    pub async fn delete_user(&self, id: String) -> TrackerResult<()> {
        self.run({
            let id = id.clone();
            move |db| db.delete_user(&id)
        })
        .await
        .inspect_err(log_failure)?;
        info!(user_id = %id, "Deleted user");
        Ok(())
    }

    pub async fn update_user(&self, id: String, patch: UserPatch) -> TrackerResult<()> {
        let patch = patch.collapse_empty();
        self.run({
            let id = id.clone();
            move |db| db.update_user(&id, &patch)
        })
        .await
        .inspect_err(log_failure)?;
        info!(user_id = %id, "Updated user");
        Ok(())
    }

    pub async fn list_users(&self, filter: UserFilter, page: Pagination) -> TrackerResult<Vec<User>> {
        let users = self
            .run(move |db| db.list_users(&filter, page))
            .await
            .inspect_err(log_failure)?;
        debug!(count = users.len(), limit = page.limit, offset = page.offset, "Listed users");
        Ok(users)
    }

    pub async fn user_info(&self, series: String, number: String) -> TrackerResult<UserInfo> {
        self.run(move |db| db.user_info(&series, &number))
            .await
            .inspect_err(log_failure)
    }

    pub async fn start_task(&self, user_id: String) -> TrackerResult<Task> {
        let task = self
            .run(move |db| db.start_task(&user_id))
            .await
            .inspect_err(log_failure)?;
        info!(task_id = %task.id, user_id = %task.user_id, "Started task");
        Ok(task)
    }

    pub async fn end_task(&self, task_id: String) -> TrackerResult<DateTime<Utc>> {
        let finished_at = self
            .run({
                let task_id = task_id.clone();
                move |db| db.end_task(&task_id)
            })
            .await
            .inspect_err(log_failure)?;
        info!(task_id = %task_id, %finished_at, "Ended task");
        Ok(finished_at)
    }

    pub async fn task_report(&self, user_id: String, range: TimeRange) -> TrackerResult<Vec<TaskSummary>> {
        let rows = self
            .run(move |db| db.task_report(&user_id, &range))
            .await
            .inspect_err(log_failure)?;
        debug!(count = rows.len(), "Built task report");
        Ok(rows)
    }
}

fn log_failure(err: &TrackerError) {
    match err {
        TrackerError::Internal(source) => error!(error = ?source, "Store operation failed"),
        other => warn!(code = ?other.code(), "{other}"),
    }
}
