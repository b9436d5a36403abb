//! Core types for the time tracker.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A person who owns tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
    pub passport_number: String,
}

/// Fields required to create a user. Already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
    pub passport_number: String,
}

impl NewUser {
    pub(crate) fn into_user(self, id: String) -> User {
        User {
            id,
            surname: self.surname,
            name: self.name,
            patronymic: self.patronymic,
            address: self.address,
            passport_number: self.passport_number,
        }
    }
}

/// Partial update of a user. `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserPatch {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub address: Option<String>,
    pub passport_number: Option<String>,
}

impl UserPatch {
    /// Apply the collapsing policy: a present but empty string means "not set".
    pub fn collapse_empty(self) -> Self {
        fn keep(v: Option<String>) -> Option<String> {
            v.filter(|s| !s.is_empty())
        }
        Self {
            surname: keep(self.surname),
            name: keep(self.name),
            patronymic: keep(self.patronymic),
            address: keep(self.address),
            passport_number: keep(self.passport_number),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.assignments().is_empty()
    }

    /// Column/value pairs for the fields that are present, in column order.
    pub fn assignments(&self) -> Vec<(&'static str, &str)> {
        [
            ("surname", &self.surname),
            ("name", &self.name),
            ("patronymic", &self.patronymic),
            ("address", &self.address),
            ("passport_number", &self.passport_number),
        ]
        .into_iter()
        .filter_map(|(column, value)| value.as_deref().map(|v| (column, v)))
        .collect()
    }
}

/// Public profile returned by the passport lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub surname: String,
    pub name: String,
    pub patronymic: String,
    pub address: String,
}

/// A timed work interval. `finished_at` is unset while the task is in progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
}

/// Read-only report row for one task, computed on every read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSummary {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finished_at: Option<DateTime<Utc>>,
    /// Elapsed time rendered as `"{hours}h{minutes}m"`; absent while in progress.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_time: Option<String>,
}
