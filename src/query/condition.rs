//! Immutable conjunctive SQL conditions with bound parameters.

use rusqlite::types::Value;

/// A conjunction of SQL clauses with their positional (`?`) parameters.
///
/// Clause text only ever comes from fixed column names and operators inside
/// this crate. Client values travel exclusively in `params`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Condition {
    clauses: Vec<String>,
    params: Vec<Value>,
}

impl Condition {
    /// The empty conjunction, which matches every row.
    pub fn all() -> Self {
        Self::default()
    }

    pub(crate) fn clause(sql: impl Into<String>, params: impl IntoIterator<Item = Value>) -> Self {
        Self {
            clauses: vec![sql.into()],
            params: params.into_iter().collect(),
        }
    }

    /// Conjoin two conditions; clause order and parameter order are preserved.
    pub fn and(mut self, other: Condition) -> Self {
        self.clauses.extend(other.clauses);
        self.params.extend(other.params);
        self
    }

    pub fn matches_all(&self) -> bool {
        self.clauses.is_empty()
    }

    /// SQL text suitable for a `WHERE` clause.
    pub fn to_sql(&self) -> String {
        if self.clauses.is_empty() {
            return "1 = 1".to_string();
        }
        self.clauses
            .iter()
            .map(|c| format!("({c})"))
            .collect::<Vec<_>>()
            .join(" AND ")
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }
}

impl FromIterator<Condition> for Condition {
    fn from_iter<I: IntoIterator<Item = Condition>>(iter: I) -> Self {
        iter.into_iter().fold(Condition::all(), Condition::and)
    }
}
