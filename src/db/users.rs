//! User CRUD and filtered listing.

use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, OptionalExtension, Row};
use uuid::Uuid;

use super::error::{expect_affected, translate, StoreOp};
use super::Database;
use crate::error::{TrackerError, TrackerResult};
use crate::query::{Pagination, UserFilter};
use crate::types::{NewUser, User, UserInfo, UserPatch};

const USER_COLUMNS: &str = "id, surname, name, patronymic, address, passport_number";

fn parse_user_row(row: &Row) -> rusqlite::Result<User> {
    Ok(User {
        id: row.get(0)?,
        surname: row.get(1)?,
        name: row.get(2)?,
        patronymic: row.get(3)?,
        address: row.get(4)?,
        passport_number: row.get(5)?,
    })
}

impl Database {
    /// Insert a new user. Passport uniqueness is left to the store's constraint.
    pub fn create_user(&self, user: NewUser) -> TrackerResult<User> {
        let id = Uuid::new_v4().to_string();

        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (id, surname, name, patronymic, address, passport_number)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                params![
                    id,
                    user.surname,
                    user.name,
                    user.patronymic,
                    user.address,
                    user.passport_number
                ],
            )
            .map_err(|e| translate(StoreOp::CreateUser, e))?;

            Ok(user.into_user(id))
        })
    }

    /// Delete a user; their tasks go with them.
    pub fn delete_user(&self, id: &str) -> TrackerResult<()> {
        self.with_conn(|conn| {
            let affected = conn
                .execute("DELETE FROM users WHERE id = ?1", params![id])
                .map_err(|e| translate(StoreOp::DeleteUser, e))?;
            expect_affected(StoreOp::DeleteUser, affected)
        })
    }

    /// Overwrite only the fields present in `patch`.
    pub fn update_user(&self, id: &str, patch: &UserPatch) -> TrackerResult<()> {
        let assignments = patch.assignments();
        if assignments.is_empty() {
            return Err(TrackerError::validation("body", "no fields to update"));
        }

        let set_clause = assignments
            .iter()
            .map(|(column, _)| format!("{column} = ?"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!("UPDATE users SET {set_clause} WHERE id = ?");
        let values: Vec<&str> = assignments
            .iter()
            .map(|(_, value)| *value)
            .chain(std::iter::once(id))
            .collect();

        self.with_conn(|conn| {
            let affected = conn
                .execute(&sql, params_from_iter(values))
                .map_err(|e| translate(StoreOp::UpdateUser, e))?;
            expect_affected(StoreOp::UpdateUser, affected)
        })
    }

    /// List users matching `filter`, in insertion order.
    pub fn list_users(&self, filter: &UserFilter, page: Pagination) -> TrackerResult<Vec<User>> {
        let condition = filter.condition();
        let (limit, offset) = page.sql_bounds();
        let sql = format!(
            "SELECT {USER_COLUMNS} FROM users WHERE {} ORDER BY rowid LIMIT ? OFFSET ?",
            condition.to_sql()
        );
        let params = condition
            .params()
            .iter()
            .cloned()
            .chain([Value::Integer(limit), Value::Integer(offset)]);

        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&sql)?;
            let users = stmt
                .query_map(params_from_iter(params), parse_user_row)?
                .collect::<rusqlite::Result<Vec<_>>>()?;
            Ok(users)
        })
    }

    /// Look up a user's public profile by passport series and number.
    pub fn user_info(&self, series: &str, number: &str) -> TrackerResult<UserInfo> {
        let passport_number = format!("{series} {number}");

        self.with_conn(|conn| {
            conn.query_row(
                "SELECT surname, name, patronymic, address FROM users WHERE passport_number = ?1",
                params![passport_number],
                |row| {
                    Ok(UserInfo {
                        surname: row.get(0)?,
                        name: row.get(1)?,
                        patronymic: row.get(2)?,
                        address: row.get(3)?,
                    })
                },
            )
            .optional()?
            .ok_or(TrackerError::UserDoesNotExist)
        })
    }

    /// Fetch a user by id.
    pub fn get_user(&self, id: &str) -> TrackerResult<Option<User>> {
        self.with_conn(|conn| {
            let user = conn
                .query_row(
                    &format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?1"),
                    params![id],
                    parse_user_row,
                )
                .optional()?;
            Ok(user)
        })
    }
}
