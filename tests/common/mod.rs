//! Shared fixtures for integration tests.

#![allow(dead_code)]

use chrono::{DateTime, Utc};
use time_tracker::db::Database;
use time_tracker::types::{NewUser, User};

pub fn setup_db() -> Database {
    Database::open_in_memory().unwrap()
}

pub fn ts(raw: &str) -> DateTime<Utc> {
    raw.parse().unwrap()
}

pub fn new_user(surname: &str, name: &str, patronymic: &str, address: &str, passport: &str) -> NewUser {
    NewUser {
        surname: surname.to_string(),
        name: name.to_string(),
        patronymic: patronymic.to_string(),
        address: address.to_string(),
        passport_number: passport.to_string(),
    }
}

/// Ids produced by [`seed`].
pub struct Seeded {
    /// Funk, Runolfsdottir, McCullough, Rippin, Schulist (insertion order).
    pub users: Vec<User>,
    /// Rippin's finished tasks: 7h2m, 1461h43m, 720h0m.
    pub rippin_finished: Vec<String>,
    /// Rippin's in-progress tasks, oldest first.
    pub rippin_open: Vec<String>,
    /// Schulist's in-progress tasks.
    pub schulist_open: Vec<String>,
}

impl Seeded {
    pub fn funk(&self) -> &User {
        &self.users[0]
    }
    pub fn mccullough(&self) -> &User {
        &self.users[2]
    }
    pub fn rippin(&self) -> &User {
        &self.users[3]
    }
    pub fn schulist(&self) -> &User {
        &self.users[4]
    }
}

pub fn seed(db: &Database) -> Seeded {
    let users: Vec<User> = [
        new_user("Funk", "Theresia", "Cummerata-Thompson", "53636 Gabrielle Mount", "3333 333333"),
        new_user("Runolfsdottir", "Violette", "Johns", "52265 Parker Crossroad", "3333 666666"),
        new_user("McCullough", "Jessie", "Waelchi", "8020 Dach Pine", "3333 444444"),
        new_user("Rippin", "Katrine", "Block", "985 N Jefferson Street", "5555 124041"),
        new_user("Schulist", "Kailee", "Fritsch", "5303 Church View", "2515 692797"),
    ]
    .into_iter()
    .map(|u| db.create_user(u).unwrap())
    .collect();

    let finished = |user: &User, start: &str, end: &str| {
        let task = db.start_task_at(&user.id, ts(start)).unwrap();
        db.end_task_at(&task.id, ts(end)).unwrap();
        task.id
    };
    let open = |user: &User, start: &str| db.start_task_at(&user.id, ts(start)).unwrap().id;

    let rippin = &users[3];
    let rippin_finished = vec![
        finished(rippin, "2024-01-16T09:08:25Z", "2024-01-16T16:10:00Z"),
        finished(rippin, "2024-03-11T11:25:00Z", "2024-05-11T09:08:25Z"),
        finished(rippin, "2024-04-01T00:00:00Z", "2024-05-01T00:00:00Z"),
    ];
    let rippin_open = vec![
        open(rippin, "2024-05-20T08:00:00Z"),
        open(rippin, "2024-05-21T08:00:00Z"),
    ];

    let mccullough = &users[2];
    finished(mccullough, "2024-03-16T00:08:25Z", "2024-03-24T00:00:00Z");
    finished(mccullough, "2024-03-20T10:00:00Z", "2024-03-22T08:08:00Z");
    finished(mccullough, "2024-03-25T09:00:00Z", "2024-03-25T11:08:00Z");
    finished(mccullough, "2024-03-26T09:00:00Z", "2024-03-26T11:00:00Z");

    let schulist = &users[4];
    let schulist_open = vec![
        open(schulist, "2024-05-01T12:00:00Z"),
        open(schulist, "2024-05-02T12:00:00Z"),
    ];

    Seeded {
        users,
        rippin_finished,
        rippin_open,
        schulist_open,
    }
}
