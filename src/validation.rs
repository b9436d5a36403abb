//! Request binding checks.
//!
//! Raw request shapes are deserialized leniently (every field optional) and
//! then turned into typed inputs by a [`RequestValidator`], so each rejection
//! names the offending field.

use regex_lite::Regex;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{TrackerError, TrackerResult};
use crate::query::filter::{self, UserField};
use crate::query::pagination::parse_unsigned;
use crate::query::{Pagination, TimeRange, UserFilter};
use crate::types::{NewUser, UserPatch};

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub address: Option<String>,
    pub passport_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub address: Option<String>,
    pub passport_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListUsersQuery {
    pub surname: Option<String>,
    pub name: Option<String>,
    pub patronymic: Option<String>,
    pub address: Option<String>,
    pub passport_number: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListUsersQuery {
    fn filter(&self, field: UserField) -> Option<&str> {
        match field {
            UserField::Surname => self.surname.as_deref(),
            UserField::Name => self.name.as_deref(),
            UserField::Patronymic => self.patronymic.as_deref(),
            UserField::Address => self.address.as_deref(),
            UserField::PassportNumber => self.passport_number.as_deref(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoQuery {
    pub passport_series: Option<String>,
    pub passport_number: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportQuery {
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

/// Binding-boundary validator. Build once and share.
#[derive(Debug, Clone)]
pub struct RequestValidator {
    passport: Regex,
    series: Regex,
    number: Regex,
}

impl RequestValidator {
    pub fn new() -> Result<Self, regex_lite::Error> {
        Ok(Self {
            passport: Regex::new(r"^\d{4} \d{6}$")?,
            series: Regex::new(r"^\d{4}$")?,
            number: Regex::new(r"^\d{6}$")?,
        })
    }

    /// Canonical (lower-case, hyphenated) form of a UUID path segment.
    pub fn id(&self, field: &str, raw: &str) -> TrackerResult<String> {
        Uuid::parse_str(raw)
            .map(|id| id.hyphenated().to_string())
            .map_err(|_| TrackerError::validation(field, "must be a UUID"))
    }

    fn passport_number(&self, raw: &str) -> TrackerResult<()> {
        if self.passport.is_match(raw) {
            Ok(())
        } else {
            Err(TrackerError::validation(
                "passportNumber",
                "must be 4 digits, a space and 6 digits",
            ))
        }
    }

    pub fn new_user(&self, req: CreateUserRequest) -> TrackerResult<NewUser> {
        fn required(field: &str, value: Option<String>) -> TrackerResult<String> {
            value
                .filter(|v| !v.is_empty())
                .ok_or_else(|| TrackerError::validation(field, "is required"))
        }

        let user = NewUser {
            surname: required("surname", req.surname)?,
            name: required("name", req.name)?,
            patronymic: required("patronymic", req.patronymic)?,
            address: required("address", req.address)?,
            passport_number: required("passportNumber", req.passport_number)?,
        };
        self.passport_number(&user.passport_number)?;
        Ok(user)
    }

    /// Empty strings are collapsed to "absent" before checking.
    pub fn user_patch(&self, req: UpdateUserRequest) -> TrackerResult<UserPatch> {
        let patch = UserPatch {
            surname: req.surname,
            name: req.name,
            patronymic: req.patronymic,
            address: req.address,
            passport_number: req.passport_number,
        }
        .collapse_empty();

        if let Some(passport) = &patch.passport_number {
            self.passport_number(passport)?;
        }
        if patch.is_empty() {
            return Err(TrackerError::validation("body", "no fields to update"));
        }
        Ok(patch)
    }

    /// Filters and page window for the user listing.
    ///
    /// Non-empty limit/offset values must be unsigned integers here; the
    /// resolver only defaults values that are absent.
    pub fn user_query(&self, query: &ListUsersQuery) -> TrackerResult<(UserFilter, Pagination)> {
        let mut user_filter = UserFilter::default();
        for field in UserField::ALL {
            let parsed = filter::parse_optional(query.filter(field))
                .map_err(|e| TrackerError::validation(field.param(), e.to_string()))?;
            user_filter.set(field, parsed);
        }

        for (field, raw) in [("limit", &query.limit), ("offset", &query.offset)] {
            if let Some(raw) = raw.as_deref().filter(|r| !r.is_empty()) {
                if parse_unsigned(raw).is_none() {
                    return Err(TrackerError::validation(field, "must be an unsigned integer"));
                }
            }
        }
        let page = Pagination::resolve(query.limit.as_deref(), query.offset.as_deref());

        Ok((user_filter, page))
    }

    /// Passport series and number for the info lookup.
    pub fn passport_parts(&self, query: UserInfoQuery) -> TrackerResult<(String, String)> {
        let series = query
            .passport_series
            .filter(|s| self.series.is_match(s))
            .ok_or_else(|| TrackerError::validation("passportSeries", "must be 4 digits"))?;
        let number = query
            .passport_number
            .filter(|n| self.number.is_match(n))
            .ok_or_else(|| TrackerError::validation("passportNumber", "must be 6 digits"))?;
        Ok((series, number))
    }

    pub fn time_range(&self, query: &ReportQuery) -> TrackerResult<TimeRange> {
        TimeRange::parse(query.start_time.as_deref(), query.end_time.as_deref())
    }
}
