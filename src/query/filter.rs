//! Filter expressions (`op:value`) and the user-listing predicate builder.

use std::fmt;
use std::str::FromStr;

use rusqlite::types::Value;
use thiserror::Error;

use super::condition::Condition;

/// Comparison operator of a filter expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Exact, case-sensitive equality.
    Eq,
    /// Case-insensitive substring match.
    ILike,
}

impl FilterOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterOp::Eq => "eq",
            FilterOp::ILike => "ilike",
        }
    }
}

impl fmt::Display for FilterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterOp {
    type Err = FilterParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "eq" => Ok(FilterOp::Eq),
            "ilike" => Ok(FilterOp::ILike),
            other => Err(FilterParseError::UnknownOperation(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterParseError {
    #[error("expected `op:value`")]
    Malformed,

    #[error("unknown operation `{0}`, expected `eq` or `ilike`")]
    UnknownOperation(String),
}

/// A parsed `op:value` expression. `value` is never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub op: FilterOp,
    pub value: String,
}

impl FromStr for FieldFilter {
    type Err = FilterParseError;

    /// Splits on the first colon only, so the value may itself contain colons.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (op, value) = s.split_once(':').ok_or(FilterParseError::Malformed)?;
        if op.is_empty() || value.is_empty() {
            return Err(FilterParseError::Malformed);
        }
        Ok(FieldFilter {
            op: op.parse()?,
            value: value.to_string(),
        })
    }
}

impl FieldFilter {
    /// Predicate for this filter on `column`.
    pub fn condition(&self, column: &str) -> Condition {
        match self.op {
            FilterOp::Eq => Condition::clause(format!("{column} = ?"), [Value::Text(self.value.clone())]),
            FilterOp::ILike => Condition::clause(
                format!("casefold({column}) LIKE ? ESCAPE '\\'"),
                [Value::Text(format!("%{}%", escape_like(&self.value.to_lowercase())))],
            ),
        }
    }
}

/// Parse an optional raw filter; an empty string counts as absent.
pub fn parse_optional(raw: Option<&str>) -> Result<Option<FieldFilter>, FilterParseError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some),
    }
}

/// Escape LIKE wildcards so the value matches literally.
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Filterable user attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserField {
    Surname,
    Name,
    Patronymic,
    Address,
    PassportNumber,
}

impl UserField {
    pub const ALL: [UserField; 5] = [
        UserField::Surname,
        UserField::Name,
        UserField::Patronymic,
        UserField::Address,
        UserField::PassportNumber,
    ];

    pub fn column(&self) -> &'static str {
        match self {
            UserField::Surname => "surname",
            UserField::Name => "name",
            UserField::Patronymic => "patronymic",
            UserField::Address => "address",
            UserField::PassportNumber => "passport_number",
        }
    }

    /// Name of the query parameter carrying this field's filter.
    pub fn param(&self) -> &'static str {
        match self {
            UserField::Surname => "surname",
            UserField::Name => "name",
            UserField::Patronymic => "patronymic",
            UserField::Address => "address",
            UserField::PassportNumber => "passportNumber",
        }
    }
}

/// Per-field filters for the user listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserFilter {
    pub surname: Option<FieldFilter>,
    pub name: Option<FieldFilter>,
    pub patronymic: Option<FieldFilter>,
    pub address: Option<FieldFilter>,
    pub passport_number: Option<FieldFilter>,
}

impl UserFilter {
    pub fn get(&self, field: UserField) -> Option<&FieldFilter> {
        match field {
            UserField::Surname => self.surname.as_ref(),
            UserField::Name => self.name.as_ref(),
            UserField::Patronymic => self.patronymic.as_ref(),
            UserField::Address => self.address.as_ref(),
            UserField::PassportNumber => self.passport_number.as_ref(),
        }
    }

    pub fn set(&mut self, field: UserField, filter: Option<FieldFilter>) {
        let slot = match field {
            UserField::Surname => &mut self.surname,
            UserField::Name => &mut self.name,
            UserField::Patronymic => &mut self.patronymic,
            UserField::Address => &mut self.address,
            UserField::PassportNumber => &mut self.passport_number,
        };
        *slot = filter;
    }

    /// Conjunction of every present field filter, in column order.
    pub fn condition(&self) -> Condition {
        UserField::ALL
            .iter()
            .filter_map(|field| self.get(*field).map(|f| f.condition(field.column())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> Value {
        Value::Text(s.to_string())
    }

    #[test]
    fn parses_eq_and_ilike() {
        let f: FieldFilter = "eq:Funk".parse().unwrap();
        assert_eq!(f.op, FilterOp::Eq);
        assert_eq!(f.value, "Funk");

        let f: FieldFilter = "ilike:Mc".parse().unwrap();
        assert_eq!(f.op, FilterOp::ILike);
    }

    #[test]
    fn splits_on_first_colon_only() {
        let f: FieldFilter = "eq:a:b".parse().unwrap();
        assert_eq!(f.value, "a:b");
    }

    #[test]
    fn rejects_malformed_expressions() {
        for raw in ["Funk", ":Funk", "eq:", ":"] {
            assert_eq!(raw.parse::<FieldFilter>(), Err(FilterParseError::Malformed), "{raw}");
        }
        assert_eq!(
            "like:Funk".parse::<FieldFilter>(),
            Err(FilterParseError::UnknownOperation("like".to_string()))
        );
        assert!("EQ:Funk".parse::<FieldFilter>().is_err());
    }

    #[test]
    fn empty_raw_is_absent() {
        assert_eq!(parse_optional(None), Ok(None));
        assert_eq!(parse_optional(Some("")), Ok(None));
        assert!(parse_optional(Some("eq:x")).unwrap().is_some());
    }

    #[test]
    fn ilike_escapes_wildcards_and_lowercases() {
        let f: FieldFilter = "ilike:50%_Off\\".parse().unwrap();
        let cond = f.condition("address");
        assert_eq!(cond.to_sql(), "(casefold(address) LIKE ? ESCAPE '\\')");
        assert_eq!(cond.params(), &[text("%50\\%\\_off\\\\%")]);
    }

    #[test]
    fn user_filter_builds_conjunction_in_column_order() {
        let filter = UserFilter {
            passport_number: Some("eq:1234 567890".parse().unwrap()),
            surname: Some("ilike:fu".parse().unwrap()),
            ..Default::default()
        };
        let cond = filter.condition();
        assert_eq!(
            cond.to_sql(),
            "(casefold(surname) LIKE ? ESCAPE '\\') AND (passport_number = ?)"
        );
        assert_eq!(cond.params(), &[text("%fu%"), text("1234 567890")]);
    }

    #[test]
    fn injection_stays_in_params() {
        let filter = UserFilter {
            name: Some("eq:x' OR '1'='1".parse().unwrap()),
            ..Default::default()
        };
        let cond = filter.condition();
        assert_eq!(cond.to_sql(), "(name = ?)");
        assert_eq!(cond.params(), &[text("x' OR '1'='1")]);
    }

    #[test]
    fn no_filters_match_all() {
        assert!(UserFilter::default().condition().matches_all());
    }
}
