//! Limit/offset resolution for list endpoints.

pub const DEFAULT_LIMIT: u64 = 10;
pub const DEFAULT_OFFSET: u64 = 0;

/// Resolved page window. Both values are always present after resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub limit: u64,
    pub offset: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            offset: DEFAULT_OFFSET,
        }
    }
}

impl Pagination {
    /// Resolve raw query values. Absent, empty or unparseable values fall
    /// back to the defaults independently of each other.
    pub fn resolve(limit: Option<&str>, offset: Option<&str>) -> Self {
        Self {
            limit: limit.and_then(parse_unsigned).unwrap_or(DEFAULT_LIMIT),
            offset: offset.and_then(parse_unsigned).unwrap_or(DEFAULT_OFFSET),
        }
    }

    /// SQLite takes signed 64-bit bounds.
    pub(crate) fn sql_bounds(&self) -> (i64, i64) {
        (
            i64::try_from(self.limit).unwrap_or(i64::MAX),
            i64::try_from(self.offset).unwrap_or(i64::MAX),
        )
    }
}

/// Decimal digits only; no sign, no whitespace.
pub fn parse_unsigned(raw: &str) -> Option<u64> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_absent_or_empty() {
        assert_eq!(Pagination::resolve(None, None), Pagination { limit: 10, offset: 0 });
        assert_eq!(Pagination::resolve(Some(""), Some("")), Pagination::default());
    }

    #[test]
    fn values_resolve_independently() {
        assert_eq!(
            Pagination::resolve(Some("3"), Some("abc")),
            Pagination { limit: 3, offset: 0 }
        );
        assert_eq!(
            Pagination::resolve(Some("-1"), Some("20")),
            Pagination { limit: 10, offset: 20 }
        );
    }

    #[test]
    fn zero_limit_is_kept() {
        assert_eq!(Pagination::resolve(Some("0"), None).limit, 0);
    }

    #[test]
    fn huge_values_saturate_for_sql() {
        let page = Pagination::resolve(Some("18446744073709551615"), None);
        assert_eq!(page.limit, u64::MAX);
        assert_eq!(page.sql_bounds(), (i64::MAX, 0));
    }

    #[test]
    fn parse_unsigned_rejects_signs_and_spaces() {
        assert_eq!(parse_unsigned("+5"), None);
        assert_eq!(parse_unsigned(" 5"), None);
        assert_eq!(parse_unsigned("99999999999999999999999"), None);
        assert_eq!(parse_unsigned("42"), Some(42));
    }
}
