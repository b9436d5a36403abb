//! Query construction: filter expressions, bound-parameter conditions,
//! pagination and report time windows.

pub mod condition;
pub mod filter;
pub mod pagination;
pub mod time_range;

pub use condition::Condition;
pub use filter::{FieldFilter, FilterOp, FilterParseError, UserField, UserFilter};
pub use pagination::Pagination;
pub use time_range::TimeRange;
