//! Rule primitives for bill field extraction.

pub mod labels;
pub mod months;
pub mod patterns;
pub mod tokens;

pub use labels::{LabelKind, LabelMatcher};
pub use months::{month_number, month_year, normalize_billing_date, normalize_label, MONTHS};
pub use patterns::*;
pub use tokens::{after, between, split_token};
