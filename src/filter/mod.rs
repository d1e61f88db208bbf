//! Filter expression parsing and matching
//!
//! This module turns short, human-typed filter expressions into numeric
//! predicates. A table search box can hand the raw text straight to
//! [`evaluate_field_selector`] for every row; malformed input never raises an
//! error, it simply matches nothing.
//!
//! # Syntax
//!
//! ```text
//! [q[:]] [operator] number
//! ```
//!
//! # Operators
//!
//! - `>` `<` `>=` `<=` - numeric comparison
//! - `=` - equality (also the default when no operator is given)
//! - `!=` / `!` - inequality
//!
//! # Examples
//!
//! ```text
//! >=10        # price at least 10
//! 5           # price exactly 5
//! !3          # price other than 3
//! q:>0        # quantity in stock
//! Q<=2        # quantity of two or less
//! ```

pub mod error;
pub mod matcher;
pub mod parser;

pub use error::FilterParseError;
pub use matcher::{
    Field, evaluate_field_selector, evaluate_field_selector_with, evaluate_operator_expression,
    evaluate_operator_expression_with, select_field,
};
pub use parser::{
    Criterion, NumericValue, Operator, Precedence, coerce_candidate, parse_number, split_operator,
};
