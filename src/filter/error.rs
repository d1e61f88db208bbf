use thiserror::Error;

/// Errors that can occur when parsing filter expressions
///
/// The evaluation functions never surface these; they only come out of the
/// strict parsing entry points.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FilterParseError {
    #[error("Empty filter expression")]
    Empty,

    #[error("Invalid threshold: '{0}' is not a number")]
    InvalidThreshold(String),

    #[error("Unknown operator: '{0}'. Valid operators are: >, <, >=, <=, =, !=")]
    UnknownOperator(String),

    #[error("Invalid column filter: '{0}'. Expected 'column=expression'")]
    InvalidColumnFilter(String),
}
