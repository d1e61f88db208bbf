use super::error::FilterParseError;
use super::parser::{Criterion, NumericValue, Precedence};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which field of a row a selector filter targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Price,
    Quantity,
}

/// Route a raw filter to the field it targets
///
/// A leading `q` or `Q` selects the quantity field; an optional `:` may follow
/// it and whitespace around the criteria is dropped. Anything else is a price
/// filter and is returned untouched.
pub fn select_field(filter_text: &str) -> (Field, &str) {
    match filter_text.strip_prefix(['q', 'Q']) {
        Some(rest) => {
            let criteria = rest.trim();
            let criteria = criteria
                .strip_prefix(':')
                .map(str::trim)
                .unwrap_or(criteria);
            (Field::Quantity, criteria)
        }
        None => (Field::Price, filter_text),
    }
}

/// Evaluate an operator expression such as `>=10` against a candidate value
///
/// An absent or empty expression always passes. A threshold that is not a
/// number never matches. A candidate that is not a number reads as `0`.
pub fn evaluate_operator_expression(
    filter_expression: Option<&str>,
    candidate: impl NumericValue,
) -> bool {
    evaluate_operator_expression_with(filter_expression, candidate, Precedence::default())
}

pub fn evaluate_operator_expression_with(
    filter_expression: Option<&str>,
    candidate: impl NumericValue,
    precedence: Precedence,
) -> bool {
    let Some(expression) = filter_expression else {
        return true;
    };

    match Criterion::parse(expression, precedence) {
        Ok(criterion) => criterion.matches(candidate),
        Err(FilterParseError::Empty) => true,
        Err(err) => {
            debug!(expression, %err, "unsatisfiable filter");
            false
        }
    }
}

/// Evaluate a price-or-quantity filter such as `q:>5` or `<100`
///
/// Filters starting with `q` test `qty`, all others test `price`.
pub fn evaluate_field_selector(
    filter_text: Option<&str>,
    price: impl NumericValue,
    qty: impl NumericValue,
) -> bool {
    evaluate_field_selector_with(filter_text, price, qty, Precedence::default())
}

pub fn evaluate_field_selector_with(
    filter_text: Option<&str>,
    price: impl NumericValue,
    qty: impl NumericValue,
    precedence: Precedence,
) -> bool {
    let Some(text) = filter_text.filter(|t| !t.is_empty()) else {
        return true;
    };

    let (field, criteria) = select_field(text);
    debug!(?field, criteria, "routing filter");

    match field {
        Field::Quantity => evaluate_operator_expression_with(Some(criteria), qty, precedence),
        Field::Price => evaluate_operator_expression_with(Some(criteria), price, precedence),
    }
}
