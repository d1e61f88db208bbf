use crate::config::FieldRules;
use crate::filter::{
    FilterParseError, Precedence, evaluate_field_selector_with, evaluate_operator_expression_with,
};
use serde_json::{Map, Value};
use std::str::FromStr;

/// One table row: column name to raw value
pub type Row = Map<String, Value>;

/// An operator expression bound to a single numeric column (`our_qty=>0`)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnFilter {
    pub column: String,
    pub expression: String,
}

impl ColumnFilter {
    pub fn new(column: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            expression: expression.into(),
        }
    }
}

impl FromStr for ColumnFilter {
    type Err = FilterParseError;

    /// Splits at the first `=`, so `price==5` is column `price`, expression `=5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (column, expression) = s
            .split_once('=')
            .ok_or_else(|| FilterParseError::InvalidColumnFilter(s.to_string()))?;

        let column = column.trim();
        if column.is_empty() {
            return Err(FilterParseError::InvalidColumnFilter(s.to_string()));
        }

        Ok(ColumnFilter::new(column, expression))
    }
}

/// All filters active on a table; a row must pass every one of them
#[derive(Debug, Clone)]
pub struct RowFilter {
    precedence: Precedence,
    price_key: String,
    qty_key: String,
    price_or_qty: Option<String>,
    columns: Vec<ColumnFilter>,
}

impl Default for RowFilter {
    fn default() -> Self {
        Self::new(Precedence::default())
    }
}

impl RowFilter {
    pub fn new(precedence: Precedence) -> Self {
        let fields = FieldRules::default();
        Self {
            precedence,
            price_key: fields.price_key,
            qty_key: fields.qty_key,
            price_or_qty: None,
            columns: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: &FieldRules) -> Self {
        self.price_key = fields.price_key.clone();
        self.qty_key = fields.qty_key.clone();
        self
    }

    pub fn with_price_or_qty(mut self, filter_text: Option<impl Into<String>>) -> Self {
        self.price_or_qty = filter_text.map(|t| t.into());
        self
    }

    pub fn with_column(mut self, column_filter: ColumnFilter) -> Self {
        self.columns.push(column_filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.price_or_qty.as_deref().is_none_or(str::is_empty) && self.columns.is_empty()
    }

    pub fn matches(&self, row: &Row) -> bool {
        let selector_match = evaluate_field_selector_with(
            self.price_or_qty.as_deref(),
            row.get(&self.price_key),
            row.get(&self.qty_key),
            self.precedence,
        );

        selector_match
            && self.columns.iter().all(|filter| {
                evaluate_operator_expression_with(
                    Some(filter.expression.as_str()),
                    row.get(&filter.column),
                    self.precedence,
                )
            })
    }
}

pub fn filter_rows<'a>(rows: &'a [Row], filter: &RowFilter) -> Vec<&'a Row> {
    rows.iter().filter(|row| filter.matches(row)).collect()
}
