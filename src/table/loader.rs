use super::entities::Row;
use serde_json::Value;
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Failed to read rows file '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse rows as JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Expected a JSON array of rows")]
    NotAnArray,
    #[error("Row {index} is not a JSON object")]
    RowNotAnObject { index: usize },
}

pub fn load_rows(path: &Path) -> Result<Vec<Row>, TableError> {
    let raw = fs::read_to_string(path).map_err(|source| TableError::Read {
        path: path.display().to_string(),
        source,
    })?;

    parse_rows(&raw)
}

/// Parse a JSON array of objects into rows
pub fn parse_rows(raw: &str) -> Result<Vec<Row>, TableError> {
    let Value::Array(items) = serde_json::from_str::<Value>(raw)? else {
        return Err(TableError::NotAnArray);
    };

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(row) => Ok(row),
            _ => Err(TableError::RowNotAnObject { index }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_rows() {
        let rows = parse_rows(r#"[{"sku": "A1", "price": 10}, {"sku": "B2", "qty": "3"}]"#).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["qty"], "3");
    }

    #[test]
    fn test_parse_rows_rejects_non_arrays() {
        assert!(matches!(
            parse_rows(r#"{"price": 1}"#),
            Err(TableError::NotAnArray)
        ));
        assert!(matches!(
            parse_rows(r#"[{"price": 1}, 5]"#),
            Err(TableError::RowNotAnObject { index: 1 })
        ));
        assert!(matches!(parse_rows("[{"), Err(TableError::Parse(_))));
    }
}
