pub mod cli;
pub mod config;
pub mod filter;
pub mod table;

use crate::config::{FilterConfig, load_config};
use crate::filter::{
    Criterion, FilterParseError, Precedence, evaluate_field_selector_with, evaluate_operator_expression_with,
    select_field,
};
use crate::table::{
    ColumnFilter, RowFilter, filter_rows, load_rows, render_table, resolve_columns, rows_to_json,
};
use anyhow::Context;
use colored::Colorize;
pub use cli::{Cli, ColorMode, Commands, OutputFormat, cli_parse};
pub use filter::{evaluate_field_selector, evaluate_operator_expression};
use serde_json::json;
use std::path::Path;
use tracing::{debug, info};

fn apply_color_mode(color_mode: ColorMode) {
    match color_mode {
        ColorMode::Always => colored::control::set_override(true),
        ColorMode::Never => colored::control::set_override(false),
        ColorMode::Auto => {}
    }
}

/// Describe how an expression was read, for JSON output
fn describe_criterion(expression: &str, precedence: Precedence) -> serde_json::Value {
    match Criterion::parse(expression, precedence) {
        Ok(criterion) => json!({
            "operator": criterion.operator.symbol(),
            "threshold": criterion.threshold,
        }),
        Err(FilterParseError::Empty) => json!({ "criterion": null }),
        Err(err) => json!({ "error": err.to_string() }),
    }
}

fn print_verdict(format: OutputFormat, matches: bool, details: serde_json::Value) {
    match format {
        OutputFormat::Text => {
            if matches {
                println!("{}", "match".green().bold());
            } else {
                println!("{}", "no match".red().bold());
            }
        }
        OutputFormat::Json => {
            let mut output = details;
            output["matches"] = json!(matches);
            println!("{output}");
        }
    }
}

fn run_rows(
    cli: &Cli,
    config: &FilterConfig,
    precedence: Precedence,
    file: &Path,
    filter_text: Option<&str>,
    column_specs: &[String],
) -> anyhow::Result<()> {
    let rows = load_rows(file)
        .with_context(|| format!("Failed to load rows from '{}'", file.display()))?;

    let mut filter = RowFilter::new(precedence)
        .with_fields(&config.fields)
        .with_price_or_qty(filter_text);
    for spec in column_specs {
        let column_filter: ColumnFilter = spec.parse()?;
        filter = filter.with_column(column_filter);
    }

    let matched = filter_rows(&rows, &filter);
    debug!(total = rows.len(), matched = matched.len(), "rows filtered");

    match cli.format {
        OutputFormat::Text => {
            if matched.is_empty() {
                println!("No rows match the filter");
            } else {
                let columns = resolve_columns(&matched, &config.fields.display_columns);
                println!("{}", render_table(&matched, &columns));
            }
            if !cli.quiet && !filter.is_empty() {
                println!("\nShowing {} of {} rows", matched.len(), rows.len());
            }
        }
        OutputFormat::Json => {
            let json = rows_to_json(&matched).context("Failed to serialize rows")?;
            println!("{json}");
        }
    }

    Ok(())
}

pub fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = load_config(cli.config.as_deref()).context("Failed to load config")?;
    let precedence = cli
        .precedence
        .map(Precedence::from)
        .unwrap_or(config.precedence);

    apply_color_mode(cli.color);
    info!(profile = %config.profile_name, ?precedence, "configuration loaded");

    match &cli.command {
        Commands::Check { expression, value } => {
            let matches = evaluate_operator_expression_with(
                Some(expression.as_str()),
                value.as_str(),
                precedence,
            );
            let mut details = describe_criterion(expression, precedence);
            details["expression"] = json!(expression);
            details["value"] = json!(value);
            print_verdict(cli.format, matches, details);
        }
        Commands::Select { filter, price, qty } => {
            let matches = evaluate_field_selector_with(
                Some(filter.as_str()),
                price.as_str(),
                qty.as_str(),
                precedence,
            );
            let (field, criteria) = select_field(filter);
            let mut details = describe_criterion(criteria, precedence);
            details["field"] = json!(field);
            details["filter"] = json!(filter);
            print_verdict(cli.format, matches, details);
        }
        Commands::Rows {
            file,
            filter,
            columns,
        } => run_rows(cli, &config, precedence, file, filter.as_deref(), columns)?,
    }

    Ok(())
}
