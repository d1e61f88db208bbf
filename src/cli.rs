use crate::filter::Precedence;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Evaluate price and quantity filter expressions against table rows
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to a TOML config file
    #[arg(long, global = true, env = "TABLE_FILTER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to use colors
    #[arg(long, global = true, value_enum, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,

    /// Operator precedence for `!=`; overrides the config file
    #[arg(long, global = true, value_enum)]
    pub precedence: Option<PrecedenceArg>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress logs and summaries
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate an operator expression (e.g. ">=10") against one value
    Check {
        /// Filter expression
        #[arg(allow_hyphen_values = true)]
        expression: String,

        /// Candidate value; non-numbers read as 0
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Evaluate a price-or-quantity filter (e.g. "q:>5") against one row
    Select {
        /// Filter text; a leading "q" targets the quantity
        #[arg(allow_hyphen_values = true)]
        filter: String,

        /// Price of the row
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        price: String,

        /// Quantity of the row
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        qty: String,
    },
    /// Filter rows from a JSON file
    Rows {
        /// JSON file holding an array of row objects
        file: PathBuf,

        /// Price-or-quantity filter applied to every row
        #[arg(short, long, allow_hyphen_values = true)]
        filter: Option<String>,

        /// Column filter in the form COLUMN=EXPRESSION (repeatable)
        #[arg(short, long = "column", value_name = "COLUMN=EXPR")]
        columns: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PrecedenceArg {
    Standard,
    Legacy,
}

impl From<PrecedenceArg> for Precedence {
    fn from(arg: PrecedenceArg) -> Self {
        match arg {
            PrecedenceArg::Standard => Precedence::Standard,
            PrecedenceArg::Legacy => Precedence::Legacy,
        }
    }
}

pub fn cli_parse() -> Cli {
    Cli::parse()
}
