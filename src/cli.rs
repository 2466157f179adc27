//! Command-line argument parsing for Recast.

use clap::Parser;
use db_recast::config::Config;
use db_recast::error::{RecastError, Result};
use db_recast::normalize::QueryType;
use serde_json::Value as JsonValue;
use std::path::PathBuf;

/// Normalize native SQL driver results into a stable report shape.
#[derive(Parser, Debug)]
#[command(name = "recast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to the native result JSON (use "-" for stdin)
    #[arg(value_name = "RESULT_FILE")]
    pub input: Option<String>,

    /// Query type the result came from (select, insert, update, delete, sum, avg, min, max)
    #[arg(short = 't', long = "type", value_name = "TYPE", conflicts_with = "sql")]
    pub query_type: Option<String>,

    /// Infer the query type from the SQL that produced the result
    #[arg(short = 's', long, value_name = "SQL")]
    pub sql: Option<String>,

    /// Metadata JSON to attach to the report unchanged
    #[arg(short = 'm', long, value_name = "JSON")]
    pub meta: Option<String>,

    /// Column inserted ids are read from (default: first column of each row)
    #[arg(long, value_name = "COLUMN", env = "RECAST_ID_COLUMN")]
    pub id_column: Option<String>,

    /// Use named profile from config
    #[arg(short = 'P', long, value_name = "NAME")]
    pub profile: Option<String>,

    /// Config file path
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Pretty-print the report
    #[arg(long)]
    pub pretty: bool,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, value_name = "PATH")]
    pub output_file: Option<PathBuf>,

    /// Write logs to the state directory instead of stderr
    #[arg(long)]
    pub log_to_file: bool,
}

impl Cli {
    /// Parses command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses the --type argument into a query type.
    pub fn parse_query_type(&self) -> Result<Option<QueryType>> {
        self.query_type
            .as_deref()
            .map(|raw| raw.parse::<QueryType>())
            .transpose()
    }

    /// Parses the --meta argument as JSON.
    pub fn parse_meta(&self) -> Result<Option<JsonValue>> {
        self.meta
            .as_deref()
            .map(|raw| {
                serde_json::from_str(raw)
                    .map_err(|e| RecastError::input(format!("Invalid metadata JSON: {e}")))
            })
            .transpose()
    }

    /// Returns the config file path to use.
    ///
    /// Uses the --config argument if provided, otherwise the default path.
    pub fn config_path(&self) -> PathBuf {
        self.config.clone().unwrap_or_else(Config::default_path)
    }

    /// Returns the named profile to use, if specified.
    pub fn profile_name(&self) -> Option<&str> {
        self.profile.as_deref()
    }

    /// Returns true if the native result should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        matches!(self.input.as_deref(), None | Some("-"))
    }

    /// Validates argument combinations.
    /// Returns an error message if validation fails.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.query_type.is_none() && self.sql.is_none() {
            return Err("either --type or --sql is required".to_string());
        }
        Ok(())
    }
}
