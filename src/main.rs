//! Recast - a normalizer for native SQL driver results.

mod cli;

use cli::Cli;
use db_recast::config::{Config, ProfileConfig};
use db_recast::error::{RecastError, Result};
use db_recast::infer::infer_query_type;
use db_recast::logging;
use db_recast::normalize::{QueryType, Report, ResultNormalizer};
use serde_json::Value as JsonValue;
use tracing::{debug, error, info};

fn main() {
    // Pick up RECAST_ID_COLUMN and RUST_LOG from a .env file if present
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();

    // Initialize logging; stdout is reserved for the report
    if cli.log_to_file {
        logging::init_file_logging();
    } else {
        logging::init_stderr_logging();
    }

    if let Err(e) = run(&cli) {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    cli.validate().map_err(RecastError::input)?;

    // Load configuration file
    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let profile = resolve_profile(cli, &config)?;
    let query_type = resolve_query_type(cli)?;
    let native = read_native_result(cli)?;

    let meta = resolve_meta(cli, profile.as_ref())?;
    let id_column = resolve_id_column(cli, profile.as_ref());

    let mut normalizer = ResultNormalizer::new();
    if let Some(column) = id_column {
        normalizer = normalizer.with_id_column(column);
    }

    let report = normalizer.normalize(query_type, &native, meta)?;
    info!("Normalized {} result", report.result.query_type());

    write_report(cli, &config, &report)
}

/// Resolves the profile to apply.
///
/// A profile named on the command line must exist; the `default` profile is
/// applied when present and nothing was named.
fn resolve_profile(cli: &Cli, config: &Config) -> Result<Option<ProfileConfig>> {
    match cli.profile_name() {
        Some(name) => match config.get_profile(Some(name)) {
            Some(profile) => Ok(Some(profile.clone())),
            None => Err(RecastError::config(format!(
                "Profile '{name}' not found in config file"
            ))),
        },
        None => Ok(config.get_profile(None).cloned()),
    }
}

/// Resolves the query type from --type, or infers it from --sql.
fn resolve_query_type(cli: &Cli) -> Result<QueryType> {
    if let Some(query_type) = cli.parse_query_type()? {
        return Ok(query_type);
    }
    match &cli.sql {
        Some(sql) => {
            let query_type = infer_query_type(sql)?;
            debug!("Inferred {} query from SQL", query_type);
            Ok(query_type)
        }
        None => Err(RecastError::input("either --type or --sql is required")),
    }
}

/// Resolves the report metadata. The --meta argument wins over the profile.
fn resolve_meta(cli: &Cli, profile: Option<&ProfileConfig>) -> Result<Option<JsonValue>> {
    Ok(match cli.parse_meta()? {
        Some(meta) => Some(meta),
        None => profile.and_then(|p| p.meta.clone()),
    })
}

/// Resolves the insert id column. The --id-column argument wins over the
/// profile.
fn resolve_id_column(cli: &Cli, profile: Option<&ProfileConfig>) -> Option<String> {
    cli.id_column
        .clone()
        .or_else(|| profile.and_then(|p| p.id_column.clone()))
}

/// Reads the native result JSON from the input file or stdin.
fn read_native_result(cli: &Cli) -> Result<JsonValue> {
    let raw = if cli.reads_stdin() {
        std::io::read_to_string(std::io::stdin())
            .map_err(|e| RecastError::input(format!("Failed to read stdin: {e}")))?
    } else {
        let path = cli.input.as_deref().unwrap_or("-");
        std::fs::read_to_string(path)
            .map_err(|e| RecastError::input(format!("Failed to read {path}: {e}")))?
    };
    serde_json::from_str(&raw)
        .map_err(|e| RecastError::input(format!("Invalid native result JSON: {e}")))
}

/// Serializes the report and writes it to stdout or the requested file.
fn write_report(cli: &Cli, config: &Config, report: &Report<Option<JsonValue>>) -> Result<()> {
    let pretty = cli.pretty || config.output.pretty;
    let rendered = if pretty {
        serde_json::to_string_pretty(report)
    } else {
        serde_json::to_string(report)
    }
    .map_err(|e| RecastError::internal(format!("Failed to serialize report: {e}")))?;

    match &cli.output_file {
        Some(path) => std::fs::write(path, rendered + "\n").map_err(|e| {
            RecastError::internal(format!("Failed to write {}: {e}", path.display()))
        }),
        None => {
            println!("{rendered}");
            Ok(())
        }
    }
}
