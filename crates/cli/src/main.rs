// CodeMatch CLI - config-driven fuzzy item-code matching.

mod exit_codes;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use codematch_engine::table::{load_query_rows, load_reference_rows};
use codematch_engine::{MatchConfig, MatchInput};

use exit_codes::{EXIT_INVALID_CONFIG, EXIT_RUNTIME, EXIT_SUCCESS};

#[derive(Parser)]
#[command(name = "cmatch")]
#[command(about = "Match system item codes to a supplier price list by fuzzy similarity")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a matching job from a TOML config file
    #[command(after_help = "\
Examples:
  cmatch run match.toml
  cmatch run match.toml --json
  cmatch run match.toml --csv results.csv --alternates
  cmatch run match.toml --output report.json")]
    Run {
        /// Path to the .match.toml config file
        config: PathBuf,

        /// Output the JSON report to stdout instead of a human summary
        #[arg(long)]
        json: bool,

        /// Write the JSON report to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Write the threshold-filtered CSV export to a file
        #[arg(long)]
        csv: Option<PathBuf>,

        /// Include the Top Matches column in the CSV export
        #[arg(long)]
        alternates: bool,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  cmatch validate match.toml")]
    Validate {
        /// Path to the .match.toml config file
        config: PathBuf,
    },
}

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn invalid_config(msg: impl Into<String>) -> CliError {
    CliError {
        code: EXIT_INVALID_CONFIG,
        message: msg.into(),
        hint: None,
    }
}

fn runtime(msg: impl Into<String>) -> CliError {
    CliError {
        code: EXIT_RUNTIME,
        message: msg.into(),
        hint: None,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            config,
            json,
            output,
            csv,
            alternates,
        } => cmd_run(config, json, output, csv, alternates),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            eprintln!("error: {message}");
            if let Some(hint) = hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(code)
        }
    }
}

fn cmd_run(
    config_path: PathBuf,
    json_output: bool,
    output_file: Option<PathBuf>,
    csv_file: Option<PathBuf>,
    alternates: bool,
) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| runtime(format!("cannot read config: {e}")))?;
    let config = MatchConfig::from_toml(&config_str).map_err(|e| invalid_config(e.to_string()))?;

    // Table paths resolve relative to the config file's directory.
    let base_dir = config_path.parent().unwrap_or_else(|| Path::new("."));

    let reference_csv = read_table(base_dir, &config.reference.file)?;
    let query_csv = read_table(base_dir, &config.query.file)?;

    let reference =
        load_reference_rows(&reference_csv, &config.reference).map_err(|e| runtime(e.to_string()))?;
    let queries = load_query_rows(&query_csv, &config.query).map_err(|e| runtime(e.to_string()))?;

    let input = MatchInput {
        reference: reference.rows,
        queries: queries.rows,
        skipped_reference_rows: reference.skipped,
        skipped_query_rows: queries.skipped,
    };

    let report = codematch_engine::run(&config, &input).map_err(|e| runtime(e.to_string()))?;

    // JSON report
    let json_str = serde_json::to_string_pretty(&report)
        .map_err(|e| runtime(format!("JSON serialization error: {e}")))?;

    let json_path = output_file.or_else(|| config.output.json.as_ref().map(PathBuf::from));
    if let Some(ref path) = json_path {
        std::fs::write(path, &json_str)
            .map_err(|e| runtime(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    if json_output {
        println!("{json_str}");
    }

    // CSV export
    let include_alternates = alternates || config.output.include_alternates;
    let csv_path = csv_file.or_else(|| config.output.csv.as_ref().map(PathBuf::from));
    if let Some(ref path) = csv_path {
        let csv_str =
            codematch_engine::export::to_csv(&report.results, config.threshold, include_alternates)
                .map_err(|e| runtime(e.to_string()))?;
        std::fs::write(path, csv_str)
            .map_err(|e| runtime(format!("cannot write {}: {e}", path.display())))?;
        eprintln!("wrote {}", path.display());
    }

    // Human summary to stderr
    let s = &report.summary;
    let shown = report
        .results
        .iter()
        .filter(|r| r.score >= config.threshold)
        .count();
    eprintln!(
        "{} match: {} queries, {} matched, {} high / {} medium / {} low, {} at threshold {}",
        config.policy, s.total, s.matched, s.high, s.medium, s.low, shown, config.threshold,
    );
    if s.skipped_reference_rows > 0 || s.skipped_query_rows > 0 {
        eprintln!(
            "skipped bad rows: {} reference, {} query",
            s.skipped_reference_rows, s.skipped_query_rows,
        );
    }

    Ok(())
}

fn read_table(base_dir: &Path, file: &str) -> Result<String, CliError> {
    let path = base_dir.join(file);
    std::fs::read_to_string(&path)
        .map_err(|e| runtime(format!("cannot read {}: {e}", path.display())))
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let config_str = std::fs::read_to_string(&config_path)
        .map_err(|e| runtime(format!("cannot read config: {e}")))?;

    match MatchConfig::from_toml(&config_str) {
        Ok(config) => {
            eprintln!(
                "valid: '{}' ({} policy, threshold {}, top_n {}, prefilter {})",
                config.name, config.policy, config.threshold, config.top_n, config.prefilter,
            );
            Ok(())
        }
        Err(e) => Err(invalid_config(e.to_string())),
    }
}
