// cheflist CLI - supplier catalog reconciliation from the shell
//
// Reads a supplier product export and one order file, matches order
// lines to catalog products (exact id or fuzzy name), and writes one
// purchase-order CSV per supplier plus a consolidated quote.

mod exit_codes;
mod util;
mod write;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use cheflist_engine::{load_catalog, load_order, run, EngineError, MatchOutcome, RunConfig};
use exit_codes::{
    EXIT_INVALID_CONFIG, EXIT_NO_MATCHES, EXIT_RUNTIME, EXIT_SUCCESS, EXIT_UNMATCHED,
};

pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

fn cli_err(code: u8, message: impl Into<String>) -> CliError {
    CliError { code, message: message.into(), hint: None }
}

#[derive(Parser)]
#[command(name = "cheflist")]
#[command(about = "Reconcile chef order lists against a supplier catalog")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Match an order file against a product catalog and write artifacts
    #[command(after_help = "\
Examples:
  cheflist run cheflist_orders.csv --products products.csv
  cheflist run manual_orders.csv -p products.csv -c cheflist.toml
  cheflist run orders.csv -p products.csv --json > result.json
  cheflist run orders.csv -p products.csv --traces --output-dir out")]
    Run {
        /// Order CSV (preamble: order number, delivery date; body from line 5)
        order: PathBuf,

        /// Supplier product catalog CSV
        #[arg(long, short = 'p')]
        products: PathBuf,

        /// TOML config file (defaults apply when omitted)
        #[arg(long, short = 'c')]
        config: Option<PathBuf>,

        /// Artifact directory (overrides [output].dir)
        #[arg(long)]
        output_dir: Option<PathBuf>,

        /// Print the result document as JSON to stdout
        #[arg(long)]
        json: bool,

        /// Write the result document as JSON to a file
        #[arg(long)]
        output: Option<PathBuf>,

        /// Report every attempted match to stderr
        #[arg(long)]
        traces: bool,

        /// Validate inputs and match, but write no artifacts
        #[arg(long)]
        dry_run: bool,
    },

    /// Validate a config file without running
    #[command(after_help = "\
Examples:
  cheflist validate cheflist.toml")]
    Validate {
        /// Path to the TOML config file
        config: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            order,
            products,
            config,
            output_dir,
            json,
            output,
            traces,
            dry_run,
        } => cmd_run(order, products, config, output_dir, json, output, traces, dry_run),
        Commands::Validate { config } => cmd_validate(config),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            eprintln!("error: {}", e.message);
            if let Some(hint) = e.hint {
                eprintln!("hint: {hint}");
            }
            ExitCode::from(e.code)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<RunConfig, CliError> {
    match path {
        Some(path) => {
            let content = util::read_file_as_utf8(path)
                .map_err(|e| cli_err(EXIT_RUNTIME, e))?;
            RunConfig::from_toml(&content)
                .map_err(|e| cli_err(EXIT_INVALID_CONFIG, e.to_string()))
        }
        None => Ok(RunConfig::default()),
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_run(
    order_path: PathBuf,
    products_path: PathBuf,
    config_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    json_output: bool,
    output_file: Option<PathBuf>,
    show_traces: bool,
    dry_run: bool,
) -> Result<(), CliError> {
    let config = load_config(config_path.as_deref())?;

    let products_csv = util::read_file_as_utf8(&products_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, e))?;
    let order_csv = util::read_file_as_utf8(&order_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, e))?;

    let catalog = load_catalog(&products_csv, &config).map_err(engine_err)?;
    let order = load_order(&order_csv, &config).map_err(engine_err)?;

    let result = run(&config, &order, &catalog).map_err(engine_err)?;

    if show_traces {
        for trace in &result.traces {
            match (&trace.candidate, trace.score) {
                (Some(candidate), Some(score)) => eprintln!(
                    "line {}: '{}' → '{}' score {:.1}{}",
                    trace.index + 1,
                    trace.query,
                    candidate,
                    score,
                    if trace.accepted { "" } else { " (rejected)" },
                ),
                _ => eprintln!("line {}: '{}' → no candidate", trace.index + 1, trace.query),
            }
        }
    }

    // stdout is reserved for machine output.
    let json_str = serde_json::to_string_pretty(&result)
        .map_err(|e| cli_err(EXIT_RUNTIME, format!("JSON serialization error: {e}")))?;
    if let Some(ref path) = output_file {
        std::fs::write(path, &json_str)
            .map_err(|e| cli_err(EXIT_RUNTIME, format!("cannot write output: {e}")))?;
        eprintln!("wrote {}", path.display());
    }
    if json_output {
        println!("{json_str}");
    }

    let s = &result.summary;
    eprintln!(
        "order {}: {}/{} line(s) matched ({} mode, threshold {}), {} supplier(s)",
        result.meta.order_number,
        s.matched,
        s.lines_total,
        result.meta.mode,
        result.meta.threshold,
        s.suppliers,
    );
    for line in &s.unmatched {
        match line.best_score {
            Some(score) => eprintln!(
                "  unmatched line {}: '{}' (best score {:.1})",
                line.index + 1,
                line.key,
                score
            ),
            None => eprintln!("  unmatched line {}: '{}'", line.index + 1, line.key),
        }
    }
    for warning in &s.coercion_warnings {
        eprintln!(
            "  warning: product {} has non-numeric {} '{}'",
            warning.product_id, warning.field, warning.value
        );
    }

    match s.outcome {
        MatchOutcome::AllUnmatched | MatchOutcome::Empty => {
            // Refuse to write empty artifacts; this run produced nothing.
            return Err(CliError {
                code: EXIT_NO_MATCHES,
                message: "no order line matched the catalog".into(),
                hint: Some("check the match mode and key column, or lower the threshold".into()),
            });
        }
        MatchOutcome::Partial | MatchOutcome::Full => {}
    }

    if !dry_run {
        let dir = output_dir.unwrap_or_else(|| PathBuf::from(&config.output.dir));
        let written = write::write_artifacts(
            &dir,
            &config.client,
            &result.purchase_orders,
            result.quote.as_ref(),
        )
        .map_err(|e| cli_err(EXIT_RUNTIME, e))?;
        for path in &written {
            eprintln!("wrote {}", path.display());
        }
    }

    if s.outcome == MatchOutcome::Partial {
        return Err(cli_err(
            EXIT_UNMATCHED,
            format!("{} order line(s) unmatched", s.unmatched.len()),
        ));
    }

    Ok(())
}

fn cmd_validate(config_path: PathBuf) -> Result<(), CliError> {
    let content = util::read_file_as_utf8(&config_path)
        .map_err(|e| cli_err(EXIT_RUNTIME, e))?;
    match RunConfig::from_toml(&content) {
        Ok(config) => {
            eprintln!(
                "valid: {} mode, threshold {}, client '{}'",
                config.mode, config.threshold, config.client,
            );
            Ok(())
        }
        Err(e) => Err(cli_err(EXIT_INVALID_CONFIG, e.to_string())),
    }
}

fn engine_err(e: EngineError) -> CliError {
    let code = match e {
        EngineError::ConfigParse(_) | EngineError::ConfigValidation(_) => EXIT_INVALID_CONFIG,
        EngineError::MissingColumn { .. } | EngineError::HeaderBlock { .. } | EngineError::Io(_) => {
            EXIT_RUNTIME
        }
    };
    cli_err(code, e.to_string())
}
