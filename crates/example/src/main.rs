//! Example tool catalog CLI.
//!
//! Installs every declared tool and prints the tool set an agent session
//! would load, or the whole catalog as JSON.
//!
//! # Usage
//!
//! ```bash
//! catalog [--app <APP>] [--category <CATEGORY>]... [--essential-only] [--json]
//! ```
//!
//! # Example
//!
//! ```bash
//! RUST_LOG=toolbelt_tools=debug catalog --app helpdesk --category ticketing
//! ```

use clap::Parser;
use example::{CatalogError, build_catalog, render_entries, session_filter};
use std::io::Write;
use std::process::ExitCode;
use toolbelt_tools::{DuplicatePolicy, RegistryConfig, ToolCategory};
use toolbelt_tracing::{TracingConfig, TracingFormat};

#[derive(Debug, Parser)]
#[command(name = "catalog", about = "Print the tools declared in this binary")]
struct Cli {
    /// Only tools of this application.
    #[arg(long)]
    app: Option<String>,

    /// Only tools in this category; repeat to accept several.
    #[arg(long = "category")]
    categories: Vec<ToolCategory>,

    /// Print only the essential tools.
    #[arg(long)]
    essential_only: bool,

    /// Print the full catalog snapshot as JSON.
    #[arg(long)]
    json: bool,

    /// Fail on duplicate registrations instead of overwriting.
    #[arg(long)]
    strict: bool,

    /// Log format: pretty, compact or json.
    #[arg(long, default_value = "compact")]
    log_format: TracingFormat,
}

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    TracingConfig::from_env().with_format(cli.log_format).init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "Catalog failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CatalogError> {
    let policy = if cli.strict {
        DuplicatePolicy::Reject
    } else {
        DuplicatePolicy::Overwrite
    };
    let registry = build_catalog(RegistryConfig::new().with_duplicate_policy(policy))?;

    let output = if cli.json {
        registry.snapshot().to_json()?
    } else {
        let filter = session_filter(cli.app.as_deref(), &cli.categories);
        let entries = if cli.essential_only {
            registry.select(&filter.with_essential(true))
        } else {
            registry.active_set(&filter)
        };
        tracing::info!(selected = entries.len(), total = registry.len(), "Selected tools");
        render_entries(&entries)
    };

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{output}")?;
    Ok(())
}
