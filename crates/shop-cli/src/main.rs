//! shopctl
//!
//! Command-line interface for the shop catalog database

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shop_core::logging_facility;
use shop_core_types::{RequestContext, TraceId};

mod commands;
mod config;

use config::ShopConfig;

#[derive(Debug, Parser)]
#[command(name = "shopctl")]
#[command(about = "Shop catalog - schema migrations, audits and summaries", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database file (overrides `database.path` from the configuration)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Correlation id of the calling system, attached to logs and errors
    #[arg(long, global = true)]
    trace_id: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Create or upgrade the catalog tables
    Migrate,
    /// Validate every stored record and report the violations
    Audit,
    /// Print the labels of the stored catalog
    Summary(commands::summary::SummaryArgs),
}

fn main() {
    let cli = Cli::parse();

    let config = match ShopConfig::load(cli.config.as_deref(), cli.db) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    logging_facility::init(config.logging.profile);

    let mut ctx = RequestContext::new();
    if let Some(trace_id) = cli.trace_id {
        ctx = ctx.with_trace_id(TraceId::from_string(trace_id));
    }
    let span = tracing::info_span!(
        "shopctl",
        request_id = %ctx.request_id,
        trace_id = ctx.trace_id.as_ref().map(TraceId::as_str)
    );
    let _guard = span.enter();

    let result = match cli.command {
        Commands::Migrate => commands::migrate::execute(&config),
        Commands::Audit => commands::audit::execute(&config),
        Commands::Summary(args) => commands::summary::execute(args, &config),
    };

    if let Err(e) = result {
        let mut e = e.with_request_id(ctx.request_id.clone());
        if let Some(trace_id) = ctx.trace_id.clone() {
            e = e.with_trace_id(trace_id);
        }
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
