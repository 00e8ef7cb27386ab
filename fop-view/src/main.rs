//! fop-view - render a portal list screen from a record dump
//!
//! Mirrors what a portal page does: one fragment is mounted on the shared
//! view-state bus, the command-line filters are written to the bus, and the
//! fragment's re-derived list is printed.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use fop_common::bus::ViewStateBus;
use fop_common::config::ConfigResolver;
use fop_common::pipeline::Identity;
use fop_common::screens::Screen;
use fop_view::{load_records, Session, ViewRequest};
use tracing::{info, warn};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Table,
    Json,
}

/// Command-line arguments for fop-view
#[derive(Parser, Debug)]
#[command(name = "fop-view")]
#[command(about = "Render a FieldOps portal list screen from a JSON record dump")]
#[command(version)]
struct Args {
    /// JSON file holding the records (array, or object with a `value` array)
    #[arg(short, long)]
    records: PathBuf,

    /// Screen preset: bulletins, reports, requests, review-queue, schedules
    #[arg(short, long)]
    screen: Screen,

    /// Free-text search
    #[arg(short, long)]
    query: Option<String>,

    /// Status pill to select ("All" clears it)
    #[arg(long)]
    status: Option<String>,

    /// Screen-specific secondary filter (category, type, site)
    #[arg(long)]
    secondary: Option<String>,

    /// Only records owned by the given identity
    #[arg(long)]
    mine: bool,

    /// Current user's email
    #[arg(long, env = "FOP_USER_EMAIL")]
    email: Option<String>,

    /// Current user's worker id
    #[arg(long, env = "FOP_WORKER_ID")]
    worker_id: Option<String>,

    /// Config file (overrides FOP_CONFIG and the platform default)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value = "table")]
    format: Format,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = ConfigResolver::new(args.config.as_deref())
        .load()
        .context("Failed to load configuration")?;

    fop_common::logging::init(&config.logging).context("Failed to initialize logging")?;

    info!(
        "Starting fop-view v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    let records = load_records(&args.records)
        .with_context(|| format!("Failed to read records from {}", args.records.display()))?;
    info!("Loaded {} records from {}", records.len(), args.records.display());

    let identity = Identity::new(args.email.clone(), args.worker_id.clone());
    if args.mine && identity.is_anonymous() {
        warn!("--mine given without --email or --worker-id; no records will be owned");
    }

    let bus = ViewStateBus::named(&config.bus.slot_key);
    let session = Session::mount(bus, args.screen, records, Some(identity), config);

    let request = ViewRequest {
        query: args.query,
        status: args.status,
        secondary: args.secondary,
        mine: args.mine,
    };
    let patch = request.to_patch();
    if !patch.is_empty() {
        let delivery = session.apply(&patch);
        if delivery.panicked > 0 {
            warn!("{} subscriber(s) failed during broadcast", delivery.panicked);
        }
    }

    let report = session.current();
    match args.format {
        Format::Table => print!("{}", report.to_table()),
        Format::Json => println!("{}", report.to_json().context("Failed to encode report")?),
    }

    Ok(())
}
