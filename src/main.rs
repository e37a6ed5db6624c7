//! # droid-contacts CLI
//!
//! Reads an Android `contacts2.db`, prints the contacts as a JSON array on
//! stdout and optionally writes them to a vCard file.
//!
//! ## Examples
//!
//! ```bash
//! # JSON only
//! droid-contacts contacts2.db > contacts.json
//!
//! # JSON plus a vCard file
//! droid-contacts contacts2.db --vcards contacts.vcf
//!
//! # One merged record per contact, Norwegian numbering
//! droid-contacts contacts2.db --merge --region NO
//! ```

use clap::Parser;
use std::path::PathBuf;

use droid_contacts::aggregate::EmitMode;
use droid_contacts::config::{self, Config};
use droid_contacts::{export, logging};

/// Export contacts from an Android contacts2.db as JSON and vCard.
#[derive(Parser)]
#[command(name = "droid-contacts", version)]
struct Cli {
    /// SQLite3 Android database from the contacts provider.
    #[arg(default_value = "contacts2.db")]
    database: PathBuf,

    /// File to gather the vCards in. Without it only JSON is printed.
    #[arg(long)]
    vcards: Option<PathBuf>,

    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Default region for phone numbers without a country prefix (e.g. `SE`).
    #[arg(long)]
    region: Option<String>,

    /// Emit one merged record per contact instead of one per data row.
    #[arg(long)]
    merge: bool,

    /// Enable debug logging on stderr.
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut cfg = match &cli.config {
        Some(path) => config::load_config(path)?,
        None => Config::default(),
    };
    if let Some(region) = &cli.region {
        cfg.phone.region = region.clone();
    }
    if cli.merge {
        cfg.output.emit = EmitMode::PerContact;
    }
    let cfg = cfg.validated()?;

    logging::init_logging(&cfg.logging.filter, cli.verbose)?;

    export::run_export(&cfg, &cli.database, cli.vcards.as_deref()).await
}
