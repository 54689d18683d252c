//! Quill replay binary.
//!
//! # Usage
//!
//! ```bash
//! # Replay a script with defaults
//! quill --script demos/font_flow.jsonl
//!
//! # With a font catalog and config
//! quill --script demos/font_flow.jsonl --fonts demos/fonts.json --config demos/config.json
//! ```

use std::{io, path::PathBuf};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Composer script replay
#[derive(Parser, Debug)]
#[command(name = "quill")]
#[command(about = "Replay composer event scripts and print envelopes sent to the editing surface")]
#[command(version)]
struct Args {
    /// JSON-lines event script
    #[arg(short, long)]
    script: PathBuf,

    /// Composer config (JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Font catalog (JSON array of descriptors)
    #[arg(short, long)]
    fonts: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    let (config, fonts) = quill_cli::load_inputs(args.config.as_deref(), args.fonts.as_deref())?;
    let steps = quill_cli::load_script(&args.script)?;

    quill_cli::replay(steps, &config, fonts, io::stdout()).await?;
    Ok(())
}
