use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use aws_inventory::collectors::{self, ServiceKind};
use aws_inventory::config::AwsCredentials;
use aws_inventory::report;

/// Credentials file read from the working directory.
const CREDENTIALS_FILE: &str = "aws_credentials.yml";

/// Regions the inventory walks, in order.
const REGIONS: &[&str] = &["us-east-1", "eu-west-1", "sa-east-1"];

/// Multi-region AWS resource inventory exported as an Excel workbook.
#[derive(Parser, Debug)]
#[command(name = "aws-inventory", version, about, long_about = None)]
struct Args {
    /// Path of the workbook to write
    output: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    info!(file = CREDENTIALS_FILE, "loading credentials");
    let credentials = AwsCredentials::load(Path::new(CREDENTIALS_FILE))
        .context("failed to load AWS credentials")?;

    let regions: Vec<String> = REGIONS.iter().map(|r| r.to_string()).collect();
    let provider = credentials.provider();

    let mut sheets = Vec::new();
    for collector in collectors::build_collectors(ServiceKind::all(), &provider) {
        let table = collector
            .discover(&regions)
            .await
            .with_context(|| format!("{} enumeration failed", collector.name()))?;
        info!(collector = collector.name(), rows = table.len(), "collected");
        sheets.push((collector.sheet(), table));
    }

    report::write_workbook(&args.output, &sheets)
}
