use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use sqlprep_core::{Config, OutcomeKind, Report};
use sqlprep_ddl::{PrepError, Preparer};

/// sqlprep - one-shot preparation of DDL files
#[derive(Parser)]
#[command(name = "sqlprep")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to config file (default: sqlprep.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Directory holding the DDL files (overrides the config)
    #[arg(short, long, global = true)]
    base_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Compute everything but write no files
    #[arg(long, global = true)]
    dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(short, long, global = true)]
    report: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prefix each DDL file with DROP TABLE statements in reverse creation order
    Drops,

    /// Split each DDL file into a schema file and a seed data file
    Split,

    /// Inject drops, then split
    Run,

    /// List CREATE TABLE names per file, in drop order
    Tables {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write a default config file
    Init {
        /// Where to write the config
        #[arg(default_value = "sqlprep.toml")]
        path: PathBuf,

        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.verbose);

    match &cli.command {
        Commands::Drops => run_pass(&cli, |p| p.inject_drops()),
        Commands::Split => run_pass(&cli, |p| p.split_seeds()),
        Commands::Run => run_pass(&cli, |p| p.run_all()),
        Commands::Tables { json } => tables_command(&load_config(&cli)?, *json),
        Commands::Init { path, force } => init_command(path, *force),
    }
}

/// Load config, run one pass over every file, report
fn run_pass(
    cli: &Cli,
    pass: impl FnOnce(&mut Preparer<'_>) -> Result<Report, PrepError>,
) -> Result<()> {
    let config = load_config(cli)?;

    tracing::debug!(base_dir = %config.base_dir.display(), files = config.files.len(), "config loaded");

    let mut preparer = Preparer::new(&config).with_dry_run(cli.dry_run);
    let report = pass(&mut preparer)?;
    finish(report, cli)
}

/// Logs go to stderr; RUST_LOG overrides the -v default
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

/// Resolve config: --config, then ./sqlprep.toml, then defaults
fn load_config(cli: &Cli) -> Result<Config> {
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)
            .with_context(|| format!("Failed to load config {}", config_path.display()))?
    } else if Path::new("sqlprep.toml").exists() {
        Config::from_file(Path::new("sqlprep.toml"))
            .context("Failed to load sqlprep.toml")?
    } else {
        if cli.verbose {
            eprintln!("{}", "No config file found, using defaults".yellow());
        }
        Config::default()
    };

    if let Some(base_dir) = &cli.base_dir {
        config.base_dir = base_dir.clone();
    }

    if cli.verbose {
        eprintln!("{} {}", "Base directory:".cyan(), config.base_dir.display());
    }

    Ok(config)
}

/// Print per-file lines, optionally save the report
fn finish(report: Report, cli: &Cli) -> Result<()> {
    print_outcomes(&report, cli.verbose);

    if let Some(path) = &cli.report {
        report
            .save_to_file(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
        if cli.verbose {
            eprintln!("{} {}", "Report saved to:".green(), path.display());
        }
    }

    if cli.verbose {
        print_summary(&report);
    }

    Ok(())
}

fn print_outcomes(report: &Report, verbose: bool) {
    for outcome in &report.outcomes {
        let line = match outcome.kind {
            OutcomeKind::DropsInjected | OutcomeKind::Split => outcome.message.green(),
            OutcomeKind::NoSeedData => outcome.message.yellow(),
            // Missing files stay silent unless asked
            OutcomeKind::Skipped if verbose => outcome.message.dimmed(),
            OutcomeKind::Skipped => continue,
        };

        if outcome.dry_run {
            println!("{} {}", "[dry-run]".cyan(), line);
        } else {
            println!("{}", line);
        }
    }
}

fn print_summary(report: &Report) {
    println!("\n{}", "=".repeat(60).bright_blue());
    println!("{}", "DDL Preparation Report".bold().bright_blue());
    println!("{}", "=".repeat(60).bright_blue());
    println!();

    println!("Version: {}", report.version);
    println!("Timestamp: {}", report.timestamp);
    if report.dry_run {
        println!("{}", "Dry run: no files were written".yellow());
    }
    println!();

    println!("{}", "Summary:".bold());
    println!("  Files processed:  {}", report.summary.processed);
    println!("  Drop statements:  {}", report.summary.drop_statements);
    println!("  Files split:      {}", report.summary.split);

    if report.summary.no_seed_data > 0 {
        println!("  No seed data:     {}", report.summary.no_seed_data.to_string().yellow());
    } else {
        println!("  No seed data:     {}", report.summary.no_seed_data);
    }

    println!("  Skipped:          {}", report.summary.skipped);
    println!();
    println!("{}", "=".repeat(60).bright_blue());
}

/// Tables command - read-only listing of drop order
fn tables_command(config: &Config, json: bool) -> Result<()> {
    let listings = Preparer::new(config).list_tables()?;

    if json {
        let value: Vec<_> = listings
            .iter()
            .map(|l| {
                serde_json::json!({
                    "file": l.file,
                    "dialect": l.dialect,
                    "tables": l.tables,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    if listings.is_empty() {
        println!("{}", "No DDL files found".yellow());
        return Ok(());
    }

    for listing in &listings {
        let dialect = listing
            .dialect
            .map(|d| d.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        println!(
            "{} ({}, {} tables)",
            listing.file.bold(),
            dialect.cyan(),
            listing.tables.len()
        );
        for (i, table) in listing.tables.iter().enumerate() {
            println!("  {}. {}", i + 1, table);
        }
    }

    Ok(())
}

/// Init command - write the default config
fn init_command(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!("{} already exists (use --force to overwrite)", path.display());
    }

    Config::default()
        .save_to_file(path)
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("{} {}", "Wrote".green(), path.display());
    Ok(())
}
