//! Specsnap - system specification snapshot
//!
//! Collects a one-shot inventory of local hardware and OS specs (CPU, RAM,
//! GPU, storage, motherboard, hostname) from whatever data sources this
//! platform offers, degrading gracefully when a source is missing, and
//! prints a stable, copy-friendly text report.

mod collector;
mod inventory;
mod probes;
mod report;
mod sources;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

use crate::sources::SourceSet;

#[cfg(target_os = "windows")]
use windows_sys::Win32::Foundation::INVALID_HANDLE_VALUE;
#[cfg(target_os = "windows")]
use windows_sys::Win32::System::Console::{
    GetConsoleMode, GetStdHandle, SetConsoleCP, SetConsoleMode, SetConsoleOutputCP,
    ENABLE_PROCESSED_OUTPUT, ENABLE_VIRTUAL_TERMINAL_PROCESSING, ENABLE_WRAP_AT_EOL_OUTPUT,
    STD_ERROR_HANDLE, STD_OUTPUT_HANDLE,
};

/// Specsnap - detect and display your system specs
#[derive(Parser)]
#[command(name = "specsnap")]
#[command(version)]
#[command(about = "Detect your hardware and OS specs and print a copyable report")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Collect a snapshot and print the report (default)
    Report {
        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show which data sources are available on this system
    Sources,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[cfg(target_os = "windows")]
fn init_windows_console() {
    // Best-effort enabling of UTF-8 and ANSI/VT sequences in legacy hosts.
    // If a handle isn't a console (e.g., redirected), these calls fail harmlessly.
    unsafe {
        let _ = SetConsoleOutputCP(65001);
        let _ = SetConsoleCP(65001);

        for handle_id in [STD_OUTPUT_HANDLE, STD_ERROR_HANDLE] {
            let handle = GetStdHandle(handle_id);
            if handle.is_null() || handle == INVALID_HANDLE_VALUE {
                continue;
            }

            let mut mode: u32 = 0;
            if GetConsoleMode(handle, &mut mode) == 0 {
                continue;
            }

            let desired = mode
                | ENABLE_PROCESSED_OUTPUT
                | ENABLE_WRAP_AT_EOL_OUTPUT
                | ENABLE_VIRTUAL_TERMINAL_PROCESSING;
            let _ = SetConsoleMode(handle, desired);
        }
    }
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Diagnostics go to stderr so the report on stdout stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    #[cfg(target_os = "windows")]
    init_windows_console();

    init_tracing();

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Report {
        format: OutputFormat::Text,
    });

    match command {
        Commands::Report { format } => run_report(format),
        Commands::Sources => run_sources(),
    }
}

/// Collect once on a blocking task and print the result
fn run_report(format: OutputFormat) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    let inventory = rt
        .block_on(async { collector::spawn_collection().await })
        .context("collection task failed")?;

    match format {
        OutputFormat::Text => println!("{}", report::render(&inventory)),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&inventory)?),
    }

    Ok(())
}

/// Probe source availability and list it, doctor-style
fn run_sources() -> Result<()> {
    let sources = SourceSet::detect();
    let caps = sources.capabilities();

    println!("{}", "Data sources:".bright_white());
    let listing = [
        ("Generic metrics (sysinfo)", caps.generic_metrics),
        ("Vendor instrumentation (WMI)", caps.vendor_instrumentation),
        ("Basic OS primitives", caps.basic_primitives),
    ];
    for (name, available) in listing {
        let status = if available {
            "✓ Available".bright_green()
        } else {
            "✗ Not found".bright_red()
        };
        println!("  • {}: {}", name.bright_cyan(), status);
    }

    Ok(())
}
