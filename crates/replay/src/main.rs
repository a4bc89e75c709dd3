//! Stepped auction replay CLI
//!
//! Replays a collection's historical mint tape through a CRA or GDA auction
//! and prints the resulting per-step prices and mints.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use stepped_auction::ClockAxis;
use stepped_auction_replay::{run_project, AuctionReport, ProjectTable, ReportFormat, SimulationSettings};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "auction-replay")]
#[command(about = "Replay historical mints through a stepped CRA/GDA auction", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding tape CSV files (defaults to $AUCTION_SIM_DATA or ./sim_data)
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// TOML file adding or overriding project configurations
    #[arg(long, value_name = "FILE")]
    projects: Option<PathBuf>,

    /// Log output style
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Replay a project's tape and print the report
    Run {
        /// Project name
        project: String,
        /// Clock axis: block (CRA) or timestamp (GDA)
        #[arg(long, default_value = "block")]
        axis: ClockAxis,
        /// Re-sort the tape by clock before replaying
        #[arg(long)]
        sort: bool,
        /// Report format
        #[arg(long, value_enum, default_value_t = ReportFormat::Table)]
        format: ReportFormat,
        /// Write the report to a file instead of stdout
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },
    /// List known projects
    Projects,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum LogFormat {
    Pretty,
    Compact,
}

fn init_logging(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty().with_writer(std::io::stderr))
            .init(),
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().compact().with_writer(std::io::stderr))
            .init(),
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let table = ProjectTable::with_overrides(cli.projects.as_deref())
        .context("failed to load project table")?;

    match cli.command {
        Commands::Projects => {
            for name in table.names() {
                println!("{name}");
            }
            Ok(())
        }
        Commands::Run {
            project,
            axis,
            sort,
            format,
            output,
        } => {
            let settings = SimulationSettings::resolve(cli.data_dir);
            let config = table.get(&project)?;
            info!(%project, %axis, data_dir = %settings.data_dir.display(), "replaying tape");

            let (auction, stats) = run_project(config, &settings, axis, sort)
                .with_context(|| format!("replay of {project} failed"))?;
            let report =
                AuctionReport::build(&project, &auction, stats, Some(config.auction.collection_size))
                    .context("failed to build auction report")?;

            println!("Total minted: {}", report.total_minted);
            let rendered = report.render(format)?;
            match output {
                Some(path) => fs::write(&path, rendered)
                    .with_context(|| format!("failed to write {}", path.display()))?,
                None => print!("{rendered}"),
            }
            Ok(())
        }
    }
}
