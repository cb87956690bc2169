//! Brightness control for laptop panels and external monitors

mod config;
mod control;
mod external;
mod system;

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use config::Config;
use control::{controller_factory::ControllerFactory, controller_set::ControllerSet};
use system::controller_core::ApplyHandle;
use external::{command::CommandRunner, dependency_provider::DependencyProvider};
use flexi_logger::Logger;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};

#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Args {
    /// Configuration file to use instead of the default one
    #[clap(short, long)]
    config: Option<PathBuf>,

    /// Log specification used when RUST_LOG isn't set
    #[clap(short, long, default_value = "info")]
    log_level: String,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Show all monitors with their backend and brightness
    List,
    /// Print the brightness of a monitor, the primary one by default
    Get { index: Option<usize> },
    /// Set the brightness of a monitor to a value between 0 and 1
    Set { index: usize, value: f64 },
    /// Change the brightness of a monitor by the given amount
    Adjust {
        index: usize,
        #[clap(allow_hyphen_values = true)]
        delta: f64,
    },
    /// Read "INDEX VALUE" lines from standard input and print every confirmed change
    Watch,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str(&args.log_level)?.start()?;
    log_panics::init();

    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::load_default()?,
    };
    let provider = DependencyProvider::make_system(&config);
    let controllers = ControllerFactory::new(provider.get_command_runner(), &config.controllers)
        .build(&provider.get_monitors())
        .await?;

    match args.command {
        Command::List => {
            for entry in controllers.entries() {
                let monitor = &entry.monitor;
                match &entry.controller {
                    Some(c) => println!(
                        "{}: {} [{}] {:.2}",
                        monitor.index,
                        monitor.name,
                        c.kind(),
                        c.get()
                    ),
                    None => println!("{}: {} [unmanaged]", monitor.index, monitor.name),
                }
            }
        }
        Command::Get { index: Some(index) } => println!("{:.2}", controllers.get(index)?),
        Command::Get { index: None } => {
            let primary = controllers
                .primary()
                .ok_or_else(|| anyhow!("The primary monitor has no working controller"))?;
            println!("{:.2}", primary.get());
        }
        Command::Set { index, value } => {
            let applied = controllers.set(index, value)?.wait().await?;
            println!("{:.2}", applied);
        }
        Command::Adjust { index, delta } => {
            let current = controllers.get(index)?;
            let applied = controllers.set(index, current + delta)?.wait().await?;
            log::info!("Brightness adjusted from {:.2} to {:.2}", current, applied);
            println!("{:.2}", applied);
        }
        Command::Watch => watch(&controllers).await?,
    }
    Ok(())
}

async fn watch<R: CommandRunner>(controllers: &ControllerSet<R>) -> Result<()> {
    let mut subscriptions = Vec::new();
    for (index, entry) in controllers.entries().iter().enumerate() {
        if let Some(controller) = &entry.controller {
            log::info!("Watching {}", controller.monitor().name);
            subscriptions.push(controllers.subscribe(index, move |value| {
                println!("{} {:.2}", index, value)
            })?);
        }
    }

    let mut pending: Vec<ApplyHandle> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        match parse_request(&line) {
            // Confirmation arrives through the subscription
            Some((index, value)) => match controllers.set(index, value) {
                Ok(handle) => {
                    pending.retain(|h| !h.is_finished());
                    pending.push(handle);
                }
                Err(e) => log::error!("{}", e),
            },
            None => log::warn!("Expected \"INDEX VALUE\", got {:?}", line),
        }
    }
    finish_pending(pending).await;
    // Let the subscriptions print the last confirmations
    tokio::task::yield_now().await;
    drop(subscriptions);
    Ok(())
}

/// Parse an "INDEX VALUE" request line
fn parse_request(line: &str) -> Option<(usize, f64)> {
    let mut parts = line.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(index), Some(value), None) => index.parse().ok().zip(value.parse().ok()),
        _ => None,
    }
}

/// Wait for brightness changes still being applied, so they aren't killed on exit
async fn finish_pending(pending: Vec<ApplyHandle>) {
    for handle in pending {
        if let Err(e) = handle.wait().await {
            log::error!("Brightness change didn't apply: {}", e);
        }
    }
}
