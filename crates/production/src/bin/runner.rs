//! Match descriptor discovery runner.
//!
//! Runs the discovery cycle against a loopback driver that confirms every
//! frame as delivered. Useful to check timing and logging of a
//! configuration without a radio attached.

use anyhow::{Context, Result};
use clap::Parser;
use meshscout_core::ApsDataConfirm;
use meshscout_node::DiscoveryPlugin;
use meshscout_production::{
    init_tracing, ChannelBoundary, EventLoop, HostHandle, OutboundFrame, RunnerConfig,
};
use meshscout_types::ApsStatus;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// Match descriptor discovery runner.
#[derive(Parser, Debug)]
#[command(name = "meshscout-runner")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to configuration file (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for transaction sequence numbers (overrides config)
    #[arg(long)]
    seed: Option<u64>,

    /// Log level filter (overrides config, RUST_LOG overrides both)
    #[arg(long)]
    log_level: Option<String>,
}

impl Cli {
    fn load_config(&self) -> Result<RunnerConfig> {
        let mut config = match &self.config {
            Some(path) => RunnerConfig::load(path)
                .with_context(|| format!("Failed to load config: {}", path.display()))?,
            None => RunnerConfig::default(),
        };
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        if let Some(level) = &self.log_level {
            config.log_filter = level.clone();
        }
        Ok(config)
    }
}

/// Confirm every outbound frame as delivered.
async fn loopback_driver(mut frames: mpsc::Receiver<OutboundFrame>, handle: HostHandle) {
    while let Some(frame) = frames.recv().await {
        info!(
            id = %frame.id,
            cluster = %frame.request.cluster,
            dst = %frame.request.dst_address,
            "Transmitting frame"
        );
        let confirm = ApsDataConfirm {
            id: frame.id,
            status: ApsStatus::SUCCESS,
        };
        if handle.deliver_confirm(confirm).await.is_err() {
            break;
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = cli.load_config()?;
    init_tracing(&config.log_filter)?;

    let seed = config.seed.unwrap_or_else(rand::random);
    info!(
        seed,
        idle_timeout_ms = config.idle_timeout_ms,
        wait_response_timeout_ms = config.wait_response_timeout_ms,
        "Starting meshscout runner"
    );

    let (boundary, frames, joined) = ChannelBoundary::new(16);
    joined.set(true);
    let plugin = DiscoveryPlugin::new(config.discovery_config(), boundary, seed);

    let (report_tx, mut reports) = mpsc::unbounded_channel();
    let (event_loop, handle) = EventLoop::new(plugin, 64);
    let event_loop = tokio::spawn(event_loop.with_reports(report_tx).run());
    tokio::spawn(loopback_driver(frames, handle.clone()));

    tokio::spawn(async move {
        while let Some(report) = reports.recv().await {
            info!(
                seq = report.seq.0,
                source = %report.source,
                endpoints = ?report.endpoints,
                "Match reported"
            );
        }
    });

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    info!("Shutdown signal received");
    if let Err(e) = handle.shutdown().await {
        warn!(error = %e, "Event loop already stopped");
    }

    let plugin = event_loop.await.context("Event loop task failed")?;
    let stats = plugin.stats();
    info!(
        events_forwarded = stats.events_forwarded,
        indications_ignored = stats.indications_ignored,
        decode_errors = stats.decode_errors,
        "meshscout runner stopped"
    );
    Ok(())
}
