use anyhow::{Context, Result};
use clap::Parser;
use qbit_keeper::api::client::QbitClient;
use qbit_keeper::core::config::{Config, RunSettings};
use qbit_keeper::core::runner::run_once;
use qbit_keeper::core::tracing_init::init_tracing;
use qbit_keeper::storage::free_space::FsProbe;
use std::path::PathBuf;
use std::time::Duration;
use tokio::signal;
use tokio::time::MissedTickBehavior;
use tracing::{debug, error, info};

/// Keep qBittorrent downloads within the free disk space and reannounce
/// torrents that lost their tracker
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Resume paused downloads when there is room for them
    #[arg(long = "auto-resume", overrides_with = "no_auto_resume")]
    auto_resume: bool,

    /// Never resume paused downloads, whatever the config file says
    #[arg(long = "no-auto-resume", overrides_with = "auto_resume")]
    no_auto_resume: bool,

    /// Log the decisions without sending any command
    #[arg(long)]
    dry_run: bool,

    /// Keep running, one pass every SECS seconds
    #[arg(long, value_name = "SECS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,
}

impl Cli {
    fn autoresume_override(&self) -> Option<bool> {
        if self.no_auto_resume {
            Some(false)
        } else if self.auto_resume {
            Some(true)
        } else {
            None
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load and validate configuration
    let config = Config::from_file(&cli.config).context(format!(
        "Failed to load configuration from '{}'. \
        Copy config.example.toml to config.toml and adjust the values.",
        cli.config.display()
    ))?;

    init_tracing(&config.logging)?;
    debug!("startup");

    // Runs never overlap, a current-thread runtime is all that is needed
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build Tokio runtime")?;

    let result = runtime.block_on(async_main(config, cli));

    debug!("shutdown");
    result
}

async fn async_main(config: Config, cli: Cli) -> Result<()> {
    let settings = config.run_settings(cli.autoresume_override(), cli.dry_run);

    info!(
        config_path = %cli.config.display(),
        host = %config.qbit.host,
        download_dir = %settings.download_dir.display(),
        min_free_bytes = settings.min_free_bytes,
        autoresume = settings.autoresume,
        dry_run = settings.dry_run,
        interval = ?cli.interval,
        "qbit-keeper starting"
    );

    let client = QbitClient::new(
        &config.qbit.host,
        config.qbit.user.clone(),
        config.qbit.password.clone(),
    )
    .context("Failed to create qBittorrent client")?;

    match cli.interval {
        None => {
            if let Err(e) = run_once(&client, &FsProbe, &settings).await {
                error!(error = %e, "Run aborted");
                return Err(e.into());
            }
            Ok(())
        }
        Some(secs) => {
            run_forever(&client, &settings, Duration::from_secs(secs)).await;
            Ok(())
        }
    }
}

/// Run on a fixed period until a shutdown signal arrives. A fatal run error
/// is logged and the next tick tries again.
async fn run_forever(client: &QbitClient, settings: &RunSettings, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let shutdown = shutdown_signal();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {}
        }

        if let Err(e) = run_once(client, &FsProbe, settings).await {
            error!(error = %e, "Run aborted");
        }
    }

    info!("Shutting down gracefully");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            info!("Received SIGTERM signal");
        },
    }
}
