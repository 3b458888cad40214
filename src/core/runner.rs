use crate::api::manager::DownloadManager;
use crate::core::config::RunSettings;
use crate::core::error::RunError;
use crate::core::executor::execute;
use crate::engine::classifier::{classify, sum_left};
use crate::engine::plan::build_plan;
use crate::models::action::{ActionKind, RunReport};
use crate::models::torrent::Torrent;
use crate::storage::free_space::{download_budget, FreeSpaceProbe};
use crate::utils::format::{format_bytes, short_hash};
use tracing::{debug, info};

/// One pass of the control loop: log in, snapshot, measure, decide, apply.
///
/// Login, snapshot and free-space failures abort the run and are left to the
/// caller to report. Failures of single torrent commands only show up in the
/// returned report.
pub async fn run_once<M, P>(
    manager: &M,
    probe: &P,
    settings: &RunSettings,
) -> Result<RunReport, RunError>
where
    M: DownloadManager + ?Sized,
    P: FreeSpaceProbe + ?Sized,
{
    manager.login().await.map_err(RunError::Login)?;
    debug!("Logged in to download manager");

    let snapshot = manager.list_torrents().await.map_err(RunError::Snapshot)?;

    let raw_free = probe.free_space(&settings.download_dir)?;
    let free_bytes = download_budget(raw_free, settings.min_free_bytes);

    let classes = classify(&snapshot);
    for torrent in &classes.checking {
        info!(
            category = %torrent.category,
            hash = short_hash(&torrent.hash),
            name = %torrent.name,
            state = torrent.state.as_str(),
            progress = torrent.progress,
            "skipping {} - {}: {} [{} {:.2}]",
            torrent.category,
            short_hash(&torrent.hash),
            torrent.name,
            torrent.state.as_str(),
            torrent.progress
        );
    }

    let incomplete: Vec<&Torrent> = snapshot.iter().filter(|t| t.is_incomplete()).collect();
    let amount_left = sum_left(&incomplete);

    info!(
        torrents = snapshot.len(),
        paused = snapshot.iter().filter(|t| t.state.is_paused()).count(),
        incomplete = incomplete.len(),
        active = classes.active.len(),
        paused_incomplete = classes.paused.len(),
        amount_left = amount_left,
        free_bytes = free_bytes,
        autoresume = settings.autoresume,
        "{} torrents, {} left to download, {} free after reserving {}",
        snapshot.len(),
        format_bytes(amount_left),
        format_bytes(free_bytes),
        format_bytes(settings.min_free_bytes)
    );

    let plan = build_plan(&classes, free_bytes, settings.autoresume);
    debug!(
        pauses = plan.count(ActionKind::Pause),
        resumes = plan.count(ActionKind::Resume),
        reannounces = plan.count(ActionKind::Reannounce),
        "Plan built"
    );
    if plan.is_empty() {
        info!("Nothing to do this run");
    }

    let report = execute(&plan, manager, settings.dry_run).await;

    info!(
        paused = report.paused,
        resumed = report.resumed,
        reannounced = report.reannounced,
        failed = report.failed,
        skipped = report.skipped,
        "Run completed"
    );

    Ok(report)
}
