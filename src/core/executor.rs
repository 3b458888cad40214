use crate::api::manager::DownloadManager;
use crate::core::error::ClientError;
use crate::engine::plan::Plan;
use crate::models::action::{Action, ActionKind, RunReport};
use crate::utils::format::short_hash;
use tracing::{info, warn};

/// Apply a plan in order. A failed action is logged and counted; the rest of
/// the plan still runs.
pub async fn execute<M>(plan: &Plan, manager: &M, dry_run: bool) -> RunReport
where
    M: DownloadManager + ?Sized,
{
    let mut report = RunReport::default();

    for action in &plan.actions {
        if dry_run {
            info!(
                action = %action.kind,
                hash = short_hash(&action.hash),
                name = %action.name,
                "dry run - would {} - {}: {}",
                action.kind,
                short_hash(&action.hash),
                action.name
            );
            report.skipped += 1;
            continue;
        }

        info!(
            action = %action.kind,
            hash = short_hash(&action.hash),
            name = %action.name,
            "{} - {}: {}",
            action.kind,
            short_hash(&action.hash),
            action.name
        );

        match apply(action, manager).await {
            Ok(()) => report.record_success(action.kind),
            Err(e) => {
                warn!(
                    action = %action.kind,
                    hash = %action.hash,
                    name = %action.name,
                    error = %e,
                    "Torrent command failed, continuing with the remaining actions"
                );
                report.failed += 1;
            }
        }
    }

    report
}

async fn apply<M>(action: &Action, manager: &M) -> Result<(), ClientError>
where
    M: DownloadManager + ?Sized,
{
    match action.kind {
        ActionKind::Pause => manager.pause(&action.hash).await,
        ActionKind::Resume => manager.resume(&action.hash).await,
        ActionKind::Reannounce => manager.reannounce(&action.hash).await,
    }
}
