use crate::engine::classifier::sum_left;
use crate::models::torrent::Torrent;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BudgetAction {
    Pause,
    Resume,
}

/// Decide which incomplete torrents to pause or resume so that the bytes still
/// to be downloaded by active torrents stay under `free_bytes`.
///
/// When autoresume is on and there is headroom, paused torrents are resumed
/// smallest first and the pause phase is skipped for this run. Otherwise active
/// torrents are paused largest first until the remainder fits. Ties keep
/// snapshot order.
pub fn plan_budget<'a>(
    active: &[&'a Torrent],
    paused: &[&'a Torrent],
    free_bytes: u64,
    autoresume: bool,
) -> Vec<(&'a Torrent, BudgetAction)> {
    let total_active = sum_left(active);
    let total_paused = sum_left(paused);

    if autoresume {
        if total_active.saturating_add(total_paused) < free_bytes {
            return paused.iter().map(|t| (*t, BudgetAction::Resume)).collect();
        }

        if total_active < free_bytes {
            return resume_smallest_first(paused, total_active, free_bytes);
        }
    }

    pause_largest_first(active, total_active, free_bytes)
}

fn resume_smallest_first<'a>(
    paused: &[&'a Torrent],
    total_active: u64,
    free_bytes: u64,
) -> Vec<(&'a Torrent, BudgetAction)> {
    let mut candidates = paused.to_vec();
    candidates.sort_by_key(|t| t.amount_left);

    let mut projected = total_active;
    let mut decisions = Vec::new();

    for torrent in candidates {
        let next = projected.saturating_add(torrent.amount_left);
        // sorted ascending, nothing after this one fits either
        if next >= free_bytes {
            break;
        }
        projected = next;
        decisions.push((torrent, BudgetAction::Resume));
    }

    decisions
}

fn pause_largest_first<'a>(
    active: &[&'a Torrent],
    total_active: u64,
    free_bytes: u64,
) -> Vec<(&'a Torrent, BudgetAction)> {
    let mut projected = total_active;
    if projected < free_bytes {
        return Vec::new();
    }

    let mut candidates = active.to_vec();
    candidates.sort_by_key(|t| std::cmp::Reverse(t.amount_left));

    let mut decisions = Vec::new();

    for torrent in candidates {
        decisions.push((torrent, BudgetAction::Pause));
        projected = projected.saturating_sub(torrent.amount_left);
        if projected < free_bytes {
            break;
        }
    }

    decisions
}
