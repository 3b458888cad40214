use crate::models::torrent::Torrent;

/// Partition of a snapshot. Checking torrents appear in none of the sets.
#[derive(Debug, Default)]
pub struct Classification<'a> {
    /// Incomplete and currently allowed to download
    pub active: Vec<&'a Torrent>,
    /// Incomplete and paused while downloading
    pub paused: Vec<&'a Torrent>,
    /// Everything else that is not being checked
    pub ignorable: Vec<&'a Torrent>,
    /// Not paused, not checking, no working tracker
    pub reannounce: Vec<&'a Torrent>,
    pub checking: Vec<&'a Torrent>,
}

impl Classification<'_> {
    pub fn total_active(&self) -> u64 {
        sum_left(&self.active)
    }

    pub fn total_paused(&self) -> u64 {
        sum_left(&self.paused)
    }
}

pub fn sum_left(torrents: &[&Torrent]) -> u64 {
    torrents
        .iter()
        .fold(0u64, |acc, t| acc.saturating_add(t.amount_left))
}

/// Sort a snapshot into the sets the budget engine and reannounce trigger work on
pub fn classify(snapshot: &[Torrent]) -> Classification<'_> {
    let mut classes = Classification::default();

    for torrent in snapshot {
        if torrent.state.is_checking() {
            classes.checking.push(torrent);
            continue;
        }

        if !torrent.state.is_paused() && !torrent.has_tracker() {
            classes.reannounce.push(torrent);
        }

        if torrent.is_paused_incomplete() {
            classes.paused.push(torrent);
        } else if torrent.is_incomplete() && !torrent.state.is_paused() {
            classes.active.push(torrent);
        } else {
            classes.ignorable.push(torrent);
        }
    }

    classes
}
