use serde::Deserialize;

/// Manager-reported torrent state, collapsed to the categories the keeper acts on
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum TorrentState {
    Downloading,
    Stalled,
    Queued,
    /// Paused (or stopped, on qBittorrent 5) while still downloading
    PausedDownload,
    /// Paused after the download finished
    PausedUpload,
    /// Hash check, resume data check or file move in progress
    Checking,
    Uploading,
    Error,
    Unknown(String),
}

impl TorrentState {
    pub fn is_paused(&self) -> bool {
        matches!(self, TorrentState::PausedDownload | TorrentState::PausedUpload)
    }

    pub fn is_checking(&self) -> bool {
        matches!(self, TorrentState::Checking)
    }

    pub fn as_str(&self) -> &str {
        match self {
            TorrentState::Downloading => "downloading",
            TorrentState::Stalled => "stalled",
            TorrentState::Queued => "queued",
            TorrentState::PausedDownload => "pausedDL",
            TorrentState::PausedUpload => "pausedUP",
            TorrentState::Checking => "checking",
            TorrentState::Uploading => "uploading",
            TorrentState::Error => "error",
            TorrentState::Unknown(raw) => raw,
        }
    }
}

impl From<&str> for TorrentState {
    fn from(raw: &str) -> Self {
        match raw {
            "downloading" | "metaDL" | "forcedMetaDL" | "forcedDL" | "allocating" => {
                TorrentState::Downloading
            }
            "stalledDL" => TorrentState::Stalled,
            "queuedDL" => TorrentState::Queued,
            "pausedDL" | "stoppedDL" => TorrentState::PausedDownload,
            "pausedUP" | "stoppedUP" => TorrentState::PausedUpload,
            "checkingDL" | "checkingUP" | "checkingResumeData" | "moving" => TorrentState::Checking,
            "uploading" | "stalledUP" | "queuedUP" | "forcedUP" => TorrentState::Uploading,
            "error" | "missingFiles" => TorrentState::Error,
            other => TorrentState::Unknown(other.to_string()),
        }
    }
}

impl From<String> for TorrentState {
    fn from(raw: String) -> Self {
        TorrentState::from(raw.as_str())
    }
}

/// One entry of the manager's torrent list, as read at the start of a run
#[derive(Clone, Debug, Deserialize)]
pub struct Torrent {
    /// Info hash, used as the stable identifier for every command
    pub hash: String,
    #[serde(default)]
    pub name: String,
    pub state: TorrentState,
    /// Unix timestamp of completion; zero or negative while still downloading
    #[serde(default)]
    pub completion_on: i64,
    /// Bytes still to download
    #[serde(default)]
    pub amount_left: u64,
    /// Completion ratio in 0.0..=1.0
    #[serde(default)]
    pub progress: f64,
    /// Currently working tracker URL, empty when none is registered
    #[serde(default)]
    pub tracker: String,
    #[serde(default)]
    pub category: String,
}

impl Torrent {
    pub fn has_tracker(&self) -> bool {
        !self.tracker.trim().is_empty()
    }

    pub fn is_completed(&self) -> bool {
        self.completion_on > 0
    }

    /// Both checks are needed: a finished torrent that lost its progress must
    /// not be treated as a download in flight.
    pub fn is_incomplete(&self) -> bool {
        self.progress != 1.0 && !self.is_completed()
    }

    /// A user can pause a completed torrent too, so the paused state alone is not enough.
    pub fn is_paused_incomplete(&self) -> bool {
        self.state == TorrentState::PausedDownload && self.is_incomplete()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_state_mapping() {
        assert_eq!(TorrentState::from("stalledDL"), TorrentState::Stalled);
        assert_eq!(TorrentState::from("pausedDL"), TorrentState::PausedDownload);
        assert_eq!(TorrentState::from("stoppedDL"), TorrentState::PausedDownload);
        assert_eq!(TorrentState::from("stoppedUP"), TorrentState::PausedUpload);
        assert_eq!(TorrentState::from("checkingResumeData"), TorrentState::Checking);
        assert_eq!(TorrentState::from("forcedDL"), TorrentState::Downloading);
        assert_eq!(
            TorrentState::from("somethingNew"),
            TorrentState::Unknown("somethingNew".to_string())
        );
    }

    #[test]
    fn test_paused_and_checking_predicates() {
        assert!(TorrentState::PausedDownload.is_paused());
        assert!(TorrentState::PausedUpload.is_paused());
        assert!(!TorrentState::Stalled.is_paused());
        assert!(TorrentState::Checking.is_checking());
        assert!(!TorrentState::Downloading.is_checking());
    }

    #[test]
    fn test_full_progress_without_completion_is_not_incomplete() {
        let mut t = downloading("aaa", 0);
        t.progress = 1.0;
        t.completion_on = 0;
        assert!(!t.is_incomplete());
    }

    #[test]
    fn test_partial_progress_with_completion_is_not_incomplete() {
        let mut t = downloading("aaa", 100);
        t.progress = 0.9;
        t.completion_on = 1_699_564_800;
        assert!(!t.is_incomplete());
    }

    #[test]
    fn test_partial_progress_without_completion_is_incomplete() {
        let mut t = downloading("aaa", 100);
        t.progress = 0.9;
        t.completion_on = -1;
        assert!(t.is_incomplete());
    }

    #[test]
    fn test_paused_completed_torrent_is_not_paused_incomplete() {
        let mut t = paused("aaa", 0);
        t.completion_on = 1_699_564_800;
        assert!(!t.is_paused_incomplete());

        t.completion_on = 0;
        assert!(t.is_paused_incomplete());
    }

    #[test]
    fn test_paused_full_progress_without_completion_is_not_paused_incomplete() {
        let mut t = paused("aaa", 0);
        t.progress = 1.0;
        t.completion_on = 0;
        assert!(!t.is_paused_incomplete());
    }

    #[test]
    fn test_tracker_presence() {
        let mut t = downloading("aaa", 1);
        assert!(t.has_tracker());
        t.tracker = String::new();
        assert!(!t.has_tracker());
    }

    #[test]
    fn test_deserialize_qbittorrent_entry() {
        let json = r#"{
            "hash": "8c212779b4abde7c6bc608063a0d008b7e40ce32",
            "name": "debian-12.iso",
            "state": "pausedDL",
            "completion_on": -1,
            "amount_left": 524288000,
            "progress": 0.25,
            "tracker": "",
            "category": "linux",
            "dlspeed": 0,
            "ratio": 0.0
        }"#;

        let t: Torrent = serde_json::from_str(json).unwrap();
        assert_eq!(t.state, TorrentState::PausedDownload);
        assert_eq!(t.amount_left, 524_288_000);
        assert_eq!(t.category, "linux");
        assert!(!t.has_tracker());
        assert!(t.is_incomplete());
        assert!(t.is_paused_incomplete());
    }
}
