#![allow(dead_code)]

use async_trait::async_trait;
use qbit_keeper::api::manager::DownloadManager;
use qbit_keeper::core::config::RunSettings;
use qbit_keeper::core::error::{ClientError, ProbeError};
use qbit_keeper::models::action::ActionKind;
use qbit_keeper::models::torrent::{Torrent, TorrentState};
use qbit_keeper::storage::free_space::FreeSpaceProbe;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub const GB: u64 = 1024 * 1024 * 1024;

pub fn torrent(hash: &str, state: TorrentState, amount_left: u64) -> Torrent {
    Torrent {
        hash: hash.to_string(),
        name: format!("torrent-{}", hash),
        state,
        completion_on: 0,
        amount_left,
        progress: 0.5,
        tracker: "http://tracker.example/announce".to_string(),
        category: "test".to_string(),
    }
}

pub fn downloading(hash: &str, amount_left: u64) -> Torrent {
    torrent(hash, TorrentState::Downloading, amount_left)
}

pub fn paused(hash: &str, amount_left: u64) -> Torrent {
    torrent(hash, TorrentState::PausedDownload, amount_left)
}

pub fn settings(min_free_bytes: u64, autoresume: bool) -> RunSettings {
    RunSettings {
        download_dir: PathBuf::from("/downloads"),
        min_free_bytes,
        autoresume,
        dry_run: false,
    }
}

/// In-memory download manager that applies pause/resume to its own snapshot
#[derive(Default)]
pub struct FakeManager {
    pub torrents: Mutex<Vec<Torrent>>,
    pub calls: Mutex<Vec<(ActionKind, String)>>,
    pub reject_login: bool,
    pub fail_listing: bool,
    pub failing_hashes: Vec<String>,
}

impl FakeManager {
    pub fn with_torrents(torrents: Vec<Torrent>) -> Self {
        Self {
            torrents: Mutex::new(torrents),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> Vec<(ActionKind, String)> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_of(&self, kind: ActionKind) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, h)| h)
            .collect()
    }

    pub fn state_of(&self, hash: &str) -> Option<TorrentState> {
        self.torrents
            .lock()
            .unwrap()
            .iter()
            .find(|t| t.hash == hash)
            .map(|t| t.state.clone())
    }

    fn command(&self, kind: ActionKind, hash: &str) -> Result<(), ClientError> {
        self.calls.lock().unwrap().push((kind, hash.to_string()));
        if self.failing_hashes.iter().any(|h| h == hash) {
            return Err(ClientError::Other(format!("{} failed for {}", kind, hash)));
        }

        let new_state = match kind {
            ActionKind::Pause => Some(TorrentState::PausedDownload),
            ActionKind::Resume => Some(TorrentState::Downloading),
            ActionKind::Reannounce => None,
        };
        if let Some(state) = new_state {
            if let Some(t) = self.torrents.lock().unwrap().iter_mut().find(|t| t.hash == hash) {
                t.state = state;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl DownloadManager for FakeManager {
    async fn login(&self) -> Result<(), ClientError> {
        if self.reject_login {
            Err(ClientError::AuthFailed)
        } else {
            Ok(())
        }
    }

    async fn list_torrents(&self) -> Result<Vec<Torrent>, ClientError> {
        if self.fail_listing {
            return Err(ClientError::Status {
                endpoint: "/api/v2/torrents/info".to_string(),
                status: 500,
            });
        }
        Ok(self.torrents.lock().unwrap().clone())
    }

    async fn pause(&self, hash: &str) -> Result<(), ClientError> {
        self.command(ActionKind::Pause, hash)
    }

    async fn resume(&self, hash: &str) -> Result<(), ClientError> {
        self.command(ActionKind::Resume, hash)
    }

    async fn reannounce(&self, hash: &str) -> Result<(), ClientError> {
        self.command(ActionKind::Reannounce, hash)
    }
}

/// Probe returning a fixed figure, or an I/O error when `None`
pub struct FixedProbe(pub Option<u64>);

impl FreeSpaceProbe for FixedProbe {
    fn free_space(&self, path: &Path) -> Result<u64, ProbeError> {
        self.0.ok_or_else(|| ProbeError {
            path: path.to_path_buf(),
            source: io::Error::new(io::ErrorKind::PermissionDenied, "unreadable"),
        })
    }
}
