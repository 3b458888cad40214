use crate::models::torrent::Torrent;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Pause,
    Resume,
    Reannounce,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionKind::Pause => "pause",
            ActionKind::Resume => "resume",
            ActionKind::Reannounce => "reannounce",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single command to send to the download manager
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: ActionKind,
    pub hash: String,
    pub name: String,
}

impl Action {
    pub fn new(kind: ActionKind, torrent: &Torrent) -> Self {
        Self {
            kind,
            hash: torrent.hash.clone(),
            name: torrent.name.clone(),
        }
    }
}

/// Outcome of applying a plan
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunReport {
    pub paused: usize,
    pub resumed: usize,
    pub reannounced: usize,
    pub failed: usize,
    /// Actions logged but not sent (dry run)
    pub skipped: usize,
}

impl RunReport {
    pub fn record_success(&mut self, kind: ActionKind) {
        match kind {
            ActionKind::Pause => self.paused += 1,
            ActionKind::Resume => self.resumed += 1,
            ActionKind::Reannounce => self.reannounced += 1,
        }
    }

    pub fn applied(&self) -> usize {
        self.paused + self.resumed + self.reannounced
    }
}
