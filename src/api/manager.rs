use crate::core::error::ClientError;
use crate::models::torrent::Torrent;
use async_trait::async_trait;

/// Capabilities the keeper needs from a download manager.
///
/// Commands are fire-and-forget: the manager applies them asynchronously and
/// the effect may only show up in a later snapshot.
#[async_trait]
pub trait DownloadManager: Send + Sync {
    /// Establish a session
    async fn login(&self) -> Result<(), ClientError>;

    async fn list_torrents(&self) -> Result<Vec<Torrent>, ClientError>;

    async fn pause(&self, hash: &str) -> Result<(), ClientError>;

    async fn resume(&self, hash: &str) -> Result<(), ClientError>;

    async fn reannounce(&self, hash: &str) -> Result<(), ClientError>;
}
