use crate::core::error::ProbeError;
use std::path::Path;

/// Source of the free-space figure for the download area
pub trait FreeSpaceProbe: Send + Sync {
    fn free_space(&self, path: &Path) -> Result<u64, ProbeError>;
}

/// Reads space available to unprivileged users from the filesystem
#[derive(Debug, Default, Clone, Copy)]
pub struct FsProbe;

impl FreeSpaceProbe for FsProbe {
    fn free_space(&self, path: &Path) -> Result<u64, ProbeError> {
        fs2::available_space(path).map_err(|source| ProbeError {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Free bytes left for downloads once the safety margin is reserved
pub fn download_budget(raw_free: u64, min_free_bytes: u64) -> u64 {
    raw_free.saturating_sub(min_free_bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fs_probe_reads_temp_dir() {
        let dir = tempfile::tempdir().unwrap();
        let free = FsProbe.free_space(dir.path());
        assert!(free.is_ok());
    }

    #[test]
    fn test_fs_probe_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist");

        let err = FsProbe.free_space(&missing).unwrap_err();
        assert_eq!(err.path, missing);
    }

    #[test]
    fn test_download_budget() {
        assert_eq!(download_budget(100, 30), 70);
        assert_eq!(download_budget(30, 30), 0);
        assert_eq!(download_budget(10, 30), 0);
    }
}
