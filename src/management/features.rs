use std::{io::Error, path::PathBuf};

use crate::{config, types::TrackInfo};

#[derive(Debug)]
pub enum FeatureCacheError {
    IoError(Error),
    SerdeError(serde_json::Error),
}

impl From<Error> for FeatureCacheError {
    fn from(err: Error) -> Self {
        FeatureCacheError::IoError(err)
    }
}

/// Write-once cache of SoundStat track payloads, one JSON file per track.
///
/// Track features never change for a given id, so an entry is immutable
/// once written: `store` refuses to overwrite an existing file, which
/// makes concurrent readers and writers safe without coordination.
pub struct FeatureCacheManager;

impl FeatureCacheManager {
    pub async fn load(track_id: &str) -> Result<TrackInfo, FeatureCacheError> {
        let path = Self::get_path(track_id);
        let content = async_fs::read_to_string(&path)
            .await
            .map_err(FeatureCacheError::IoError)?;
        let track = serde_json::from_str(&content).map_err(FeatureCacheError::SerdeError)?;
        Ok(track)
    }

    pub async fn store(track: &TrackInfo) -> Result<(), FeatureCacheError> {
        let path = Self::get_path(&track.id);
        if path.exists() {
            // insert-if-absent: cached entries are never rewritten
            return Ok(());
        }
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(FeatureCacheError::IoError)?;
        }

        let json = serde_json::to_string_pretty(track).map_err(FeatureCacheError::SerdeError)?;
        async_fs::write(path, json)
            .await
            .map_err(FeatureCacheError::IoError)
    }

    pub fn is_cached(track_id: &str) -> bool {
        Self::get_path(track_id).exists()
    }

    fn get_path(track_id: &str) -> PathBuf {
        let mut path = config::data_dir();
        path.push(format!("cache/features/{track_id}.json"));
        path
    }
}
