//! Durable credential storage.
//!
//! The credential is kept as pretty-printed JSON. Writes go to a sibling
//! temporary file that is then renamed over the target, so a crash mid-write
//! never leaves a truncated credential behind.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::{debug, warn};

use super::Credential;
use crate::error::AppError;

#[derive(Debug, Clone)]
pub struct CredentialFile {
    path: PathBuf,
}

impl CredentialFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the stored credential.
    ///
    /// A missing file yields `Ok(None)`. A file that exists but does not
    /// decode is also treated as absent (with a warning) so that a fresh
    /// authorization can replace it.
    pub async fn read(&self) -> Result<Option<Credential>, AppError> {
        if !fs::try_exists(&self.path).await? {
            debug!("No credential stored at {}", self.path.display());
            return Ok(None);
        }

        let raw = fs::read_to_string(&self.path).await?;
        match serde_json::from_str::<Credential>(&raw) {
            Ok(credential) => Ok(Some(credential)),
            Err(e) => {
                warn!(
                    "Ignoring unreadable credential file {}: {}",
                    self.path.display(),
                    e
                );
                Ok(None)
            }
        }
    }

    /// Atomically replaces the stored credential.
    pub async fn write(&self, credential: &Credential) -> Result<(), AppError> {
        if let Some(dir) = self.path.parent()
            && !dir.as_os_str().is_empty()
        {
            fs::create_dir_all(dir).await?;
        }

        let tmp = self.path.with_extension("json.tmp");
        let json = serde_json::to_string_pretty(credential)?;
        fs::write(&tmp, json).await?;
        restrict_permissions(&tmp).await?;
        fs::rename(&tmp, &self.path).await?;

        debug!("Credential written to {}", self.path.display());
        Ok(())
    }
}

#[cfg(unix)]
async fn restrict_permissions(path: &Path) -> Result<(), AppError> {
    use std::os::unix::fs::PermissionsExt;
    fs::set_permissions(path, std::fs::Permissions::from_mode(0o600)).await?;
    Ok(())
}

#[cfg(not(unix))]
async fn restrict_permissions(_path: &Path) -> Result<(), AppError> {
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_credential() -> Credential {
        Credential {
            access_token: "access-abc".to_string(),
            refresh_token: "refresh-xyz".to_string(),
            token_type: "bearer".to_string(),
            expires_at: Utc.with_ymd_and_hms(2025, 1, 15, 18, 30, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_write_then_read_roundtrip() {
        let temp_dir = tempdir().unwrap();
        let file = CredentialFile::new(temp_dir.path().join("token.json"));

        let credential = sample_credential();
        file.write(&credential).await.unwrap();

        let loaded = file.read().await.unwrap();
        assert_eq!(loaded, Some(credential));
    }

    #[tokio::test]
    async fn test_roundtrip_preserves_subsecond_expiry() {
        let temp_dir = tempdir().unwrap();
        let file = CredentialFile::new(temp_dir.path().join("token.json"));

        let mut credential = sample_credential();
        credential.expires_at = Utc.timestamp_opt(1_736_965_800, 123_456_789).unwrap();
        file.write(&credential).await.unwrap();

        assert_eq!(file.read().await.unwrap(), Some(credential));
    }

    #[tokio::test]
    async fn test_read_missing_file_is_none() {
        let temp_dir = tempdir().unwrap();
        let file = CredentialFile::new(temp_dir.path().join("absent.json"));
        assert_eq!(file.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_read_corrupted_file_is_none() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("token.json");
        tokio::fs::write(&path, "{not json").await.unwrap();

        let file = CredentialFile::new(&path);
        assert_eq!(file.read().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_parent_and_leaves_no_temp_file() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("deep").join("dir").join("token.json");
        let file = CredentialFile::new(&path);

        file.write(&sample_credential()).await.unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_write_overwrites_previous_credential() {
        let temp_dir = tempdir().unwrap();
        let file = CredentialFile::new(temp_dir.path().join("token.json"));

        file.write(&sample_credential()).await.unwrap();
        let mut newer = sample_credential();
        newer.access_token = "access-def".to_string();
        file.write(&newer).await.unwrap();

        assert_eq!(file.read().await.unwrap(), Some(newer));
    }
}
