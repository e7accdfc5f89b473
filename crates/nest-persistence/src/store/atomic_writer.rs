use nest_core::{NestError, NestResult};
use std::path::Path;
use tokio::fs;

/// Writes files through a temp file in the same directory followed by a
/// rename, so readers never observe a half-written document.
pub struct AtomicWriter;

impl AtomicWriter {
    pub async fn write_atomic(path: &Path, data: &[u8]) -> NestResult<()> {
        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).await?;

        let temp_path = tempfile::NamedTempFile::new_in(parent)?.into_temp_path();
        fs::write(&temp_path, data).await?;
        temp_path
            .persist(path)
            .map_err(|e| NestError::Storage(format!("{}: {}", path.display(), e.error)))?;

        tracing::debug!("Atomically wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }

    /// Returns `None` if the file does not exist.
    pub async fn read_optional(path: &Path) -> NestResult<Option<Vec<u8>>> {
        match fs::read(path).await {
            Ok(data) => {
                tracing::debug!("Read {} bytes from {}", data.len(), path.display());
                Ok(Some(data))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_atomic_write_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("nested/state.json");

        AtomicWriter::write_atomic(&file_path, b"{}").await.unwrap();

        let data = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"{}"[..]));
    }

    #[tokio::test]
    async fn test_atomic_write_overwrites_without_leftovers() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("state.json");

        AtomicWriter::write_atomic(&file_path, b"first").await.unwrap();
        AtomicWriter::write_atomic(&file_path, b"second").await.unwrap();

        let data = AtomicWriter::read_optional(&file_path).await.unwrap();
        assert_eq!(data.as_deref(), Some(&b"second"[..]));
        let entries = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_read_missing_file() {
        let dir = tempdir().unwrap();
        let data = AtomicWriter::read_optional(&dir.path().join("absent.json"))
            .await
            .unwrap();
        assert!(data.is_none());
    }
}
