use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        Ok(tokio::fs::try_exists(self.base_path.join(path)).await?)
    }
}

/// 遞迴複製目錄，回傳複製的檔案數
pub async fn copy_dir(source: &Path, target: &Path) -> Result<usize> {
    let mut copied = 0;
    let mut pending = vec![(source.to_path_buf(), target.to_path_buf())];

    while let Some((from, to)) = pending.pop() {
        tokio::fs::create_dir_all(&to).await?;
        let mut entries = tokio::fs::read_dir(&from).await?;

        while let Some(entry) = entries.next_entry().await? {
            let dest = to.join(entry.file_name());
            if entry.file_type().await?.is_dir() {
                pending.push((entry.path(), dest));
            } else {
                tokio::fs::copy(entry.path(), &dest).await?;
                tracing::debug!("Copied {} -> {}", entry.path().display(), dest.display());
                copied += 1;
            }
        }
    }

    Ok(copied)
}
