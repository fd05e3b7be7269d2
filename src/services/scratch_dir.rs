//! 任务临时目录
//!
//! 外部工具会在临时目录中留下大量中间文件。`ScratchDir` 持有目录，
//! 正常路径调用 `release()` 删除并拿到删除结果；任务被取消或 panic 时
//! 由 `Drop` 同步删除。

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{FileError, JobError};

/// 任务独占的临时目录
#[derive(Debug)]
pub struct ScratchDir {
    path: PathBuf,
    released: bool,
}

impl ScratchDir {
    /// 创建目录（已存在时复用）
    ///
    /// 每个菌株的目录互不相同，并发任务不会指向同一路径
    pub async fn create(path: impl Into<PathBuf>) -> Result<Self, JobError> {
        let path = path.into();
        tokio::fs::create_dir_all(&path)
            .await
            .map_err(|source| JobError::ScratchCreateFailed {
                path: path.clone(),
                source,
            })?;
        Ok(Self {
            path,
            released: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 递归删除目录
    ///
    /// 删除失败（包括目录已经不存在）只用于报告
    pub async fn release(mut self) -> Result<(), FileError> {
        self.released = true;
        tokio::fs::remove_dir_all(&self.path)
            .await
            .map_err(|source| FileError::RemoveDirFailed {
                path: self.path.clone(),
                source,
            })
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        if self.released {
            return;
        }
        match std::fs::remove_dir_all(&self.path) {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("清理临时目录失败 {}: {}", self.path.display(), e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_release_removes_tree() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("temp").join("A");

        let scratch = ScratchDir::create(&path).await.unwrap();
        std::fs::create_dir(path.join("blast")).unwrap();
        std::fs::write(path.join("blast").join("hits.xml"), "x".repeat(4096)).unwrap();

        scratch.release().await.unwrap();
        assert!(!path.exists());
        assert!(tmp.path().join("temp").exists());
    }

    #[tokio::test]
    async fn test_create_reuses_existing() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("A");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("leftover"), "").unwrap();

        let scratch = ScratchDir::create(&path).await.unwrap();
        assert!(path.join("leftover").exists());
        scratch.release().await.unwrap();
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_release_reports_vanished_dir() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("A");

        let scratch = ScratchDir::create(&path).await.unwrap();
        std::fs::remove_dir(&path).unwrap();

        assert!(matches!(
            scratch.release().await,
            Err(FileError::RemoveDirFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_drop_without_release_removes_tree() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("A");

        {
            let scratch = ScratchDir::create(&path).await.unwrap();
            std::fs::write(scratch.path().join("partial.fasta"), ">x\n").unwrap();
        }

        assert!(!path.exists());
    }
}
