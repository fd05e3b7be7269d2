//! 输出目录布局
//!
//! ```text
//! <outpath>/                    结果文件 <label><testname>.json
//! <outpath>/temp/<label>/       单个任务的临时目录，任务结束即删除
//! ```

use std::path::{Path, PathBuf};

use crate::error::{AppResult, FileError};

/// 临时目录名
pub const SCRATCH_DIR_NAME: &str = "temp";

/// 结果文件扩展名
pub const RESULT_EXTENSION: &str = "json";

/// 输出目录布局
#[derive(Debug, Clone)]
pub struct OutputLayout {
    root: PathBuf,
    scratch_root: PathBuf,
}

impl OutputLayout {
    /// 计算布局，不触碰文件系统
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let scratch_root = root.join(SCRATCH_DIR_NAME);
        Self { root, scratch_root }
    }

    /// 确保输出目录和临时目录存在
    ///
    /// 已存在时不做任何事；路径被普通文件占用时报错。
    /// 在工作池启动前由编排线程调用一次。
    pub fn ensure(root: impl Into<PathBuf>) -> AppResult<Self> {
        let layout = Self::new(root);
        ensure_dir(&layout.root)?;
        ensure_dir(&layout.scratch_root)?;
        Ok(layout)
    }

    /// 结果文件路径：`<root>/<label><test_name>.json`
    pub fn result_path(&self, label: &str, test_name: &str) -> PathBuf {
        self.root
            .join(format!("{}{}.{}", label, test_name, RESULT_EXTENSION))
    }

    /// 单个任务的临时目录：`<root>/temp/<label>`
    pub fn scratch_dir(&self, label: &str) -> PathBuf {
        self.scratch_root.join(label)
    }
}

fn ensure_dir(path: &Path) -> AppResult<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_dir() => Ok(()),
        Ok(_) => Err(FileError::NotADirectory {
            path: path.to_path_buf(),
        }
        .into()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::info!("📂 创建目录: {}", path.display());
            std::fs::create_dir_all(path).map_err(|e| FileError::create_dir_failed(path, e))?;
            Ok(())
        }
        Err(e) => Err(FileError::read_failed(path, e).into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_creates_and_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("mistout");

        let layout = OutputLayout::ensure(&root).unwrap();
        assert!(root.is_dir());
        assert!(root.join("temp").is_dir());
        assert_eq!(layout.scratch_dir("A"), root.join("temp").join("A"));

        std::fs::write(root.join("A T1.json"), "{}").unwrap();
        OutputLayout::ensure(&root).unwrap();
        assert!(root.join("A T1.json").exists());
    }

    #[test]
    fn test_ensure_rejects_file_collision() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("mistout");
        std::fs::write(&root, "not a directory").unwrap();

        let err = OutputLayout::ensure(&root).unwrap_err();
        assert!(matches!(err, AppError::File(FileError::NotADirectory { .. })));
    }

    #[test]
    fn test_ensure_rejects_scratch_collision() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("mistout");
        std::fs::create_dir(&root).unwrap();
        std::fs::write(root.join("temp"), "").unwrap();

        assert!(OutputLayout::ensure(&root).is_err());
    }

    #[test]
    fn test_paths() {
        let layout = OutputLayout::new("/out");
        assert_eq!(layout.result_path("A", "T1"), PathBuf::from("/out/AT1.json"));
        assert_eq!(layout.result_path("A", ""), PathBuf::from("/out/A.json"));
        assert_eq!(layout.scratch_dir("A"), PathBuf::from("/out/temp/A"));
    }
}
