use std::fmt::Display;
use std::path::{Path, PathBuf};

/// 一个待处理的组装文件
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkItem {
    /// 文件路径
    pub path: PathBuf,
    /// 菌株标签（去掉扩展名的文件名）
    pub label: String,
}

impl WorkItem {
    /// 从文件路径构建，标签取文件名去掉扩展名
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = label_of(&path);
        Self { path, label }
    }
}

fn label_of(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Display for WorkItem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[菌株 {}]", self.label)
    }
}
