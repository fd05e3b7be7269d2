use std::path::{Path, PathBuf};

use tokio::fs;

use crate::error::{AppResult, ConfigError, FileError};
use crate::models::work_item::WorkItem;

/// 从多个输入目录中收集组装文件
///
/// 只扫描每个目录的第一层。目录按参数顺序排列，目录内按路径字典序，
/// 标签重复时由靠前的目录胜出。目录不存在是配置错误，不会被跳过。
///
/// # 参数
/// - `dirs`: 输入目录
/// - `extension`: 组装文件扩展名（不含点），例如 `fasta`
pub async fn discover_assemblies(dirs: &[PathBuf], extension: &str) -> AppResult<Vec<WorkItem>> {
    let mut items = Vec::new();

    for dir in dirs {
        let mut found = scan_dir(dir, extension).await?;
        tracing::info!("📁 {} 中找到 {} 个组装文件", dir.display(), found.len());
        found.sort();
        items.extend(found);
    }

    Ok(items)
}

async fn scan_dir(dir: &Path, extension: &str) -> AppResult<Vec<WorkItem>> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ConfigError::InputNotDirectory {
                path: dir.to_path_buf(),
            }
            .into())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(ConfigError::InputDirNotFound {
                path: dir.to_path_buf(),
            }
            .into())
        }
        Err(e) => return Err(FileError::read_failed(dir, e).into()),
    }

    let mut items = Vec::new();
    let mut entries = fs::read_dir(dir)
        .await
        .map_err(|e| FileError::read_failed(dir, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| FileError::read_failed(dir, e))?
    {
        let path = entry.path();
        if !is_assembly(&path, extension) {
            continue;
        }
        // 跟随符号链接，只接受普通文件
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => items.push(WorkItem::from_path(path)),
            Ok(_) => {}
            Err(e) => tracing::warn!("无法读取 {}: {}", path.display(), e),
        }
    }

    Ok(items)
}

fn is_assembly(path: &Path, extension: &str) -> bool {
    let hidden = path
        .file_name()
        .and_then(|n| n.to_str())
        .map_or(true, |n| n.starts_with('.'));
    !hidden && path.extension().and_then(|e| e.to_str()) == Some(extension)
}
