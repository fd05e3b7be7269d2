use std::ffi::OsString;
use std::fmt::Display;
use std::path::PathBuf;

use crate::error::JobError;

/// 分发给工作池的任务
///
/// 由 `JobPlanner` 创建，只被一个工作者持有，执行后丢弃
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobDescriptor {
    /// 菌株标签
    pub label: String,
    /// 完整命令行（第一个元素是程序）
    pub invocation_args: Vec<OsString>,
    /// 本任务的临时目录（尚未创建）
    pub scratch_dir: PathBuf,
    /// 预期的结果文件
    pub result_path: PathBuf,
}

impl JobDescriptor {
    /// 程序名（用于日志）
    pub fn program(&self) -> String {
        self.invocation_args
            .first()
            .map(|p| p.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

impl Display for JobDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[菌株 {}]", self.label)
    }
}

/// 单个任务失败记录
#[derive(Debug)]
pub struct JobFailure {
    pub label: String,
    pub error: JobError,
}

impl Display for JobFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[菌株 {}] {}", self.label, self.error)
    }
}

/// 单个任务执行报告
#[derive(Debug)]
pub struct JobReport {
    pub label: String,
    pub outcome: Result<(), JobError>,
    /// 临时目录删除失败（只报告，不导致重跑）
    pub cleanup_error: Option<String>,
}

impl JobReport {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
