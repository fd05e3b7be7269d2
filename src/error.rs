use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 配置错误（致命，任何任务开始前报告）
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),
    /// 文件操作错误
    #[error("文件错误: {0}")]
    File(#[from] FileError),
    /// 单个任务执行错误
    #[error("任务错误: {0}")]
    Job(#[from] JobError),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 输入目录不存在
    #[error("输入目录不存在: {}", .path.display())]
    InputDirNotFound { path: PathBuf },
    /// 输入路径不是目录
    #[error("输入路径不是目录: {}", .path.display())]
    InputNotDirectory { path: PathBuf },
    /// 测试定义文件不存在
    #[error("测试定义文件不存在: {}", .path.display())]
    TestDefinitionNotFound { path: PathBuf },
    /// 未指定测试定义文件
    #[error("必须指定测试定义文件 (-t/--testtype)")]
    TestDefinitionMissing,
    /// 并发数无效
    #[error("并发数必须在 1 到 {} 之间 (当前: {cores})", tokio::sync::Semaphore::MAX_PERMITS)]
    InvalidWorkerCount { cores: usize },
    /// 外部工具调用为空
    #[error("外部工具调用参数不能为空")]
    EmptyToolInvocation,
    /// 未指定输入目录
    #[error("至少需要一个输入目录")]
    NoInputDirs,
    /// TOML 配置文件解析失败
    #[error("TOML解析失败 ({}): {source}", .path.display())]
    TomlParseFailed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// 文件操作错误
#[derive(Debug, Error)]
pub enum FileError {
    /// 读取失败
    #[error("读取失败 ({}): {source}", .path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 创建目录失败
    #[error("创建目录失败 ({}): {source}", .path.display())]
    CreateDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 删除目录失败
    #[error("删除目录失败 ({}): {source}", .path.display())]
    RemoveDirFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 路径已存在但不是目录
    #[error("路径已存在但不是目录: {}", .path.display())]
    NotADirectory { path: PathBuf },
}

/// 单个任务执行错误
///
/// 只在任务内部产生，不会中断其他任务或工作池
#[derive(Debug, Error)]
pub enum JobError {
    /// 创建临时目录失败
    #[error("创建临时目录失败 ({}): {source}", .path.display())]
    ScratchCreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// 启动外部工具失败
    #[error("启动外部工具失败 ({program}): {source}")]
    SpawnFailed {
        program: String,
        #[source]
        source: std::io::Error,
    },
    /// 外部工具返回非零退出码
    #[error("外部工具退出异常: {status}")]
    ToolFailed { status: std::process::ExitStatus },
    /// 外部工具超时
    #[error("外部工具超时 ({timeout:?})")]
    TimedOut { timeout: Duration },
    /// 外部工具正常退出但未生成结果文件
    #[error("未生成结果文件: {}", .path.display())]
    ResultMissing { path: PathBuf },
    /// 任务未能正常结束（panic 或工作池已关闭）
    #[error("任务中止: {reason}")]
    Aborted { reason: String },
}

// ========== 便捷构造函数 ==========

impl FileError {
    /// 创建读取失败错误
    pub fn read_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::ReadFailed {
            path: path.into(),
            source,
        }
    }

    /// 创建目录创建失败错误
    pub fn create_dir_failed(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        FileError::CreateDirFailed {
            path: path.into(),
            source,
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
