//! 程序配置
//!
//! 配置来源（后者覆盖前者）：
//! 1. 内置默认值
//! 2. `--config` 指定的 TOML 文件
//! 3. 命令行参数 / 环境变量

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::Parser;
use serde::Deserialize;
use tokio::sync::Semaphore;

use crate::error::{AppResult, ConfigError, FileError};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "mistpipe")]
#[command(
    about = "Run MIST over every assembly in a set of directories, skipping finished ones",
    long_about = None
)]
pub struct CliArgs {
    /// TOML 配置文件
    #[arg(long, env = "MISTPIPE_CONFIG")]
    pub config: Option<PathBuf>,

    /// 结果输出目录
    #[arg(short, long, env = "MISTPIPE_OUTPATH")]
    pub outpath: Option<PathBuf>,

    /// 等位基因参考目录
    #[arg(short, long, env = "MISTPIPE_ALLELES")]
    pub alleles: Option<PathBuf>,

    /// 测试/标记定义文件，例如 CGF119
    #[arg(short, long, env = "MISTPIPE_TESTTYPE")]
    pub testtype: Option<PathBuf>,

    /// 并发任务数（默认为 CPU 核数）
    #[arg(short, long, env = "MISTPIPE_CORES")]
    pub cores: Option<usize>,

    /// 外部工具的基础调用，例如 `--mistcall mono MIST.exe`
    #[arg(long, num_args = 1..)]
    pub mistcall: Option<Vec<String>>,

    /// 单个任务超时（秒）
    #[arg(long, env = "MISTPIPE_TIMEOUT")]
    pub timeout: Option<u64>,

    /// 组装文件扩展名
    #[arg(long)]
    pub extension: Option<String>,

    /// 输入目录
    pub paths: Vec<PathBuf>,
}

/// 运行配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 结果输出目录
    pub outpath: PathBuf,
    /// 等位基因参考目录
    pub alleles: PathBuf,
    /// 测试/标记定义文件
    pub testtype: Option<PathBuf>,
    /// 同时运行的任务数量
    pub cores: usize,
    /// 外部工具的基础调用
    pub mistcall: Vec<String>,
    /// 输入目录
    pub paths: Vec<PathBuf>,
    /// 组装文件扩展名（不含点）
    pub extension: String,
    /// 单个任务超时（秒），为空表示不限制
    pub job_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            outpath: PathBuf::from("./mistout/"),
            alleles: PathBuf::from("alleles/"),
            testtype: None,
            cores: default_cores(),
            mistcall: vec!["mist".to_string()],
            paths: Vec::new(),
            extension: "fasta".to_string(),
            job_timeout_secs: None,
        }
    }
}

/// 主机可用的处理器数量，启动时解析一次
pub fn default_cores() -> usize {
    std::thread::available_parallelism()
        .map(NonZeroUsize::get)
        .unwrap_or(1)
}

impl Config {
    /// 从命令行参数构建配置
    pub fn from_cli(cli: CliArgs) -> AppResult<Self> {
        let base = match &cli.config {
            Some(path) => Self::from_toml_file(path)?,
            None => Self::default(),
        };
        Ok(base.merge_cli(cli))
    }

    /// 从 TOML 文件加载配置，缺失字段使用默认值
    pub fn from_toml_file(path: &Path) -> AppResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| FileError::read_failed(path, e))?;
        Self::from_toml_str(&content, path)
    }

    /// 解析 TOML 文本
    pub fn from_toml_str(content: &str, path: &Path) -> AppResult<Self> {
        toml::from_str(content).map_err(|source| {
            ConfigError::TomlParseFailed {
                path: path.to_path_buf(),
                source,
            }
            .into()
        })
    }

    fn merge_cli(mut self, cli: CliArgs) -> Self {
        if let Some(outpath) = cli.outpath {
            self.outpath = outpath;
        }
        if let Some(alleles) = cli.alleles {
            self.alleles = alleles;
        }
        if cli.testtype.is_some() {
            self.testtype = cli.testtype;
        }
        if let Some(cores) = cli.cores {
            self.cores = cores;
        }
        if let Some(mistcall) = cli.mistcall {
            self.mistcall = mistcall;
        }
        if cli.timeout.is_some() {
            self.job_timeout_secs = cli.timeout;
        }
        if let Some(extension) = cli.extension {
            self.extension = extension;
        }
        if !cli.paths.is_empty() {
            self.paths = cli.paths;
        }
        self
    }

    /// 单个任务超时
    pub fn job_timeout(&self) -> Option<Duration> {
        self.job_timeout_secs.map(Duration::from_secs)
    }

    /// 校验配置，返回测试定义文件路径
    pub fn validate(&self) -> Result<&Path, ConfigError> {
        if self.cores == 0 || self.cores > Semaphore::MAX_PERMITS {
            return Err(ConfigError::InvalidWorkerCount { cores: self.cores });
        }
        if self.mistcall.is_empty() {
            return Err(ConfigError::EmptyToolInvocation);
        }
        if self.paths.is_empty() {
            return Err(ConfigError::NoInputDirs);
        }
        self.testtype
            .as_deref()
            .ok_or(ConfigError::TestDefinitionMissing)
    }
}
