//! 外部工具执行器 - 基础设施层
//!
//! 只暴露"运行一条命令并等待结束"的能力

use std::ffi::OsString;
use std::process::Stdio;
use std::time::Duration;

use tokio::process::Command;
use tracing::{debug, warn};

use crate::error::JobError;

/// stderr 日志最多保留的字符数
const STDERR_TAIL_CHARS: usize = 2000;

/// 外部工具执行器
///
/// 职责：
/// - 以子进程方式同步运行外部工具（对调用的工作者而言）
/// - 捕获输出，非零退出码视为失败
/// - 超时后终止子进程
/// - 不认识菌株、结果文件或临时目录
#[derive(Debug, Clone, Default)]
pub struct ToolRunner {
    timeout: Option<Duration>,
}

impl ToolRunner {
    /// 创建新的执行器
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }

    /// 运行命令
    ///
    /// # 参数
    /// - `args`: 完整命令行，第一个元素为程序
    pub async fn run(&self, args: &[OsString]) -> Result<(), JobError> {
        let Some((program, rest)) = args.split_first() else {
            return Err(JobError::SpawnFailed {
                program: String::new(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line"),
            });
        };
        let program_name = program.to_string_lossy().into_owned();

        debug!("执行: {:?}", args);

        let child = Command::new(program)
            .args(rest)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| JobError::SpawnFailed {
                program: program_name.clone(),
                source,
            })?;

        let wait = child.wait_with_output();
        let output = match self.timeout {
            // 超时时 future 被丢弃，kill_on_drop 负责终止子进程
            Some(timeout) => tokio::time::timeout(timeout, wait)
                .await
                .map_err(|_| JobError::TimedOut { timeout })?,
            None => wait.await,
        }
        .map_err(|source| JobError::SpawnFailed {
            program: program_name.clone(),
            source,
        })?;

        debug!(
            "{} 结束: {} (stdout {} 字节, stderr {} 字节)",
            program_name,
            output.status,
            output.stdout.len(),
            output.stderr.len()
        );

        if output.status.success() {
            Ok(())
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            if !stderr.trim().is_empty() {
                warn!("{} stderr: {}", program_name, tail(stderr.trim(), STDERR_TAIL_CHARS));
            }
            Err(JobError::ToolFailed {
                status: output.status,
            })
        }
    }
}

fn tail(text: &str, max_chars: usize) -> String {
    let count = text.chars().count();
    if count > max_chars {
        let skipped: String = text.chars().skip(count - max_chars).collect();
        format!("...{}", skipped)
    } else {
        text.to_string()
    }
}
