//! 单个任务执行
//!
//! 1. 创建任务临时目录
//! 2. 运行外部工具并等待结束
//! 3. 无论成功失败都删除临时目录

use tracing::{error, info, warn};

use crate::error::JobError;
use crate::infrastructure::ToolRunner;
use crate::models::{JobDescriptor, JobReport};
use crate::services::scratch_dir::ScratchDir;

/// 任务执行器
///
/// 不持有可变状态，可在多个工作者间共享
#[derive(Debug, Clone, Default)]
pub struct JobExecutor {
    runner: ToolRunner,
}

impl JobExecutor {
    pub fn new(runner: ToolRunner) -> Self {
        Self { runner }
    }

    /// 执行一个任务
    ///
    /// 失败只体现在返回的报告里，不会 panic 或向上传播
    pub async fn execute(&self, job: &JobDescriptor) -> JobReport {
        info!("[菌株 {}] ▶️ 开始运行 {}", job.label, job.program());

        let scratch = match ScratchDir::create(&job.scratch_dir).await {
            Ok(scratch) => scratch,
            Err(e) => {
                error!("[菌株 {}] ❌ {}", job.label, e);
                return JobReport {
                    label: job.label.clone(),
                    outcome: Err(e),
                    cleanup_error: None,
                };
            }
        };

        let outcome = self.run_tool(job).await;

        // 删除失败只报告，不导致重跑
        let cleanup_error = match scratch.release().await {
            Ok(()) => None,
            Err(e) => {
                warn!("[菌株 {}] ⚠️ {}", job.label, e);
                Some(e.to_string())
            }
        };

        match &outcome {
            Ok(()) => info!("[菌株 {}] ✓ 完成", job.label),
            Err(e) => error!("[菌株 {}] ❌ {}", job.label, e),
        }

        JobReport {
            label: job.label.clone(),
            outcome,
            cleanup_error,
        }
    }

    async fn run_tool(&self, job: &JobDescriptor) -> Result<(), JobError> {
        self.runner.run(&job.invocation_args).await?;

        if !job.result_path.is_file() {
            return Err(JobError::ResultMissing {
                path: job.result_path.clone(),
            });
        }
        Ok(())
    }
}
