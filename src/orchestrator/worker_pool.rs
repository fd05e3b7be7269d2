//! 有界工作池
//!
//! 每个任务提交后立即生成一个 tokio 任务，执行前先获取信号量许可，
//! 同一时刻最多 `size` 个外部工具在运行。提交不会阻塞规划方。
//! 任务之间没有顺序保证；`join()` 是唯一的屏障，汇总所有结果。

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::error;

use crate::error::JobError;
use crate::models::{JobDescriptor, JobFailure, JobReport};
use crate::services::JobExecutor;

/// 工作池汇总
#[derive(Debug, Default)]
pub struct PoolReport {
    pub succeeded: usize,
    pub failures: Vec<JobFailure>,
    /// 临时目录删除失败的任务数
    pub cleanup_errors: usize,
}

/// 有界工作池
pub struct WorkerPool {
    size: usize,
    semaphore: Arc<Semaphore>,
    executor: Arc<JobExecutor>,
    handles: Vec<(String, JoinHandle<JobReport>)>,
}

impl WorkerPool {
    /// 创建工作池
    ///
    /// # 参数
    /// - `size`: 并发数（限制在 1 到 `Semaphore::MAX_PERMITS` 之间）
    /// - `executor`: 所有工作者共享的执行器
    pub fn new(size: usize, executor: JobExecutor) -> Self {
        let size = size.clamp(1, Semaphore::MAX_PERMITS);
        Self {
            size,
            semaphore: Arc::new(Semaphore::new(size)),
            executor: Arc::new(executor),
            handles: Vec::new(),
        }
    }

    /// 实际并发数
    pub fn size(&self) -> usize {
        self.size
    }

    /// 已提交的任务数
    pub fn submitted(&self) -> usize {
        self.handles.len()
    }

    /// 提交任务，立即返回
    pub fn submit(&mut self, job: JobDescriptor) {
        let semaphore = self.semaphore.clone();
        let executor = self.executor.clone();
        let label = job.label.clone();

        let handle = tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return JobReport {
                    label: job.label.clone(),
                    outcome: Err(JobError::Aborted {
                        reason: "worker pool closed".to_string(),
                    }),
                    cleanup_error: None,
                };
            };
            executor.execute(&job).await
        });

        self.handles.push((label, handle));
    }

    /// 等待所有已提交任务结束
    ///
    /// 单个任务失败不影响其他任务，所有失败都收集在报告中
    pub async fn join(self) -> PoolReport {
        let mut report = PoolReport::default();

        for (label, handle) in self.handles {
            let job_report = match handle.await {
                Ok(job_report) => job_report,
                Err(e) => {
                    error!("[菌株 {}] 任务执行失败: {}", label, e);
                    JobReport {
                        label,
                        outcome: Err(JobError::Aborted {
                            reason: e.to_string(),
                        }),
                        cleanup_error: None,
                    }
                }
            };

            if job_report.cleanup_error.is_some() {
                report.cleanup_errors += 1;
            }
            match job_report.outcome {
                Ok(()) => report.succeeded += 1,
                Err(error) => report.failures.push(JobFailure {
                    label: job_report.label,
                    error,
                }),
            }
        }

        report
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::ffi::OsString;
    use std::path::Path;
    use tempfile::TempDir;

    fn job(root: &Path, label: &str, script: &str) -> JobDescriptor {
        let result_path = root.join(format!("{label}.json"));
        let scratch_dir = root.join("temp").join(label);
        JobDescriptor {
            label: label.to_string(),
            invocation_args: vec![
                OsString::from("sh"),
                "-c".into(),
                script.into(),
                "mist".into(),
                result_path.clone().into_os_string(),
            ],
            scratch_dir,
            result_path,
        }
    }

    #[tokio::test]
    async fn test_failures_are_isolated() {
        let tmp = TempDir::new().unwrap();
        let mut pool = WorkerPool::new(2, JobExecutor::default());

        pool.submit(job(tmp.path(), "A", r#"echo '{}' > "$1""#));
        pool.submit(job(tmp.path(), "B", "exit 1"));
        pool.submit(job(tmp.path(), "C", r#"echo '{}' > "$1""#));
        pool.submit(job(tmp.path(), "D", "exit 7"));
        assert_eq!(pool.submitted(), 4);

        let report = pool.join().await;

        assert_eq!(report.succeeded, 2);
        let failed: BTreeSet<_> = report.failures.iter().map(|f| f.label.as_str()).collect();
        assert_eq!(failed, BTreeSet::from(["B", "D"]));
        assert!(tmp.path().join("A.json").exists());
        assert!(tmp.path().join("C.json").exists());
        assert_eq!(std::fs::read_dir(tmp.path().join("temp")).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_size_is_clamped() {
        let pool = WorkerPool::new(0, JobExecutor::default());
        assert_eq!(pool.size(), 1);

        let pool = WorkerPool::new(usize::MAX, JobExecutor::default());
        assert_eq!(pool.size(), Semaphore::MAX_PERMITS);
    }

    #[tokio::test]
    async fn test_empty_join() {
        let pool = WorkerPool::new(4, JobExecutor::default());
        let report = pool.join().await;
        assert_eq!(report.succeeded, 0);
        assert!(report.failures.is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrency_is_bounded() {
        let tmp = TempDir::new().unwrap();
        let lock_dir = tmp.path().join("running");
        std::fs::create_dir(&lock_dir).unwrap();

        // 每个任务运行期间在 running/ 下留一个标记，超过 2 个即失败
        let script = format!(
            r#"touch "{dir}/$$"; n=$(ls "{dir}" | wc -l); sleep 0.2; rm "{dir}/$$"; [ "$n" -le 2 ] && echo '{{}}' > "$1""#,
            dir = lock_dir.display()
        );

        let mut pool = WorkerPool::new(2, JobExecutor::default());
        for i in 0..6 {
            pool.submit(job(tmp.path(), &format!("S{i}"), &script));
        }
        let report = pool.join().await;

        assert_eq!(report.succeeded, 6, "{:?}", report.failures);
    }
}
