//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，在编排线程上依次完成：
//!
//! 1. **配置校验**：致命错误在任何任务开始前返回
//! 2. **测试名称解析**：只解析一次，之后只读共享
//! 3. **扫描输入目录**：目录缺失时在创建任何输出之前报错
//! 4. **目录准备**：确保输出目录和 `temp/` 存在
//! 5. **规划**：跳过已有结果或标签重复的组装文件，其余生成任务
//! 6. **并发执行**：任务交给 `WorkerPool`，等待全部结束
//! 7. **全局统计**：汇总跳过/成功/失败数量

use tracing::warn;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ToolRunner;
use crate::models::{
    discover_assemblies, resolve_test_name, JobFailure, TestDescriptor, WorkItem,
};
use crate::orchestrator::worker_pool::WorkerPool;
use crate::services::{JobExecutor, JobPlanner, OutputLayout};
use crate::utils::logging::{log_plan, log_startup, print_final_stats};

/// 运行统计
#[derive(Debug, Default)]
pub struct RunSummary {
    pub discovered: usize,
    pub skipped: usize,
    /// 标签与之前的组装文件重复而未处理的数量
    pub duplicates: usize,
    pub dispatched: usize,
    pub succeeded: usize,
    pub failures: Vec<JobFailure>,
    pub cleanup_errors: usize,
}

impl RunSummary {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// 应用主结构
pub struct App {
    config: Config,
    test: TestDescriptor,
    layout: OutputLayout,
    items: Vec<WorkItem>,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let definition_path = config.validate()?.to_path_buf();

        let resolved_name = resolve_test_name(&definition_path).await?;
        let test = TestDescriptor::new(definition_path, resolved_name);

        // 先扫描输入目录，目录缺失时不留下任何输出目录
        let items = discover_assemblies(&config.paths, &config.extension).await?;

        let layout = OutputLayout::ensure(&config.outpath)?;

        log_startup(&config, &test);

        Ok(Self {
            config,
            test,
            layout,
            items,
        })
    }

    pub fn test(&self) -> &TestDescriptor {
        &self.test
    }

    /// 运行应用主逻辑
    pub async fn run(self) -> AppResult<RunSummary> {
        let mut summary = RunSummary {
            discovered: self.items.len(),
            ..Default::default()
        };

        if self.items.is_empty() {
            warn!("⚠️ 没有找到待处理的组装文件，程序结束");
            print_final_stats(&summary);
            return Ok(summary);
        }

        let planner = JobPlanner::new(
            self.layout,
            &self.test,
            &self.config.alleles,
            &self.config.mistcall,
        );
        let executor = JobExecutor::new(ToolRunner::new(self.config.job_timeout()));
        let mut pool = WorkerPool::new(self.config.cores, executor);

        // 边规划边提交，工作者可以在规划结束前开始执行
        let mut plan = planner.plan(self.items);
        for job in plan.by_ref() {
            pool.submit(job);
        }
        summary.skipped = plan.skipped();
        summary.duplicates = plan.duplicates();
        summary.dispatched = pool.submitted();
        log_plan(&summary, pool.size());

        let report = pool.join().await;
        summary.succeeded = report.succeeded;
        summary.failures = report.failures;
        summary.cleanup_errors = report.cleanup_errors;

        print_final_stats(&summary);
        Ok(summary)
    }
}
