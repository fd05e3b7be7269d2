//! 编排层（Orchestration Layer）
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 批量处理器
//! - 校验配置、解析测试名称、准备输出目录
//! - 扫描组装文件并规划任务
//! - 输出全局统计信息
//!
//! ### `worker_pool` - 有界工作池
//! - 控制并发数量（Semaphore）
//! - 隔离单个任务的失败
//! - 在屏障处汇总所有结果
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<WorkItem>)
//!     ↓
//! worker_pool (并发调度 JobDescriptor)
//!     ↓
//! services::JobExecutor (处理单个任务)
//!     ↓
//! infrastructure::ToolRunner (运行外部工具)
//! ```

pub mod batch_processor;
pub mod worker_pool;

pub use batch_processor::{App, RunSummary};
pub use worker_pool::{PoolReport, WorkerPool};
