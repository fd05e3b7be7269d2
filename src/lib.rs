//! # mistpipe
//!
//! 对一组目录中的所有基因组组装文件批量运行 MIST 分型，已有结果的菌株自动跳过
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 只暴露"运行外部工具"的能力
//! - `ToolRunner` - 启动子进程、等待结束、超时终止
//!
//! ### ② 数据层（Models）
//! - `models/` - `WorkItem`、`TestDescriptor`、`JobDescriptor`
//! - `models/loaders` - 扫描组装文件、解析测试名称
//!
//! ### ③ 业务能力层（Services）
//! - `OutputLayout` - 输出目录与临时目录布局
//! - `JobPlanner` - 跳过已完成的菌株，构建命令行
//! - `JobExecutor` - 单个任务：临时目录 → 外部工具 → 清理
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_processor` - 应用入口，串行完成准备和规划
//! - `orchestrator/worker_pool` - 有界并发执行，屏障处汇总结果
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::{CliArgs, Config};
pub use error::{AppError, AppResult};
pub use infrastructure::ToolRunner;
pub use models::{JobDescriptor, TestDescriptor, WorkItem};
pub use orchestrator::{App, RunSummary, WorkerPool};
pub use services::{JobExecutor, JobPlanner, OutputLayout};
