//! 日志工具模块
//!
//! 提供日志初始化和统计输出的辅助函数

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::models::TestDescriptor;
use crate::orchestrator::RunSummary;

/// 初始化日志
///
/// 默认 `mistpipe=info`，可通过 `RUST_LOG` 覆盖。重复调用无副作用。
pub fn init() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "mistpipe=info".into()))
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config, test: &TestDescriptor) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量 MIST 分型");
    info!("📊 最大并发数: {}", config.cores);
    info!("🧪 测试定义: {}", test.definition_path.display());
    match &test.resolved_name {
        Some(name) => info!("🏷️ 测试名称: {}", name),
        None => {
            warn!("⚠️ 未能从测试定义中解析出测试名称，结果文件名将只包含菌株标签");
            warn!("⚠️ 其他同样无法解析名称的测试会共用这些结果文件进行跳过判断");
        }
    }
    info!("📂 输出目录: {}", config.outpath.display());
    info!("{}", "=".repeat(60));
}

/// 记录规划结果
///
/// # 参数
/// - `summary`: 规划阶段的统计（发现/跳过/重复/提交）
/// - `workers`: 工作池实际并发数
pub fn log_plan(summary: &RunSummary, workers: usize) {
    info!(
        "📋 共 {} 个组装文件: 跳过 {} 个, 提交 {} 个任务 ({} 个工作者)",
        summary.discovered, summary.skipped, summary.dispatched, workers
    );
    if summary.duplicates > 0 {
        warn!("⚠️ {} 个组装文件因菌株标签重复未处理", summary.duplicates);
    }
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary) {
    info!("{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("📁 组装文件: {}", summary.discovered);
    info!("⏭️ 跳过: {}", summary.skipped);
    if summary.duplicates > 0 {
        warn!("⚠️ 标签重复: {}", summary.duplicates);
    }
    info!("✅ 成功: {}/{}", summary.succeeded, summary.dispatched);
    info!("❌ 失败: {}", summary.failures.len());
    for failure in &summary.failures {
        info!("   - {}", failure);
    }
    if summary.cleanup_errors > 0 {
        warn!("⚠️ 临时目录清理失败: {}", summary.cleanup_errors);
    }
    info!("{}", "=".repeat(60));
}
