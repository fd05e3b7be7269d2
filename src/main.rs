use anyhow::{Context, Result};
use clap::Parser;
use mistpipe::utils::logging;
use mistpipe::{App, CliArgs, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_cli(CliArgs::parse()).context("加载配置失败")?;

    // 初始化并运行应用
    let summary = App::initialize(config).await?.run().await?;

    if summary.has_failures() {
        anyhow::bail!(
            "{} 个任务失败（共 {} 个）",
            summary.failures.len(),
            summary.dispatched
        );
    }

    Ok(())
}
