use anyhow::anyhow;
use chrono::{DateTime, Utc};
use std::io::Write;
use tracing::{error, info};

use super::cli::Cli;
use crate::app_config::{log::setup_logging, AppConfig, SourceConfig};
use crate::error::Result;
use crate::ingest::{load_snapshot, FileRecordSource, HttpRecordSource, LoadOptions, RecordSource};
use crate::report::{build_report, DashboardReport};

/// 按配置创建数据来源
pub fn record_source(config: &AppConfig) -> Box<dyn RecordSource> {
    match &config.source {
        SourceConfig::Directory(dir) => Box::new(FileRecordSource::new(dir.clone())),
        SourceConfig::Api(url) => Box::new(HttpRecordSource::new(
            url.clone(),
            config.audit_limit,
            config.retry_attempts,
        )),
    }
}

/// 加载快照并计算报表，加载阶段的诊断并入报表
pub async fn generate_report(
    source: &dyn RecordSource,
    options: LoadOptions,
    now: DateTime<Utc>,
) -> Result<DashboardReport> {
    let loaded = load_snapshot(source, options).await?;
    let mut report = build_report(&loaded.snapshot, now);
    report.diagnostics.merge(&loaded.diagnostics);
    Ok(report)
}

/// 应用入口: 配置 → 日志 → 加载 → 计算 → 输出 JSON
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = AppConfig::resolve(cli.overrides())?;
    let _guards = setup_logging(&config)?;
    info!("app_env:{} source:{:?}", config.app_env, config.source);

    let now = cli.now.unwrap_or_else(Utc::now);
    let source = record_source(&config);
    let options = LoadOptions {
        audit_limit: config.audit_limit,
    };

    let report = match generate_report(source.as_ref(), options, now).await {
        Ok(report) => report,
        Err(e) => {
            error!("生成报表失败: {}", e);
            return Err(anyhow!("生成报表失败: {}", e));
        }
    };

    let json = if cli.pretty {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string(&report)?
    };
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{}", json)?;
    Ok(())
}
