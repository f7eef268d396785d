//! 命令行参数

use chrono::{DateTime, Utc};
use clap::Parser;
use std::path::PathBuf;

use crate::app_config::Overrides;
use crate::time_util::parse_timestamp;

/// SOW / PO / 人员报表
#[derive(Debug, Clone, Parser)]
#[command(name = "sow_insight", version, about = "基于记录快照生成 SOW/PO/人员报表")]
pub struct Cli {
    /// 本地 JSON 目录，每个集合一个 `<name>.json`
    #[arg(long, conflicts_with = "api_base_url")]
    pub data_dir: Option<PathBuf>,

    /// 只读 API 地址，例如 http://localhost:5000
    #[arg(long)]
    pub api_base_url: Option<String>,

    /// 固定当前时间 (RFC 3339 或 YYYY-MM-DD)，默认系统时间
    #[arg(long, value_parser = parse_now)]
    pub now: Option<DateTime<Utc>>,

    /// 最多保留的审计记录条数
    #[arg(long)]
    pub audit_limit: Option<usize>,

    /// 格式化输出 JSON
    #[arg(long)]
    pub pretty: bool,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            data_dir: self.data_dir.clone(),
            api_base_url: self.api_base_url.clone(),
            audit_limit: self.audit_limit,
        }
    }
}

fn parse_now(text: &str) -> Result<DateTime<Utc>, String> {
    parse_timestamp(text).ok_or_else(|| format!("无法解析时间: {}", text))
}
