//! 运行配置: 环境变量为默认值，命令行参数优先

use std::path::PathBuf;

use super::env::{env_opt, env_or_default, env_parse_or};
use crate::error::{AppError, Result};
use crate::ingest::DEFAULT_AUDIT_LIMIT;

pub const LOCAL_ENV: &str = "LOCAL";
const DEFAULT_RETRY_ATTEMPTS: usize = 3;

/// 数据来源，二选一
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceConfig {
    Directory(PathBuf),
    Api(String),
}

/// 命令行覆盖项
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub data_dir: Option<PathBuf>,
    pub api_base_url: Option<String>,
    pub audit_limit: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_env: String,
    pub source: SourceConfig,
    pub audit_limit: usize,
    pub retry_attempts: usize,
}

impl AppConfig {
    /// 目录优先于 API 地址，都未设置时报配置错误
    pub fn resolve(overrides: Overrides) -> Result<Self> {
        let data_dir = overrides
            .data_dir
            .or_else(|| env_opt("DATA_DIR").map(PathBuf::from));
        let api_base_url = overrides.api_base_url.or_else(|| env_opt("API_BASE_URL"));
        let source = match (data_dir, api_base_url) {
            (Some(dir), _) => SourceConfig::Directory(dir),
            (None, Some(url)) => SourceConfig::Api(url),
            (None, None) => {
                return Err(AppError::Config(
                    "未设置数据来源: DATA_DIR 或 API_BASE_URL".to_string(),
                ))
            }
        };
        Ok(Self {
            app_env: env_or_default("APP_ENV", LOCAL_ENV),
            source,
            audit_limit: overrides
                .audit_limit
                .unwrap_or_else(|| env_parse_or("AUDIT_LIMIT", DEFAULT_AUDIT_LIMIT)),
            retry_attempts: env_parse_or("HTTP_RETRY_ATTEMPTS", DEFAULT_RETRY_ATTEMPTS),
        })
    }

    pub fn is_local(&self) -> bool {
        self.app_env.eq_ignore_ascii_case(LOCAL_ENV)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_env: LOCAL_ENV.to_string(),
            source: SourceConfig::Directory(PathBuf::from("data")),
            audit_limit: DEFAULT_AUDIT_LIMIT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_local() {
        let config = AppConfig::default();
        assert!(config.is_local());
        assert_eq!(config.audit_limit, 200);
        assert_eq!(config.retry_attempts, 3);
    }

    #[test]
    fn test_cli_directory_wins() {
        let config = AppConfig::resolve(Overrides {
            data_dir: Some(PathBuf::from("fixtures")),
            api_base_url: Some("http://localhost:5000".to_string()),
            audit_limit: Some(10),
        })
        .unwrap();
        assert_eq!(config.source, SourceConfig::Directory(PathBuf::from("fixtures")));
        assert_eq!(config.audit_limit, 10);
    }
}
