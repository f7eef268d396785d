//! 记录来源: 本地 JSON 文件或 HTTP 接口

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Duration;
use tokio_retry::strategy::{jitter, ExponentialBackoff};
use tokio_retry::Retry;
use tracing::{debug, warn};

use super::collection::Collection;
use crate::error::{AppError, Result};

/// 按集合取回原始 JSON (信封对象或数组)
#[async_trait]
pub trait RecordSource: Send + Sync {
    async fn fetch(&self, collection: Collection) -> Result<Value>;
}

/// 从目录读取 `<dir>/<name>.json`
pub struct FileRecordSource {
    dir: PathBuf,
}

impl FileRecordSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

#[async_trait]
impl RecordSource for FileRecordSource {
    async fn fetch(&self, collection: Collection) -> Result<Value> {
        let path = self.dir.join(collection.file_name());
        debug!("读取 {}", path.display());
        let text = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AppError::ingestion(
                collection.envelope_key(),
                format!("{}: {}", path.display(), e),
            )
        })?;
        serde_json::from_str(&text).map_err(|e| {
            AppError::ingestion(
                collection.envelope_key(),
                format!("{}: {}", path.display(), e),
            )
        })
    }
}

/// 只读 HTTP 接口，失败时指数退避重试
pub struct HttpRecordSource {
    client: Client,
    base_url: String,
    audit_limit: usize,
    retry_attempts: usize,
}

impl HttpRecordSource {
    pub fn new(base_url: impl Into<String>, audit_limit: usize, retry_attempts: usize) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            audit_limit,
            retry_attempts,
        }
    }

    async fn get_once(&self, url: &str) -> Result<Value> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status_code = response.status();
        let body = response.text().await?;
        if !status_code.is_success() {
            return Err(AppError::Network(format!(
                "请求失败: {} {}: {}",
                status_code, url, body
            )));
        }
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl RecordSource for HttpRecordSource {
    async fn fetch(&self, collection: Collection) -> Result<Value> {
        let url = format!("{}{}", self.base_url, collection.endpoint(self.audit_limit));
        let retry = ExponentialBackoff::from_millis(50)
            .factor(2)
            .max_delay(Duration::from_secs(2))
            .map(jitter)
            .take(self.retry_attempts);

        Retry::spawn(retry, || self.get_once(&url))
            .await
            .map_err(|e| {
                warn!(collection = %collection, error = %e, "重试后仍无法获取记录");
                AppError::ingestion(collection.envelope_key(), e.to_string())
            })
    }
}
