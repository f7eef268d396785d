//! 统一错误类型定义

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

/// 应用错误
///
/// 单条记录的问题不会走到这里，只计入诊断计数
#[derive(Error, Debug)]
pub enum AppError {
    /// 某个记录集合缺失或不是数组，整次加载失败
    #[error("数据加载失败: 集合 {collection}: {reason}")]
    IngestionFailed {
        collection: &'static str,
        reason: String,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 网络错误
    #[error("网络错误: {0}")]
    Network(String),

    /// 解析错误
    #[error("解析错误: {0}")]
    Parse(String),

    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    pub fn ingestion(collection: &'static str, reason: impl Into<String>) -> Self {
        AppError::IngestionFailed {
            collection,
            reason: reason.into(),
        }
    }

    /// 是否为整次加载失败 (区别于空结果)
    pub fn is_ingestion_failure(&self) -> bool {
        matches!(self, AppError::IngestionFailed { .. })
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Parse(e.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        AppError::Network(e.to_string())
    }
}
