//! SOW / PO / 人员报表核心
//!
//! 基于七个记录集合的只读快照计算年度合同金额、客户分组、
//! 合同 → PO → 人员层级等报表。计算过程不做 IO，当前时间由调用方注入。

pub mod analytics;
pub mod app;
pub mod app_config;
pub mod diagnostics;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod reconcile;
pub mod report;
pub mod time_util;

pub use diagnostics::{Diagnostics, SkipReason};
pub use error::{AppError, Result};
