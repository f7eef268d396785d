//! 数据加载层
//!
//! ```text
//! RecordSource (文件 / HTTP) → loader (并发取回 + 信封解析)
//!     → raw (宽松反序列化) → normalize (实体 + 诊断) → RecordSnapshot
//! ```

pub mod collection;
pub mod loader;
pub mod normalize;
pub mod raw;
pub mod source;

pub use collection::Collection;
pub use loader::{extract_records, load_snapshot, LoadOptions, LoadedSnapshot, DEFAULT_AUDIT_LIMIT};
pub use source::{FileRecordSource, HttpRecordSource, RecordSource};
