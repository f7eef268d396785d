//! 值对象模块

pub mod date_window;
pub mod money;
pub mod record_id;

pub use date_window::DateWindow;
pub use money::Money;
pub use record_id::RecordId;
