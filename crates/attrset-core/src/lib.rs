//! # Attribute Set Core
//!
//! 集合欄位的核心資料模型與類型定義

pub mod catalog;
pub mod config;
pub mod payload;
pub mod snapshot;
pub mod status;

// Re-export 主要類型
pub use catalog::PossibleValue;
pub use config::TrackerOptions;
pub use payload::{PayloadWarning, SetFieldPayload};
pub use snapshot::{SetDiff, SetSnapshot};
pub use status::ItemStatus;

/// 集合欄位錯誤類型
#[derive(Debug, thiserror::Error)]
pub enum SetError {
    #[error("欄位值格式錯誤: {0}")]
    MalformedPayload(String),

    #[error("序列化錯誤: {0}")]
    Serialization(String),
}

pub type Result<T> = std::result::Result<T, SetError>;
