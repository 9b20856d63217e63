//! # Attribute Set Cache
//!
//! 項目渲染快取與欄位值緩存

pub mod recording;
pub mod stale_items;

// Re-export 主要類型
pub use recording::RecordingSurface;
pub use stale_items::StaleItemTracker;
