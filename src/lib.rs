//! # Attribute Set
//!
//! 集合欄位編輯狀態追蹤：核心模型、追蹤器與快取

pub use attrset_cache::{RecordingSurface, StaleItemTracker};
pub use attrset_core::{
    ItemStatus, PayloadWarning, PossibleValue, Result, SetDiff, SetError, SetFieldPayload,
    SetSnapshot, TrackerOptions,
};
pub use attrset_tracker::{InitialItem, NoopSurface, SelectionSurface, SetStateTracker};
