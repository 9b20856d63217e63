//! # Attribute Set Tracker
//!
//! 集合欄位編輯狀態追蹤

pub mod surface;
pub mod tracker;
pub mod transition;

// Re-export 主要類型
pub use surface::{NoopSurface, SelectionSurface};
pub use tracker::{InitialItem, SetStateTracker};
pub use transition::{AddTransition, RemoveTransition, TransitionRules};
