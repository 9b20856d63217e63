//! 項目狀態

use serde::{Deserialize, Serialize};

/// 單一代碼相對於原始值的狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    /// 新增（原始值中不存在）
    Added,
    /// 移除（原始值中存在）
    Removed,
    /// 無變化
    Unchanged,
}

impl ItemStatus {
    /// 是否出現在差異中
    pub fn is_change(&self) -> bool {
        !matches!(self, ItemStatus::Unchanged)
    }
}
