//! 狀態轉移規則

use attrset_core::ItemStatus;

/// 新增事件的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddTransition {
    /// 新狀態
    pub status: ItemStatus,
    /// 是否從部分值中移除
    pub consume_partial: bool,
}

/// 移除事件的結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RemoveTransition {
    /// 新狀態
    pub status: ItemStatus,
    /// 是否通知選擇介面清除項目快取
    pub invalidate_cache: bool,
}

/// 轉移規則
pub struct TransitionRules;

impl TransitionRules {
    /// 計算新增事件的轉移
    ///
    /// | 原始值 | 部分值 | 狀態 |
    /// |---|---|---|
    /// | 是 | 是 | Unchanged（部分值被確認） |
    /// | 是 | 否 | Unchanged |
    /// | 否 | 是 | Added（部分值被確認） |
    /// | 否 | 否 | Added |
    pub fn on_add(in_baseline: bool, in_partial: bool) -> AddTransition {
        // 原始值中已存在的代碼不會出現在 added
        let status = if in_baseline {
            ItemStatus::Unchanged
        } else {
            ItemStatus::Added
        };

        AddTransition {
            status,
            consume_partial: in_partial,
        }
    }

    /// 計算移除事件的轉移
    ///
    /// 原始值中不存在的代碼，移除後視為無變化。
    pub fn on_remove(in_baseline: bool, in_partial: bool) -> RemoveTransition {
        let status = if in_baseline {
            ItemStatus::Removed
        } else {
            ItemStatus::Unchanged
        };

        RemoveTransition {
            status,
            invalidate_cache: in_partial,
        }
    }
}
