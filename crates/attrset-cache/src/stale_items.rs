//! 過期項目追蹤

use std::collections::BTreeSet;

/// 過期項目追蹤器
///
/// 記錄渲染快取已失效、需要重新渲染的項目代碼。
#[derive(Debug, Clone, Default)]
pub struct StaleItemTracker {
    stale_codes: BTreeSet<String>,
}

impl StaleItemTracker {
    /// 創建新的追蹤器
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記項目為過期
    pub fn mark_stale(&mut self, code: &str) {
        self.stale_codes.insert(code.to_string());
    }

    /// 檢查項目是否過期
    pub fn is_stale(&self, code: &str) -> bool {
        self.stale_codes.contains(code)
    }

    /// 項目已重新渲染
    pub fn mark_rendered(&mut self, code: &str) -> bool {
        self.stale_codes.remove(code)
    }

    /// 清除所有過期標記
    pub fn clear(&mut self) {
        self.stale_codes.clear();
    }

    /// 取出並清除所有過期項目（依代碼排序）
    pub fn take_stale_codes(&mut self) -> Vec<String> {
        std::mem::take(&mut self.stale_codes).into_iter().collect()
    }

    /// 獲取所有過期項目
    pub fn stale_codes(&self) -> Vec<String> {
        self.stale_codes.iter().cloned().collect()
    }

    /// 是否沒有過期項目
    pub fn is_empty(&self) -> bool {
        self.stale_codes.is_empty()
    }
}
