//! 選擇介面（外部協作者）

use attrset_core::SetSnapshot;

/// 追蹤器對選擇介面的輸出通知
pub trait SelectionSurface {
    /// 清除項目的渲染快取，避免項目重新出現時仍顯示部分值樣式
    fn invalidate_item_cache(&mut self, code: &str);

    /// 發佈最新快照到宿主欄位
    fn publish(&mut self, snapshot: &SetSnapshot);
}

/// 忽略所有通知的選擇介面
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSurface;

impl SelectionSurface for NoopSurface {
    fn invalidate_item_cache(&mut self, _code: &str) {}

    fn publish(&mut self, _snapshot: &SetSnapshot) {}
}

impl<S: SelectionSurface + ?Sized> SelectionSurface for &mut S {
    fn invalidate_item_cache(&mut self, code: &str) {
        (**self).invalidate_item_cache(code);
    }

    fn publish(&mut self, snapshot: &SetSnapshot) {
        (**self).publish(snapshot);
    }
}
