//! 記錄型選擇介面

use attrset_core::{SetSnapshot, TrackerOptions};
use attrset_tracker::SelectionSurface;

use crate::StaleItemTracker;

/// 記錄型選擇介面
///
/// 保存過期項目與最近一次寫回宿主欄位的值，供宿主在每次事件後讀取。
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    /// 過期項目
    stale_items: StaleItemTracker,

    /// 最近一次的欄位值
    field_value: Option<String>,

    /// 發佈次數
    publish_count: usize,

    /// 是否以縮排格式輸出
    pretty: bool,
}

impl RecordingSurface {
    /// 創建新的記錄型介面
    pub fn new(options: &TrackerOptions) -> Self {
        Self {
            pretty: options.pretty_output(),
            ..Self::default()
        }
    }

    /// 最近一次的欄位值
    pub fn field_value(&self) -> Option<&str> {
        self.field_value.as_deref()
    }

    /// 發佈次數
    pub fn publish_count(&self) -> usize {
        self.publish_count
    }

    /// 過期項目
    pub fn stale_items(&self) -> &StaleItemTracker {
        &self.stale_items
    }

    /// 過期項目（可變）
    pub fn stale_items_mut(&mut self) -> &mut StaleItemTracker {
        &mut self.stale_items
    }
}

impl SelectionSurface for RecordingSurface {
    fn invalidate_item_cache(&mut self, code: &str) {
        tracing::debug!("項目 {} 的渲染快取已失效", code);
        self.stale_items.mark_stale(code);
    }

    fn publish(&mut self, snapshot: &SetSnapshot) {
        self.publish_count += 1;
        match snapshot.to_json(self.pretty) {
            Ok(text) => self.field_value = Some(text),
            Err(e) => tracing::warn!("欄位值序列化失敗，保留上一次的值: {}", e),
        }
    }
}
