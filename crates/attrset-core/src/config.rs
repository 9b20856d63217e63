//! 追蹤器配置

use serde::{Deserialize, Serialize};

/// 集合狀態追蹤器選項
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackerOptions {
    /// 除錯模式
    /// - true: 欄位值以縮排 JSON 輸出，每次刷新記錄除錯日誌
    /// - false: 緊湊 JSON 輸出（預設）
    pub debug: bool,
}

impl TrackerOptions {
    /// 創建預設選項
    pub fn new() -> Self {
        Self::default()
    }

    /// 建構器模式：設置除錯模式
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// 欄位值是否以縮排格式輸出
    pub fn pretty_output(&self) -> bool {
        self.debug
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options() {
        let options = TrackerOptions::new();

        assert!(!options.debug);
        assert!(!options.pretty_output());
    }

    #[test]
    fn test_options_builder() {
        let options = TrackerOptions::new().with_debug(true);

        assert!(options.debug);
        assert!(options.pretty_output());
    }
}
