//! 可選值目錄模型

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// 可選值（目錄項目）
///
/// 目錄由外部提供，代碼唯一性不在此檢查。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PossibleValue {
    /// 項目代碼
    pub code: String,

    /// 顯示標籤
    #[serde(default)]
    pub label: String,

    /// 其他欄位，原樣保留並輸出
    #[serde(flatten, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl PossibleValue {
    /// 創建新的可選值
    pub fn new(code: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            extra: Map::new(),
        }
    }

    /// 建構器模式：附加額外欄位
    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }
}

/// 在目錄中查找代碼
pub fn find<'a>(catalog: &'a [PossibleValue], code: &str) -> Option<&'a PossibleValue> {
    catalog.iter().find(|value| value.code == code)
}
