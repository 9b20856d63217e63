//! 公開快照與差異

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{PossibleValue, Result, SetError};

/// 集合欄位的公開快照（寫回宿主欄位的值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetSnapshot {
    /// 可選值目錄（原樣輸出）
    pub possible_values: Vec<PossibleValue>,

    /// 目前的部分值
    pub partial_values: Vec<String>,

    /// 原始值（原樣輸出）
    pub orig_value: Vec<String>,

    /// 新增的代碼
    pub added: Vec<String>,

    /// 移除的代碼
    pub removed: Vec<String>,
}

impl SetSnapshot {
    /// 序列化為欄位值
    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        text.map_err(|e| SetError::Serialization(e.to_string()))
    }

    /// 從欄位值反序列化
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| SetError::Serialization(e.to_string()))
    }

    /// 取得差異
    pub fn diff(&self) -> SetDiff {
        SetDiff {
            added: self.added.clone(),
            removed: self.removed.clone(),
        }
    }

    /// 套用差異後的最終代碼
    pub fn final_codes(&self) -> Vec<String> {
        self.diff().apply(&self.orig_value)
    }
}

/// 相對原始值的差異
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetDiff {
    pub added: Vec<String>,
    pub removed: Vec<String>,
}

impl SetDiff {
    /// 是否無任何變更
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// 將差異套用到原始值
    ///
    /// 保留原始值順序並略過已移除的代碼，再依序附加新增的代碼。
    pub fn apply(&self, baseline: &[String]) -> Vec<String> {
        let removed: HashSet<&str> = self.removed.iter().map(String::as_str).collect();
        let mut seen: HashSet<&str> = HashSet::new();
        let mut codes = Vec::with_capacity(baseline.len() + self.added.len());

        for code in baseline.iter().chain(self.added.iter()) {
            if removed.contains(code.as_str()) || !seen.insert(code.as_str()) {
                continue;
            }
            codes.push(code.clone());
        }

        codes
    }
}
