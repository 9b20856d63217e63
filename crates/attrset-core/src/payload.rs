//! 欄位初始值解析

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{PossibleValue, Result, SetError};

pub const POSSIBLE_VAL_KEY: &str = "possible_values";
pub const PARTIAL_VAL_KEY: &str = "partial_values";
pub const ORIG_VAL_KEY: &str = "orig_value";
pub const MAX_ITEMS_ALLOWED_KEY: &str = "max_items_allowed";

/// 解析時可恢復的問題
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PayloadWarning {
    /// partial_values 缺失以外的無效形狀，已改用空集合
    InvalidPartialValues(String),
    /// max_items_allowed 不是非負整數，已忽略
    InvalidMaxItems(String),
}

/// 集合欄位的初始值
///
/// 輸入中的 `added` / `removed` 會被忽略，由追蹤器重新計算。
/// 透過 serde 反序列化時同樣走 [`SetFieldPayload::from_value`] 的驗證與降級規則。
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "Value")]
pub struct SetFieldPayload {
    /// 可選值目錄
    pub possible_values: Vec<PossibleValue>,

    /// 部分值（暫定存在的代碼）
    pub partial_values: Vec<String>,

    /// 原始值
    pub orig_value: Vec<String>,

    /// 最多可選項目數（由選擇介面負責限制）
    pub max_items_allowed: Option<u32>,

    /// 解析警告
    pub warnings: Vec<PayloadWarning>,
}

impl SetFieldPayload {
    /// 創建新的初始值
    pub fn new(possible_values: Vec<PossibleValue>, orig_value: Vec<String>) -> Self {
        Self {
            possible_values,
            partial_values: Vec::new(),
            orig_value,
            max_items_allowed: None,
            warnings: Vec::new(),
        }
    }

    /// 建構器模式：設置部分值
    pub fn with_partial_values(mut self, partial_values: Vec<String>) -> Self {
        self.partial_values = partial_values;
        self
    }

    /// 建構器模式：設置最多可選項目數
    pub fn with_max_items_allowed(mut self, max_items: u32) -> Self {
        self.max_items_allowed = Some(max_items);
        self
    }

    /// 從欄位的 JSON 文字解析
    pub fn parse(field_value: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(field_value)
            .map_err(|e| SetError::MalformedPayload(format!("無法解析 JSON: {}", e)))?;
        Self::from_value(value)
    }

    /// 從 JSON 值解析
    ///
    /// `possible_values` 與 `orig_value` 必須存在且為陣列，否則整個初始化失敗。
    /// `partial_values` 無效時降級為空集合，`max_items_allowed` 無效時忽略。
    pub fn from_value(value: Value) -> Result<Self> {
        let Value::Object(mut record) = value else {
            return Err(SetError::MalformedPayload(
                "欄位值必須是 JSON 物件".to_string(),
            ));
        };

        let possible_values = Self::required_array::<PossibleValue>(&mut record, POSSIBLE_VAL_KEY)?;
        let orig_value = Self::required_array::<String>(&mut record, ORIG_VAL_KEY)?;

        let mut warnings = Vec::new();

        let partial_values = match record.remove(PARTIAL_VAL_KEY) {
            None | Some(Value::Null) => Vec::new(),
            Some(raw) => match serde_json::from_value::<Vec<String>>(raw) {
                Ok(codes) => codes,
                Err(e) => {
                    tracing::warn!("{} 無效，改用空集合: {}", PARTIAL_VAL_KEY, e);
                    warnings.push(PayloadWarning::InvalidPartialValues(e.to_string()));
                    Vec::new()
                }
            },
        };

        let max_items_allowed = match record.remove(MAX_ITEMS_ALLOWED_KEY) {
            None | Some(Value::Null) => None,
            Some(raw) => match Self::max_items(&raw) {
                Some(max_items) => Some(max_items),
                None => {
                    tracing::warn!("{} 不是非負整數，已忽略: {}", MAX_ITEMS_ALLOWED_KEY, raw);
                    warnings.push(PayloadWarning::InvalidMaxItems(raw.to_string()));
                    None
                }
            },
        };

        Ok(Self {
            possible_values,
            partial_values,
            orig_value,
            max_items_allowed,
            warnings,
        })
    }

    /// 是否有可恢復的解析問題
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }

    /// 非負整數（含小數部分為零的浮點數）
    fn max_items(raw: &Value) -> Option<u32> {
        if let Some(n) = raw.as_u64() {
            return u32::try_from(n).ok();
        }
        let n = raw.as_f64()?;
        (n.fract() == 0.0 && (0.0..=f64::from(u32::MAX)).contains(&n)).then_some(n as u32)
    }

    fn required_array<T: serde::de::DeserializeOwned>(
        record: &mut Map<String, Value>,
        key: &str,
    ) -> Result<Vec<T>> {
        match record.remove(key) {
            None => Err(SetError::MalformedPayload(format!("缺少欄位 {}", key))),
            Some(raw @ Value::Array(_)) => serde_json::from_value(raw)
                .map_err(|e| SetError::MalformedPayload(format!("{} 內容無效: {}", key, e))),
            Some(_) => Err(SetError::MalformedPayload(format!("{} 必須是陣列", key))),
        }
    }
}

impl TryFrom<Value> for SetFieldPayload {
    type Error = SetError;

    fn try_from(value: Value) -> Result<Self> {
        Self::from_value(value)
    }
}
