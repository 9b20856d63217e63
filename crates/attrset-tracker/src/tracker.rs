//! 集合狀態追蹤器

use std::collections::{BTreeMap, HashSet};

use attrset_core::{
    catalog, ItemStatus, PossibleValue, SetFieldPayload, SetSnapshot, TrackerOptions,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{NoopSurface, SelectionSurface, TransitionRules};

/// 初始渲染用的項目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitialItem {
    /// 項目代碼
    pub code: String,
    /// 是否為部分值（需以暫定樣式顯示）
    pub partial: bool,
}

/// 集合狀態追蹤器
///
/// 每個可編輯欄位各自擁有一個實例，實例之間不共享狀態。
pub struct SetStateTracker<S: SelectionSurface = NoopSurface> {
    /// 實例ID（用於日誌）
    id: Uuid,

    /// 選項
    options: TrackerOptions,

    /// 可選值目錄
    possible_values: Vec<PossibleValue>,

    /// 原始值（保留順序）
    original_value: Vec<String>,

    /// 原始值查詢表
    original_lookup: HashSet<String>,

    /// 部分值（只會縮小）
    partial_values: Vec<String>,

    /// 所有互動過的代碼及其最新狀態
    items_status: BTreeMap<String, ItemStatus>,

    /// 最多可選項目數
    max_items_allowed: Option<u32>,

    /// 選擇介面
    surface: S,
}

impl SetStateTracker<NoopSurface> {
    /// 從已解析的初始值創建追蹤器
    pub fn new(payload: SetFieldPayload) -> Self {
        Self::with_surface(payload, TrackerOptions::default(), NoopSurface)
    }

    /// 從欄位的 JSON 文字初始化
    pub fn initialize(field_value: &str) -> attrset_core::Result<Self> {
        Self::initialize_with(field_value, TrackerOptions::default(), NoopSurface)
    }
}

impl<S: SelectionSurface> SetStateTracker<S> {
    /// 創建綁定選擇介面的追蹤器
    pub fn with_surface(payload: SetFieldPayload, options: TrackerOptions, surface: S) -> Self {
        let id = Uuid::new_v4();
        let original_lookup = payload.orig_value.iter().cloned().collect();

        tracing::info!(
            "初始化集合追蹤器 {}：可選值 {} 筆，原始值 {} 筆，部分值 {} 筆",
            id,
            payload.possible_values.len(),
            payload.orig_value.len(),
            payload.partial_values.len()
        );

        Self {
            id,
            options,
            possible_values: payload.possible_values,
            original_value: payload.orig_value,
            original_lookup,
            partial_values: payload.partial_values,
            items_status: BTreeMap::new(),
            max_items_allowed: payload.max_items_allowed,
            surface,
        }
    }

    /// 從欄位的 JSON 文字初始化並綁定選擇介面
    ///
    /// 欄位值格式錯誤時不會建立任何追蹤器。
    pub fn initialize_with(
        field_value: &str,
        options: TrackerOptions,
        surface: S,
    ) -> attrset_core::Result<Self> {
        let payload = SetFieldPayload::parse(field_value)?;
        Ok(Self::with_surface(payload, options, surface))
    }

    /// 實例ID
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// 最多可選項目數
    pub fn max_items_allowed(&self) -> Option<u32> {
        self.max_items_allowed
    }

    /// 選擇介面
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// 選擇介面（可變）
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// 檢查代碼是否為部分值
    pub fn is_partial(&self, code: &str) -> bool {
        self.partial_values.iter().any(|partial| partial == code)
    }

    /// 代碼的最新狀態（未互動過時為 None）
    pub fn status(&self, code: &str) -> Option<ItemStatus> {
        self.items_status.get(code).copied()
    }

    /// 初始渲染的項目清單
    pub fn initial_items(&self) -> Vec<InitialItem> {
        self.original_value
            .iter()
            .map(|code| InitialItem {
                code: code.clone(),
                partial: self.is_partial(code),
            })
            .collect()
    }

    /// 處理項目新增事件
    pub fn on_item_added(&mut self, code: &str) -> SetSnapshot {
        self.log_unknown_code(code);

        let transition =
            TransitionRules::on_add(self.original_lookup.contains(code), self.is_partial(code));

        if transition.consume_partial {
            self.partial_values.retain(|partial| partial != code);
        }
        self.items_status.insert(code.to_string(), transition.status);

        tracing::debug!(
            "追蹤器 {} 新增項目 {}：狀態 {:?}，確認部分值 {}",
            self.id,
            code,
            transition.status,
            transition.consume_partial
        );

        self.refresh()
    }

    /// 處理項目移除事件
    pub fn on_item_removed(&mut self, code: &str) -> SetSnapshot {
        self.log_unknown_code(code);

        let transition =
            TransitionRules::on_remove(self.original_lookup.contains(code), self.is_partial(code));

        if transition.invalidate_cache {
            self.surface.invalidate_item_cache(code);
        }
        self.items_status.insert(code.to_string(), transition.status);

        tracing::debug!(
            "追蹤器 {} 移除項目 {}：狀態 {:?}，清除快取 {}",
            self.id,
            code,
            transition.status,
            transition.invalidate_cache
        );

        self.refresh()
    }

    /// 計算目前的公開快照
    pub fn snapshot(&self) -> SetSnapshot {
        let mut added = Vec::new();
        let mut removed = Vec::new();

        // 無變化的代碼不出現在差異中
        for (code, status) in self.items_status.iter().filter(|(_, status)| status.is_change()) {
            match status {
                ItemStatus::Added => added.push(code.clone()),
                ItemStatus::Removed => removed.push(code.clone()),
                ItemStatus::Unchanged => {}
            }
        }

        SetSnapshot {
            possible_values: self.possible_values.clone(),
            partial_values: self.partial_values.clone(),
            orig_value: self.original_value.clone(),
            added,
            removed,
        }
    }

    /// 序列化後的欄位值
    pub fn field_value(&self) -> attrset_core::Result<String> {
        self.snapshot().to_json(self.options.pretty_output())
    }

    /// 結束編輯：發佈最後一次快照並歸還選擇介面
    pub fn teardown(mut self) -> (SetSnapshot, S) {
        let snapshot = self.refresh();
        tracing::info!(
            "集合追蹤器 {} 結束：新增 {} 筆，移除 {} 筆",
            self.id,
            snapshot.added.len(),
            snapshot.removed.len()
        );
        (snapshot, self.surface)
    }

    fn refresh(&mut self) -> SetSnapshot {
        let snapshot = self.snapshot();
        if self.options.debug {
            tracing::debug!(
                "追蹤器 {} 刷新：added {:?}，removed {:?}",
                self.id,
                snapshot.added,
                snapshot.removed
            );
        }
        self.surface.publish(&snapshot);
        snapshot
    }

    fn log_unknown_code(&self, code: &str) {
        if catalog::find(&self.possible_values, code).is_none() {
            tracing::debug!("追蹤器 {} 收到目錄外的代碼 {}", self.id, code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;
    use serde_json::json;

    #[derive(Default)]
    struct ProbeSurface {
        invalidated: Vec<String>,
        published: Vec<SetSnapshot>,
    }

    impl SelectionSurface for ProbeSurface {
        fn invalidate_item_cache(&mut self, code: &str) {
            self.invalidated.push(code.to_string());
        }

        fn publish(&mut self, snapshot: &SetSnapshot) {
            self.published.push(snapshot.clone());
        }
    }

    fn codes(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn catalog() -> Vec<PossibleValue> {
        vec![
            PossibleValue::new("critical", "Critical ticket"),
            PossibleValue::new("high", "don't forget it !"),
            PossibleValue::new("normal", "when time available"),
            PossibleValue::new("low", "don't worry ;)"),
        ]
    }

    fn tracker(orig: &[&str], partial: &[&str]) -> SetStateTracker<ProbeSurface> {
        let payload = SetFieldPayload::new(catalog(), codes(orig)).with_partial_values(codes(partial));
        SetStateTracker::with_surface(payload, TrackerOptions::default(), ProbeSurface::default())
    }

    #[test]
    fn test_add_new_code() {
        let mut tracker = tracker(&["critical"], &[]);

        let snapshot = tracker.on_item_added("high");

        assert_eq!(snapshot.added, codes(&["high"]));
        assert!(snapshot.removed.is_empty());
        assert_eq!(tracker.status("high"), Some(ItemStatus::Added));
    }

    #[test]
    fn test_remove_baseline_code() {
        let mut tracker = tracker(&["critical"], &[]);

        let snapshot = tracker.on_item_removed("critical");

        assert_eq!(snapshot.removed, codes(&["critical"]));
        assert!(snapshot.added.is_empty());
    }

    #[test]
    fn test_remove_then_add_baseline_code() {
        let mut tracker = tracker(&["critical"], &[]);

        tracker.on_item_removed("critical");
        let snapshot = tracker.on_item_added("critical");

        assert!(snapshot.added.is_empty());
        assert!(snapshot.removed.is_empty());
        assert_eq!(tracker.status("critical"), Some(ItemStatus::Unchanged));
    }

    #[test]
    fn test_add_then_remove_new_code() {
        let mut tracker = tracker(&["critical"], &[]);

        tracker.on_item_added("low");
        let snapshot = tracker.on_item_removed("low");

        assert!(snapshot.added.is_empty());
        assert!(snapshot.removed.is_empty());
        assert_eq!(tracker.status("low"), Some(ItemStatus::Unchanged));
    }

    #[test]
    fn test_confirm_partial_baseline_code() {
        let mut tracker = tracker(&["critical"], &["critical"]);
        assert!(tracker.is_partial("critical"));

        let snapshot = tracker.on_item_added("critical");

        assert!(!tracker.is_partial("critical"));
        assert_eq!(tracker.status("critical"), Some(ItemStatus::Unchanged));
        assert!(snapshot.partial_values.is_empty());
        assert!(snapshot.added.is_empty());
    }

    #[test]
    fn test_confirm_partial_new_code() {
        let mut tracker = tracker(&[], &["normal", "low"]);

        let snapshot = tracker.on_item_added("normal");

        assert_eq!(snapshot.added, codes(&["normal"]));
        assert_eq!(snapshot.partial_values, codes(&["low"]));
    }

    #[test]
    fn test_remove_partial_code_invalidates_cache() {
        let mut tracker = tracker(&[], &["normal"]);

        let snapshot = tracker.on_item_removed("normal");

        assert!(snapshot.removed.is_empty());
        assert_eq!(tracker.status("normal"), Some(ItemStatus::Unchanged));
        assert_eq!(tracker.surface().invalidated, codes(&["normal"]));
        // 移除不會消耗部分值
        assert!(tracker.is_partial("normal"));
    }

    #[test]
    fn test_remove_regular_code_does_not_invalidate_cache() {
        let mut tracker = tracker(&["critical"], &[]);

        tracker.on_item_removed("critical");

        assert!(tracker.surface().invalidated.is_empty());
    }

    #[test]
    fn test_untouched_code_has_no_status() {
        let tracker = tracker(&["critical"], &[]);

        assert_eq!(tracker.status("critical"), None);
        assert_eq!(tracker.snapshot().diff(), attrset_core::SetDiff::default());
    }

    #[test]
    fn test_unknown_code_is_accepted() {
        let mut tracker = tracker(&["critical"], &[]);

        let snapshot = tracker.on_item_added("not-in-catalog");

        assert_eq!(snapshot.added, codes(&["not-in-catalog"]));
    }

    #[test]
    fn test_every_event_publishes_snapshot() {
        let mut tracker = tracker(&["critical"], &[]);

        tracker.on_item_added("high");
        tracker.on_item_removed("critical");

        let published = &tracker.surface().published;
        assert_eq!(published.len(), 2);
        assert_eq!(published[1], tracker.snapshot());
    }

    #[test]
    fn test_teardown_publishes_final_snapshot() {
        let mut tracker = tracker(&["critical"], &[]);
        tracker.on_item_added("high");

        let (snapshot, surface) = tracker.teardown();

        assert_eq!(surface.published.len(), 2);
        assert_eq!(surface.published.last(), Some(&snapshot));
        assert_eq!(snapshot.added, codes(&["high"]));
    }

    #[test]
    fn test_initial_items_flag_partial_codes() {
        let tracker = tracker(&["critical", "normal"], &["normal"]);

        assert_eq!(
            tracker.initial_items(),
            vec![
                InitialItem { code: "critical".to_string(), partial: false },
                InitialItem { code: "normal".to_string(), partial: true },
            ]
        );
    }

    #[test]
    fn test_initialize_from_field_value() {
        let field_value = json!({
            "possible_values": [{ "code": "critical", "label": "Critical ticket" }],
            "max_items_allowed": 20,
            "orig_value": ["critical"],
            "added": ["ignored"],
            "removed": []
        })
        .to_string();

        let tracker = SetStateTracker::initialize(&field_value).unwrap();

        assert_eq!(tracker.max_items_allowed(), Some(20));
        assert!(tracker.snapshot().added.is_empty());
        assert_eq!(
            tracker.field_value().unwrap(),
            r#"{"possible_values":[{"code":"critical","label":"Critical ticket"}],"partial_values":[],"orig_value":["critical"],"added":[],"removed":[]}"#
        );
    }

    #[rstest]
    #[case("")]
    #[case("{}")]
    #[case(r#"{"possible_values": [], "orig_value": "critical"}"#)]
    fn test_initialize_rejects_malformed_field_value(#[case] field_value: &str) {
        assert!(SetStateTracker::initialize(field_value).is_err());
    }

    #[test]
    fn test_debug_field_value_is_indented() {
        let payload = SetFieldPayload::new(catalog(), codes(&["critical"]));
        let tracker = SetStateTracker::with_surface(
            payload,
            TrackerOptions::new().with_debug(true),
            NoopSurface,
        );

        assert!(tracker.field_value().unwrap().starts_with("{\n  \"possible_values\""));
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = tracker(&["critical"], &[]);
        let second = tracker(&["critical"], &[]);

        first.on_item_removed("critical");

        assert_ne!(first.id(), second.id());
        assert!(second.snapshot().removed.is_empty());
    }

    #[derive(Debug, Clone)]
    enum Event {
        Add(String),
        Remove(String),
    }

    fn event_strategy() -> impl Strategy<Value = Event> {
        let code = prop::sample::select(vec!["critical", "high", "normal", "low", "other"]);
        (any::<bool>(), code).prop_map(|(add, code)| {
            if add {
                Event::Add(code.to_string())
            } else {
                Event::Remove(code.to_string())
            }
        })
    }

    fn subset_strategy() -> impl Strategy<Value = Vec<String>> {
        prop::sample::subsequence(vec!["critical", "high", "normal", "low"], 0..=4)
            .prop_map(|values| values.into_iter().map(str::to_string).collect())
    }

    proptest! {
        #[test]
        fn prop_snapshot_invariants(
            orig in subset_strategy(),
            partial in subset_strategy(),
            events in prop::collection::vec(event_strategy(), 0..30),
        ) {
            let payload = SetFieldPayload::new(catalog(), orig.clone())
                .with_partial_values(partial.clone());
            let mut tracker = SetStateTracker::new(payload);
            let mut confirmed: HashSet<String> = HashSet::new();
            let mut selection: HashSet<String> = orig.iter().cloned().collect();

            for event in &events {
                let snapshot = match event {
                    Event::Add(code) => {
                        selection.insert(code.clone());
                        if partial.contains(code) {
                            confirmed.insert(code.clone());
                        }
                        tracker.on_item_added(code)
                    }
                    Event::Remove(code) => {
                        selection.remove(code);
                        tracker.on_item_removed(code)
                    }
                };

                // added 與 removed 不相交且無重複
                let added: HashSet<&String> = snapshot.added.iter().collect();
                let removed: HashSet<&String> = snapshot.removed.iter().collect();
                prop_assert_eq!(added.len(), snapshot.added.len());
                prop_assert_eq!(removed.len(), snapshot.removed.len());
                prop_assert!(added.is_disjoint(&removed));

                for code in &snapshot.added {
                    prop_assert!(!orig.contains(code));
                }
                for code in &snapshot.removed {
                    prop_assert!(orig.contains(code));
                }

                // 已確認的部分值不會恢復
                for code in &confirmed {
                    prop_assert!(!tracker.is_partial(code));
                }

                let final_codes: HashSet<String> = snapshot.final_codes().into_iter().collect();
                prop_assert_eq!(&final_codes, &selection);
            }
        }

        #[test]
        fn prop_readd_baseline_is_unchanged(orig in subset_strategy()) {
            let mut tracker = SetStateTracker::new(SetFieldPayload::new(catalog(), orig.clone()));

            for code in &orig {
                tracker.on_item_removed(code);
                let snapshot = tracker.on_item_added(code);
                prop_assert_eq!(tracker.status(code), Some(ItemStatus::Unchanged));
                prop_assert!(!snapshot.added.contains(code));
                prop_assert!(!snapshot.removed.contains(code));
            }
        }
    }
}
