//! 集合欄位編輯示例

use attrset::{RecordingSurface, SetStateTracker, TrackerOptions};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== 集合欄位編輯示例 ===\n");

    let field_value = r#"{
        "possible_values": [
            { "code": "critical", "label": "Critical ticket" },
            { "code": "high", "label": "don't forget it !" },
            { "code": "normal", "label": "when time available" },
            { "code": "low", "label": "don't worry ;)" }
        ],
        "max_items_allowed": 20,
        "partial_values": ["normal"],
        "orig_value": ["critical", "normal"],
        "added": [],
        "removed": []
    }"#;

    let options = TrackerOptions::new().with_debug(true);
    let surface = RecordingSurface::new(&options);
    let mut tracker = SetStateTracker::initialize_with(field_value, options, surface)?;

    println!("初始項目:");
    for item in tracker.initial_items() {
        println!("  - {}{}", item.code, if item.partial { "（部分值）" } else { "" });
    }

    // 使用者操作
    tracker.on_item_added("high");
    tracker.on_item_removed("normal");
    tracker.on_item_removed("critical");
    tracker.on_item_added("critical");

    println!(
        "\n需重新渲染的項目: {:?}",
        tracker.surface_mut().stale_items_mut().take_stale_codes()
    );

    let (snapshot, surface) = tracker.teardown();
    println!("最終代碼: {:?}", snapshot.final_codes());
    println!("\n欄位值:\n{}", surface.field_value().unwrap_or_default());

    Ok(())
}
