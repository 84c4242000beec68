use super::*;
use crate::types::{Category, ItemId, RawPlainItem};

fn make_raw(item_id: Option<&str>, item_name: Option<&str>) -> RawSearchRecord {
    RawSearchRecord {
        plain_item: Some(RawPlainItem {
            item_id: item_id.map(ItemId::new),
            item_name: item_name.map(str::to_owned),
            category: Some(Category {
                label: Some("Cape".to_owned()),
                ..Category::default()
            }),
            token_type: None,
        }),
        image_url: Some("https://img.example/1102000.png".to_owned()),
    }
}

#[test]
fn normalize_search_record_keeps_complete_record() {
    let record = normalize_search_record(make_raw(Some("1102000"), Some("Red Cape")))
        .expect("complete record should survive");
    assert_eq!(record.item_id.as_str(), "1102000");
    assert_eq!(record.item_name, "Red Cape");
    assert_eq!(
        record.image_url.as_deref(),
        Some("https://img.example/1102000.png")
    );
    assert_eq!(
        record.category.and_then(|c| c.label).as_deref(),
        Some("Cape")
    );
}

#[test]
fn normalize_search_record_drops_missing_name() {
    assert!(normalize_search_record(make_raw(Some("1102000"), None)).is_none());
}

#[test]
fn normalize_search_record_drops_missing_id() {
    assert!(normalize_search_record(make_raw(None, Some("Red Cape"))).is_none());
}

#[test]
fn normalize_search_record_drops_blank_fields() {
    assert!(normalize_search_record(make_raw(Some(""), Some("Red Cape"))).is_none());
    assert!(normalize_search_record(make_raw(Some("1102000"), Some("  "))).is_none());
}

#[test]
fn normalize_search_record_drops_record_without_plain_item() {
    let raw = RawSearchRecord {
        plain_item: None,
        image_url: Some("https://img.example/x.png".to_owned()),
    };
    assert!(normalize_search_record(raw).is_none());
}

#[test]
fn normalize_search_records_never_grows_and_keeps_order() {
    let raw = vec![
        make_raw(Some("1"), Some("Red Cape")),
        make_raw(Some("2"), None),
        make_raw(None, Some("Blue Cape")),
        make_raw(Some("4"), Some("Green Cape")),
    ];
    let input_len = raw.len();
    let records = normalize_search_records(raw);

    assert!(records.len() <= input_len);
    let ids: Vec<&str> = records.iter().map(|r| r.item_id.as_str()).collect();
    assert_eq!(ids, vec!["1", "4"]);
    assert!(records
        .iter()
        .all(|r| !r.item_id.is_empty() && !r.item_name.is_empty()));
}

#[test]
fn normalize_search_records_empty_input_is_empty() {
    assert!(normalize_search_records(Vec::new()).is_empty());
}
