//! Integration tests for fop-view record loading and screen rendering

use fop_common::bus::{ViewState, ViewStateBus, ViewStatePatch};
use fop_common::config::PortalConfig;
use fop_common::pipeline::Identity;
use fop_common::screens::Screen;
use fop_view::{derive_report, load_records, Session, ViewRequest};
use serde_json::json;
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_load_records_accepts_array_and_value_wrapper() {
    let temp_dir = TempDir::new().unwrap();

    let bare = temp_dir.path().join("bare.json");
    fs::write(&bare, r#"[{"Title":"a"},{"Title":"b"}]"#).unwrap();
    assert_eq!(load_records(&bare).unwrap().len(), 2);

    let wrapped = temp_dir.path().join("wrapped.json");
    fs::write(&wrapped, r#"{"value":[{"Title":"a"}],"nextLink":null}"#).unwrap();
    assert_eq!(load_records(&wrapped).unwrap().len(), 1);

    let other = temp_dir.path().join("other.json");
    fs::write(&other, r#"{"error":"timeout"}"#).unwrap();
    assert!(load_records(&other).unwrap().is_empty());
}

#[test]
fn test_load_records_errors() {
    let temp_dir = TempDir::new().unwrap();
    assert!(load_records(&temp_dir.path().join("missing.json")).is_err());

    let broken = temp_dir.path().join("broken.json");
    fs::write(&broken, "[{").unwrap();
    assert!(matches!(load_records(&broken), Err(fop_common::Error::Json(_))));
}

#[test]
fn test_every_screen_renders_mixed_records() {
    let records = vec![
        json!({ "Title": "Alpha", "Status": "Open", "Created": "2024-01-01" }),
        json!({ "fields": { "Subject": "Beta" } }),
        json!(null),
    ];
    for screen in Screen::ALL {
        let config = PortalConfig::default();
        let report = derive_report(screen, &records, &ViewState::default(), None, &config);
        assert_eq!(report.total, 3, "{}", screen);
        assert_eq!(report.counts.iter().map(|p| p.count).sum::<usize>(), 3, "{}", screen);
        assert_eq!(report.items.len(), 3, "{}", screen);
    }
}

#[test]
fn test_configured_cap_applies() {
    let config = PortalConfig::from_toml_str("max_items = 1").unwrap();
    let records = vec![json!({ "Title": "a" }), json!({ "Title": "b" })];
    let report = derive_report(Screen::Reports, &records, &ViewState::default(), None, &config);
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.showing, 2);
    assert!(report.is_truncated());
    assert!(report.to_table().contains("Showing 1 of 2"));
}

#[test]
fn test_session_follows_bus_writes() {
    let bus = Arc::new(ViewStateBus::new("view-tests.viewState"));
    let records = vec![
        json!({ "Shift": "Day", "Site": "Yard", "ShiftStart": "2024-08-01T07:00:00Z", "email": "kim@example.com" }),
        json!({ "Shift": "Night", "Site": "Depot", "ShiftStart": "2024-08-01T19:00:00Z", "email": "lee@example.com" }),
    ];
    let me = Identity::new(Some("kim@example.com".into()), None);
    let session = Session::mount(
        Arc::clone(&bus),
        Screen::Schedules,
        records,
        Some(me),
        PortalConfig::default(),
    );

    let request = ViewRequest {
        mine: true,
        ..Default::default()
    };
    session.apply(&request.to_patch());
    let report = session.current();
    assert_eq!(report.total, 1);
    assert_eq!(report.items[0].title, "Day");

    bus.write(&ViewStatePatch::secondary("depot"));
    assert!(session.current().items.is_empty());
}
