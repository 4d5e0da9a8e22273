//! Integration tests for parsing PRTG table data.
//!
//! These tests validate that the prtg-api models correctly deserialize table
//! responses as PRTG emits them, including the paired formatted/`_raw`
//! fields.

use std::fs;
use std::path::PathBuf;

use prtg_api::models::{DeviceTable, GroupTable, ObjectStatus, ProbeTable};
use prtg_core::ObjectId;

/// Get the path to the test fixtures directory.
fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn load_fixture(name: &str) -> String {
    let fixture_path = fixtures_dir().join(name);
    fs::read_to_string(&fixture_path).unwrap_or_else(|e| {
        panic!("Failed to read fixture at {}: {}", fixture_path.display(), e)
    })
}

#[test]
fn test_deserialize_probe_list() {
    let json_data = load_fixture("probe_list.json");

    let table: ProbeTable = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!("Failed to deserialize probe list data: {e}\nJSON: {json_data}")
    });

    assert_eq!(table.prtg_version.as_deref(), Some("21.1.66.1649"));
    assert_eq!(table.treesize, Some(2));
    assert_eq!(table.probes.len(), 2);
}

#[test]
fn test_probe_formatted_and_raw_pairing() {
    let json_data = load_fixture("probe_list.json");
    let table: ProbeTable = serde_json::from_str(&json_data).unwrap();

    let probe = &table.probes[0];
    assert_eq!(probe.objid, ObjectId::new(1));
    assert_eq!(probe.objid_raw, Some(1));
    assert_eq!(probe.name, "Probe Device");
    assert_eq!(probe.name_raw.as_deref(), Some("Probe Device"));
    assert!(probe.active);
    assert_eq!(probe.active_raw, Some(-1));
    assert_eq!(probe.priority.as_deref(), Some("3"));
    assert_eq!(probe.priority_raw, Some(3));
    assert_eq!(probe.status.as_deref(), Some("Up"));
    assert_eq!(probe.status_raw, Some(3));
    assert_eq!(probe.groupnum.as_deref(), Some("1"));
    assert_eq!(probe.groupnum_raw, Some(1));
    assert_eq!(probe.devicenum.as_deref(), Some("1"));
    assert_eq!(probe.devicenum_raw, Some(1));
}

#[test]
fn test_probe_unknown_columns_land_in_extra() {
    let json_data = load_fixture("probe_list.json");
    let table: ProbeTable = serde_json::from_str(&json_data).unwrap();

    let remote = &table.probes[1];
    assert_eq!(remote.name, "Remote Probe Berlin");
    assert_eq!(
        remote.extra.get("condition").and_then(|v| v.as_str()),
        Some("28 s ago")
    );
    assert_eq!(
        remote.extra.get("condition_raw").and_then(|v| v.as_i64()),
        Some(28)
    );
}

#[test]
fn test_deserialize_device_list() {
    let json_data = load_fixture("device_list.json");

    let table: DeviceTable = serde_json::from_str(&json_data).unwrap_or_else(|e| {
        panic!("Failed to deserialize device list data: {e}\nJSON: {json_data}")
    });

    assert_eq!(table.devices.len(), 2);

    let web = &table.devices[0];
    assert_eq!(web.objid, ObjectId::new(2380));
    assert_eq!(web.host.as_deref(), Some("10.0.0.5"));
    assert_eq!(web.group.as_deref(), Some("Web Servers"));
    assert_eq!(web.icon.as_deref(), Some("c_os_linux.png"));

    let printer = &table.devices[1];
    assert!(!printer.active);
    assert_eq!(printer.active_raw, Some(0));
    assert_eq!(
        printer.status_raw.and_then(ObjectStatus::from_raw),
        Some(ObjectStatus::PausedByUser)
    );
}

#[test]
fn test_deserialize_group_list() {
    let json_data = load_fixture("group_list.json");

    let table: GroupTable = serde_json::from_str(&json_data).unwrap();
    assert_eq!(table.groups.len(), 1);

    let group = &table.groups[0];
    assert_eq!(group.objid, ObjectId::new(2001));
    assert_eq!(group.name, "Web Servers");
    assert_eq!(group.probe.as_deref(), Some("Probe Device"));
    assert_eq!(group.parentid, Some(ObjectId::new(1)));
    assert_eq!(group.devicenum_raw, Some(4));
}
