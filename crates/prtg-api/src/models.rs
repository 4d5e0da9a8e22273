//! Typed models for PRTG table responses.
//!
//! PRTG's table endpoints mirror every requested column twice: a
//! human-formatted field (`name`, `active`, ...) and a machine-oriented
//! `_raw` counterpart (`name_raw`, `active_raw`, ...). That pairing is a
//! convention of the remote API and is preserved verbatim here. Columns the
//! models do not know about are kept in the flattened `extra` map.

use prtg_core::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A PRTG probe row from `content=probes`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Probe {
    /// Object id.
    pub objid: ObjectId,
    /// Raw object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objid_raw: Option<u64>,
    /// Probe name.
    pub name: String,
    /// Raw probe name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_raw: Option<String>,
    /// Whether the probe is active.
    #[serde(default)]
    pub active: bool,
    /// Raw active flag (`-1` when active).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_raw: Option<i64>,
    /// Space-separated tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Raw tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_raw: Option<String>,
    /// Parent object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentid: Option<ObjectId>,
    /// Raw parent object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentid_raw: Option<u64>,
    /// Formatted priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Raw priority (1-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_raw: Option<u8>,
    /// Formatted status text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Raw status code, see [`ObjectStatus`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_raw: Option<i64>,
    /// Formatted group count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupnum: Option<String>,
    /// Raw group count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupnum_raw: Option<i64>,
    /// Formatted device count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicenum: Option<String>,
    /// Raw device count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicenum_raw: Option<i64>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Raw location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_raw: Option<String>,
    /// Any further columns present in the response.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl Probe {
    /// Typed view of the raw status code, when present and known.
    #[must_use]
    pub fn object_status(&self) -> Option<ObjectStatus> {
        self.status_raw.and_then(ObjectStatus::from_raw)
    }
}

/// A PRTG group row from `content=groups`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    /// Object id.
    pub objid: ObjectId,
    /// Raw object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objid_raw: Option<u64>,
    /// Group name.
    pub name: String,
    /// Raw group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_raw: Option<String>,
    /// Whether the group is active.
    #[serde(default)]
    pub active: bool,
    /// Raw active flag (`-1` when active).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_raw: Option<i64>,
    /// Formatted status text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Raw status code, see [`ObjectStatus`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_raw: Option<i64>,
    /// Name of the parent probe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<String>,
    /// Raw parent probe name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_raw: Option<String>,
    /// Formatted priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Raw priority (1-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_raw: Option<u8>,
    /// Space-separated tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Raw tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_raw: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Raw location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_raw: Option<String>,
    /// Parent object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentid: Option<ObjectId>,
    /// Raw parent object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentid_raw: Option<u64>,
    /// Formatted group count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupnum: Option<String>,
    /// Raw group count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groupnum_raw: Option<i64>,
    /// Formatted device count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicenum: Option<String>,
    /// Raw device count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devicenum_raw: Option<i64>,
    /// Any further columns present in the response.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// A PRTG device row from `content=devices`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Device {
    /// Object id.
    pub objid: ObjectId,
    /// Raw object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub objid_raw: Option<u64>,
    /// Device name.
    pub name: String,
    /// Raw device name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_raw: Option<String>,
    /// Whether the device is active.
    #[serde(default)]
    pub active: bool,
    /// Raw active flag (`-1` when active).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_raw: Option<i64>,
    /// Formatted status text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Raw status code, see [`ObjectStatus`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_raw: Option<i64>,
    /// Name of the parent probe.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe: Option<String>,
    /// Raw parent probe name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probe_raw: Option<String>,
    /// Name of the parent group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    /// Raw parent group name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_raw: Option<String>,
    /// Hostname or IP address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    /// Raw hostname.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub host_raw: Option<String>,
    /// Formatted priority.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,
    /// Raw priority (1-5).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_raw: Option<u8>,
    /// Space-separated tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
    /// Raw tags.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags_raw: Option<String>,
    /// Location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Raw location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_raw: Option<String>,
    /// Parent object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentid: Option<ObjectId>,
    /// Raw parent object id.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parentid_raw: Option<u64>,
    /// Device icon file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Raw device icon file name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon_raw: Option<String>,
    /// Any further columns present in the response.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Envelope of a `content=probes` table response.
#[derive(Debug, Clone, Deserialize)]
pub struct ProbeTable {
    /// PRTG server version.
    #[serde(rename = "prtg-version", default)]
    pub prtg_version: Option<String>,
    /// Total number of matching rows.
    #[serde(default)]
    pub treesize: Option<u64>,
    /// Probe rows.
    #[serde(default)]
    pub probes: Vec<Probe>,
}

/// Envelope of a `content=groups` table response.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupTable {
    /// PRTG server version.
    #[serde(rename = "prtg-version", default)]
    pub prtg_version: Option<String>,
    /// Total number of matching rows.
    #[serde(default)]
    pub treesize: Option<u64>,
    /// Group rows.
    #[serde(default)]
    pub groups: Vec<Group>,
}

/// Envelope of a `content=devices` table response.
#[derive(Debug, Clone, Deserialize)]
pub struct DeviceTable {
    /// PRTG server version.
    #[serde(rename = "prtg-version", default)]
    pub prtg_version: Option<String>,
    /// Total number of matching rows.
    #[serde(default)]
    pub treesize: Option<u64>,
    /// Device rows.
    #[serde(default)]
    pub devices: Vec<Device>,
}

/// Device icons accepted by `adddevice2.htm` and the `deviceicon` property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Icon {
    /// Generic server.
    #[default]
    Server,
    /// Network switch.
    Switch,
    /// Router.
    Router,
    /// Firewall.
    Firewall,
    /// Printer.
    Printer,
    /// Workstation.
    Workstation,
    /// Linux server.
    LinuxServer,
    /// Windows server.
    WindowsServer,
    /// Storage appliance.
    Storage,
}

impl Icon {
    /// The icon file name PRTG stores for this icon.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Server => "a_server_1.png",
            Self::Switch => "a_switch_1.png",
            Self::Router => "a_router_1.png",
            Self::Firewall => "a_firewall_1.png",
            Self::Printer => "b_printer_1.png",
            Self::Workstation => "b_workstation_1.png",
            Self::LinuxServer => "c_os_linux.png",
            Self::WindowsServer => "c_os_win.png",
            Self::Storage => "a_storage_1.png",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.file_name())
    }
}

/// Typed view of the `status_raw` codes PRTG reports for monitored objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatus {
    /// Status has not been determined yet.
    Unknown,
    /// Initial scan in progress.
    Scanning,
    /// Object is up.
    Up,
    /// Object is in warning state.
    Warning,
    /// Object is down.
    Down,
    /// The parent probe is disconnected.
    NoProbe,
    /// Paused by a user.
    PausedByUser,
    /// Paused because a dependency is down.
    PausedByDependency,
    /// Paused by a schedule.
    PausedBySchedule,
    /// Object reports unusual values.
    Unusual,
    /// Paused due to licensing.
    PausedByLicense,
    /// Paused until a point in time.
    PausedUntil,
    /// Down but acknowledged.
    DownAcknowledged,
    /// Partially down.
    DownPartial,
}

impl ObjectStatus {
    /// Map a raw status code to its typed counterpart.
    #[must_use]
    pub const fn from_raw(raw: i64) -> Option<Self> {
        match raw {
            1 => Some(Self::Unknown),
            2 => Some(Self::Scanning),
            3 => Some(Self::Up),
            4 => Some(Self::Warning),
            5 => Some(Self::Down),
            6 => Some(Self::NoProbe),
            7 => Some(Self::PausedByUser),
            8 => Some(Self::PausedByDependency),
            9 => Some(Self::PausedBySchedule),
            10 => Some(Self::Unusual),
            11 => Some(Self::PausedByLicense),
            12 => Some(Self::PausedUntil),
            13 => Some(Self::DownAcknowledged),
            14 => Some(Self::DownPartial),
            _ => None,
        }
    }

    /// The raw status code for this status.
    #[must_use]
    pub const fn as_raw(self) -> i64 {
        match self {
            Self::Unknown => 1,
            Self::Scanning => 2,
            Self::Up => 3,
            Self::Warning => 4,
            Self::Down => 5,
            Self::NoProbe => 6,
            Self::PausedByUser => 7,
            Self::PausedByDependency => 8,
            Self::PausedBySchedule => 9,
            Self::Unusual => 10,
            Self::PausedByLicense => 11,
            Self::PausedUntil => 12,
            Self::DownAcknowledged => 13,
            Self::DownPartial => 14,
        }
    }

    /// Whether this status is one of the paused variants.
    #[must_use]
    pub const fn is_paused(self) -> bool {
        matches!(
            self,
            Self::PausedByUser
                | Self::PausedByDependency
                | Self::PausedBySchedule
                | Self::PausedByLicense
                | Self::PausedUntil
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn probe_deserializes_formatted_and_raw_pairs() {
        let probe: Probe = serde_json::from_value(json!({
            "objid": 1,
            "objid_raw": 1,
            "name": "Probe Device",
            "name_raw": "Probe Device",
            "active": true,
            "active_raw": -1,
            "status": "Up",
            "status_raw": 3
        }))
        .unwrap();

        assert_eq!(probe.objid, ObjectId::new(1));
        assert_eq!(probe.objid_raw, Some(1));
        assert_eq!(probe.name, "Probe Device");
        assert!(probe.active);
        assert_eq!(probe.active_raw, Some(-1));
        assert_eq!(probe.object_status(), Some(ObjectStatus::Up));
    }

    #[test]
    fn probe_keeps_unknown_columns_in_extra() {
        let probe: Probe = serde_json::from_value(json!({
            "objid": 1,
            "name": "Probe Device",
            "condition": "ok",
            "condition_raw": 0
        }))
        .unwrap();

        assert_eq!(probe.extra.get("condition"), Some(&json!("ok")));
        assert_eq!(probe.extra.get("condition_raw"), Some(&json!(0)));
    }

    #[test]
    fn probe_table_envelope() {
        let table: ProbeTable = serde_json::from_value(json!({
            "prtg-version": "21.1.66.1649",
            "treesize": 1,
            "probes": [{"objid": 1, "name": "Probe Device"}]
        }))
        .unwrap();

        assert_eq!(table.prtg_version.as_deref(), Some("21.1.66.1649"));
        assert_eq!(table.treesize, Some(1));
        assert_eq!(table.probes.len(), 1);
    }

    #[test]
    fn device_deserializes_host_pair() {
        let device: Device = serde_json::from_value(json!({
            "objid": 2380,
            "name": "web01",
            "host": "10.0.0.5",
            "host_raw": "10.0.0.5",
            "icon": "a_server_1.png"
        }))
        .unwrap();

        assert_eq!(device.host.as_deref(), Some("10.0.0.5"));
        assert_eq!(device.icon.as_deref(), Some("a_server_1.png"));
    }

    #[test]
    fn icon_file_names() {
        assert_eq!(Icon::default(), Icon::Server);
        assert_eq!(Icon::Server.file_name(), "a_server_1.png");
        assert_eq!(Icon::WindowsServer.to_string(), "c_os_win.png");
    }

    #[test]
    fn object_status_round_trip() {
        for raw in 1..=14 {
            let status = ObjectStatus::from_raw(raw).unwrap();
            assert_eq!(status.as_raw(), raw);
        }
        assert_eq!(ObjectStatus::from_raw(0), None);
        assert_eq!(ObjectStatus::from_raw(99), None);
    }

    #[test]
    fn object_status_paused_variants() {
        assert!(ObjectStatus::PausedByUser.is_paused());
        assert!(ObjectStatus::PausedUntil.is_paused());
        assert!(!ObjectStatus::Up.is_paused());
        assert!(!ObjectStatus::DownAcknowledged.is_paused());
    }
}
