//! Deserialized NetBox object shapes and write-request payloads.
//!
//! Only the fields the reconciler reads are modeled; everything else in the
//! (large) NetBox payloads is ignored by serde. Objects are handles to
//! remote state: they are returned by lookups, never fabricated locally.

use serde::{Deserialize, Serialize};

/// NetBox list envelope: `{ count, next, previous, results }`.
#[derive(Debug, Clone, Deserialize)]
pub struct Paginated<T> {
    pub count: u64,
    pub next: Option<String>,
    pub results: Vec<T>,
}

/// Brief nested representation NetBox embeds for related objects.
///
/// The populated name-ish field varies by kind (`name`, `model`, `slug`),
/// so all are optional here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NestedRef {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

// ── dcim ────────────────────────────────────────────────────────────

/// A site, looked up by its `facility` identifier. Never created by apsync.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Site {
    pub id: u64,
    pub name: String,
    pub slug: String,
    #[serde(default)]
    pub facility: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// A device type, keyed by (slugified) model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceType {
    pub id: u64,
    pub model: String,
    pub slug: String,
    pub manufacturer: NestedRef,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceRole {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

/// A device, keyed by serial or by (name, site).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: u64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub serial: String,
    pub device_type: NestedRef,
    pub role: NestedRef,
    pub site: NestedRef,
    #[serde(default)]
    pub primary_ip4: Option<NestedRef>,
}

/// An interface, keyed by (device, name).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interface {
    pub id: u64,
    pub name: String,
    pub device: NestedRef,
    #[serde(default)]
    pub mac_address: Option<String>,
}

// ── ipam / extras ───────────────────────────────────────────────────

/// An IP address in CIDR notation, optionally assigned to an interface.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpAddress {
    pub id: u64,
    pub address: String,
    #[serde(default)]
    pub assigned_object_type: Option<String>,
    #[serde(default)]
    pub assigned_object_id: Option<u64>,
}

/// The provenance tag applied to every object apsync creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: u64,
    pub name: String,
    pub slug: String,
}

// ── Write payloads ──────────────────────────────────────────────────

/// Fields for a device creation request.
#[derive(Debug, Clone)]
pub struct DeviceSpec {
    pub name: String,
    pub device_type_id: u64,
    pub role_id: u64,
    pub site_id: u64,
    pub serial: Option<String>,
    pub tag_id: u64,
}

/// Partial update for an existing device; unset fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct DevicePatch {
    pub name: Option<String>,
    pub device_type_id: Option<u64>,
    pub role_id: Option<u64>,
    pub serial: Option<String>,
}

impl DevicePatch {
    /// True when the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.device_type_id.is_none()
            && self.role_id.is_none()
            && self.serial.is_none()
    }
}
