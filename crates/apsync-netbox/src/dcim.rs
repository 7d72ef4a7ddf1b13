// dcim endpoints: sites, manufacturers, device types, roles, devices,
// interfaces. Each lookup filters on the object kind's natural key so that
// re-runs find what earlier runs created.

use serde_json::json;
use tracing::debug;

use crate::client::NetboxClient;
use crate::error::Error;
use crate::models::{Device, DevicePatch, DeviceRole, DeviceSpec, DeviceType, Interface, Manufacturer, Site};

/// Interface type reported for the management port.
const MGMT_INTERFACE_TYPE: &str = "1000base-t";

impl NetboxClient {
    // ── Sites ────────────────────────────────────────────────────────

    /// Find a site by its facility identifier.
    ///
    /// `GET /api/dcim/sites/?facility={id}` — sites are owned elsewhere and
    /// never created by this client.
    pub async fn find_site_by_facility(&self, facility: &str) -> Result<Option<Site>, Error> {
        self.find_one("dcim/sites", &[("facility", facility.to_owned())])
            .await
    }

    // ── Manufacturers ────────────────────────────────────────────────

    /// `GET /api/dcim/manufacturers/?slug={slug}`
    pub async fn find_manufacturer(&self, slug: &str) -> Result<Option<Manufacturer>, Error> {
        self.find_one("dcim/manufacturers", &[("slug", slug.to_owned())])
            .await
    }

    /// `POST /api/dcim/manufacturers/`
    pub async fn create_manufacturer(
        &self,
        name: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<Manufacturer, Error> {
        debug!(name, "creating manufacturer");
        self.post(
            "dcim/manufacturers",
            &json!({ "name": name, "slug": slug, "tags": [tag_id] }),
        )
        .await
    }

    // ── Device types ─────────────────────────────────────────────────

    /// `GET /api/dcim/device-types/?slug={slug}`
    pub async fn find_device_type(&self, slug: &str) -> Result<Option<DeviceType>, Error> {
        self.find_one("dcim/device-types", &[("slug", slug.to_owned())])
            .await
    }

    /// `POST /api/dcim/device-types/`
    pub async fn create_device_type(
        &self,
        manufacturer_id: u64,
        model: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<DeviceType, Error> {
        debug!(model, "creating device type");
        self.post(
            "dcim/device-types",
            &json!({
                "manufacturer": manufacturer_id,
                "model": model,
                "slug": slug,
                "tags": [tag_id],
            }),
        )
        .await
    }

    // ── Device roles ─────────────────────────────────────────────────

    /// `GET /api/dcim/device-roles/?slug={slug}`
    pub async fn find_device_role(&self, slug: &str) -> Result<Option<DeviceRole>, Error> {
        self.find_one("dcim/device-roles", &[("slug", slug.to_owned())])
            .await
    }

    /// `POST /api/dcim/device-roles/`
    pub async fn create_device_role(
        &self,
        name: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<DeviceRole, Error> {
        debug!(name, "creating device role");
        self.post(
            "dcim/device-roles",
            &json!({ "name": name, "slug": slug, "color": "2196f3", "tags": [tag_id] }),
        )
        .await
    }

    // ── Devices ──────────────────────────────────────────────────────

    /// `GET /api/dcim/devices/?serial={serial}`
    pub async fn find_device_by_serial(&self, serial: &str) -> Result<Option<Device>, Error> {
        self.find_one("dcim/devices", &[("serial", serial.to_owned())])
            .await
    }

    /// `GET /api/dcim/devices/?name={name}&site_id={id}`
    pub async fn find_device_by_name_site(
        &self,
        name: &str,
        site_id: u64,
    ) -> Result<Option<Device>, Error> {
        self.find_one(
            "dcim/devices",
            &[("name", name.to_owned()), ("site_id", site_id.to_string())],
        )
        .await
    }

    /// `POST /api/dcim/devices/`
    ///
    /// A duplicate device name within the site surfaces as
    /// [`Error::Conflict`]; callers recover by re-fetching.
    pub async fn create_device(&self, spec: &DeviceSpec) -> Result<Device, Error> {
        debug!(name = %spec.name, "creating device");
        self.post(
            "dcim/devices",
            &json!({
                "name": spec.name,
                "device_type": spec.device_type_id,
                "role": spec.role_id,
                "site": spec.site_id,
                "serial": spec.serial.as_deref().unwrap_or(""),
                "status": "active",
                "tags": [spec.tag_id],
            }),
        )
        .await
    }

    /// `PATCH /api/dcim/devices/{id}/` with only the set fields.
    pub async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, Error> {
        debug!(id, "updating device");
        let mut body = serde_json::Map::new();
        if let Some(ref name) = patch.name {
            body.insert("name".into(), json!(name));
        }
        if let Some(type_id) = patch.device_type_id {
            body.insert("device_type".into(), json!(type_id));
        }
        if let Some(role_id) = patch.role_id {
            body.insert("role".into(), json!(role_id));
        }
        if let Some(ref serial) = patch.serial {
            body.insert("serial".into(), json!(serial));
        }
        self.patch("dcim/devices", id, &serde_json::Value::Object(body))
            .await
    }

    /// Set the device's primary IPv4 address.
    ///
    /// `PATCH /api/dcim/devices/{id}/` with `{"primary_ip4": ip_id}`
    pub async fn set_primary_ip4(&self, device_id: u64, ip_id: u64) -> Result<Device, Error> {
        debug!(device_id, ip_id, "setting primary address");
        self.patch("dcim/devices", device_id, &json!({ "primary_ip4": ip_id }))
            .await
    }

    // ── Interfaces ───────────────────────────────────────────────────

    /// `GET /api/dcim/interfaces/?device_id={id}&name={name}`
    pub async fn find_interface(
        &self,
        device_id: u64,
        name: &str,
    ) -> Result<Option<Interface>, Error> {
        self.find_one(
            "dcim/interfaces",
            &[("device_id", device_id.to_string()), ("name", name.to_owned())],
        )
        .await
    }

    /// `POST /api/dcim/interfaces/`
    pub async fn create_interface(
        &self,
        device_id: u64,
        name: &str,
        mac_address: Option<&str>,
        tag_id: u64,
    ) -> Result<Interface, Error> {
        debug!(device_id, name, "creating interface");
        let mut body = serde_json::Map::new();
        body.insert("device".into(), json!(device_id));
        body.insert("name".into(), json!(name));
        body.insert("type".into(), json!(MGMT_INTERFACE_TYPE));
        body.insert("tags".into(), json!([tag_id]));
        if let Some(mac) = mac_address {
            body.insert("mac_address".into(), json!(mac));
        }
        self.post("dcim/interfaces", &serde_json::Value::Object(body))
            .await
    }

    /// `PATCH /api/dcim/interfaces/{id}/` replacing the MAC address.
    pub async fn update_interface_mac(&self, id: u64, mac_address: &str) -> Result<Interface, Error> {
        debug!(id, mac_address, "updating interface MAC");
        self.patch("dcim/interfaces", id, &json!({ "mac_address": mac_address }))
            .await
    }
}
