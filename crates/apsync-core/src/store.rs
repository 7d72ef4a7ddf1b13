//! The contract the reconciliation engine works against.
//!
//! Per object kind: find by natural key, create, update. The trait exists
//! so the engine can be exercised against an in-memory fake; in production
//! it is [`NetboxClient`] verbatim. Handles are never cached across runs —
//! the remote store is the source of truth.

use apsync_netbox::models::{
    Device, DevicePatch, DeviceRole, DeviceSpec, DeviceType, Interface, IpAddress, Manufacturer,
    Site, Tag,
};
use apsync_netbox::{Error, NetboxClient};

/// Find / create / update primitives over the remote inventory, one method
/// per (kind, natural key) pair from the reconciliation sequence.
///
/// Sites have no create method on purpose: site topology is owned elsewhere
/// and this engine only ever looks sites up.
#[allow(async_fn_in_trait)]
pub trait InventoryStore {
    async fn find_site_by_facility(&self, facility: &str) -> Result<Option<Site>, Error>;

    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>, Error>;
    async fn create_tag(&self, name: &str, slug: &str) -> Result<Tag, Error>;

    async fn find_manufacturer(&self, slug: &str) -> Result<Option<Manufacturer>, Error>;
    async fn create_manufacturer(
        &self,
        name: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<Manufacturer, Error>;

    async fn find_device_type(&self, slug: &str) -> Result<Option<DeviceType>, Error>;
    async fn create_device_type(
        &self,
        manufacturer_id: u64,
        model: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<DeviceType, Error>;

    async fn find_device_role(&self, slug: &str) -> Result<Option<DeviceRole>, Error>;
    async fn create_device_role(
        &self,
        name: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<DeviceRole, Error>;

    async fn find_device_by_serial(&self, serial: &str) -> Result<Option<Device>, Error>;
    async fn find_device_by_name_site(
        &self,
        name: &str,
        site_id: u64,
    ) -> Result<Option<Device>, Error>;
    async fn create_device(&self, spec: &DeviceSpec) -> Result<Device, Error>;
    async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, Error>;
    async fn set_primary_ip4(&self, device_id: u64, ip_id: u64) -> Result<Device, Error>;

    async fn find_interface(&self, device_id: u64, name: &str)
    -> Result<Option<Interface>, Error>;
    async fn create_interface(
        &self,
        device_id: u64,
        name: &str,
        mac: Option<&str>,
        tag_id: u64,
    ) -> Result<Interface, Error>;
    async fn update_interface_mac(&self, id: u64, mac: &str) -> Result<Interface, Error>;

    async fn find_ip(&self, cidr: &str) -> Result<Option<IpAddress>, Error>;
    async fn find_ip_any_mask(&self, host: &str) -> Result<Option<IpAddress>, Error>;
    async fn create_ip(
        &self,
        cidr: &str,
        interface_id: u64,
        tag_id: u64,
    ) -> Result<IpAddress, Error>;
    async fn assign_ip(&self, id: u64, interface_id: u64) -> Result<IpAddress, Error>;
}

/// Production implementation: straight delegation to the NetBox client.
impl InventoryStore for NetboxClient {
    async fn find_site_by_facility(&self, facility: &str) -> Result<Option<Site>, Error> {
        NetboxClient::find_site_by_facility(self, facility).await
    }

    async fn find_tag(&self, slug: &str) -> Result<Option<Tag>, Error> {
        NetboxClient::find_tag(self, slug).await
    }

    async fn create_tag(&self, name: &str, slug: &str) -> Result<Tag, Error> {
        NetboxClient::create_tag(self, name, slug).await
    }

    async fn find_manufacturer(&self, slug: &str) -> Result<Option<Manufacturer>, Error> {
        NetboxClient::find_manufacturer(self, slug).await
    }

    async fn create_manufacturer(
        &self,
        name: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<Manufacturer, Error> {
        NetboxClient::create_manufacturer(self, name, slug, tag_id).await
    }

    async fn find_device_type(&self, slug: &str) -> Result<Option<DeviceType>, Error> {
        NetboxClient::find_device_type(self, slug).await
    }

    async fn create_device_type(
        &self,
        manufacturer_id: u64,
        model: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<DeviceType, Error> {
        NetboxClient::create_device_type(self, manufacturer_id, model, slug, tag_id).await
    }

    async fn find_device_role(&self, slug: &str) -> Result<Option<DeviceRole>, Error> {
        NetboxClient::find_device_role(self, slug).await
    }

    async fn create_device_role(
        &self,
        name: &str,
        slug: &str,
        tag_id: u64,
    ) -> Result<DeviceRole, Error> {
        NetboxClient::create_device_role(self, name, slug, tag_id).await
    }

    async fn find_device_by_serial(&self, serial: &str) -> Result<Option<Device>, Error> {
        NetboxClient::find_device_by_serial(self, serial).await
    }

    async fn find_device_by_name_site(
        &self,
        name: &str,
        site_id: u64,
    ) -> Result<Option<Device>, Error> {
        NetboxClient::find_device_by_name_site(self, name, site_id).await
    }

    async fn create_device(&self, spec: &DeviceSpec) -> Result<Device, Error> {
        NetboxClient::create_device(self, spec).await
    }

    async fn update_device(&self, id: u64, patch: &DevicePatch) -> Result<Device, Error> {
        NetboxClient::update_device(self, id, patch).await
    }

    async fn set_primary_ip4(&self, device_id: u64, ip_id: u64) -> Result<Device, Error> {
        NetboxClient::set_primary_ip4(self, device_id, ip_id).await
    }

    async fn find_interface(
        &self,
        device_id: u64,
        name: &str,
    ) -> Result<Option<Interface>, Error> {
        NetboxClient::find_interface(self, device_id, name).await
    }

    async fn create_interface(
        &self,
        device_id: u64,
        name: &str,
        mac: Option<&str>,
        tag_id: u64,
    ) -> Result<Interface, Error> {
        NetboxClient::create_interface(self, device_id, name, mac, tag_id).await
    }

    async fn update_interface_mac(&self, id: u64, mac: &str) -> Result<Interface, Error> {
        NetboxClient::update_interface_mac(self, id, mac).await
    }

    async fn find_ip(&self, cidr: &str) -> Result<Option<IpAddress>, Error> {
        NetboxClient::find_ip(self, cidr).await
    }

    async fn find_ip_any_mask(&self, host: &str) -> Result<Option<IpAddress>, Error> {
        NetboxClient::find_ip_any_mask(self, host).await
    }

    async fn create_ip(
        &self,
        cidr: &str,
        interface_id: u64,
        tag_id: u64,
    ) -> Result<IpAddress, Error> {
        NetboxClient::create_ip(self, cidr, interface_id, tag_id).await
    }

    async fn assign_ip(&self, id: u64, interface_id: u64) -> Result<IpAddress, Error> {
        NetboxClient::assign_ip(self, id, interface_id).await
    }
}
