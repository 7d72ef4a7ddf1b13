// ipam endpoints: IP addresses keyed by their normalized CIDR form.

use serde_json::json;
use tracing::debug;

use crate::client::NetboxClient;
use crate::error::Error;
use crate::models::IpAddress;

/// Content type NetBox uses for interface assignment.
const INTERFACE_OBJECT_TYPE: &str = "dcim.interface";

impl NetboxClient {
    /// Find an address by its exact CIDR form.
    ///
    /// `GET /api/ipam/ip-addresses/?address={cidr}`
    pub async fn find_ip(&self, cidr: &str) -> Result<Option<IpAddress>, Error> {
        self.find_one("ipam/ip-addresses", &[("address", cidr.to_owned())])
            .await
    }

    /// Find an address ignoring its mask, for records registered with a
    /// different prefix length than the one we derive.
    ///
    /// `GET /api/ipam/ip-addresses/?q={host}` — the first result whose host
    /// part matches exactly wins.
    pub async fn find_ip_any_mask(&self, host: &str) -> Result<Option<IpAddress>, Error> {
        let candidates: Vec<IpAddress> = self
            .get_list("ipam/ip-addresses", &[("q", host.to_owned())])
            .await?;
        Ok(candidates
            .into_iter()
            .find(|ip| ip.address.split('/').next() == Some(host)))
    }

    /// Create an address assigned to an interface.
    ///
    /// `POST /api/ipam/ip-addresses/`
    pub async fn create_ip(
        &self,
        cidr: &str,
        interface_id: u64,
        tag_id: u64,
    ) -> Result<IpAddress, Error> {
        debug!(cidr, interface_id, "creating IP address");
        self.post(
            "ipam/ip-addresses",
            &json!({
                "address": cidr,
                "status": "active",
                "assigned_object_type": INTERFACE_OBJECT_TYPE,
                "assigned_object_id": interface_id,
                "tags": [tag_id],
            }),
        )
        .await
    }

    /// Move an existing address onto an interface.
    ///
    /// `PATCH /api/ipam/ip-addresses/{id}/`
    pub async fn assign_ip(&self, id: u64, interface_id: u64) -> Result<IpAddress, Error> {
        debug!(id, interface_id, "reassigning IP address");
        self.patch(
            "ipam/ip-addresses",
            id,
            &json!({
                "assigned_object_type": INTERFACE_OBJECT_TYPE,
                "assigned_object_id": interface_id,
            }),
        )
        .await
    }
}
