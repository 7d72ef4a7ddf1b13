//! The find-or-create-or-update engine.
//!
//! For each discovered record, in discovery order: resolve the site (lookup
//! only — sites are owned elsewhere), ensure manufacturer and device type,
//! resolve the device by serial then by (name, site), ensure the management
//! interface, then the address and primary-IP assignment. Every create is
//! keyed so a re-run finds it again; duplicate-key conflicts from a
//! concurrent writer are recovered by re-fetching. One record's failure
//! never aborts the batch.

use std::collections::HashMap;

use tracing::{debug, info, warn};

use apsync_netbox::Error;
use apsync_netbox::models::{
    Device, DevicePatch, DeviceRole, DeviceSpec, DeviceType, Interface, Site, Tag,
};
use apsync_wlc::AccessPointRecord;

use crate::naming::{normalize_cidr, slugify, truncate_name};
use crate::report::{Action, Outcome, ReconcileSummary, RunReport, SkipReason};
use crate::store::InventoryStore;

/// Manufacturer for every AP this tool discovers.
const MANUFACTURER: &str = "Cisco";
/// Role attached to devices the engine creates.
const DEVICE_ROLE: &str = "Wireless AP";
/// Fixed name of the management interface ensured on every device.
const MGMT_INTERFACE: &str = "Management";
/// Provenance tag applied to every object the engine creates.
const PROVENANCE_TAG: &str = "apsync";
/// Stand-in model for records whose model line never parsed.
const UNKNOWN_MODEL: &str = "Unknown AP";

/// Drives the per-record reconciliation sequence against an
/// [`InventoryStore`].
///
/// Construction ensures the provenance tag and device role once; device
/// types are fetched-or-created lazily and memoized for the run. Nothing
/// is cached across runs.
pub struct Reconciler<'a, S> {
    store: &'a S,
    tag: Tag,
    role: DeviceRole,
    types: HashMap<String, DeviceType>,
}

impl<'a, S: InventoryStore> Reconciler<'a, S> {
    /// Prepare a run: fetch-or-create the provenance tag and device role.
    pub async fn new(store: &'a S) -> Result<Self, Error> {
        let tag_slug = slugify(PROVENANCE_TAG);
        let tag = match store.find_tag(&tag_slug).await? {
            Some(tag) => tag,
            None => match store.create_tag(PROVENANCE_TAG, &tag_slug).await {
                Ok(tag) => tag,
                Err(e) if e.is_duplicate_key() => {
                    store.find_tag(&tag_slug).await?.ok_or(e)?
                }
                Err(e) => return Err(e),
            },
        };

        let role_slug = slugify(DEVICE_ROLE);
        let role = match store.find_device_role(&role_slug).await? {
            Some(role) => role,
            None => match store.create_device_role(DEVICE_ROLE, &role_slug, tag.id).await {
                Ok(role) => {
                    info!(role = DEVICE_ROLE, "created device role");
                    role
                }
                Err(e) if e.is_duplicate_key() => {
                    store.find_device_role(&role_slug).await?.ok_or(e)?
                }
                Err(e) => return Err(e),
            },
        };

        Ok(Self {
            store,
            tag,
            role,
            types: HashMap::new(),
        })
    }

    /// Reconcile a batch of records, collecting one outcome per record.
    ///
    /// Failures are isolated: a record that errors is reported as `Failed`
    /// and the batch continues.
    pub async fn run(&mut self, records: &[AccessPointRecord]) -> RunReport {
        let mut report = RunReport::default();
        for record in records {
            match self.reconcile_record(record).await {
                Ok(outcome) => {
                    match &outcome {
                        Outcome::Skipped { skip } => {
                            info!(ap = %record.name, reason = %skip, "skipped");
                        }
                        Outcome::Reconciled { summary } => {
                            info!(
                                ap = %record.name,
                                device = %summary.device_action,
                                interface = %summary.interface_action,
                                "reconciled"
                            );
                        }
                        Outcome::Failed { .. } => {}
                    }
                    report.push(record.name.clone(), outcome);
                }
                Err(e) => {
                    warn!(ap = %record.name, error = %e, "record failed, continuing batch");
                    report.push(
                        record.name.clone(),
                        Outcome::Failed {
                            error: e.to_string(),
                        },
                    );
                }
            }
        }
        report
    }

    /// One record through the full sequence:
    /// facility → site → type → device → interface → address.
    async fn reconcile_record(&mut self, record: &AccessPointRecord) -> Result<Outcome, Error> {
        let Some(facility) = record.facility_id.as_deref() else {
            return Ok(Outcome::Skipped {
                skip: SkipReason::NoFacilityId,
            });
        };

        let Some(site) = self.store.find_site_by_facility(facility).await? else {
            return Ok(Outcome::Skipped {
                skip: SkipReason::UnknownSite(facility.to_owned()),
            });
        };

        let model = record.model.as_deref().unwrap_or(UNKNOWN_MODEL);
        let device_type = self.ensure_device_type(model).await?;

        let (device, device_action) = self.resolve_device(record, &site, &device_type).await?;
        let (interface, interface_action) = self.ensure_interface(&device, record).await?;

        let address_action = match record.ip_address.as_deref() {
            Some(ip) => Some(self.ensure_address(&device, &interface, ip).await?),
            None => None,
        };

        Ok(Outcome::Reconciled {
            summary: ReconcileSummary {
                device: device.name.unwrap_or_else(|| record.name.clone()),
                site: site.name,
                device_action,
                interface_action,
                address_action,
            },
        })
    }

    /// Fetch-or-create the device type for a model, memoized for the run.
    /// The manufacturer is created first when missing.
    async fn ensure_device_type(&mut self, model: &str) -> Result<DeviceType, Error> {
        let slug = slugify(model);
        if let Some(cached) = self.types.get(&slug) {
            return Ok(cached.clone());
        }

        let device_type = match self.store.find_device_type(&slug).await? {
            Some(existing) => existing,
            None => {
                let maker_slug = slugify(MANUFACTURER);
                let manufacturer = match self.store.find_manufacturer(&maker_slug).await? {
                    Some(m) => m,
                    None => {
                        self.store
                            .create_manufacturer(MANUFACTURER, &maker_slug, self.tag.id)
                            .await?
                    }
                };
                match self
                    .store
                    .create_device_type(manufacturer.id, model, &slug, self.tag.id)
                    .await
                {
                    Ok(created) => {
                        info!(model, "created device type");
                        created
                    }
                    Err(e) if e.is_duplicate_key() => {
                        debug!(model, "device type appeared concurrently, re-fetching");
                        self.store.find_device_type(&slug).await?.ok_or(e)?
                    }
                    Err(e) => return Err(e),
                }
            }
        };

        self.types.insert(slug, device_type.clone());
        Ok(device_type)
    }

    /// Resolve the device: serial first, then (name, site), then create.
    ///
    /// The serial path is authoritative when it hits; a (name, site) hit
    /// only reconciles the serial. The documented order is preserved even
    /// though both paths could in principle point at different objects.
    async fn resolve_device(
        &self,
        record: &AccessPointRecord,
        site: &Site,
        device_type: &DeviceType,
    ) -> Result<(Device, Action), Error> {
        let name = truncate_name(&record.name);

        // (a) By serial, when the record has one.
        if let Some(serial) = record.serial.as_deref() {
            if let Some(device) = self.store.find_device_by_serial(serial).await? {
                let patch = DevicePatch {
                    name: (device.name.as_deref() != Some(&name)).then(|| name.clone()),
                    device_type_id: (device.device_type.id != device_type.id)
                        .then_some(device_type.id),
                    role_id: (device.role.id != self.role.id).then_some(self.role.id),
                    serial: None,
                };
                if patch.is_empty() {
                    return Ok((device, Action::Found));
                }
                debug!(serial, "device matched by serial; updating drifted fields");
                let updated = self.store.update_device(device.id, &patch).await?;
                return Ok((updated, Action::Updated));
            }
        }

        // (b) By (name, site).
        if let Some(device) = self.store.find_device_by_name_site(&name, site.id).await? {
            if let Some(serial) = record.serial.as_deref() {
                if device.serial != serial {
                    debug!(name = %name, serial, "reconciling serial on name+site match");
                    let updated = self
                        .store
                        .update_device(
                            device.id,
                            &DevicePatch {
                                serial: Some(serial.to_owned()),
                                ..DevicePatch::default()
                            },
                        )
                        .await?;
                    return Ok((updated, Action::Updated));
                }
            }
            return Ok((device, Action::Found));
        }

        // (c) Create — recovering if another writer took the name first.
        let spec = DeviceSpec {
            name: name.clone(),
            device_type_id: device_type.id,
            role_id: self.role.id,
            site_id: site.id,
            serial: record.serial.clone(),
            tag_id: self.tag.id,
        };
        match self.store.create_device(&spec).await {
            Ok(created) => {
                info!(name = %name, "created device");
                Ok((created, Action::Created))
            }
            Err(e) if e.is_duplicate_key() => {
                debug!(name = %name, "duplicate name within site, re-fetching");
                let Some(device) = self.store.find_device_by_name_site(&name, site.id).await?
                else {
                    return Err(e);
                };
                let patch = DevicePatch {
                    name: None,
                    device_type_id: (device.device_type.id != device_type.id)
                        .then_some(device_type.id),
                    role_id: (device.role.id != self.role.id).then_some(self.role.id),
                    serial: record
                        .serial
                        .as_deref()
                        .filter(|s| device.serial != *s)
                        .map(str::to_owned),
                };
                if patch.is_empty() {
                    return Ok((device, Action::Found));
                }
                let updated = self.store.update_device(device.id, &patch).await?;
                Ok((updated, Action::Updated))
            }
            Err(e) => Err(e),
        }
    }

    /// Ensure the fixed-name management interface carries the record's MAC.
    async fn ensure_interface(
        &self,
        device: &Device,
        record: &AccessPointRecord,
    ) -> Result<(Interface, Action), Error> {
        match self.store.find_interface(device.id, MGMT_INTERFACE).await? {
            Some(interface) => {
                if let Some(mac) = record.ethernet_mac.as_deref() {
                    let current = interface.mac_address.as_deref().unwrap_or("");
                    if !current.eq_ignore_ascii_case(mac) {
                        let updated = self.store.update_interface_mac(interface.id, mac).await?;
                        return Ok((updated, Action::Updated));
                    }
                }
                Ok((interface, Action::Found))
            }
            None => {
                let created = self
                    .store
                    .create_interface(
                        device.id,
                        MGMT_INTERFACE,
                        record.ethernet_mac.as_deref(),
                        self.tag.id,
                    )
                    .await?;
                info!(device = device.id, "created management interface");
                Ok((created, Action::Created))
            }
        }
    }

    /// Ensure the address exists, is assigned to the interface, and is the
    /// device's primary IPv4.
    async fn ensure_address(
        &self,
        device: &Device,
        interface: &Interface,
        raw: &str,
    ) -> Result<Action, Error> {
        let cidr = normalize_cidr(raw);
        let host = cidr.split('/').next().unwrap_or(&cidr);

        let (ip, mut action) = match self.store.find_ip(&cidr).await? {
            Some(ip) => (ip, Action::Found),
            None => match self.store.find_ip_any_mask(host).await? {
                Some(ip) => (ip, Action::Found),
                None => {
                    let created = self.store.create_ip(&cidr, interface.id, self.tag.id).await?;
                    info!(cidr = %cidr, "created address");
                    (created, Action::Created)
                }
            },
        };

        let assigned_here = ip.assigned_object_type.as_deref() == Some("dcim.interface")
            && ip.assigned_object_id == Some(interface.id);
        let ip = if assigned_here {
            ip
        } else if action == Action::Created {
            ip
        } else {
            debug!(cidr = %cidr, interface = interface.id, "moving address to interface");
            action = Action::Updated;
            self.store.assign_ip(ip.id, interface.id).await?
        };

        if device.primary_ip4.as_ref().map(|p| p.id) != Some(ip.id) {
            self.store.set_primary_ip4(device.id, ip.id).await?;
            if action == Action::Found {
                action = Action::Updated;
            }
        }

        Ok(action)
    }
}
