//! Async typed client for the slice of the NetBox REST API that apsync
//! reconciles against: sites, manufacturers, device types, device roles,
//! devices, interfaces, IP addresses, and tags.
//!
//! The client exposes per-kind find / list / create / update primitives.
//! HTTP mechanics (token auth, pagination following, error mapping) live in
//! [`client`]; the per-kind endpoints are inherent methods split across
//! [`dcim`], [`ipam`], and [`extras`] to keep the transport module focused.

pub mod client;
pub mod dcim;
pub mod error;
pub mod extras;
pub mod ipam;
pub mod models;

pub use client::NetboxClient;
pub use error::Error;
pub use models::{
    Device, DevicePatch, DeviceSpec, DeviceRole, DeviceType, Interface, IpAddress, Manufacturer,
    NestedRef, Site, Tag,
};
