//! Summary of one target lookup.

use crate::arp::ArpLookupResult;
use crate::models::{MacAddr, NetMask, Subnet};
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// Everything known about a wake-up target after one lookup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Report {
    /// The address that was resolved.
    pub target: Ipv4Addr,
    /// Target and mask (None without a configured mask).
    pub subnet: Option<Subnet>,
    pub netmask: Option<NetMask>,
    /// Leading one bits of the mask.
    pub cidr: Option<u8>,
    /// Whether the mask is contiguous.
    pub valid_mask: Option<bool>,
    /// Network address of the target.
    pub network: Option<Ipv4Addr>,
    /// Directed broadcast address of the target network.
    pub broadcast: Option<Ipv4Addr>,
    /// Resolved hardware address.
    pub mac: Option<MacAddr>,
    /// Lookup failure, exclusive with `mac`.
    pub error: Option<String>,
    /// OS error number behind `error`, if the OS gave one.
    pub error_code: Option<i32>,
}

impl Report {
    pub fn new(target: Ipv4Addr, netmask: Option<NetMask>, lookup: &ArpLookupResult) -> Report {
        let subnet = netmask.map(|mask| Subnet::with_mask(target, mask));
        let (mac, error, error_code) = match lookup {
            Ok(mac) => (Some(*mac), None, None),
            Err(e) => (None, Some(e.message().to_string()), e.code()),
        };
        Report {
            target,
            subnet,
            netmask,
            cidr: netmask.map(|m| m.cidr()),
            valid_mask: netmask.map(|m| m.is_valid()),
            network: subnet.map(|s| s.network()),
            broadcast: subnet.map(|s| s.broadcast()),
            mac,
            error,
            error_code,
        }
    }

    pub fn is_resolved(&self) -> bool {
        self.mac.is_some()
    }
}
