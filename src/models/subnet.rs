//! IPv4 address paired with its net mask.
//!
//! Provides [`Subnet`] for deriving the network and directed broadcast
//! addresses a wake-up packet is aimed at.

use super::NetMask;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::error::Error;
use std::net::Ipv4Addr;
use std::str::FromStr;

/// IPv4 address with the mask of the network it lives in.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash, PartialEq, PartialOrd)]
pub struct Subnet {
    /// The host (or network) address.
    pub addr: Ipv4Addr,
    /// The mask of the network.
    pub mask: NetMask,
}

impl Subnet {
    /// Create a [`Subnet`] from `addr/len` or `addr/dotted.mask`
    /// (e.g. "10.0.0.7/24" or "10.0.0.7/255.255.255.0").
    pub fn new(addr_mask: &str) -> Result<Subnet, Box<dyn Error>> {
        let addr_mask = addr_mask.trim();
        let parts: Vec<&str> = addr_mask.split('/').collect();
        if parts.len() != 2 {
            return Err(format!("Invalid address/mask '{addr_mask}'").into());
        }
        let addr: Ipv4Addr = parts[0]
            .parse()
            .map_err(|_| format!("Invalid address {}", parts[0]))?;
        let mask: NetMask = parts[1].parse()?;
        Ok(Subnet { addr, mask })
    }

    pub fn with_mask(addr: Ipv4Addr, mask: NetMask) -> Subnet {
        Subnet { addr, mask }
    }

    /// Lowest (network) address of the subnet.
    pub fn network(&self) -> Ipv4Addr {
        self.addr & self.mask
    }

    /// Highest (directed broadcast) address of the subnet.
    pub fn broadcast(&self) -> Ipv4Addr {
        let network_bits = u32::from(self.network());
        Ipv4Addr::from(network_bits | u32::from(!self.mask))
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        ip & self.mask == self.network()
    }

    /// Number of usable host addresses.
    ///
    /// Network and broadcast addresses are excluded except for /31 and /32.
    pub fn num_hosts(&self) -> u64 {
        let size = 1u64 << u32::from(!self.mask).count_ones();
        if size <= 2 {
            size
        } else {
            size - 2
        }
    }
}

/// `addr/len` for contiguous masks, `addr/dotted.mask` otherwise.
impl std::fmt::Display for Subnet {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.mask.is_valid() {
            write!(f, "{}/{}", self.addr, self.mask.cidr())
        } else {
            write!(f, "{}/{}", self.addr, Ipv4Addr::from(self.mask))
        }
    }
}

impl FromStr for Subnet {
    type Err = Box<dyn Error>;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Subnet::new(s)
    }
}

impl Serialize for Subnet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Subnet {
    fn deserialize<D>(deserializer: D) -> Result<Subnet, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Subnet::new(&s).map_err(|e| de::Error::custom(format!("invalid subnet '{s}': {e}")))
    }
}
