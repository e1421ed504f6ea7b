//! Linux neighbour table lookups.
//!
//! The kernel exposes its ARP cache as text in `/proc/net/arp`:
//!
//! ```text
//! IP address       HW type     Flags       HW address            Mask     Device
//! 192.168.1.1      0x1         0x2         00:1b:21:0a:ff:07     *        eth0
//! ```
//!
//! When the target is missing, one empty UDP datagram is sent towards it so
//! the kernel broadcasts an ARP request of its own, then the table is read
//! again after a short settle delay.

use super::{AddressResolver, ArpLookupResult};
use crate::config;
use crate::models::MacAddr;
use colored::Colorize;
use std::io;
use std::net::{Ipv4Addr, UdpSocket};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// `ATF_COM` from `<net/if_arp.h>`: the entry holds a resolved address.
const ATF_COM: u32 = 0x02;

/// One row of the kernel neighbour table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NeighbourEntry {
    pub ip: Ipv4Addr,
    pub flags: u32,
    pub mac: MacAddr,
    pub device: String,
}

impl NeighbourEntry {
    pub fn is_complete(&self) -> bool {
        self.flags & ATF_COM != 0 && !self.mac.is_zero()
    }
}

/// Parse the text of `/proc/net/arp`. The header and malformed rows are
/// skipped.
pub fn parse_arp_table(table: &str) -> Vec<NeighbourEntry> {
    table
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 6 {
                return None;
            }
            let ip = fields[0].parse().ok()?;
            let flags = u32::from_str_radix(fields[2].trim_start_matches("0x"), 16).ok()?;
            let mac = fields[3].parse().ok()?;
            Some(NeighbourEntry {
                ip,
                flags,
                mac,
                device: fields[5].to_string(),
            })
        })
        .collect()
}

/// Resolver backed by the kernel neighbour table.
#[derive(Debug, Clone)]
pub struct ProcArpResolver {
    table: PathBuf,
    nudge: bool,
    settle: Duration,
}

impl Default for ProcArpResolver {
    fn default() -> Self {
        ProcArpResolver::new(config::DEFAULT_ARP_TABLE)
    }
}

impl ProcArpResolver {
    pub fn new(table: impl Into<PathBuf>) -> ProcArpResolver {
        ProcArpResolver {
            table: table.into(),
            nudge: true,
            settle: Duration::from_millis(config::SETTLE_MSEC),
        }
    }

    /// Send a datagram to populate a missing entry before the second read.
    /// A send the OS refuses ends the lookup with that OS failure.
    pub fn with_nudge(mut self, nudge: bool) -> ProcArpResolver {
        self.nudge = nudge;
        self
    }

    /// Time given to the kernel to receive the ARP reply after nudging.
    pub fn with_settle(mut self, settle: Duration) -> ProcArpResolver {
        self.settle = settle;
        self
    }

    pub fn table(&self) -> &Path {
        &self.table
    }

    fn lookup(&self, destination: Ipv4Addr) -> io::Result<Option<MacAddr>> {
        let table = std::fs::read_to_string(&self.table)?;
        let entry = parse_arp_table(&table)
            .into_iter()
            .find(|e| e.ip == destination && e.is_complete());
        if let Some(entry) = &entry {
            log::trace!("neighbour {} -> {} on {}", entry.ip, entry.mac, entry.device);
        }
        Ok(entry.map(|e| e.mac))
    }

    fn send_nudge(&self, destination: Ipv4Addr) -> io::Result<()> {
        let socket = UdpSocket::bind((Ipv4Addr::UNSPECIFIED, 0))?;
        socket.send_to(&[], (destination, config::DISCARD_PORT))?;
        Ok(())
    }
}

impl AddressResolver for ProcArpResolver {
    fn resolve(&self, destination: Ipv4Addr) -> ArpLookupResult {
        log::debug!(
            "resolve({destination}) from {table}",
            destination = destination.to_string().on_blue(),
            table = self.table.display()
        );

        if let Some(mac) = self.lookup(destination)? {
            return Ok(mac);
        }

        if self.nudge {
            if let Err(e) = self.send_nudge(destination) {
                log::warn!("nudge to {destination} failed: {e}");
                return Err(e.into());
            }
            std::thread::sleep(self.settle);
            if let Some(mac) = self.lookup(destination)? {
                return Ok(mac);
            }
        }

        log::debug!("{} no entry for {destination}", "miss".red());
        Err(io::Error::new(
            io::ErrorKind::NotFound,
            format!("no neighbour entry for {destination}"),
        )
        .into())
    }
}
