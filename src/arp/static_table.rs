//! Fixed address table, for tests and for hosts without a neighbour cache.

use super::{AddressResolver, ArpLookupResult};
use crate::models::MacAddr;
use std::collections::HashMap;
use std::io;
use std::net::Ipv4Addr;

/// Resolves from a map filled in up front.
#[derive(Debug, Default, Clone)]
pub struct StaticResolver {
    entries: HashMap<Ipv4Addr, MacAddr>,
}

impl StaticResolver {
    pub fn new() -> StaticResolver {
        StaticResolver::default()
    }

    /// Create or replace the hardware address for `ip`.
    pub fn insert(&mut self, ip: Ipv4Addr, mac: MacAddr) -> Option<MacAddr> {
        self.entries.insert(ip, mac)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(Ipv4Addr, MacAddr)> for StaticResolver {
    fn from_iter<I: IntoIterator<Item = (Ipv4Addr, MacAddr)>>(iter: I) -> Self {
        StaticResolver {
            entries: iter.into_iter().collect(),
        }
    }
}

impl AddressResolver for StaticResolver {
    fn resolve(&self, destination: Ipv4Addr) -> ArpLookupResult {
        self.entries.get(&destination).copied().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no hardware address known for {destination}"),
            )
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ipv4(i: u8) -> Ipv4Addr {
        Ipv4Addr::new(10, 0, 0, i)
    }

    fn eth(i: u8) -> MacAddr {
        MacAddr::new([0, 0, 0, 0, 0, i])
    }

    #[test]
    fn test_lookup_ip_with_no_mapping() {
        let resolver = StaticResolver::new();
        let failure = resolver.resolve(ipv4(1)).unwrap_err();
        assert_eq!(failure.kind(), io::ErrorKind::NotFound);
        assert_eq!(failure.code(), None);
    }

    #[test]
    fn test_lookup_ip_with_mapping() {
        let resolver: StaticResolver = [(ipv4(1), eth(1)), (ipv4(2), eth(2))]
            .into_iter()
            .collect();
        assert_eq!(resolver.len(), 2);
        assert_eq!(resolver.resolve(ipv4(1)).unwrap(), eth(1));
        assert_eq!(resolver.resolve(ipv4(2)).unwrap(), eth(2));
        assert!(resolver.resolve(ipv4(3)).is_err());
    }

    #[test]
    fn test_insert_replaces() {
        let mut resolver = StaticResolver::new();
        assert!(resolver.is_empty());
        assert_eq!(resolver.insert(ipv4(1), eth(1)), None);
        assert_eq!(resolver.insert(ipv4(1), eth(9)), Some(eth(1)));
        assert_eq!(resolver.resolve(ipv4(1)).unwrap(), eth(9));
    }
}
