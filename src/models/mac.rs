//! Hardware (MAC) address.

use super::TopologyError;
use regex::Regex;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Accepts `aa:bb:cc:dd:ee:ff` and `aa-bb-cc-dd-ee-ff`.
static MAC_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_mac_regex() -> &'static Regex {
    MAC_REGEX.get_or_init(|| {
        Regex::new(r"^[0-9A-Fa-f]{2}(?:[:-][0-9A-Fa-f]{2}){5}$")
            .expect("Invalid Regex")
    })
}

/// A 6 byte hardware address in network byte order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MacAddr([u8; 6]);

impl MacAddr {
    pub const fn new(octets: [u8; 6]) -> MacAddr {
        MacAddr(octets)
    }

    pub fn octets(&self) -> [u8; 6] {
        self.0
    }

    /// The kernel reports unresolved neighbours with an all zero address.
    pub fn is_zero(&self) -> bool {
        self.0 == [0; 6]
    }
}

impl From<[u8; 6]> for MacAddr {
    fn from(octets: [u8; 6]) -> Self {
        MacAddr(octets)
    }
}

impl fmt::Display for MacAddr {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [a, b, c, d, e, g] = self.octets();
        write!(f, "{a:02x}:{b:02x}:{c:02x}:{d:02x}:{e:02x}:{g:02x}")
    }
}

impl FromStr for MacAddr {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if !get_mac_regex().is_match(s) {
            return Err(TopologyError::Parse(format!("invalid hardware address '{s}'")));
        }
        let mut octets = [0u8; 6];
        for (octet, part) in octets.iter_mut().zip(s.split([':', '-'])) {
            *octet = u8::from_str_radix(part, 16)
                .map_err(|e| TopologyError::Parse(format!("invalid octet '{part}': {e}")))?;
        }
        Ok(MacAddr(octets))
    }
}

impl Serialize for MacAddr {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for MacAddr {
    fn deserialize<D>(deserializer: D) -> Result<MacAddr, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        MacAddr::from_str(&s).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let mac = MacAddr::new([0x00, 0x1b, 0x21, 0x0a, 0xff, 0x07]);
        assert_eq!(mac.to_string(), "00:1b:21:0a:ff:07");
    }

    #[test]
    fn test_parse() {
        let expected = MacAddr::new([0x00, 0x1b, 0x21, 0x0a, 0xff, 0x07]);
        assert_eq!("00:1b:21:0a:ff:07".parse::<MacAddr>().unwrap(), expected);
        assert_eq!("00-1B-21-0A-FF-07".parse::<MacAddr>().unwrap(), expected);
        assert!("00:1b:21:0a:ff".parse::<MacAddr>().is_err());
        assert!("00:1b:21:0a:ff:zz".parse::<MacAddr>().is_err());
        assert!("001b210aff07".parse::<MacAddr>().is_err());
    }

    #[test]
    fn test_is_zero() {
        assert!(MacAddr::default().is_zero());
        assert!(!MacAddr::new([0, 0, 0, 0, 0, 1]).is_zero());
    }
}
