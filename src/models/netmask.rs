//! IPv4 net mask value type.
//!
//! [`NetMask`] keeps the four mask octets in network order (most significant
//! octet first). Construction never checks that the set bits are contiguous,
//! use [`NetMask::is_valid`] or [`NetMask::is_valid_netmask`] for that.

use super::TopologyError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::ops::{BitAnd, BitOr, Not};
use std::str::FromStr;

/// Length of a mask in bytes.
pub const MASK_LENGTH: usize = 4;

/// Maximum prefix length of an IPv4 mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// An IPv4 net mask.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NetMask {
    bits: [u8; MASK_LENGTH],
}

impl NetMask {
    /// The empty mask, all bits set to 0.
    pub const EMPTY: NetMask = NetMask {
        bits: [0; MASK_LENGTH],
    };

    /// Create a mask from its four octets, most significant first.
    pub const fn new(m1: u8, m2: u8, m3: u8, m4: u8) -> NetMask {
        NetMask {
            bits: [m1, m2, m3, m4],
        }
    }

    /// Create a mask from a byte slice.
    ///
    /// An absent or empty slice gives [`NetMask::EMPTY`]. Any other length
    /// than [`MASK_LENGTH`] is rejected.
    ///
    /// # Examples
    /// ```
    /// use wol_topology::models::NetMask;
    /// assert_eq!(NetMask::from_bytes(None).unwrap(), NetMask::EMPTY);
    /// assert_eq!(
    ///     NetMask::from_bytes(Some(&[255, 255, 248, 0][..])).unwrap(),
    ///     NetMask::new(255, 255, 248, 0)
    /// );
    /// assert!(NetMask::from_bytes(Some(&[255, 255, 248, 0, 0][..])).is_err());
    /// ```
    pub fn from_bytes(value: Option<&[u8]>) -> Result<NetMask, TopologyError> {
        match value {
            None => Ok(NetMask::EMPTY),
            Some(bytes) if bytes.is_empty() => Ok(NetMask::EMPTY),
            Some(bytes) => {
                let bits = <[u8; MASK_LENGTH]>::try_from(bytes).map_err(|_| {
                    TopologyError::InvalidArgument(format!(
                        "mask must be exactly {MASK_LENGTH} bytes, got {}",
                        bytes.len()
                    ))
                })?;
                Ok(NetMask { bits })
            }
        }
    }

    /// Create a mask from the raw bytes of an address, [`NetMask::EMPTY`] when
    /// there is no address.
    pub fn from_address(address: Option<Ipv4Addr>) -> NetMask {
        address.map(NetMask::from).unwrap_or_default()
    }

    /// Convert a CIDR prefix length to a contiguous mask.
    ///
    /// # Examples
    /// ```
    /// use wol_topology::models::NetMask;
    /// assert_eq!(NetMask::from_cidr(20).unwrap(), NetMask::new(255, 255, 240, 0));
    /// assert!(NetMask::from_cidr(33).is_err());
    /// ```
    pub fn from_cidr(len: u8) -> Result<NetMask, TopologyError> {
        if len > MAX_LENGTH {
            Err(TopologyError::InvalidArgument(format!(
                "prefix length /{len} is longer than {MAX_LENGTH} bits"
            )))
        } else {
            let right_len = MAX_LENGTH - len;
            let all_bits = u32::MAX as u64;

            let mask = (all_bits >> right_len) << right_len;

            Ok(NetMask::from(mask as u32))
        }
    }

    /// Copy of the four mask octets.
    pub fn mask_bytes(&self) -> [u8; MASK_LENGTH] {
        self.bits
    }

    /// Length of the mask in bits.
    pub const fn address_length(&self) -> u32 {
        (MASK_LENGTH * 8) as u32
    }

    /// Number of set bits counted from the left, stopping at the first 0.
    ///
    /// Ones after a hole are ignored, so `255.0.255.255` gives 8.
    pub fn cidr(&self) -> u8 {
        u32::from(*self).leading_ones() as u8
    }

    /// True when the set bits of this mask are contiguous from the left.
    pub fn is_valid(&self) -> bool {
        NetMask::is_valid_netmask(&self.bits)
    }

    /// True when `bytes` is a 4 byte run of ones followed by a run of zeros.
    pub fn is_valid_netmask(bytes: &[u8]) -> bool {
        let Ok(bits) = <[u8; MASK_LENGTH]>::try_from(bytes) else {
            return false;
        };
        let value = u32::from_be_bytes(bits);
        value.leading_ones() + value.trailing_zeros() == u32::from(MAX_LENGTH)
    }

    /// Apply this mask to an address, giving its network address.
    pub fn mask_address(&self, address: Ipv4Addr) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(*self) & u32::from(address))
    }

    /// AND of two optional masks. A missing operand absorbs to [`NetMask::EMPTY`].
    pub fn bitwise_and(n1: Option<NetMask>, n2: Option<NetMask>) -> NetMask {
        match (n1, n2) {
            (Some(n1), Some(n2)) => n1 & n2,
            _ => NetMask::EMPTY,
        }
    }

    /// OR of two optional masks. A missing operand passes the other through.
    pub fn bitwise_or(n1: Option<NetMask>, n2: Option<NetMask>) -> NetMask {
        match (n1, n2) {
            (Some(n1), Some(n2)) => n1 | n2,
            (Some(n), None) | (None, Some(n)) => n,
            (None, None) => NetMask::EMPTY,
        }
    }

    fn zip_with(self, other: NetMask, op: impl Fn(u8, u8) -> u8) -> NetMask {
        NetMask {
            bits: std::array::from_fn(|i| op(self.bits[i], other.bits[i])),
        }
    }
}

impl From<[u8; MASK_LENGTH]> for NetMask {
    fn from(bits: [u8; MASK_LENGTH]) -> Self {
        NetMask { bits }
    }
}

impl TryFrom<&[u8]> for NetMask {
    type Error = TopologyError;

    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        NetMask::from_bytes(Some(value))
    }
}

/// The most significant byte of the integer becomes the first octet, so
/// `-2048` is `255.255.248.0`.
impl From<i32> for NetMask {
    fn from(mask: i32) -> Self {
        NetMask {
            bits: mask.to_be_bytes(),
        }
    }
}

impl From<u32> for NetMask {
    fn from(mask: u32) -> Self {
        NetMask {
            bits: mask.to_be_bytes(),
        }
    }
}

impl From<Ipv4Addr> for NetMask {
    fn from(address: Ipv4Addr) -> Self {
        NetMask {
            bits: address.octets(),
        }
    }
}

impl From<NetMask> for u32 {
    fn from(mask: NetMask) -> Self {
        u32::from_be_bytes(mask.bits)
    }
}

impl From<NetMask> for Ipv4Addr {
    fn from(mask: NetMask) -> Self {
        Ipv4Addr::from(mask.bits)
    }
}

impl BitAnd for NetMask {
    type Output = NetMask;

    fn bitand(self, rhs: NetMask) -> NetMask {
        self.zip_with(rhs, |a, b| a & b)
    }
}

impl BitOr for NetMask {
    type Output = NetMask;

    fn bitor(self, rhs: NetMask) -> NetMask {
        self.zip_with(rhs, |a, b| a | b)
    }
}

/// Host (wildcard) part of the mask.
impl Not for NetMask {
    type Output = NetMask;

    fn not(self) -> NetMask {
        NetMask {
            bits: self.bits.map(|b| !b),
        }
    }
}

impl BitAnd<Ipv4Addr> for NetMask {
    type Output = Ipv4Addr;

    fn bitand(self, address: Ipv4Addr) -> Ipv4Addr {
        self.mask_address(address)
    }
}

impl BitAnd<NetMask> for Ipv4Addr {
    type Output = Ipv4Addr;

    fn bitand(self, mask: NetMask) -> Ipv4Addr {
        mask.mask_address(self)
    }
}

/// A mask is never equal to an address, even with the same octets.
impl PartialEq<Ipv4Addr> for NetMask {
    fn eq(&self, _other: &Ipv4Addr) -> bool {
        false
    }
}

impl PartialEq<NetMask> for Ipv4Addr {
    fn eq(&self, _other: &NetMask) -> bool {
        false
    }
}

/// Renders as `255.255.248.0 (11111111.11111111.11111000.00000000)`.
impl fmt::Display for NetMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [m1, m2, m3, m4] = self.bits;
        write!(
            f,
            "{m1}.{m2}.{m3}.{m4} ({m1:08b}.{m2:08b}.{m3:08b}.{m4:08b})"
        )
    }
}

/// Parses a dotted quad (`255.255.255.0`) or a prefix length (`/24` or `24`).
/// A bare number is always a prefix length, so `"255"` fails as too long.
impl FromStr for NetMask {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let prefix = s.strip_prefix('/').unwrap_or(s);
        if let Ok(len) = prefix.parse::<u8>() {
            return NetMask::from_cidr(len);
        }
        s.parse::<Ipv4Addr>()
            .map(NetMask::from)
            .map_err(|_| TopologyError::Parse(format!("invalid net mask '{s}'")))
    }
}

impl Serialize for NetMask {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&Ipv4Addr::from(*self).to_string())
    }
}

impl<'de> Deserialize<'de> for NetMask {
    fn deserialize<D>(deserializer: D) -> Result<NetMask, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NetMask::from_str(&s).map_err(de::Error::custom)
    }
}
