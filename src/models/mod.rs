//! Address topology value types.
//!
//! - [`NetMask`] - IPv4 net mask with bitwise algebra and CIDR helpers
//! - [`Subnet`] - address plus mask, network and broadcast derivation
//! - [`MacAddr`] - hardware address returned by ARP lookups

mod error;
mod mac;
mod netmask;
mod subnet;

// Re-export public types
pub use error::TopologyError;
pub use mac::MacAddr;
pub use netmask::{NetMask, MASK_LENGTH, MAX_LENGTH};
pub use subnet::Subnet;
