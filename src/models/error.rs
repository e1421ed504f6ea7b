//! Errors raised while building address values.

use std::error::Error;
use std::fmt;

/// Error returned when a mask, subnet or hardware address can not be built
/// from its input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopologyError {
    /// The input has the right type but an unusable shape, e.g. a mask given
    /// as 5 bytes or a prefix length above 32.
    InvalidArgument(String),
    /// A textual value could not be parsed.
    Parse(String),
}

impl fmt::Display for TopologyError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TopologyError::InvalidArgument(msg) => write!(f, "invalid argument: {msg}"),
            TopologyError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for TopologyError {}
