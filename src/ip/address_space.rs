//! Base network representation.
//!
//! An `AddressSpace` is the numeric range covered by the base CIDR block,
//! `[network_address, network_address + capacity)`. Capacity is kept as a
//! `u64` so that a /0 network (2^32 addresses) is representable.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::VlsmError;
use crate::utils::ip_utils::{int_to_ip, ip_to_int, prefix_mask, IPV4_BITS};

/// The base network that subnets are carved out of
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressSpace {
    network_address: u32,
    prefix_length: u8,
    capacity: u64,
}

impl AddressSpace {
    /// Build the address space for `address/prefix_length`, clearing host bits
    pub fn new(address: u32, prefix_length: u8) -> Result<Self, VlsmError> {
        if prefix_length > IPV4_BITS {
            return Err(VlsmError::InvalidPrefix { prefix: u64::from(prefix_length) });
        }

        let network_address = address & prefix_mask(prefix_length);
        if network_address != address {
            log::warn!(
                "Base address {} has host bits set for /{}; using network address {}",
                int_to_ip(address),
                prefix_length,
                int_to_ip(network_address)
            );
        }

        Ok(AddressSpace {
            network_address,
            prefix_length,
            capacity: 1u64 << (IPV4_BITS - prefix_length),
        })
    }

    /// Parse a CIDR string of the form `A.B.C.D/P`
    pub fn parse(cidr: &str) -> Result<Self, VlsmError> {
        let invalid = |reason: String| VlsmError::InvalidFormat {
            input: cidr.to_string(),
            reason,
        };

        let (address_text, prefix_text) = cidr
            .trim()
            .split_once('/')
            .ok_or_else(|| invalid("missing '/' separator".to_string()))?;

        let address = ip_to_int(address_text).map_err(invalid)?;

        if prefix_text.is_empty() || !prefix_text.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid(format!("prefix '{}' is not a decimal integer", prefix_text)));
        }
        // Saturate absurdly long digit strings so they still report as a bad prefix
        let prefix = prefix_text.parse::<u64>().unwrap_or(u64::MAX);
        let prefix_length = u8::try_from(prefix)
            .ok()
            .filter(|p| *p <= IPV4_BITS)
            .ok_or(VlsmError::InvalidPrefix { prefix })?;

        Self::new(address, prefix_length)
    }

    /// First address of the network (host bits cleared)
    pub fn network_address(&self) -> u32 {
        self.network_address
    }

    pub fn prefix_length(&self) -> u8 {
        self.prefix_length
    }

    /// Number of addresses in the network, 2^(32 - prefix)
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// One past the last address of the network
    pub fn end(&self) -> u64 {
        u64::from(self.network_address) + self.capacity
    }

    /// Last address of the network
    pub fn broadcast_address(&self) -> u32 {
        // end() - 1 always fits: the last address of any IPv4 block is <= u32::MAX
        (self.end() - 1) as u32
    }

    /// Whether `[start, start + size)` lies entirely within this network
    pub fn contains_block(&self, start: u64, size: u64) -> bool {
        start >= u64::from(self.network_address)
            && start
                .checked_add(size)
                .map_or(false, |block_end| block_end <= self.end())
    }
}

impl FromStr for AddressSpace {
    type Err = VlsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for AddressSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", int_to_ip(self.network_address), self.prefix_length)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_basic_cidr() {
        let space: AddressSpace = "192.168.0.0/24".parse().unwrap();
        assert_eq!(space.network_address(), 0xC0A8_0000);
        assert_eq!(space.prefix_length(), 24);
        assert_eq!(space.capacity(), 256);
        assert_eq!(space.broadcast_address(), 0xC0A8_00FF);
        assert_eq!(space.to_string(), "192.168.0.0/24");
    }

    #[test]
    fn test_parse_clears_host_bits() {
        let space = AddressSpace::parse("10.1.2.3/16").unwrap();
        assert_eq!(space.to_string(), "10.1.0.0/16");
        assert_eq!(space.network_address() as u64 % space.capacity(), 0);
    }

    #[test]
    fn test_parse_prefix_zero_and_32() {
        let whole = AddressSpace::parse("203.0.113.9/0").unwrap();
        assert_eq!(whole.network_address(), 0);
        assert_eq!(whole.capacity(), 1u64 << 32);
        assert_eq!(whole.end(), 1u64 << 32);
        assert_eq!(whole.broadcast_address(), u32::MAX);

        let host = AddressSpace::parse("203.0.113.9/32").unwrap();
        assert_eq!(host.capacity(), 1);
        assert_eq!(host.to_string(), "203.0.113.9/32");
    }

    #[test]
    fn test_parse_invalid_format() {
        for input in ["10.0.0.0", "10.0.0/8", "10.0.0.256/8", "a.b.c.d/8", "10.0.0.0/", "10.0.0.0/x", "10.0.0.0/-1"] {
            assert!(
                matches!(AddressSpace::parse(input), Err(VlsmError::InvalidFormat { .. })),
                "{} should be rejected as InvalidFormat",
                input
            );
        }
    }

    #[test]
    fn test_parse_invalid_prefix() {
        assert!(matches!(
            AddressSpace::parse("10.0.0.0/33"),
            Err(VlsmError::InvalidPrefix { prefix: 33 })
        ));
        assert!(matches!(
            AddressSpace::parse("10.0.0.0/99999999999999999999999"),
            Err(VlsmError::InvalidPrefix { .. })
        ));
    }

    #[test]
    fn test_contains_block() {
        let space = AddressSpace::parse("10.0.0.0/30").unwrap();
        let base = u64::from(space.network_address());
        assert!(space.contains_block(base, 4));
        assert!(space.contains_block(base + 2, 2));
        assert!(!space.contains_block(base + 2, 4));
        assert!(!space.contains_block(base - 1, 1));
    }
}
