//! Subnet requests and their assigned blocks.
//!
//! A `SubnetRequest` is sized as soon as it is built; an `Allocation` pairs a
//! sized request with the start address the allocator picked for it.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::VlsmError;
use crate::utils::ip_utils::{block_prefix_length, int_to_ip, next_power_of_two, IPV4_SPACE};

/// A named request for a number of addresses, rounded up to a power-of-two block
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubnetRequest {
    pub name: String,
    pub requested_count: u64,
    pub allocated_size: u64,
    pub block_prefix_length: u8,
}

impl SubnetRequest {
    /// Size a request. Counts must be in `1..=2^32`.
    pub fn new(name: impl Into<String>, requested_count: i64) -> Result<Self, VlsmError> {
        let name = name.into();

        let count = u64::try_from(requested_count)
            .ok()
            .filter(|count| (1..=IPV4_SPACE).contains(count))
            .ok_or_else(|| VlsmError::InvalidCount {
                name: name.clone(),
                count: requested_count,
            })?;

        let allocated_size = next_power_of_two(count);
        let block_prefix_length = block_prefix_length(allocated_size).ok_or_else(|| {
            VlsmError::InvalidCount {
                name: name.clone(),
                count: requested_count,
            }
        })?;

        log::debug!(
            "Sized request {}: {} addresses -> block of {} (/{})",
            name,
            count,
            allocated_size,
            block_prefix_length
        );

        Ok(SubnetRequest {
            name,
            requested_count: count,
            allocated_size,
            block_prefix_length,
        })
    }
}

/// Direction in which blocks are laid out inside the base network
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AllocationOrder {
    /// Start at the network address and walk upwards
    #[serde(rename = "asc")]
    Ascending,
    /// Start at the top of the network and walk downwards
    #[serde(rename = "desc")]
    Descending,
}

impl FromStr for AllocationOrder {
    type Err = VlsmError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(AllocationOrder::Ascending),
            "desc" => Ok(AllocationOrder::Descending),
            other => Err(VlsmError::InvalidOrder(other.to_string())),
        }
    }
}

impl fmt::Display for AllocationOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AllocationOrder::Ascending => write!(f, "asc"),
            AllocationOrder::Descending => write!(f, "desc"),
        }
    }
}

/// A sized request together with its assigned block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub request: SubnetRequest,
    pub start_address: u32,
}

impl Allocation {
    pub fn name(&self) -> &str {
        &self.request.name
    }

    pub fn allocated_size(&self) -> u64 {
        self.request.allocated_size
    }

    pub fn prefix_length(&self) -> u8 {
        self.request.block_prefix_length
    }

    /// One past the last address of the block
    pub fn end(&self) -> u64 {
        u64::from(self.start_address) + self.request.allocated_size
    }

    /// Last address of the block
    pub fn last_address(&self) -> u32 {
        (self.end() - 1) as u32
    }

    /// The block in CIDR notation, e.g. `192.168.0.64/28`
    pub fn cidr(&self) -> String {
        format!("{}/{}", int_to_ip(self.start_address), self.prefix_length())
    }

    /// Whether two blocks share any address
    pub fn overlaps(&self, other: &Allocation) -> bool {
        u64::from(self.start_address) < other.end() && u64::from(other.start_address) < self.end()
    }
}

impl fmt::Display for Allocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.name(), self.allocated_size(), self.cidr())
    }
}
