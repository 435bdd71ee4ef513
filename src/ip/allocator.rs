//! VLSM allocation logic.
//!
//! Requests are sorted largest block first, checked against the capacity of
//! the base network, and then laid out contiguously from either end of it.
//! Because every block is a power of two and no block is smaller than one
//! that comes after it, each cursor position is already aligned to the size
//! of the next block; the allocator still verifies this for every block.

use serde::Serialize;

use super::address_space::AddressSpace;
use super::request::{Allocation, AllocationOrder, SubnetRequest};
use crate::error::VlsmError;

/// Sort requests by block size, largest first. Equal sizes keep input order.
pub fn sort_by_block_size(requests: &mut [SubnetRequest]) {
    // sort_by is stable
    requests.sort_by(|a, b| b.allocated_size.cmp(&a.allocated_size));
}

/// Total number of addresses the requests reserve
pub fn total_required(requests: &[SubnetRequest]) -> u64 {
    requests
        .iter()
        .fold(0u64, |sum, request| sum.saturating_add(request.allocated_size))
}

/// Verify the requests fit in the address space, returning the total reserved
pub fn check_capacity(space: &AddressSpace, requests: &[SubnetRequest]) -> Result<u64, VlsmError> {
    let required = total_required(requests);
    log::debug!(
        "Capacity check for {}: {} required, {} available",
        space,
        required,
        space.capacity()
    );

    if required > space.capacity() {
        return Err(VlsmError::InsufficientSpace {
            required,
            available: space.capacity(),
        });
    }
    Ok(required)
}

/// Place a single request at `start`, refusing blocks that are misaligned or
/// spill outside the address space
pub fn assign_block(
    space: &AddressSpace,
    request: SubnetRequest,
    start: u64,
) -> Result<Allocation, VlsmError> {
    let size = request.allocated_size;
    if size == 0 || start % size != 0 || !space.contains_block(start, size) {
        return Err(VlsmError::Misaligned {
            name: request.name,
            start,
            size,
        });
    }

    let allocation = Allocation {
        request,
        // contains_block guarantees start < 2^32
        start_address: start as u32,
    };
    log::debug!("Assigned {} to {}", allocation.cidr(), allocation.name());
    Ok(allocation)
}

/// Allocate every request inside `space`.
///
/// The whole batch is rejected if it does not fit; on success the returned
/// allocations are in block-size order (largest first), which is also the
/// order in which they were laid out.
pub fn allocate(
    space: &AddressSpace,
    mut requests: Vec<SubnetRequest>,
    order: AllocationOrder,
) -> Result<Vec<Allocation>, VlsmError> {
    sort_by_block_size(&mut requests);
    check_capacity(space, &requests)?;

    let mut allocations = Vec::with_capacity(requests.len());
    match order {
        AllocationOrder::Ascending => {
            let mut cursor = u64::from(space.network_address());
            for request in requests {
                let size = request.allocated_size;
                allocations.push(assign_block(space, request, cursor)?);
                cursor += size;
            }
        }
        AllocationOrder::Descending => {
            let mut cursor = space.end();
            for request in requests {
                cursor -= request.allocated_size;
                allocations.push(assign_block(space, request, cursor)?);
            }
        }
    }

    Ok(allocations)
}

/// Utilization figures for a finished allocation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub capacity: u64,
    pub allocated: u64,
    pub free: u64,
    pub utilization_percent: f64,
}

impl AllocationSummary {
    pub fn new(space: &AddressSpace, allocations: &[Allocation]) -> Self {
        let allocated: u64 = allocations.iter().map(Allocation::allocated_size).sum();
        let capacity = space.capacity();
        AllocationSummary {
            capacity,
            allocated,
            free: capacity.saturating_sub(allocated),
            utilization_percent: allocated as f64 * 100.0 / capacity as f64,
        }
    }
}
