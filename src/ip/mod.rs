//! IPv4 address space management and VLSM allocation.
//!
//! This module models the base network being subdivided, the sized subnet
//! requests carved out of it, and the greedy largest-first allocator that
//! lays those requests out without overlap.

pub mod address_space;
pub mod allocator;
pub mod request;

// Re-export commonly used types
pub use address_space::AddressSpace;
pub use allocator::{allocate, AllocationSummary};
pub use request::{Allocation, AllocationOrder, SubnetRequest};
