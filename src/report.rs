//! Report generation for finished allocations.
//!
//! Produces either the plain `<name> <size> <cidr>` lines or a JSON document
//! that also carries the base network and utilization figures.

use std::io::Write;

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::ip::{AddressSpace, Allocation, AllocationOrder, AllocationSummary};
use crate::utils::ip_utils::int_to_ip;

/// One allocated subnet as it appears in the JSON report
#[derive(Debug, Serialize)]
pub struct SubnetEntry {
    pub name: String,
    pub requested: u64,
    pub allocated_size: u64,
    pub network: String,
    pub prefix_length: u8,
    pub cidr: String,
    pub first_address: String,
    pub last_address: String,
}

impl From<&Allocation> for SubnetEntry {
    fn from(allocation: &Allocation) -> Self {
        SubnetEntry {
            name: allocation.name().to_string(),
            requested: allocation.request.requested_count,
            allocated_size: allocation.allocated_size(),
            network: int_to_ip(allocation.start_address),
            prefix_length: allocation.prefix_length(),
            cidr: allocation.cidr(),
            first_address: int_to_ip(allocation.start_address),
            last_address: int_to_ip(allocation.last_address()),
        }
    }
}

/// Full allocation report
#[derive(Debug, Serialize)]
pub struct AllocationReport {
    pub base_network: String,
    pub order: AllocationOrder,
    #[serde(flatten)]
    pub summary: AllocationSummary,
    pub subnets: Vec<SubnetEntry>,
}

impl AllocationReport {
    pub fn new(space: &AddressSpace, order: AllocationOrder, allocations: &[Allocation]) -> Self {
        AllocationReport {
            base_network: space.to_string(),
            order,
            summary: AllocationSummary::new(space, allocations),
            subnets: allocations.iter().map(SubnetEntry::from).collect(),
        }
    }
}

/// Write one `<name> <allocated_size> <ip>/<prefix>` line per allocation
pub fn write_text_report<W: Write>(out: &mut W, allocations: &[Allocation]) -> Result<()> {
    for allocation in allocations {
        writeln!(out, "{}", allocation).context("Failed to write allocation")?;
    }
    Ok(())
}

/// Write the report as pretty-printed JSON
pub fn write_json_report<W: Write>(out: &mut W, report: &AllocationReport) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;
    writeln!(out, "{}", json).context("Failed to write JSON report")?;
    Ok(())
}

/// Log how much of the base network the allocation uses
pub fn log_summary(space: &AddressSpace, summary: &AllocationSummary) {
    log::info!(
        "Allocated {} of {} addresses in {} ({:.2}% used, {} free)",
        summary.allocated,
        summary.capacity,
        space,
        summary.utilization_percent,
        summary.free
    );
    if summary.free > 0 {
        log::debug!(
            "Unallocated space ends at {}",
            int_to_ip(space.broadcast_address())
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ip::{allocate, SubnetRequest};

    fn sample() -> (AddressSpace, Vec<Allocation>) {
        let space = AddressSpace::parse("192.168.0.0/24").unwrap();
        let requests = vec![
            SubnetRequest::new("B", 10).unwrap(),
            SubnetRequest::new("A", 50).unwrap(),
        ];
        let allocations = allocate(&space, requests, AllocationOrder::Ascending).unwrap();
        (space, allocations)
    }

    #[test]
    fn test_text_report() {
        let (_, allocations) = sample();
        let mut out = Vec::new();
        write_text_report(&mut out, &allocations).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "A 64 192.168.0.0/26\nB 16 192.168.0.64/28\n"
        );
    }

    #[test]
    fn test_json_report() {
        let (space, allocations) = sample();
        let report = AllocationReport::new(&space, AllocationOrder::Ascending, &allocations);
        let mut out = Vec::new();
        write_json_report(&mut out, &report).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["base_network"], "192.168.0.0/24");
        assert_eq!(value["order"], "asc");
        assert_eq!(value["capacity"], 256);
        assert_eq!(value["allocated"], 80);
        assert_eq!(value["free"], 176);
        assert_eq!(value["subnets"][0]["name"], "A");
        assert_eq!(value["subnets"][0]["requested"], 50);
        assert_eq!(value["subnets"][1]["cidr"], "192.168.0.64/28");
        assert_eq!(value["subnets"][1]["last_address"], "192.168.0.79");
    }
}
