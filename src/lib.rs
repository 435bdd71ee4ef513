//! # vlsmcalc - Variable Length Subnet Masking calculator
//!
//! This library splits an IPv4 base network into named, non-overlapping
//! subnets, each sized to the smallest power-of-two block that holds the
//! requested number of addresses.
//!
//! ## Overview
//!
//! Allocation is a pure transform from a base network, a list of requests and
//! a direction to a list of CIDR blocks:
//!
//! 1. Each request is rounded up to a power-of-two block (`50` -> `64`, `/26`)
//! 2. Requests are sorted largest block first (ties keep input order)
//! 3. The total is checked against the base network's capacity; if it does
//!    not fit, nothing is allocated
//! 4. Blocks are laid out contiguously from the bottom (`asc`) or the top
//!    (`desc`) of the base network
//!
//! Laying out larger blocks first keeps every block aligned to its own size,
//! so each one is describable by a single prefix.
//!
//! ## Architecture
//!
//! - `ip`: address space, subnet requests and the allocator
//! - `request_loader`: reading request lists (text or YAML)
//! - `report`: text and JSON output
//! - `utils`: IPv4 conversion and block-size arithmetic
//! - `error`: the `VlsmError` taxonomy
//!
//! ## Example Usage
//!
//! ```rust
//! use vlsmcalc::ip::{allocate, AddressSpace, AllocationOrder, SubnetRequest};
//!
//! let space: AddressSpace = "192.168.0.0/24".parse()?;
//! let requests = vec![
//!     SubnetRequest::new("A", 50)?,
//!     SubnetRequest::new("B", 10)?,
//! ];
//!
//! let allocations = allocate(&space, requests, AllocationOrder::Ascending)?;
//! assert_eq!(allocations[0].to_string(), "A 64 192.168.0.0/26");
//! assert_eq!(allocations[1].to_string(), "B 16 192.168.0.64/28");
//! # Ok::<(), vlsmcalc::error::VlsmError>(())
//! ```
//!
//! ## Request File Format
//!
//! One `<name> <count>` pair per line; blank lines are rejected and anything
//! after the count is ignored.
//!
//! ```text
//! sales     50
//! hr        10
//! ```
//!
//! Files ending in `.yaml`/`.yml` may instead hold a list of
//! `{ name, hosts }` entries.
//!
//! ## Error Handling
//!
//! Library functions return `Result<T, VlsmError>`. The binary wraps these
//! with `color_eyre` for reporting; every error is fatal and exits with
//! status 1.

pub mod error;
pub mod ip;
pub mod report;
pub mod request_loader;
pub mod utils;

pub use error::VlsmError;
