//! Shared utilities: IPv4 conversion and block-size arithmetic.

pub mod ip_utils;

pub use ip_utils::{int_to_ip, ip_to_int, next_power_of_two};
