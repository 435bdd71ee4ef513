use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// IPv4 arithmetic helpers: dotted-decimal conversion, prefix masks and
/// power-of-two block sizing

/// Number of bits in an IPv4 address
pub const IPV4_BITS: u8 = 32;

/// Size of the whole IPv4 address space (2^32)
pub const IPV4_SPACE: u64 = 1 << IPV4_BITS;

fn dotted_quad_regex() -> &'static Regex {
    static DOTTED_QUAD: OnceLock<Regex> = OnceLock::new();
    DOTTED_QUAD.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("dotted quad pattern is valid")
    })
}

/// Convert a dotted-decimal IPv4 address to its 32-bit integer value
///
/// # Examples
/// ```
/// use vlsmcalc::utils::ip_utils::ip_to_int;
///
/// assert_eq!(ip_to_int("192.168.0.1"), Ok(0xC0A8_0001));
/// assert!(ip_to_int("192.168.0").is_err());
/// assert!(ip_to_int("192.168.0.256").is_err());
/// ```
pub fn ip_to_int(ip: &str) -> Result<u32, String> {
    let captures = dotted_quad_regex()
        .captures(ip)
        .ok_or_else(|| format!("'{}' is not four dot-separated integers", ip))?;

    let mut value: u32 = 0;
    for group in 1..=4 {
        let text = &captures[group];
        let octet: u8 = text
            .parse()
            .map_err(|_| format!("octet {} is out of byte range", text))?;
        value = (value << 8) | u32::from(octet);
    }
    Ok(value)
}

/// Convert a 32-bit integer to dotted-decimal notation
pub fn int_to_ip(ip: u32) -> String {
    Ipv4Addr::from(ip).to_string()
}

/// Netmask with `prefix` leading one-bits. A /0 prefix has an all-zero mask.
pub fn prefix_mask(prefix: u8) -> u32 {
    if prefix == 0 {
        0
    } else {
        u32::MAX << (IPV4_BITS - prefix.min(IPV4_BITS))
    }
}

/// Smallest power of two greater than or equal to `n` (0 and 1 both map to 1)
pub fn next_power_of_two(n: u64) -> u64 {
    n.max(1).next_power_of_two()
}

/// Exact base-2 logarithm of a power of two
pub fn exact_log2(size: u64) -> Option<u32> {
    if size.is_power_of_two() {
        Some(size.trailing_zeros())
    } else {
        None
    }
}

/// Prefix length of a power-of-two block, e.g. 256 -> /24, 1 -> /32
pub fn block_prefix_length(size: u64) -> Option<u8> {
    let bits = exact_log2(size)?;
    u8::try_from(bits)
        .ok()
        .and_then(|bits| IPV4_BITS.checked_sub(bits))
}
