//! Bridge from a frozen [`AddressParseData`](super::data::AddressParseData)
//! to the crate's concrete value types.
//!
//! Construction of concrete address values is explicitly an external
//! collaborator of the core validator (spec §1 "Deliberately OUT of
//! scope"); this module is that collaborator's thin entry point, used by
//! the `FromStr` impls on `IPv4`/`IPv6`/`MAC`/`EUI64`/`IPAddress` so the
//! notations the validator accepts become reachable through the crate's
//! existing public surface. It only builds a single concrete value — a
//! range, wildcard, or zoned/qualified result still needs the host/provider
//! layer above it, which callers reach through `parse::parse_address` or
//! `parse::parse_host` directly.

use super::data::{AddressKind, AddressParseData};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::options::{AddressSize, Ipv4Options, Ipv6Options, ParseOptions};

/// Options used by the `FromStr` impls on the concrete value types: no
/// ranges, no wildcards, no single-segment forms, matching the unambiguous
/// textual forms those types' `Display` impls themselves produce.
pub fn strict_ipv4_options() -> ParseOptions {
    let mut o = ParseOptions::default();
    o.allow_ipv6 = false;
    o.allow_all = false;
    o.allow_single_segment = false;
    o.ipv4 = Ipv4Options::inet_pton();
    o
}

pub fn strict_ipv6_options() -> ParseOptions {
    let mut o = ParseOptions::default();
    o.allow_ipv4 = false;
    o.allow_all = false;
    o.allow_single_segment = false;
    o.ipv6 = Ipv6Options {
        allow_leading_zeros: true,
        allow_unlimited_leading_zeros: false,
        allow_wildcarded_separator: false,
        allow_binary: false,
        allow_mixed: true,
        allow_zone: false,
        allow_empty_zone: false,
        allow_base85: false,
        range_options: super::options::RangeOptions::none(),
        mixed_parameters: Box::new(Ipv4Options::inet_pton()),
    };
    o
}

/// Options used when either IPv4 or IPv6 is acceptable (`IPAddress::from_str`).
pub fn strict_ip_options() -> ParseOptions {
    let mut o = strict_ipv6_options();
    o.allow_ipv4 = true;
    o.ipv4 = Ipv4Options::inet_pton();
    o
}

pub fn mac_options(size: AddressSize) -> ParseOptions {
    let mut o = ParseOptions::default();
    o.allow_ipv4 = false;
    o.allow_ipv6 = false;
    o.allow_all = false;
    o.allow_single_segment = true;
    o.mac.address_size = size;
    o
}

fn reject_qualified(data: &AddressParseData) -> ParseResult<()> {
    if data.is_zoned {
        return Err(ParseError::new(ParseErrorKind::ZoneInvalid, "", data.address_end_index));
    }
    if data.has_range() {
        return Err(ParseError::new(ParseErrorKind::InvalidRange, "", data.address_end_index));
    }
    Ok(())
}

/// Parse `input` into four IPv4 octets via the unified validator.
pub fn ipv4_octets(input: &str) -> ParseResult<[u8; 4]> {
    let options = strict_ipv4_options();
    let data = super::mega::parse(&options, input, false)?;
    if data.kind != AddressKind::Ipv4 {
        return Err(ParseError::new(ParseErrorKind::IpVersionMismatch, input, 0));
    }
    reject_qualified(&data)?;
    if data.segments.len() != 4 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }
    let mut octets = [0u8; 4];
    for (i, seg) in data.segments.iter().enumerate() {
        octets[i] = seg.lower as u8;
    }
    Ok(octets)
}

/// Parse `input` into a 128-bit IPv6 value via the unified validator.
pub fn ipv6_u128(input: &str) -> ParseResult<u128> {
    let options = strict_ipv6_options();
    let data = super::mega::ipv6_entry(&options, input)?;
    if data.kind != AddressKind::Ipv6 {
        return Err(ParseError::new(ParseErrorKind::IpVersionMismatch, input, 0));
    }
    reject_qualified(&data)?;

    if data.is_single_segment {
        let seg = &data.segments[0];
        return Ok(((seg.lower_extended as u128) << 64) | seg.lower as u128);
    }

    if data.segments.len() != 8 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }
    let mut value: u128 = 0;
    for seg in &data.segments {
        value = (value << 16) | seg.lower as u128;
    }
    Ok(value)
}

/// Parse `input` as an address that may be either IPv4 or IPv6, returning
/// which family matched plus its numeric value widened to 128 bits (IPv4
/// values occupy the low 32 bits).
pub fn ip_value(input: &str) -> ParseResult<(AddressKind, u128)> {
    let options = strict_ip_options();
    let data = super::mega::parse(&options, input, false)?;
    reject_qualified(&data)?;
    match data.kind {
        AddressKind::Ipv4 => {
            if data.segments.len() != 4 {
                return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
            }
            let mut value: u128 = 0;
            for seg in &data.segments {
                value = (value << 8) | seg.lower as u128;
            }
            Ok((AddressKind::Ipv4, value))
        }
        AddressKind::Ipv6 => {
            let value = if data.is_single_segment {
                let seg = &data.segments[0];
                ((seg.lower_extended as u128) << 64) | seg.lower as u128
            } else {
                if data.segments.len() != 8 {
                    return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
                }
                let mut value: u128 = 0;
                for seg in &data.segments {
                    value = (value << 16) | seg.lower as u128;
                }
                value
            };
            Ok((AddressKind::Ipv6, value))
        }
        _ => Err(ParseError::new(ParseErrorKind::IpVersionMismatch, input, 0)),
    }
}

/// Parse `input` as a MAC-48 address into 6 bytes via the unified validator.
pub fn mac48_bytes(input: &str) -> ParseResult<[u8; 6]> {
    let options = mac_options(AddressSize::Mac48);
    let data = super::mega::parse(&options, input, false)?;
    bytes_from_mac_data(input, &data, 6)
}

/// Parse `input` as an EUI-64 address into 8 bytes via the unified validator.
pub fn eui64_bytes(input: &str) -> ParseResult<[u8; 8]> {
    let options = mac_options(AddressSize::Eui64);
    let data = super::mega::parse(&options, input, false)?;
    let mut out = [0u8; 8];
    let bytes = bytes_from_mac_data_vec(input, &data, 8)?;
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn bytes_from_mac_data(input: &str, data: &AddressParseData, expected: usize) -> ParseResult<[u8; 6]> {
    let bytes = bytes_from_mac_data_vec(input, data, expected)?;
    let mut out = [0u8; 6];
    out.copy_from_slice(&bytes);
    Ok(out)
}

fn bytes_from_mac_data_vec(input: &str, data: &AddressParseData, expected: usize) -> ParseResult<Vec<u8>> {
    if data.kind != AddressKind::Mac {
        return Err(ParseError::new(ParseErrorKind::InvalidCharacter, input, 0));
    }
    reject_qualified(data)?;
    if data.segments.len() != expected {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }
    Ok(data.segments.iter().map(|s| s.lower as u8).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ipv4_strict() {
        assert_eq!(ipv4_octets("192.168.0.1").unwrap(), [192, 168, 0, 1]);
        assert!(ipv4_octets("192.168.0").is_err());
        assert!(ipv4_octets("3232235521").is_err());
    }

    #[test]
    fn ipv6_strict() {
        assert_eq!(ipv6_u128("::1").unwrap(), 1);
        let full = ipv6_u128("2001:db8::1").unwrap();
        assert_eq!(full >> 112, 0x2001);
    }

    #[test]
    fn ipv6_rejects_zone_by_default() {
        assert!(ipv6_u128("fe80::1%eth0").is_err());
    }

    #[test]
    fn mac48_strict() {
        assert_eq!(mac48_bytes("01:23:45:67:89:ab").unwrap(), [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
        assert_eq!(mac48_bytes("0123.4567.89ab").unwrap(), [0x01, 0x23, 0x45, 0x67, 0x89, 0xab]);
    }

    #[test]
    fn eui64_strict() {
        let bytes = eui64_bytes("01:23:45:67:89:ab:cd:ef").unwrap();
        assert_eq!(bytes, [0x01, 0x23, 0x45, 0x67, 0x89, 0xab, 0xcd, 0xef]);
    }
}
