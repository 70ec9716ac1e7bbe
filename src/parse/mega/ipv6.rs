//! IPv6 group parsing (spec §4.3.3, §4.3.8).

use crate::parse::chars::{binary_digit_value, hex_digit_value, is_binary_delim};
use crate::parse::data::{AddressKind, AddressParseData, Segment, SegmentFlags};
use crate::parse::error::{ParseError, ParseErrorKind, ParseResult};
use crate::parse::options::{Ipv6Options, ParseOptions};

const GROUP_COUNT: usize = 8;
const MAX_GROUP: u64 = 0xffff;

pub fn parse(options: &ParseOptions, input: &str) -> ParseResult<AddressParseData> {
    let iopts = &options.ipv6;
    let (addr_part, zone) = split_zone(iopts, input)?;

    let occurrences = count_double_colon(addr_part);
    if occurrences > 1 {
        return Err(ParseError::new(ParseErrorKind::AmbiguousIpv6, input, 0));
    }

    let mut data = if occurrences == 1 {
        parse_compressed(options, iopts, input, addr_part)?
    } else {
        parse_full(options, iopts, input, addr_part)?
    };

    data.is_zoned = zone.is_some();
    data.zone = zone;
    data.address_end_index = input.len();
    Ok(data)
}

fn split_zone<'a>(iopts: &Ipv6Options, input: &'a str) -> ParseResult<(&'a str, Option<String>)> {
    match input.find('%') {
        None => Ok((input, None)),
        Some(idx) => {
            if !iopts.allow_zone {
                return Err(ParseError::new(ParseErrorKind::ZoneInvalid, input, idx));
            }
            let zone = &input[idx + 1..];
            if zone.is_empty() {
                if iopts.allow_empty_zone {
                    return Ok((&input[..idx], Some(String::new())));
                }
                return Err(ParseError::new(ParseErrorKind::ZoneEmpty, input, idx));
            }
            if idx == 0 {
                return Err(ParseError::new(ParseErrorKind::OnlyZone, input, idx));
            }
            Ok((&input[..idx], Some(zone.to_string())))
        }
    }
}

fn count_double_colon(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut count = 0;
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b':' && bytes[i + 1] == b':' {
            count += 1;
            i += 2;
        } else {
            i += 1;
        }
    }
    count
}

fn parse_full(options: &ParseOptions, iopts: &Ipv6Options, whole: &str, addr_part: &str) -> ParseResult<AddressParseData> {
    let raw_parts: Vec<&str> = if addr_part.is_empty() { Vec::new() } else { addr_part.split(':').collect() };

    let (head_parts, embedded) = split_embedded_ipv4(&raw_parts);

    let mut segments = Vec::with_capacity(GROUP_COUNT);
    let mut offset = 0usize;
    for part in &head_parts {
        segments.push(parse_group(iopts, whole, part, offset)?);
        offset += part.len() + 1;
    }

    let mut mixed = None;
    let total = if let Some(tail) = embedded {
        if !iopts.allow_mixed {
            return Err(ParseError::new(ParseErrorKind::MixedNotAllowed, whole, offset));
        }
        let nested = super::parse(options, tail, true)?;
        append_embedded(&mut segments, &nested);
        mixed = Some(Box::new(nested));
        segments.len()
    } else {
        segments.len()
    };

    if total != GROUP_COUNT {
        if total < GROUP_COUNT {
            return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
        }
        return Err(ParseError::new(ParseErrorKind::TooManySegments, whole, 0));
    }

    let mut data = AddressParseData::new(AddressKind::Ipv6, segments, whole.len());
    data.mixed_parsed_address = mixed;
    Ok(data)
}

fn parse_compressed(options: &ParseOptions, iopts: &Ipv6Options, whole: &str, addr_part: &str) -> ParseResult<AddressParseData> {
    let dc = addr_part.find("::").expect("caller verified exactly one '::'");
    let left_str = &addr_part[..dc];
    let right_str = &addr_part[dc + 2..];

    let left_raw: Vec<&str> = if left_str.is_empty() { Vec::new() } else { left_str.split(':').collect() };
    let right_raw: Vec<&str> = if right_str.is_empty() { Vec::new() } else { right_str.split(':').collect() };

    let (right_head, embedded) = split_embedded_ipv4(&right_raw);

    let right_logical = right_head.len() + if embedded.is_some() { 2 } else { 0 };
    let known = left_raw.len() + right_logical;
    if known >= GROUP_COUNT {
        return Err(ParseError::new(ParseErrorKind::AmbiguousIpv6, whole, dc));
    }
    let missing = GROUP_COUNT - known;

    let mut segments = Vec::with_capacity(GROUP_COUNT);
    let mut offset = 0usize;
    for part in &left_raw {
        segments.push(parse_group(iopts, whole, part, offset)?);
        offset += part.len() + 1;
    }
    for _ in 0..missing {
        segments.push(Segment::single_value(0, 16, dc, dc + 2));
    }
    offset = dc + 2;
    for part in &right_head {
        segments.push(parse_group(iopts, whole, part, offset)?);
        offset += part.len() + 1;
    }

    let mut mixed = None;
    if let Some(tail) = embedded {
        if !iopts.allow_mixed {
            return Err(ParseError::new(ParseErrorKind::MixedNotAllowed, whole, offset));
        }
        let nested = super::parse(options, tail, true)?;
        append_embedded(&mut segments, &nested);
        mixed = Some(Box::new(nested));
    }

    let mut data = AddressParseData::new(AddressKind::Ipv6, segments, whole.len());
    data.mixed_parsed_address = mixed;
    data.consecutive_separator_index = Some(dc);
    Ok(data)
}

/// If the final raw `:`-separated part looks like an embedded IPv4 tail
/// (contains a `.`), split it off; the remaining parts are plain hex groups.
fn split_embedded_ipv4<'a>(parts: &[&'a str]) -> (Vec<&'a str>, Option<&'a str>) {
    match parts.split_last() {
        Some((last, head)) if last.contains('.') => (head.to_vec(), Some(*last)),
        _ => (parts.to_vec(), None),
    }
}

/// Combine a nested IPv4 `AddressParseData` (4 octet segments) into two
/// synthetic 16-bit groups appended to `segments` (spec §4.3.8).
fn append_embedded(segments: &mut Vec<Segment>, nested: &AddressParseData) {
    for pair in nested.segments.chunks(2) {
        let (a, b) = (pair[0], pair.get(1).copied().unwrap_or(pair[0]));
        let lower = (a.lower << 8) | b.lower;
        let upper = (a.upper << 8) | b.upper;
        let mut seg = Segment::single_value(lower, 16, a.lower_digits_start, b.upper_end);
        seg.upper = upper;
        if a.is_range() || b.is_range() {
            seg.flags.set(SegmentFlags::MERGED_MIXED);
        }
        segments.push(seg);
    }
}

fn parse_group(iopts: &Ipv6Options, whole: &str, part: &str, offset: usize) -> ParseResult<Segment> {
    if part.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptySegment, whole, offset));
    }

    if part == "*" {
        if !iopts.range_options.allow_wildcard {
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset));
        }
        let mut seg = Segment::single_value(0, 16, offset, offset + 1);
        seg.upper = MAX_GROUP;
        seg.flags = SegmentFlags::WILDCARD;
        return Ok(seg);
    }

    if iopts.range_options.allow_single_wildcard {
        let trimmed = part.trim_end_matches('_');
        let wildcard_count = part.len() - trimmed.len();
        if wildcard_count > 0 {
            let radix = 16u32;
            let base_value = if trimmed.is_empty() { 0 } else { parse_hex_or_binary(iopts, whole, trimmed, offset)?.0 };
            let factor = (radix as u64).pow(wildcard_count as u32);
            let lower = base_value.saturating_mul(factor);
            let upper = (lower + factor - 1).min(MAX_GROUP);
            let mut seg = Segment::single_value(lower, radix, offset, offset + part.len());
            seg.upper = upper;
            seg.flags = SegmentFlags::SINGLE_WILDCARD;
            return Ok(seg);
        }
    }

    if iopts.range_options.allow_dash_range {
        if let Some(dash) = part.as_bytes().iter().position(|&b| b == b'-').filter(|&i| i > 0 && i < part.len() - 1) {
            let (front, back) = (&part[..dash], &part[dash + 1..]);
            let (lo, lo_radix) = parse_hex_or_binary(iopts, whole, front, offset)?;
            let (hi, hi_radix) = parse_hex_or_binary(iopts, whole, back, offset + dash + 1)?;
            let (lower, upper, flags) = if lo <= hi {
                (lo, hi, SegmentFlags::STANDARD_RANGE_STR)
            } else if iopts.range_options.allow_reverse_range {
                (hi, lo, SegmentFlags::empty())
            } else {
                return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, offset));
            };
            if upper > MAX_GROUP {
                return Err(ParseError::new(ParseErrorKind::AddressTooLarge, whole, offset));
            }
            return Ok(Segment {
                lower_digits_start: offset,
                lower_value_start: offset,
                lower_end: offset + dash,
                upper_digits_start: offset + dash + 1,
                upper_value_start: offset + dash + 1,
                upper_end: offset + part.len(),
                lower_radix: lo_radix,
                upper_radix: hi_radix,
                lower,
                upper,
                lower_extended: 0,
                upper_extended: 0,
                flags,
            });
        }
    }

    let (value, radix) = parse_hex_or_binary(iopts, whole, part, offset)?;
    if value > MAX_GROUP {
        return Err(ParseError::new(ParseErrorKind::AddressTooLarge, whole, offset));
    }
    Ok(Segment::single_value(value, radix, offset, offset + part.len()))
}

fn parse_hex_or_binary(iopts: &Ipv6Options, whole: &str, text: &str, offset: usize) -> ParseResult<(u64, u32)> {
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptySegment, whole, offset));
    }
    let bytes = text.as_bytes();
    if iopts.allow_binary && bytes.len() >= 2 && bytes[0] == b'0' && is_binary_delim(bytes[1]) {
        let digits = &text[2..];
        if digits.is_empty() || digits.len() > 16 {
            return Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, offset));
        }
        let mut value: u64 = 0;
        for &b in digits.as_bytes() {
            let d = binary_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::BinaryDigitInvalid, whole, offset))?;
            value = (value << 1) | d as u64;
        }
        return Ok((value, 2));
    }

    if text.len() > 4 {
        return Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, offset));
    }
    let leading_zero = text.len() > 1 && bytes[0] == b'0';
    if leading_zero && !iopts.allow_leading_zeros {
        return Err(ParseError::new(ParseErrorKind::LeadingZerosNotAllowed, whole, offset));
    }
    let mut value: u64 = 0;
    for &b in bytes {
        let d = hex_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset))?;
        value = (value << 4) | d as u64;
    }
    Ok((value, 16))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn full_form() {
        let data = parse(&opts(), "2001:0db8:0000:0000:0000:ff00:0042:8329").unwrap();
        assert_eq!(data.segments.len(), 8);
        assert_eq!(data.segments[0].lower, 0x2001);
        assert_eq!(data.segments[6].lower, 0x42);
    }

    #[test]
    fn compressed_loopback() {
        let data = parse(&opts(), "::1").unwrap();
        assert_eq!(data.segments.len(), 8);
        assert_eq!(data.segments[7].lower, 1);
        assert!(data.segments[0..7].iter().all(|s| s.lower == 0));
    }

    #[test]
    fn ambiguous_double_compression() {
        assert!(parse(&opts(), "2001::abcd::1").is_err());
    }

    #[test]
    fn redundant_compression_rejected() {
        assert!(parse(&opts(), "1:2:3:4:5:6:7::8").is_err());
    }

    #[test]
    fn mixed_ipv4_tail() {
        let data = parse(&opts(), "::ffff:192.0.2.128").unwrap();
        assert_eq!(data.segments.len(), 8);
        assert_eq!(data.segments[6].lower, 0xc000);
        assert_eq!(data.segments[7].lower, 0x0280);
        assert!(data.mixed_parsed_address.is_some());
    }

    #[test]
    fn zoned_link_local() {
        let data = parse(&opts(), "fe80::1%eth0").unwrap();
        assert!(data.is_zoned);
        assert_eq!(data.zone.as_deref(), Some("eth0"));
    }
}
