//! Single-segment disambiguation at end-of-string (spec §4.3.1).
//!
//! Reached whenever the input has none of the separators that would route it
//! to the IPv4/IPv6/MAC family parsers (`classify` in `mod.rs`). The whole
//! string is one token, and its radix prefix and length decide which family
//! it denotes.

use crate::parse::chars::{base85_digit_value, binary_digit_value, hex_digit_value, is_binary_delim, is_hex_delim, octal_digit_value, BASE85_ALPHABET};
use crate::parse::data::{AddressKind, AddressParseData, Segment, SegmentFlags};
use crate::parse::error::{ParseError, ParseErrorKind, ParseResult};
use crate::parse::options::{AddressSize, ParseOptions};

pub fn parse(options: &ParseOptions, input: &str) -> ParseResult<AddressParseData> {
    if !options.allow_single_segment {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }

    let bytes = input.as_bytes();

    if bytes.len() >= 2 && bytes[0] == b'0' && is_hex_delim(bytes[1]) {
        return parse_hex_prefixed(options, input, &input[2..]);
    }
    if bytes.len() >= 2 && bytes[0] == b'0' && is_binary_delim(bytes[1]) {
        return parse_binary_prefixed(options, input, &input[2..]);
    }

    if let Some(data) = try_base85(options, input)? {
        return Ok(data);
    }

    if bytes.iter().all(|&b| octal_digit_value(b).is_some()) {
        if bytes[0] == b'0' && bytes.len() > 1 && options.ipv4.inet_aton_octal {
            return parse_ipv4_octal(options, input, input);
        }
    }

    if bytes.iter().all(|&b| decimal_digit_value_ok(b)) {
        match parse_ipv4_decimal(options, input) {
            Ok(data) => return Ok(data),
            Err(e) => {
                // Falls through to the MAC/IPv6 hex interpretations below
                // only when the decimal reading was structurally
                // inapplicable (wrong length for IPv4, IPv4 disallowed);
                // an IPv4-shaped failure for any other reason still wins.
                if bytes.len() != 12 && bytes.len() != 16 {
                    return Err(e);
                }
            }
        }
    }

    if bytes.len() == 12 || bytes.len() == 16 {
        if bytes.iter().all(|&b| hex_digit_value(b).is_some()) {
            return parse_mac_single(options, input);
        }
    }

    if bytes.len() == 32 && bytes.iter().all(|&b| hex_digit_value(b).is_some()) {
        return parse_ipv6_hex_single(options, input, input);
    }

    Err(ParseError::new(ParseErrorKind::InvalidCharacter, input, 0))
}

fn decimal_digit_value_ok(b: u8) -> bool {
    b.is_ascii_digit()
}

fn parse_hex_prefixed(options: &ParseOptions, whole: &str, digits: &str) -> ParseResult<AddressParseData> {
    if digits.is_empty() || !digits.bytes().all(|b| hex_digit_value(b).is_some()) {
        return Err(ParseError::new(ParseErrorKind::DecimalDigitInvalid, whole, 0));
    }
    if digits.len() == 32 {
        return parse_ipv6_hex_single(options, whole, digits);
    }
    if digits.len() <= 8 && options.allow_ipv4 && options.ipv4.inet_aton_hex {
        let value = u64::from_str_radix(digits, 16).map_err(|_| ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0))?;
        if value > 0xffff_ffff {
            return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0));
        }
        let seg = Segment::single_value(value, 16, 0, whole.len());
        return Ok(single_ipv4(seg, whole.len()));
    }
    Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, 0))
}

fn parse_binary_prefixed(options: &ParseOptions, whole: &str, digits: &str) -> ParseResult<AddressParseData> {
    if digits.is_empty() || !digits.bytes().all(|b| binary_digit_value(b).is_some()) {
        return Err(ParseError::new(ParseErrorKind::BinaryDigitInvalid, whole, 0));
    }
    if digits.len() == 32 && options.allow_ipv4 && options.ipv4.allow_binary {
        let mut value: u64 = 0;
        for &b in digits.as_bytes() {
            value = (value << 1) | binary_digit_value(b).unwrap() as u64;
        }
        let seg = Segment::single_value(value, 2, 0, whole.len());
        return Ok(single_ipv4(seg, whole.len()));
    }
    if digits.len() == 128 && options.allow_ipv6 && options.ipv6.allow_binary {
        let (hi, lo) = binary_to_u128_pair(digits);
        let mut seg = Segment::single_value(lo, 2, 0, whole.len());
        seg.lower_extended = hi;
        seg.upper_extended = hi;
        return Ok(single_ipv6(seg, whole.len()));
    }
    Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, 0))
}

fn binary_to_u128_pair(digits: &str) -> (u64, u64) {
    // 128 binary digits split into the high 64 bits and low 64 bits, since
    // a single u64 can't hold the whole value (spec §3 "extended" slots).
    let (hi_digits, lo_digits) = digits.split_at(64);
    let mut hi: u64 = 0;
    for &b in hi_digits.as_bytes() {
        hi = (hi << 1) | binary_digit_value(b).unwrap() as u64;
    }
    let mut lo: u64 = 0;
    for &b in lo_digits.as_bytes() {
        lo = (lo << 1) | binary_digit_value(b).unwrap() as u64;
    }
    (hi, lo)
}

fn parse_ipv4_octal(options: &ParseOptions, whole: &str, text: &str) -> ParseResult<AddressParseData> {
    if !options.allow_ipv4 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
    }
    let digits = &text[1..];
    if digits.len() > 11 {
        if options.ipv4.inet_aton_extraneous_digits {
            return parse_ipv4_extraneous(whole, digits, 8, 11);
        }
        return Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, 0));
    }
    let mut value: u64 = 0;
    for &b in digits.as_bytes() {
        value = value * 8 + octal_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::OctalDigitInvalid, whole, 0))? as u64;
    }
    if value > 0xffff_ffff {
        return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0));
    }
    let seg = Segment::single_value(value & 0xffff_ffff, 8, 0, whole.len());
    Ok(single_ipv4(seg, whole.len()))
}

/// `inet_aton_extraneous_digits`: arbitrary-length runs are accepted and the
/// value is reduced mod 2^32 by parsing only the trailing meaningful digits
/// (spec §4.3.1).
fn parse_ipv4_extraneous(whole: &str, digits: &str, radix: u32, keep: usize) -> ParseResult<AddressParseData> {
    let tail = if digits.len() > keep { &digits[digits.len() - keep..] } else { digits };
    let value = u64::from_str_radix(tail, radix).map_err(|_| ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0))?;
    let seg = Segment::single_value(value & 0xffff_ffff, radix, 0, whole.len());
    Ok(single_ipv4(seg, whole.len()))
}

fn parse_ipv4_decimal(options: &ParseOptions, whole: &str) -> ParseResult<AddressParseData> {
    if !options.allow_ipv4 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
    }
    if whole.len() > 11 {
        if options.ipv4.inet_aton_extraneous_digits {
            return parse_ipv4_extraneous(whole, whole, 10, 11);
        }
        return Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, 0));
    }
    // Open question (spec §9): a leading '0' in single-segment decimal is
    // kept as decimal even without `inet_aton_octal`, matching source
    // behavior, as long as the value still fits u32.
    let value: u64 = whole.parse().map_err(|_| ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0))?;
    if value > 0xffff_ffff {
        return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0));
    }
    let seg = Segment::single_value(value, 10, 0, whole.len());
    Ok(single_ipv4(seg, whole.len()))
}

fn parse_ipv6_hex_single(options: &ParseOptions, whole: &str, digits: &str) -> ParseResult<AddressParseData> {
    if !options.allow_ipv6 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
    }
    let (hi_digits, lo_digits) = digits.split_at(16);
    let hi = parse_hex_u64(whole, hi_digits)?;
    let lo = parse_hex_u64(whole, lo_digits)?;
    let mut seg = Segment::single_value(lo, 16, 0, whole.len());
    seg.lower_extended = hi;
    seg.upper_extended = hi;
    Ok(single_ipv6(seg, whole.len()))
}

fn parse_hex_u64(whole: &str, digits: &str) -> ParseResult<u64> {
    let mut value: u64 = 0;
    for &b in digits.as_bytes() {
        let d = hex_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCharacter, whole, 0))?;
        value = (value << 4) | d as u64;
    }
    Ok(value)
}

fn parse_mac_single(options: &ParseOptions, whole: &str) -> ParseResult<AddressParseData> {
    let size = if whole.len() == 16 { AddressSize::Eui64 } else { AddressSize::Mac48 };
    let byte_count = whole.len() / 2;
    let mut segments = Vec::with_capacity(byte_count);
    for i in 0..byte_count {
        let chunk = &whole[i * 2..i * 2 + 2];
        let value = parse_hex_u64(whole, chunk)?;
        segments.push(Segment::single_value(value, 16, i * 2, i * 2 + 2));
    }
    let mut data = AddressParseData::new(AddressKind::Mac, segments, whole.len());
    data.is_single_segment = true;
    data.mac_address_size = Some(size);
    let _ = options;
    Ok(data)
}

/// Base-85 single-segment IPv6 (spec §4.3.7): 20 digits for a single value,
/// 41 for a `lower~upper` range, 21 with one side inferred via a leading or
/// trailing `~`.
fn try_base85(options: &ParseOptions, whole: &str) -> ParseResult<Option<AddressParseData>> {
    if !options.allow_ipv6 || !options.ipv6.allow_base85 {
        return Ok(None);
    }
    let bytes = whole.as_bytes();
    if !bytes.iter().all(|&b| base85_digit_value(b).is_some() || b == b'~') {
        return Ok(None);
    }
    let tilde_count = bytes.iter().filter(|&&b| b == b'~').count();
    if tilde_count > 1 {
        return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, 0));
    }

    if tilde_count == 0 {
        if whole.len() != 20 {
            return Ok(None);
        }
        let value = decode_base85(whole)?;
        let mut seg = Segment::single_value((value & 0xffff_ffff_ffff_ffff) as u64, 85, 0, whole.len());
        seg.lower_extended = (value >> 64) as u64;
        seg.upper_extended = seg.lower_extended;
        seg.flags = SegmentFlags::empty();
        let mut data = single_ipv6(seg, whole.len());
        data.is_base85 = true;
        return Ok(Some(data));
    }

    let tilde_idx = bytes.iter().position(|&b| b == b'~').unwrap();
    if tilde_idx == 0 {
        // leading '~': inferred lower boundary, exactly 20 digits follow.
        if whole.len() != 21 {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, 0));
        }
        let upper = decode_base85(&whole[1..])?;
        let mut seg = Segment::single_value(0, 85, 0, whole.len());
        seg.upper = (upper & 0xffff_ffff_ffff_ffff) as u64;
        seg.upper_extended = (upper >> 64) as u64;
        seg.flags = SegmentFlags::INFERRED_LOWER_BOUNDARY;
        let mut data = single_ipv6(seg, whole.len());
        data.is_base85 = true;
        return Ok(Some(data));
    }
    if tilde_idx == whole.len() - 1 {
        // trailing '~': inferred upper boundary.
        if whole.len() != 21 {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, 0));
        }
        let lower = decode_base85(&whole[..tilde_idx])?;
        let mut seg = Segment::single_value((lower & 0xffff_ffff_ffff_ffff) as u64, 85, 0, whole.len());
        seg.lower_extended = (lower >> 64) as u64;
        seg.upper = u64::MAX;
        seg.upper_extended = u64::MAX;
        seg.flags = SegmentFlags::INFERRED_UPPER_BOUNDARY;
        let mut data = single_ipv6(seg, whole.len());
        data.is_base85 = true;
        return Ok(Some(data));
    }

    // interior '~': a full lower~upper range, 20 + 1 + 20 = 41 chars.
    if whole.len() != 41 || tilde_idx != 20 {
        return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, 0));
    }
    let lower = decode_base85(&whole[..20])?;
    let upper = decode_base85(&whole[21..])?;
    if lower > upper {
        return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, 0));
    }
    let mut seg = Segment::single_value((lower & 0xffff_ffff_ffff_ffff) as u64, 85, 0, whole.len());
    seg.lower_extended = (lower >> 64) as u64;
    seg.upper = (upper & 0xffff_ffff_ffff_ffff) as u64;
    seg.upper_extended = (upper >> 64) as u64;
    seg.flags = SegmentFlags::STANDARD_RANGE_STR;
    let mut data = single_ipv6(seg, whole.len());
    data.is_base85 = true;
    Ok(Some(data))
}

fn decode_base85(digits: &str) -> ParseResult<u128> {
    debug_assert_eq!(digits.len(), 20);
    let mut value: u128 = 0;
    for &b in digits.as_bytes() {
        let d = base85_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCharacter, digits, 0))?;
        value = value
            .checked_mul(85)
            .and_then(|v| v.checked_add(d as u128))
            .ok_or_else(|| ParseError::new(ParseErrorKind::AddressTooLarge, digits, 0))?;
    }
    let _ = BASE85_ALPHABET;
    Ok(value)
}

fn single_ipv4(seg: Segment, end: usize) -> AddressParseData {
    let mut data = AddressParseData::new(AddressKind::Ipv4, vec![seg], end);
    data.is_single_segment = true;
    data
}

fn single_ipv6(seg: Segment, end: usize) -> AddressParseData {
    let mut data = AddressParseData::new(AddressKind::Ipv6, vec![seg], end);
    data.is_single_segment = true;
    data
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        let mut o = ParseOptions::default();
        o.allow_single_segment = true;
        o
    }

    #[test]
    fn ipv4_decimal_joined() {
        let data = parse(&opts(), "3232235521").unwrap();
        assert_eq!(data.segments[0].lower, 3232235521);
    }

    #[test]
    fn ipv4_hex_joined() {
        let mut o = opts();
        o.ipv4.inet_aton_hex = true;
        let data = parse(&o, "0xC0A80001").unwrap();
        assert_eq!(data.segments[0].lower, 0xC0A80001);
    }

    #[test]
    fn ipv4_octal_joined() {
        let mut o = opts();
        o.ipv4.inet_aton_octal = true;
        let data = parse(&o, "030052000001").unwrap();
        assert_eq!(data.segments[0].lower, 0o30052000001);
    }

    #[test]
    fn ipv6_hex_single_segment() {
        let data = parse(&opts(), "20010db8000000000000000000000001").unwrap();
        assert_eq!(data.kind, AddressKind::Ipv6);
        assert_eq!(data.segments[0].lower, 1);
        assert_eq!(data.segments[0].lower_extended, 0x20010db800000000);
    }

    #[test]
    fn mac_single_segment() {
        let data = parse(&opts(), "aabbccddeeff").unwrap();
        assert_eq!(data.kind, AddressKind::Mac);
        assert_eq!(data.segments.len(), 6);
        assert_eq!(data.segments[0].lower, 0xaa);
    }

    #[test]
    fn eui64_single_segment() {
        let data = parse(&opts(), "aabbccddeeff0011").unwrap();
        assert_eq!(data.segments.len(), 8);
        assert_eq!(data.mac_address_size, Some(AddressSize::Eui64));
    }

    #[test]
    fn base85_single_value() {
        let mut o = opts();
        o.ipv6.allow_base85 = true;
        let input = format!("{}1", "0".repeat(19));
        let data = parse(&o, &input).unwrap();
        assert!(data.is_base85);
        assert_eq!(data.segments.len(), 1);
        assert_eq!(data.segments[0].lower, 1);
    }

    #[test]
    fn extraneous_digits_reduced_mod_2_32() {
        let mut o = opts();
        o.ipv4.inet_aton_extraneous_digits = true;
        let data = parse(&o, "99999999999999").unwrap();
        assert_eq!(data.segments[0].lower, "99999999999999"[14 - 11..].parse::<u64>().unwrap() & 0xffff_ffff);
    }
}
