//! IPv4 segment parsing (spec §4.3.2).

use crate::parse::chars::{binary_digit_value, decimal_digit_value, hex_digit_value, is_binary_delim, is_hex_delim, octal_digit_value};
use crate::parse::data::{AddressKind, AddressParseData, Segment, SegmentFlags};
use crate::parse::error::{ParseError, ParseErrorKind, ParseResult};
use crate::parse::options::{Ipv4Options, ParseOptions};

use super::ipv4_max_value;

/// One side of a segment (`lower` or the `upper` of a range), before it is
/// folded into a `Segment` record.
struct Side {
    value: u64,
    radix: u32,
    digits_start: usize,
    value_start: usize,
    end: usize,
    leading_zero: bool,
}

pub fn parse(_options: &ParseOptions, opts: &Ipv4Options, input: &str) -> ParseResult<AddressParseData> {
    let parts: Vec<(&str, usize)> = split_with_offsets(input, b'.');

    let min_segments = 1;
    let max_segments = 4;
    if parts.len() > max_segments {
        return Err(ParseError::new(ParseErrorKind::TooManySegments, input, 0));
    }
    if parts.len() < min_segments {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }
    if parts.len() < 4 && !opts.inet_aton_joined_segments {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }

    let missing = 4 - parts.len();
    let mut segments = Vec::with_capacity(parts.len());

    for (i, (part, offset)) in parts.iter().enumerate() {
        let is_last = i == parts.len() - 1;
        let max_for_segment = if is_last { ipv4_max_value(missing) } else { 0xff };
        let segment = parse_segment(opts, input, part, *offset, max_for_segment)?;
        segments.push(segment);
    }

    Ok(AddressParseData::new(AddressKind::Ipv4, segments, input.len()))
}

fn split_with_offsets(input: &str, sep: u8) -> Vec<(&str, usize)> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut start = 0usize;
    for i in 0..=bytes.len() {
        if i == bytes.len() || bytes[i] == sep {
            out.push((&input[start..i], start));
            start = i + 1;
        }
    }
    out
}

fn parse_segment(opts: &Ipv4Options, whole: &str, part: &str, offset: usize, max_value: u64) -> ParseResult<Segment> {
    if part.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptySegment, whole, offset));
    }

    if part == "*" {
        if !opts.range_options.allow_wildcard {
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset));
        }
        let mut seg = Segment::single_value(0, 10, offset, offset + 1);
        seg.upper = max_value;
        seg.flags = SegmentFlags::WILDCARD;
        return Ok(seg);
    }

    // single-character wildcard trailing run, e.g. "1_", "__"
    if opts.range_options.allow_single_wildcard {
        let trimmed = part.trim_end_matches('_');
        let wildcard_count = part.len() - trimmed.len();
        if wildcard_count > 0 {
            let (radix, base_str) = detect_radix(opts, trimmed)?;
            let base_value = if base_str.is_empty() { 0 } else {
                parse_digits(whole, base_str, offset, radix)?
            };
            let factor = (radix as u64).pow(wildcard_count as u32);
            let lower = base_value.saturating_mul(factor);
            let upper = lower + factor - 1;
            if upper > max_value {
                return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, offset));
            }
            let mut seg = Segment::single_value(lower, radix, offset, offset + part.len());
            seg.upper = upper;
            seg.flags = SegmentFlags::SINGLE_WILDCARD;
            return Ok(seg);
        }
    }

    if opts.range_options.allow_dash_range {
        if let Some(dash) = find_range_dash(part) {
            let (front, back) = (&part[..dash], &part[dash + 1..]);
            return parse_range(opts, whole, offset, front, back, dash, max_value);
        }
    }

    let side = parse_side(opts, whole, part, offset)?;
    if side.value > max_value {
        return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, offset));
    }
    let mut seg = Segment::single_value(side.value, side.radix, side.digits_start, side.end);
    seg.lower_value_start = side.value_start;
    seg.upper_value_start = side.value_start;
    seg.upper_digits_start = side.digits_start;
    if side.leading_zero {
        seg.flags = SegmentFlags::empty();
    }
    Ok(seg)
}

fn find_range_dash(part: &str) -> Option<usize> {
    // A leading '-' belongs to a negative-looking token we don't support;
    // only a dash with digits on both sides denotes a range.
    let bytes = part.as_bytes();
    bytes.iter().position(|&b| b == b'-').filter(|&i| i > 0 && i < bytes.len() - 1)
}

fn parse_range(
    opts: &Ipv4Options,
    whole: &str,
    offset: usize,
    front: &str,
    back: &str,
    dash_index: usize,
    max_value: u64,
) -> ParseResult<Segment> {
    let allow_empty_side = opts.range_options.allow_inferred_boundary;
    let mut flags = SegmentFlags::STANDARD_RANGE_STR;

    let front_side = if front.is_empty() {
        if !allow_empty_side {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, offset));
        }
        flags.set(SegmentFlags::INFERRED_LOWER_BOUNDARY);
        Side { value: 0, radix: 10, digits_start: offset, value_start: offset, end: offset, leading_zero: false }
    } else {
        parse_side(opts, whole, front, offset)?
    };

    let back_offset = offset + dash_index + 1;
    let back_side = if back.is_empty() {
        if !allow_empty_side {
            return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, offset));
        }
        flags.set(SegmentFlags::INFERRED_UPPER_BOUNDARY);
        Side { value: max_value, radix: 10, digits_start: back_offset, value_start: back_offset, end: back_offset, leading_zero: false }
    } else {
        parse_side(opts, whole, back, back_offset)?
    };

    let (lower, upper) = if front_side.value <= back_side.value {
        (front_side.value, back_side.value)
    } else if opts.range_options.allow_reverse_range {
        flags = SegmentFlags::empty();
        (back_side.value, front_side.value)
    } else {
        return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, offset));
    };

    if upper > max_value {
        return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, offset));
    }

    Ok(Segment {
        lower_digits_start: front_side.digits_start,
        lower_value_start: front_side.value_start,
        lower_end: front_side.end,
        upper_digits_start: back_side.digits_start,
        upper_value_start: back_side.value_start,
        upper_end: back_side.end,
        lower_radix: front_side.radix,
        upper_radix: back_side.radix,
        lower,
        upper,
        lower_extended: 0,
        upper_extended: 0,
        flags,
    })
}

fn parse_side(opts: &Ipv4Options, whole: &str, text: &str, offset: usize) -> ParseResult<Side> {
    let (radix, digits) = detect_radix(opts, text)?;
    let digits_start = offset + (text.len() - digits.len());
    let value = if digits.is_empty() { 0 } else { parse_digits(whole, digits, digits_start, radix)? };

    let leading_zero = digits.len() > 1 && digits.as_bytes()[0] == b'0';
    if leading_zero && radix == 10 && !opts.allow_leading_zeros && !opts.inet_aton_leading_zeros {
        return Err(ParseError::new(ParseErrorKind::LeadingZerosNotAllowed, whole, offset));
    }

    Ok(Side {
        value,
        radix,
        digits_start: offset,
        value_start: digits_start,
        end: offset + text.len(),
        leading_zero,
    })
}

/// Determine the radix of a textual segment and return the digits that
/// follow any radix prefix (spec §4.3.2, decision order 1..4).
fn detect_radix<'a>(opts: &Ipv4Options, text: &'a str) -> ParseResult<(u32, &'a str)> {
    let bytes = text.as_bytes();
    if bytes.len() >= 2 && bytes[0] == b'0' && is_hex_delim(bytes[1]) {
        if !opts.inet_aton_hex {
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, text, 0));
        }
        let digits = &text[2..];
        validate_digits(text, digits, hex_digit_value, ParseErrorKind::DecimalDigitInvalid)?;
        return Ok((16, digits));
    }
    if bytes.len() >= 2 && bytes[0] == b'0' && is_binary_delim(bytes[1]) && opts.allow_binary {
        let digits = &text[2..];
        validate_digits(text, digits, binary_digit_value, ParseErrorKind::BinaryDigitInvalid)?;
        return Ok((2, digits));
    }
    if bytes.len() >= 2 && bytes[0] == b'0' && opts.inet_aton_octal {
        let digits = &text[1..];
        validate_digits(text, digits, octal_digit_value, ParseErrorKind::OctalDigitInvalid)?;
        return Ok((8, digits));
    }
    validate_digits(text, text, decimal_digit_value, ParseErrorKind::DecimalDigitInvalid)?;
    Ok((10, text))
}

fn validate_digits(whole: &str, digits: &str, f: impl Fn(u8) -> Option<u8>, kind: ParseErrorKind) -> ParseResult<()> {
    if digits.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptySegment, whole, 0));
    }
    for &b in digits.as_bytes() {
        if f(b).is_none() {
            return Err(ParseError::new(kind, whole, 0));
        }
    }
    Ok(())
}

fn parse_digits(whole: &str, digits: &str, _offset: usize, radix: u32) -> ParseResult<u64> {
    u64::from_str_radix(digits, radix).map_err(|_| ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, whole, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::options::RangeOptions;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn dotted_decimal() {
        let data = parse(&opts(), &opts().ipv4, "192.168.0.1").unwrap();
        assert_eq!(data.segments.len(), 4);
        assert_eq!(data.segments[0].lower, 192);
        assert_eq!(data.segments[3].lower, 1);
    }

    #[test]
    fn dotted_hex_and_octal() {
        let mut o = opts();
        o.ipv4.inet_aton_hex = true;
        o.ipv4.inet_aton_octal = true;
        let data = parse(&o, &o.ipv4, "0300.0xA8.00.01").unwrap();
        let values: Vec<u64> = data.segments.iter().map(|s| s.lower).collect();
        assert_eq!(values, vec![192, 168, 0, 1]);
        assert_eq!(data.segments[0].lower_radix, 8);
        assert_eq!(data.segments[1].lower_radix, 16);
    }

    #[test]
    fn wildcard_and_range() {
        let mut o = opts();
        o.ipv4.range_options = RangeOptions::wildcard_and_dash();
        let data = parse(&o, &o.ipv4, "1-100.0-255.*.*").unwrap();
        assert_eq!(data.segments[0].lower, 1);
        assert_eq!(data.segments[0].upper, 100);
        assert!(data.segments[2].flags.contains(SegmentFlags::WILDCARD));
    }

    #[test]
    fn asymmetric_radix_range() {
        let mut o = opts();
        o.ipv4.inet_aton_hex = true;
        o.ipv4.inet_aton_joined_segments = true;
        o.ipv4.range_options = RangeOptions::dash_only();
        o.ipv4.allow_leading_zeros = true;
        o.allow_single_segment = false;
        let data = parse(&o, &o.ipv4, "0x10-20").unwrap();
        assert_eq!(data.segments.len(), 1);
        assert_eq!(data.segments[0].lower, 16);
        assert_eq!(data.segments[0].upper, 20);
        assert_eq!(data.segments[0].lower_radix, 16);
        assert_eq!(data.segments[0].upper_radix, 10);
    }

    #[test]
    fn too_many_segments() {
        assert!(parse(&opts(), &opts().ipv4, "1.2.3.4.5").is_err());
    }
}
