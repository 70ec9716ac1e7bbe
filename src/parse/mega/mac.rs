//! MAC / EUI-64 parsing (spec §4.3.6).

use crate::parse::chars::hex_digit_value;
use crate::parse::data::{AddressKind, AddressParseData, Segment, SegmentFlags};
use crate::parse::error::{ParseError, ParseErrorKind, ParseResult};
use crate::parse::options::{AddressSize, MacOptions, ParseOptions};

pub fn parse(options: &ParseOptions, input: &str) -> ParseResult<AddressParseData> {
    let mopts = &options.mac;
    let size = mopts.address_size;
    let expected_groups = match size {
        AddressSize::Mac48 => 6,
        AddressSize::Eui64 => 8,
    };

    let sep = detect_separator(mopts, input)?;

    let mut data = match sep {
        Separator::Colon | Separator::Dash | Separator::Space => {
            let byte_groups = split_delimited(input, sep.as_byte());
            if byte_groups.len() != expected_groups {
                return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
            }
            parse_byte_groups(mopts, input, &byte_groups)?
        }
        Separator::Dotted => {
            let word_groups = split_delimited(input, b'.');
            let expected_words = expected_groups / 2;
            if word_groups.len() != expected_words {
                return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
            }
            parse_word_groups(mopts, input, &word_groups)?
        }
        Separator::SingleDash => {
            let parts = split_delimited(input, b'-');
            if parts.len() != 2 {
                return Err(ParseError::new(ParseErrorKind::InvalidRange, input, 0));
            }
            parse_single_dashed(mopts, input, parts[0], parts[1])?
        }
    };

    data.mac_address_size = Some(size);
    Ok(data)
}

enum Separator {
    Colon,
    Dash,
    Dotted,
    Space,
    SingleDash,
}

impl Separator {
    fn as_byte(&self) -> u8 {
        match self {
            Separator::Colon => b':',
            Separator::Dash => b'-',
            Separator::Dotted => b'.',
            Separator::Space => b' ',
            Separator::SingleDash => b'-',
        }
    }
}

/// Decide which of the notations (colon/dash/dotted/space/single-dashed) the
/// input uses, by counting occurrences of each candidate separator (spec
/// §4.3.6 disambiguation).
fn detect_separator(mopts: &MacOptions, input: &str) -> ParseResult<Separator> {
    let bytes = input.as_bytes();
    let colons = bytes.iter().filter(|&&b| b == b':').count();
    let dots = bytes.iter().filter(|&&b| b == b'.').count();
    let dashes = bytes.iter().filter(|&&b| b == b'-').count();
    let spaces = bytes.iter().filter(|&&b| b == b' ').count();

    if colons > 0 && mopts.allow_colon_delimited {
        return Ok(Separator::Colon);
    }
    if spaces > 0 && mopts.allow_space_delimited {
        return Ok(Separator::Space);
    }
    if dots > 0 && mopts.allow_dotted {
        return Ok(Separator::Dotted);
    }
    if dashes == 1 && mopts.allow_single_dashed {
        return Ok(Separator::SingleDash);
    }
    if dashes > 0 && mopts.allow_dashed {
        return Ok(Separator::Dash);
    }

    Err(ParseError::new(ParseErrorKind::InvalidCharacter, input, 0))
}

fn split_delimited(input: &str, sep: u8) -> Vec<&str> {
    let bytes = input.as_bytes();
    let mut out = Vec::new();
    let mut start = 0usize;
    for i in 0..=bytes.len() {
        if i == bytes.len() || bytes[i] == sep {
            out.push(&input[start..i]);
            start = i + 1;
        }
    }
    out
}

fn parse_byte_groups(mopts: &MacOptions, whole: &str, groups: &[&str]) -> ParseResult<AddressParseData> {
    let mut segments = Vec::with_capacity(groups.len());
    let mut offset = 0usize;
    for g in groups {
        segments.push(parse_hex_group(mopts, whole, g, offset, 2)?);
        offset += g.len() + 1;
    }
    Ok(AddressParseData::new(AddressKind::Mac, segments, whole.len()))
}

fn parse_word_groups(mopts: &MacOptions, whole: &str, groups: &[&str]) -> ParseResult<AddressParseData> {
    let mut segments = Vec::with_capacity(groups.len() * 2);
    let mut offset = 0usize;
    for g in groups {
        if g.len() != 4 && !mopts.allow_short_segments {
            return Err(ParseError::new(ParseErrorKind::SegmentTooShort, whole, offset));
        }
        let word = parse_hex_group(mopts, whole, g, offset, 4)?;
        let hi = (word.lower >> 8) & 0xff;
        let lo = word.lower & 0xff;
        segments.push(Segment::single_value(hi, 16, word.lower_digits_start, word.lower_digits_start + 2));
        segments.push(Segment::single_value(lo, 16, word.lower_digits_start + 2, word.lower_end));
        offset += g.len() + 1;
    }
    Ok(AddressParseData::new(AddressKind::Mac, segments, whole.len()))
}

/// A single-dash "range" MAC form: two 12-hex-digit single-segment
/// addresses joined by one dash, denoting an address range rather than one
/// address (spec §4.3.6, `allow_single_dashed`).
fn parse_single_dashed(mopts: &MacOptions, whole: &str, front: &str, back: &str) -> ParseResult<AddressParseData> {
    let digits = if mopts.address_size == AddressSize::Eui64 { 16 } else { 12 };
    if front.len() != digits || back.len() != digits {
        return Err(ParseError::new(ParseErrorKind::SegmentTooShort, whole, 0));
    }
    let lower = parse_single_segment_value(whole, front, 0)?;
    let upper = parse_single_segment_value(whole, back, front.len() + 1)?;
    if lower > upper {
        return Err(ParseError::new(ParseErrorKind::InvalidRange, whole, 0));
    }

    let bytes_count = digits / 2;
    let mut segments = Vec::with_capacity(bytes_count);
    for i in 0..bytes_count {
        let shift = (bytes_count - 1 - i) * 8;
        let lo_byte = (lower >> shift) & 0xff;
        let hi_byte = (upper >> shift) & 0xff;
        let mut seg = Segment::single_value(lo_byte, 16, 0, 0);
        seg.upper = hi_byte;
        seg.flags = SegmentFlags::STANDARD_RANGE_STR;
        segments.push(seg);
    }
    Ok(AddressParseData::new(AddressKind::Mac, segments, whole.len()))
}

fn parse_single_segment_value(whole: &str, text: &str, offset: usize) -> ParseResult<u128> {
    let mut value: u128 = 0;
    for &b in text.as_bytes() {
        let d = hex_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset))?;
        value = (value << 4) | d as u128;
    }
    Ok(value)
}

fn parse_hex_group(_mopts: &MacOptions, whole: &str, text: &str, offset: usize, expected_digits: usize) -> ParseResult<Segment> {
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::EmptySegment, whole, offset));
    }
    if text.len() > expected_digits {
        return Err(ParseError::new(ParseErrorKind::SegmentTooLong, whole, offset));
    }
    let mut value: u64 = 0;
    for &b in text.as_bytes() {
        let d = hex_digit_value(b).ok_or_else(|| ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset))?;
        value = (value << 4) | d as u64;
    }
    Ok(Segment::single_value(value, 16, offset, offset + text.len()))
}
