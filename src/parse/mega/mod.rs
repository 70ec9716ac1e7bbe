//! The single-pass address validator (spec §4.3 "Mega-parser").
//!
//! Implemented as a classify-then-parse-per-family pipeline rather than one
//! literal character-dispatch loop threading registers through every
//! family at once — spec §9 ("Design Notes") explicitly allows an
//! equivalent state-machine shaped implementation as long as the
//! observable outcomes and errors match §4 and §7. Each family's parser
//! still walks its input exactly once, tracking start/end indices and
//! radix per segment the way §4.3's register list describes.

mod ipv4;
mod ipv6;
mod mac;
mod single;

use super::data::AddressParseData;
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::options::ParseOptions;

/// Which address family a bare (qualifier-stripped) string looks like,
/// decided by a cheap pre-scan of its separator characters (spec §4.5's
/// `possibly_ipv4`/`possibly_ipv6` flags generalized to also cover MAC).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Family {
    Ipv4,
    Ipv6,
    Mac,
    /// A bare colon with no dot: colon-delimited MAC (`01:23:45:67:89:ab`)
    /// and IPv6 share this separator, so the two are tried in turn.
    ColonAmbiguous,
    SingleSegment,
}

fn classify(s: &str) -> Family {
    let bytes = s.as_bytes();
    let has_colon = bytes.contains(&b':');
    let has_dot = bytes.contains(&b'.');
    let has_dash = bytes.contains(&b'-');
    let has_space = bytes.contains(&b' ');
    let has_pipe = bytes.contains(&b'|');

    if has_colon && has_dot {
        // A dot only ever appears alongside a colon for embedded-IPv4 IPv6
        // (MAC never mixes colon and dot separators).
        Family::Ipv6
    } else if has_colon {
        Family::ColonAmbiguous
    } else if has_space || has_pipe {
        Family::Mac
    } else if has_dot {
        Family::Ipv4
    } else if has_dash {
        // Ambiguous between a MAC dashed address and a single-segment
        // range (`0x10-20`); the per-family parsers themselves decide,
        // trying MAC first since a bare dash with no other separator is
        // overwhelmingly a MAC notation.
        Family::Mac
    } else {
        Family::SingleSegment
    }
}

/// Parse one address token (no qualifier suffix) per spec §4.3.
///
/// `is_embedded_ipv4` is true only for the recursive IPv4-tail parse inside
/// a mixed IPv6 address (spec §4.3.8); the recursion is bounded to depth 1
/// by construction, since embedded tails are always parsed with the
/// top-level `allow_mixed` check already consumed.
pub fn parse(options: &ParseOptions, input: &str, is_embedded_ipv4: bool) -> ParseResult<AddressParseData> {
    if input.is_empty() {
        return Ok(AddressParseData::empty());
    }

    if input.bytes().all(|b| b == b'*') {
        if input.len() <= 19 {
            if options.allow_all {
                return Ok(AddressParseData::all(input.len()));
            }
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, input, 0));
        }
        // exactly 20 '*' falls through to base-85 single-segment handling.
    }

    match classify(input) {
        Family::Ipv4 if is_embedded_ipv4 || options.allow_ipv4 => ipv4::parse(options, &options.ipv4, input),
        Family::Ipv6 if options.allow_ipv6 => ipv6::parse(options, input),
        Family::ColonAmbiguous => {
            if options.allow_ipv6 {
                match ipv6::parse(options, input) {
                    Ok(data) => Ok(data),
                    Err(ipv6_err) => mac::parse(options, input).or(Err(ipv6_err)),
                }
            } else {
                mac::parse(options, input)
            }
        }
        Family::Mac => {
            match mac::parse(options, input) {
                Ok(data) => Ok(data),
                Err(mac_err) => {
                    // A dash here may not be MAC notation at all: a single-segment
                    // asymmetric-radix range (`0x10-20`) uses the same separator,
                    // so both IPv4 and the plain single-segment reading are tried
                    // before giving up, regardless of whether a dash is present.
                    if options.allow_ipv4 {
                        if let Ok(data) = ipv4::parse(options, &options.ipv4, input) {
                            return Ok(data);
                        }
                    }
                    if options.allow_single_segment {
                        single::parse(options, input)
                    } else {
                        Err(mac_err)
                    }
                }
            }
        }
        Family::SingleSegment => single::parse(options, input),
        _ => Err(ParseError::new(ParseErrorKind::InvalidCharacter, input, 0)),
    }
}

/// Parse `input` directly as IPv6, bypassing the family pre-scan in
/// `parse()`. Used by the host validator for contexts where the family is
/// already known from surrounding syntax (bracketed hosts, UNC-IPv6
/// literals, reverse-DNS `ip6.arpa` reconstruction).
pub fn ipv6_entry(options: &ParseOptions, input: &str) -> ParseResult<AddressParseData> {
    if !options.allow_ipv6 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, input, 0));
    }
    ipv6::parse(options, input)
}

pub(super) fn ipv4_max_value(missing_segments: usize) -> u64 {
    const TABLE: [u64; 4] = [0xff, 0xffff, 0xffffff, 0xffffffff];
    TABLE[missing_segments.min(3)]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::data::AddressKind;
    use crate::parse::options::RangeOptions;

    #[test]
    fn asymmetric_radix_range_through_dispatcher() {
        let mut o = ParseOptions::default();
        o.ipv4.inet_aton_hex = true;
        o.ipv4.inet_aton_joined_segments = true;
        o.ipv4.range_options = RangeOptions::dash_only();
        o.ipv4.allow_leading_zeros = true;
        let data = parse(&o, "0x10-20", false).unwrap();
        assert_eq!(data.kind, AddressKind::Ipv4);
        assert_eq!(data.segments.len(), 1);
        assert_eq!(data.segments[0].lower, 16);
        assert_eq!(data.segments[0].upper, 20);
    }
}
