//! Host-name validator (spec §4.5): the top-level driver that decides
//! whether a string denotes a bracketed or bare IP address, a reverse-DNS or
//! UNC-IPv6 special form, or a plain domain name, and then hands off to the
//! address mega-parser and the qualifier parser.
//!
//! Grounded in approach (not code) on the label/bracket/port scanning done
//! by URL parsers in `examples/other_examples` (`mleonhard-servlin`'s and
//! `tathyagarg-harbor`'s `url.rs`), since the teacher crate carries no
//! host-name parser of its own; the per-label validation loop follows the
//! same "walk once, validate at each separator" shape `parse::mega` uses for
//! addresses.

use super::chars::hex_digit_value;
use super::data::{AddressKind, AddressParseData, Segment, SegmentFlags};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::options::ParseOptions;
use super::qualifier::Qualifier;

const MAX_HOST_LEN: usize = 253;
const MAX_LABEL_LEN: usize = 63;

/// What a host string turned out to be, after validation.
#[derive(Debug, Clone)]
pub enum ParsedHost {
    Empty,
    Address {
        data: AddressParseData,
        qualifier: Qualifier,
    },
    Domain {
        labels: Vec<String>,
        root_terminated: bool,
        qualifier: Qualifier,
    },
}

pub fn parse(options: &ParseOptions, input: &str) -> ParseResult<ParsedHost> {
    if input.is_empty() {
        if options.host.allow_empty {
            return Ok(ParsedHost::Empty);
        }
        return Err(ParseError::new(ParseErrorKind::LabelEmpty, input, 0));
    }

    let effective_len = if input.len() == 254 && input.ends_with('.') { 253 } else { input.len() };
    if effective_len > MAX_HOST_LEN {
        return Err(ParseError::new(ParseErrorKind::HostTooLong, input, MAX_HOST_LEN));
    }

    let bytes = input.as_bytes();
    if bytes[0] == b'[' && input.len() > 2 {
        return parse_bracketed(options, input);
    }

    if let Some(result) = try_special_suffix(options, input)? {
        return Ok(result);
    }

    parse_unbracketed(options, input)
}

fn parse_bracketed(options: &ParseOptions, input: &str) -> ParseResult<ParsedHost> {
    let close = input.find(']').ok_or_else(|| ParseError::new(ParseErrorKind::BracketedMissingEnd, input, input.len()))?;
    let mut interior = &input[1..close];
    let suffix = &input[close + 1..];

    // SMTP literal form `[IPv6:...]`.
    if let Some(rest) = interior.strip_prefix("IPv6:").or_else(|| interior.strip_prefix("ipv6:")) {
        interior = rest;
    } else if interior.len() >= 2 && (interior.as_bytes()[0] == b'v' || interior.as_bytes()[0] == b'V') && interior.as_bytes()[1].is_ascii_hexdigit() {
        // IPvFuture (`[vA.something]`) is recognized but not supported.
        return Err(ParseError::new(ParseErrorKind::MechanismNotSupported, input, 1));
    }

    let is_ipv4_literal = !interior.contains(':') && interior.contains('.');
    if is_ipv4_literal {
        if !options.host.allow_bracketed_ipv4 {
            return Err(ParseError::new(ParseErrorKind::BracketedNotIpv6, input, 1));
        }
        let data = super::mega::parse(options, interior, false)?;
        let qualifier = super::qualifier::parse(options, input, suffix, close + 1, false)?;
        return Ok(ParsedHost::Address { data, qualifier });
    }

    // Percent-encoding of the `%` zone delimiter itself (`%25`) is required
    // inside brackets (spec §4.4); decode it back to a literal `%` first so
    // `ipv6_entry`'s own zone split sees the delimiter it expects.
    let decoded = super::chars::percent_decode_zone(interior)
        .ok_or_else(|| ParseError::new(ParseErrorKind::ZoneInvalid, input, 1))?;
    let data = super::mega::ipv6_entry(options, &decoded)?;
    let qualifier = super::qualifier::parse(options, input, suffix, close + 1, true)?;
    Ok(ParsedHost::Address { data, qualifier })
}

/// Special reverse-DNS and UNC-IPv6 suffixes (spec §4.5 point 5).
fn try_special_suffix(options: &ParseOptions, input: &str) -> ParseResult<Option<ParsedHost>> {
    let lower = input.to_ascii_lowercase();

    if let Some(prefix) = lower.strip_suffix(".in-addr.arpa") {
        return Ok(Some(parse_reverse_ipv4(options, input, prefix)?));
    }
    if let Some(prefix) = lower.strip_suffix(".ip6.arpa").or_else(|| lower.strip_suffix(".ip6.int")) {
        return Ok(Some(parse_reverse_ipv6(options, input, prefix)?));
    }
    if let Some(prefix) = lower.strip_suffix(".ipv6-literal.net") {
        return Ok(Some(parse_unc_ipv6(options, input, prefix)?));
    }
    Ok(None)
}

fn parse_reverse_ipv4(options: &ParseOptions, whole: &str, prefix: &str) -> ParseResult<ParsedHost> {
    let labels: Vec<&str> = prefix.split('.').collect();
    if labels.len() != 4 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
    }
    let mut octets = [String::new(), String::new(), String::new(), String::new()];
    let mut has_wildcard = false;
    for (i, label) in labels.iter().enumerate() {
        if *label == "*" {
            has_wildcard = true;
            octets[3 - i] = "*".to_string();
            continue;
        }
        let value = label.parse::<u8>().map_err(|_| ParseError::new(ParseErrorKind::DecimalDigitInvalid, whole, 0))?;
        octets[3 - i] = value.to_string();
    }
    if has_wildcard && !options.ipv4.range_options.allow_wildcard {
        return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, 0));
    }
    let rebuilt = format!("{}.{}.{}.{}", octets[0], octets[1], octets[2], octets[3]);
    // The nested parse needs `allow_wildcard` on to accept the reconstructed
    // `*` token; the check above already established the caller allows one.
    let parse_opts = if has_wildcard {
        let mut o = options.clone();
        o.ipv4.range_options.allow_wildcard = true;
        o
    } else {
        options.clone()
    };
    let data = super::mega::parse(&parse_opts, &rebuilt, false)?;
    Ok(ParsedHost::Address {
        data,
        qualifier: Qualifier::default(),
    })
}

/// Reassemble 32 reversed nibble labels into 8 16-bit groups, preserving a
/// `*` label as a wildcard rather than collapsing it to a literal digit
/// (spec §4.5 point 5). A `*` can land anywhere within a group's 4 nibbles,
/// not just at a group boundary, so groups are built directly as `Segment`s
/// here instead of round-tripping through `mega::ipv6::parse`'s text
/// grammar, which only recognizes a whole-group `*`.
fn parse_reverse_ipv6(options: &ParseOptions, whole: &str, prefix: &str) -> ParseResult<ParsedHost> {
    if !options.allow_ipv6 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
    }

    let labels: Vec<&str> = prefix.split('.').collect();
    if labels.len() != 32 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, whole, 0));
    }

    // Arpa labels run least-significant nibble first; reverse to get
    // most-significant-first order before grouping into 16-bit groups.
    let ordered: Vec<&str> = labels.iter().rev().copied().collect();
    for n in &ordered {
        if *n != "*" && (n.len() != 1 || !n.as_bytes()[0].is_ascii_hexdigit()) {
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, 0));
        }
    }

    let has_wildcard = ordered.iter().any(|n| *n == "*");
    if has_wildcard && !options.ipv6.range_options.allow_wildcard {
        return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, 0));
    }

    let mut segments = Vec::with_capacity(8);
    for chunk in ordered.chunks(4) {
        segments.push(reverse_ipv6_group(chunk));
    }

    let data = AddressParseData::new(AddressKind::Ipv6, segments, whole.len());
    Ok(ParsedHost::Address {
        data,
        qualifier: Qualifier::default(),
    })
}

fn reverse_ipv6_group(chunk: &[&str]) -> Segment {
    if chunk.iter().all(|n| *n == "*") {
        let mut seg = Segment::single_value(0, 16, 0, 0);
        seg.upper = 0xffff;
        seg.flags = SegmentFlags::WILDCARD;
        return seg;
    }

    let mut lower: u64 = 0;
    let mut upper: u64 = 0;
    let mut any_wildcard = false;
    for n in chunk {
        let (lo, hi) = if *n == "*" {
            any_wildcard = true;
            (0u64, 0xfu64)
        } else {
            let v = hex_digit_value(n.as_bytes()[0]).unwrap() as u64;
            (v, v)
        };
        lower = (lower << 4) | lo;
        upper = (upper << 4) | hi;
    }

    let mut seg = Segment::single_value(lower, 16, 0, 0);
    seg.upper = upper;
    if any_wildcard {
        seg.flags = SegmentFlags::WILDCARD;
    }
    seg
}

/// UNC IPv6 literal hosts (`2001-db8--1.ipv6-literal.net`): in-label `-`,
/// `s`, `.` stand in for `:`, `%`, `.` since those aren't legal in a DNS
/// label (spec §4.5 point 5).
fn parse_unc_ipv6(options: &ParseOptions, whole: &str, prefix: &str) -> ParseResult<ParsedHost> {
    let translated: String = prefix
        .chars()
        .map(|c| match c {
            '-' => ':',
            's' | 'S' => '%',
            other => other,
        })
        .collect();
    let data = super::mega::ipv6_entry(options, &translated).map_err(|e| ParseError::wrap(ParseErrorKind::InvalidCharacter, whole, 0, e))?;
    Ok(ParsedHost::Address {
        data,
        qualifier: Qualifier::default(),
    })
}

fn parse_unbracketed(options: &ParseOptions, input: &str) -> ParseResult<ParsedHost> {
    let (addr_part, suffix, suffix_offset) = super::qualifier::split_suffix(options, input);

    if let Some(host) = try_as_address(options, addr_part, suffix, suffix_offset)? {
        return Ok(host);
    }

    // A domain name still carries a port/service suffix (spec §4.5
    // "Host with port": `example.com:80`); a `/` qualifier never applies to
    // a domain name, since prefix/mask are address-only concepts.
    let qualifier = if suffix.starts_with(':') {
        super::qualifier::parse(options, input, suffix, suffix_offset, false)?
    } else if !suffix.is_empty() {
        return Err(ParseError::new(ParseErrorKind::CidrNotAllowed, input, suffix_offset));
    } else {
        Qualifier::default()
    };

    validate_domain(input, addr_part, qualifier)
}

fn try_as_address(options: &ParseOptions, addr_part: &str, suffix: &str, suffix_offset: usize) -> ParseResult<Option<ParsedHost>> {
    if !options.host.allow_ipaddress {
        return Ok(None);
    }

    let all_digits_and_dots = addr_part.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    let looks_ipv6 = addr_part.contains(':');

    if looks_ipv6 {
        return match super::mega::ipv6_entry(options, addr_part) {
            Ok(data) => {
                let qualifier = super::qualifier::parse(options, addr_part, suffix, suffix_offset, true)?;
                Ok(Some(ParsedHost::Address { data, qualifier }))
            }
            Err(e) => {
                // Retry treating the whole string (including the colon we
                // split on) as the address, with no qualifier — the
                // `expect_port = false` branch of the point-4 tie-break.
                if suffix.starts_with(':') {
                    let whole = format!("{}{}", addr_part, suffix);
                    if let Ok(data) = super::mega::ipv6_entry(options, &whole) {
                        return Ok(Some(ParsedHost::Address {
                            data,
                            qualifier: Qualifier::default(),
                        }));
                    }
                }
                Err(e)
            }
        };
    }

    if all_digits_and_dots && addr_part.contains('.') {
        return match super::mega::parse(options, addr_part, false) {
            Ok(data) => {
                let qualifier = super::qualifier::parse(options, addr_part, suffix, suffix_offset, false)?;
                Ok(Some(ParsedHost::Address { data, qualifier }))
            }
            Err(_) => Ok(None),
        };
    }

    Ok(None)
}

fn validate_domain(whole: &str, addr_part: &str, qualifier: Qualifier) -> ParseResult<ParsedHost> {
    let root_terminated = addr_part.ends_with('.');
    let trimmed = if root_terminated { &addr_part[..addr_part.len() - 1] } else { addr_part };

    if trimmed.is_empty() {
        return Err(ParseError::new(ParseErrorKind::LabelEmpty, whole, 0));
    }

    let mut labels = Vec::new();
    let mut offset = 0usize;
    for label in trimmed.split('.') {
        validate_label(whole, label, offset)?;
        labels.push(label.to_string());
        offset += label.len() + 1;
    }

    Ok(ParsedHost::Domain { labels, root_terminated, qualifier })
}

fn validate_label(whole: &str, label: &str, offset: usize) -> ParseResult<()> {
    if label.is_empty() {
        return Err(ParseError::new(ParseErrorKind::LabelEmpty, whole, offset));
    }
    if label.len() > MAX_LABEL_LEN {
        return Err(ParseError::new(ParseErrorKind::LabelTooLong, whole, offset));
    }
    let bytes = label.as_bytes();
    if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
        return Err(ParseError::new(ParseErrorKind::LabelHyphenPosition, whole, offset));
    }
    for &b in bytes {
        if !(b.is_ascii_alphanumeric() || b == b'-' || b == b'_') {
            return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn plain_domain() {
        match parse(&opts(), "example.com").unwrap() {
            ParsedHost::Domain { labels, root_terminated, qualifier } => {
                assert_eq!(labels, vec!["example", "com"]);
                assert!(!root_terminated);
                assert!(qualifier.is_empty());
            }
            _ => panic!("expected domain"),
        }
    }

    #[test]
    fn root_terminated_domain() {
        match parse(&opts(), "example.com.").unwrap() {
            ParsedHost::Domain { root_terminated, .. } => assert!(root_terminated),
            _ => panic!("expected domain"),
        }
    }

    #[test]
    fn label_too_long() {
        let label = "x".repeat(64);
        let host = format!("{}.com", label);
        assert!(matches!(parse(&opts(), &host), Err(e) if e.kind == ParseErrorKind::LabelTooLong));
    }

    #[test]
    fn host_with_port() {
        match parse(&opts(), "example.com:80").unwrap() {
            ParsedHost::Domain { labels, qualifier, .. } => {
                assert_eq!(labels, vec!["example", "com"]);
                assert_eq!(qualifier.port, Some(80));
            }
            _ => panic!("expected domain"),
        }
    }

    #[test]
    fn domain_port_out_of_range_rejected() {
        assert!(matches!(
            parse(&opts(), "example.com:99999"),
            Err(e) if e.kind == ParseErrorKind::PortOutOfRange
        ));
    }

    #[test]
    fn domain_service_name() {
        let mut o = opts();
        o.host.allow_service = true;
        match parse(&o, "example.com:http-alt").unwrap() {
            ParsedHost::Domain { qualifier, .. } => assert_eq!(qualifier.service.as_deref(), Some("http-alt")),
            _ => panic!("expected domain"),
        }
    }

    #[test]
    fn bracketed_ipv6_with_zone_and_port() {
        let mut o = opts();
        o.ipv6.allow_empty_zone = true;
        match parse(&o, "[fe80::1%25eth0]:80").unwrap() {
            ParsedHost::Address { data, qualifier } => {
                assert_eq!(data.zone.as_deref(), Some("eth0"));
                assert_eq!(qualifier.port, Some(80));
            }
            _ => panic!("expected address"),
        }
    }

    #[test]
    fn reverse_dns_ipv4() {
        match parse(&opts(), "1.0.168.192.in-addr.arpa").unwrap() {
            ParsedHost::Address { data, .. } => {
                let values: Vec<u64> = data.segments.iter().map(|s| s.lower).collect();
                assert_eq!(values, vec![192, 168, 0, 1]);
            }
            _ => panic!("expected address"),
        }
    }

    #[test]
    fn reverse_dns_ipv4_wildcard() {
        let mut o = opts();
        o.ipv4.range_options.allow_wildcard = true;
        match parse(&o, "*.0.168.192.in-addr.arpa").unwrap() {
            ParsedHost::Address { data, .. } => {
                assert!(data.segments[3].flags.contains(SegmentFlags::WILDCARD));
                assert_eq!(data.segments[3].lower, 0);
                assert_eq!(data.segments[3].upper, 255);
                let values: Vec<u64> = data.segments[..3].iter().map(|s| s.lower).collect();
                assert_eq!(values, vec![192, 168, 0]);
            }
            _ => panic!("expected address"),
        }
    }

    #[test]
    fn reverse_dns_ipv6_wildcard() {
        let mut o = opts();
        o.ipv6.range_options.allow_wildcard = true;
        let input = "*.*.*.*.1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa";
        match parse(&o, input).unwrap() {
            ParsedHost::Address { data, .. } => {
                assert_eq!(data.segments.len(), 8);
                assert!(data.segments[7].flags.contains(SegmentFlags::WILDCARD));
                assert_eq!(data.segments[7].lower, 0);
                assert_eq!(data.segments[7].upper, 0xffff);
                assert_eq!(data.segments[0].lower, 0x2001);
            }
            _ => panic!("expected address"),
        }
    }

    #[test]
    fn reverse_dns_ipv4_wildcard_rejected_by_default() {
        assert!(parse(&opts(), "*.0.168.192.in-addr.arpa").is_err());
    }

    #[test]
    fn reverse_dns_ipv6_wildcard_rejected_by_default() {
        let input = "*.*.*.*.1.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa";
        assert!(parse(&opts(), input).is_err());
    }

    #[test]
    fn unc_ipv6_literal() {
        match parse(&opts(), "2001-db8--1.ipv6-literal.net").unwrap() {
            ParsedHost::Address { data, .. } => {
                assert_eq!(data.segments.len(), 8);
                assert_eq!(data.segments[0].lower, 0x2001);
                assert_eq!(data.segments[7].lower, 1);
            }
            _ => panic!("expected address"),
        }
    }

    #[test]
    fn bare_ipv6_no_port() {
        match parse(&opts(), "2001:db8::1").unwrap() {
            ParsedHost::Address { data, qualifier } => {
                assert_eq!(data.segments.len(), 8);
                assert!(qualifier.is_empty());
            }
            _ => panic!("expected address"),
        }
    }
}
