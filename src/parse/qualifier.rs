//! Qualifier parser: prefix-length, mask, port, and service suffixes
//! (spec §4.4). Zone extraction (`%text`) happens earlier, inside
//! `parse::mega::ipv6`, since a zone is lexically part of the address token
//! itself rather than a suffix that follows it; this module covers
//! everything that comes *after* the address proper.

use std::collections::HashMap;
use std::sync::Mutex;

use lazy_static::lazy_static;

use super::data::AddressParseData;
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::options::ParseOptions;

lazy_static! {
    /// Process-wide, append-only cache of validated prefix-length strings
    /// (spec §5 "parse cache (prefix-length ↦ qualifier)"). A race between
    /// readers just recomputes and overwrites with an equal value, so a
    /// plain `Mutex` is sufficient per the spec's own correctness note.
    static ref PREFIX_LENGTH_CACHE: Mutex<HashMap<(String, bool), u32>> = Mutex::new(HashMap::new());
}

fn cached_prefix_length(text: &str, is_ipv6: bool) -> Option<u32> {
    PREFIX_LENGTH_CACHE.lock().unwrap().get(&(text.to_string(), is_ipv6)).copied()
}

fn store_prefix_length(text: &str, is_ipv6: bool, value: u32) {
    PREFIX_LENGTH_CACHE.lock().unwrap().insert((text.to_string(), is_ipv6), value);
}

/// The combined suffix information attached to an address (spec §3
/// "Qualifier"): prefix length and/or mask, port, and/or service. Zone is
/// carried on `AddressParseData` directly (see module doc).
#[derive(Debug, Clone, Default)]
pub struct Qualifier {
    pub prefix_length: Option<u32>,
    pub mask: Option<Box<AddressParseData>>,
    pub port: Option<u16>,
    pub service: Option<String>,
}

impl Qualifier {
    pub fn is_empty(&self) -> bool {
        self.prefix_length.is_none() && self.mask.is_none() && self.port.is_none() && self.service.is_none()
    }
}

/// Decide where a bare address/host token ends and its qualifier suffix
/// begins (spec §4.4). A `/` unambiguously starts a prefix/mask qualifier.
/// Absent that, a lone `:` is a port/service separator; multiple `:` are
/// ambiguous with an unbracketed IPv6 address and are resolved via
/// `expect_port` (spec §4.5 point 4). Shared by the host validator and by
/// standalone address parsing, since both need the same split before
/// handing the address part to the mega-parser and the rest to [`parse`].
pub fn split_suffix<'a>(options: &ParseOptions, input: &'a str) -> (&'a str, &'a str, usize) {
    if let Some(slash) = input.find('/') {
        return (&input[..slash], &input[slash..], slash);
    }
    let colon_count = input.bytes().filter(|&b| b == b':').count();
    match colon_count {
        0 => (input, "", input.len()),
        1 => {
            let idx = input.find(':').unwrap();
            (&input[..idx], &input[idx..], idx)
        }
        _ => {
            if options.host.expect_port {
                let idx = input.rfind(':').unwrap();
                (&input[..idx], &input[idx..], idx)
            } else {
                (input, "", input.len())
            }
        }
    }
}

/// Parse everything after the address token. `suffix_offset` is the byte
/// index of `suffix` within the original full string, used for error
/// reporting.
pub fn parse(options: &ParseOptions, whole: &str, suffix: &str, suffix_offset: usize, is_ipv6: bool) -> ParseResult<Qualifier> {
    let mut q = Qualifier::default();
    let mut rest = suffix;
    let mut offset = suffix_offset;

    if let Some(stripped) = rest.strip_prefix('/') {
        let (consumed, next_offset) = parse_prefix_or_mask(options, whole, stripped, offset + 1, is_ipv6, &mut q)?;
        rest = &rest[1 + consumed..];
        offset = next_offset;
    }

    if let Some(stripped) = rest.strip_prefix(':') {
        if q.mask.is_some() {
            return Err(ParseError::new(ParseErrorKind::InvalidMask, whole, offset));
        }
        parse_port_or_service(options, whole, stripped, offset + 1, &mut q)?;
        rest = "";
    }

    if !rest.is_empty() {
        return Err(ParseError::new(ParseErrorKind::InvalidCharacter, whole, offset));
    }

    Ok(q)
}

fn parse_prefix_or_mask(
    options: &ParseOptions,
    whole: &str,
    text: &str,
    offset: usize,
    is_ipv6: bool,
    q: &mut Qualifier,
) -> ParseResult<(usize, usize)> {
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::PrefixSize, whole, offset));
    }

    // A CIDR prefix is the span of leading decimal digits. It's recognized
    // either when digits run to the end of `text` (plain `/24`), or when a
    // `:` immediately follows the digit run — the port-after-prefix
    // combination the spec calls out (`[::1]/64:80`). Anything else
    // address-shaped is tried as a mask below.
    let digit_len = text.bytes().take_while(|b| b.is_ascii_digit()).count();
    let looks_like_prefix = digit_len > 0 && (digit_len == text.len() || text.as_bytes()[digit_len] == b':');

    if looks_like_prefix {
        let digits = &text[..digit_len];
        if !options.allow_prefix {
            return Err(ParseError::new(ParseErrorKind::CidrNotAllowed, whole, offset));
        }
        let leading_zero = digits.len() > 1 && digits.as_bytes()[0] == b'0';
        if leading_zero && !options.allow_prefix_length_leading_zeros {
            // prefix-length leading zeros share the address family's
            // leading-zero policy per spec §3's
            // `allow_prefix_length_leading_zeros`.
            return Err(ParseError::new(ParseErrorKind::LeadingZerosNotAllowed, whole, offset));
        }
        let max_bits = options.max_bits(is_ipv6);
        let value = if let Some(v) = cached_prefix_length(digits, is_ipv6) {
            v
        } else {
            let v: u32 = digits
                .parse()
                .map_err(|_| ParseError::new(ParseErrorKind::PrefixSize, whole, offset))?;
            store_prefix_length(digits, is_ipv6, v);
            v
        };
        if value > max_bits {
            if options.allow_prefixes_beyond_address_size {
                q.prefix_length = Some(max_bits);
                return Ok((digit_len, offset + digit_len));
            }
            return Err(ParseError::new(ParseErrorKind::PrefixSize, whole, offset));
        }
        q.prefix_length = Some(value);
        return Ok((digit_len, offset + digit_len));
    }

    // Address-shaped: a dotted-decimal or colon-hex mask.
    if !options.allow_mask {
        return Err(ParseError::new(ParseErrorKind::InvalidMask, whole, offset));
    }
    if options.allow_single_segment && !text.contains(['.', ':']) {
        if !options.ipv4.inet_aton_single_segment_mask {
            return Err(ParseError::new(ParseErrorKind::MaskSingleSegment, whole, offset));
        }
    }

    let mut mask_opts = options.clone();
    mask_opts.ipv4.range_options = super::options::RangeOptions::none();
    mask_opts.ipv6.range_options = super::options::RangeOptions::none();
    mask_opts.allow_all = false;
    mask_opts.allow_empty = false;

    let nested = super::mega::parse(&mask_opts, text, false)
        .map_err(|e| ParseError::wrap(ParseErrorKind::InvalidCidrPrefixOrMask, whole, offset, e))?;

    let mask_is_ipv6 = matches!(nested.kind, super::data::AddressKind::Ipv6);
    if mask_is_ipv6 != is_ipv6 {
        return Err(ParseError::new(ParseErrorKind::IpVersionMismatch, whole, offset));
    }

    q.prefix_length = mask_prefix_length(&nested, is_ipv6);
    q.mask = Some(Box::new(nested));
    Ok((text.len(), offset + text.len()))
}

/// Infer a CIDR prefix length from a contiguous-ones mask, when possible
/// (e.g. `255.255.0.0` ⇒ 16). Returns `None` for a non-contiguous mask.
fn mask_prefix_length(mask: &AddressParseData, is_ipv6: bool) -> Option<u32> {
    let max_bits: u32 = if is_ipv6 { 128 } else { 32 };
    let bits_per_segment = max_bits / mask.segments.len().max(1) as u32;
    let mut value: u128 = 0;
    for seg in &mask.segments {
        value = (value << bits_per_segment) | (seg.lower as u128 & ((1u128 << bits_per_segment) - 1));
    }
    let all_ones: u128 = if max_bits == 128 { u128::MAX } else { (1u128 << max_bits) - 1 };
    let inverted = (!value) & all_ones;
    if inverted == 0 {
        return Some(max_bits);
    }
    if inverted & inverted.wrapping_add(1) == 0 {
        return Some(max_bits - inverted.count_ones());
    }
    None
}

fn parse_port_or_service(options: &ParseOptions, whole: &str, text: &str, offset: usize, q: &mut Qualifier) -> ParseResult<()> {
    if text.is_empty() {
        return Err(ParseError::new(ParseErrorKind::PortInvalid, whole, offset));
    }

    if text.bytes().all(|b| b.is_ascii_digit()) {
        if !options.host.allow_port {
            return Err(ParseError::new(ParseErrorKind::PortInvalid, whole, offset));
        }
        let value: u32 = text.parse().map_err(|_| ParseError::new(ParseErrorKind::PortInvalid, whole, offset))?;
        if value > 65535 {
            return Err(ParseError::new(ParseErrorKind::PortOutOfRange, whole, offset));
        }
        q.port = Some(value as u16);
        return Ok(());
    }

    if !options.host.allow_service {
        return Err(ParseError::new(ParseErrorKind::ServiceInvalid, whole, offset));
    }
    validate_service_name(whole, text, offset)?;
    q.service = Some(text.to_string());
    Ok(())
}

/// Service names: up to 15 chars, letters/digits/hyphen, at least one
/// letter, no leading/trailing hyphen, no consecutive hyphens (spec §4.4).
fn validate_service_name(whole: &str, text: &str, offset: usize) -> ParseResult<()> {
    if text.len() > 15 {
        return Err(ParseError::new(ParseErrorKind::ServiceInvalid, whole, offset));
    }
    let bytes = text.as_bytes();
    if bytes[0] == b'-' || bytes[bytes.len() - 1] == b'-' {
        return Err(ParseError::new(ParseErrorKind::ServiceInvalid, whole, offset));
    }
    let mut has_letter = false;
    let mut prev_hyphen = false;
    for &b in bytes {
        let is_hyphen = b == b'-';
        if is_hyphen && prev_hyphen {
            return Err(ParseError::new(ParseErrorKind::ServiceInvalid, whole, offset));
        }
        if b.is_ascii_alphabetic() {
            has_letter = true;
        } else if !b.is_ascii_digit() && !is_hyphen {
            return Err(ParseError::new(ParseErrorKind::ServiceInvalid, whole, offset));
        }
        prev_hyphen = is_hyphen;
    }
    if !has_letter {
        return Err(ParseError::new(ParseErrorKind::ServiceInvalid, whole, offset));
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
    fn prefix_length() {
        let q = parse(&opts(), "10.0.0.0/8", "/8", 8, false).unwrap();
        assert_eq!(q.prefix_length, Some(8));
    }

    #[test]
    fn port_only() {
        let q = parse(&opts(), "example.com:80", ":80", 11, false).unwrap();
        assert_eq!(q.port, Some(80));
    }

    #[test]
    fn port_out_of_range() {
        assert!(parse(&opts(), "h:99999", ":99999", 1, false).is_err());
    }

    #[test]
    fn service_name() {
        let mut o = opts();
        o.host.allow_service = true;
        let q = parse(&o, "h:http-alt", ":http-alt", 1, false).unwrap();
        assert_eq!(q.service.as_deref(), Some("http-alt"));
    }

    #[test]
    fn service_name_rejected_by_default() {
        assert!(parse(&opts(), "h:http-alt", ":http-alt", 1, false).is_err());
    }

    #[test]
    fn mask_as_dotted_address() {
        let mut o = opts();
        o.allow_mask = true;
        let q = parse(&o, "1.2.3.4/255.255.0.0", "/255.255.0.0", 8, false).unwrap();
        assert_eq!(q.prefix_length, Some(16));
    }

    #[test]
    fn prefix_plus_port_combo() {
        let q = parse(&opts(), "x/64:80", "/64:80", 1, true).unwrap();
        assert_eq!(q.prefix_length, Some(64));
        assert_eq!(q.port, Some(80));
    }
}
