//! The parser's single error family (spec §7).

use crate::error::AddrFormatError;
use thiserror::Error;

/// Every distinguishable failure class the validator can report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    InvalidCharacter,
    TooFewSegments,
    TooManySegments,
    SegmentTooLong,
    SegmentTooShort,
    EmptySegment,
    LeadingZerosNotAllowed,
    BinaryDigitInvalid,
    OctalDigitInvalid,
    DecimalDigitInvalid,
    InvalidRange,
    Ipv4SegmentTooLarge,
    AddressTooLarge,
    AmbiguousIpv6,
    MixedNotAllowed,
    Ipv6SeparatorInIpv4,
    Ipv4InIpv6,
    IpVersionMismatch,
    ZoneInvalid,
    ZoneEmpty,
    OnlyZone,
    ZoneOnIpv4,
    PrefixSize,
    InvalidMask,
    MaskSingleSegment,
    CidrNotAllowed,
    PrefixOnlyNotAllowed,
    PortInvalid,
    PortOutOfRange,
    ServiceInvalid,
    HostTooLong,
    LabelTooLong,
    LabelEmpty,
    LabelHyphenPosition,
    BracketedMissingEnd,
    BracketedNotIpv6,
    MechanismNotSupported,
    InvalidCidrPrefixOrMask,
}

impl ParseErrorKind {
    fn message(&self) -> &'static str {
        use ParseErrorKind::*;
        match self {
            InvalidCharacter => "unexpected character",
            TooFewSegments => "too few segments",
            TooManySegments => "too many segments",
            SegmentTooLong => "segment too long",
            SegmentTooShort => "segment too short",
            EmptySegment => "empty segment",
            LeadingZerosNotAllowed => "leading zeros not allowed",
            BinaryDigitInvalid => "invalid binary digit",
            OctalDigitInvalid => "invalid octal digit",
            DecimalDigitInvalid => "invalid decimal digit",
            InvalidRange => "invalid range",
            Ipv4SegmentTooLarge => "IPv4 segment value too large",
            AddressTooLarge => "address value too large",
            AmbiguousIpv6 => "ambiguous use of '::'",
            MixedNotAllowed => "mixed IPv4-in-IPv6 notation not allowed",
            Ipv6SeparatorInIpv4 => "IPv6 separator found while parsing IPv4",
            Ipv4InIpv6 => "unexpected IPv4 segment while parsing IPv6",
            IpVersionMismatch => "address and qualifier are of different IP versions",
            ZoneInvalid => "invalid zone identifier",
            ZoneEmpty => "empty zone identifier",
            OnlyZone => "zone present without an address",
            ZoneOnIpv4 => "zone identifier is not valid on an IPv4 address",
            PrefixSize => "prefix length out of range",
            InvalidMask => "invalid mask",
            MaskSingleSegment => "single-segment mask not allowed",
            CidrNotAllowed => "CIDR prefix not allowed",
            PrefixOnlyNotAllowed => "prefix-only form not allowed",
            PortInvalid => "invalid port",
            PortOutOfRange => "port out of range",
            ServiceInvalid => "invalid service name",
            HostTooLong => "host name too long",
            LabelTooLong => "label too long",
            LabelEmpty => "empty label",
            LabelHyphenPosition => "label may not start or end with a hyphen",
            BracketedMissingEnd => "missing closing ']'",
            BracketedNotIpv6 => "bracketed host must contain an IPv6 address",
            MechanismNotSupported => "address mechanism not supported",
            InvalidCidrPrefixOrMask => "invalid CIDR prefix or mask",
        }
    }
}

/// A parse failure at a precise byte index, with optional nested cause.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{kind}: {} at index {index} in {input:?}", .kind.message())]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub input: String,
    pub index: usize,
    pub nested: Option<Box<ParseError>>,
}

// thiserror needs Display on the field used inside `#[error(...)]` format
// args only when referenced directly; `kind` is referenced via method call
// above, so it doesn't need Display itself, but keep one for convenience.
impl std::fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, input: impl Into<String>, index: usize) -> Self {
        Self {
            kind,
            input: input.into(),
            index,
            nested: None,
        }
    }

    pub fn wrap(kind: ParseErrorKind, input: impl Into<String>, index: usize, nested: ParseError) -> Self {
        Self {
            kind,
            input: input.into(),
            index,
            nested: Some(Box::new(nested)),
        }
    }
}

impl From<ParseError> for AddrFormatError {
    fn from(e: ParseError) -> Self {
        AddrFormatError::new(e.to_string())
    }
}

/// Result type for the parser core.
pub type ParseResult<T> = Result<T, ParseError>;
