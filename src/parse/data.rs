//! The central parse record (spec §3, §4.2).
//!
//! A single pass over the input fills in one `Segment` per address token and
//! a handful of overall flags, then the record is frozen: everything after
//! this point only reads it.

use super::options::AddressSize;

/// Per-segment bit flags (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SegmentFlags(u16);

impl SegmentFlags {
    pub const STANDARD_STR: Self = Self(1 << 0);
    pub const STANDARD_RANGE_STR: Self = Self(1 << 1);
    pub const RANGE_WILDCARD: Self = Self(1 << 2);
    pub const SINGLE_WILDCARD: Self = Self(1 << 3);
    pub const WILDCARD: Self = Self(1 << 4);
    pub const INFERRED_LOWER_BOUNDARY: Self = Self(1 << 5);
    pub const INFERRED_UPPER_BOUNDARY: Self = Self(1 << 6);
    pub const MERGED_MIXED: Self = Self(1 << 7);

    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn set(&mut self, flag: Self) {
        self.0 |= flag.0;
    }

    pub fn contains(&self, flag: Self) -> bool {
        self.0 & flag.0 != 0
    }

    pub fn clear(&mut self, flag: Self) {
        self.0 &= !flag.0;
    }

    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

/// One parsed segment: a single IPv4 octet, IPv6 group, or MAC byte/group,
/// possibly a range or wildcard (spec §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Segment {
    pub lower_digits_start: usize,
    pub lower_value_start: usize,
    pub lower_end: usize,
    pub upper_digits_start: usize,
    pub upper_value_start: usize,
    pub upper_end: usize,

    pub lower_radix: u32,
    pub upper_radix: u32,

    pub lower: u64,
    pub lower_extended: u64,
    pub upper: u64,
    pub upper_extended: u64,

    pub flags: SegmentFlags,
}

impl Segment {
    pub fn single_value(value: u64, radix: u32, start: usize, end: usize) -> Self {
        Self {
            lower_digits_start: start,
            lower_value_start: start,
            lower_end: end,
            upper_digits_start: start,
            upper_value_start: start,
            upper_end: end,
            lower_radix: radix,
            upper_radix: radix,
            lower: value,
            upper: value,
            flags: SegmentFlags::STANDARD_STR,
            ..Default::default()
        }
    }

    pub fn is_range(&self) -> bool {
        self.lower != self.upper || self.lower_extended != self.upper_extended
    }
}

/// What family of address `AddressParseData` describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    Ipv4,
    Ipv6,
    Mac,
    Empty,
    All,
}

/// The frozen result of one pass over the input (spec §3 "AddressParseData").
#[derive(Debug, Clone)]
pub struct AddressParseData {
    pub kind: AddressKind,
    pub segments: Vec<Segment>,

    pub is_single_segment: bool,
    pub is_zoned: bool,
    pub is_base85_zoned: bool,
    pub is_base85: bool,
    pub has_prefix_separator: bool,

    pub consecutive_separator_index: Option<usize>,
    pub consecutive_separator_segment_index: Option<usize>,

    pub address_end_index: usize,
    pub qualifier_index: Option<usize>,

    pub mixed_parsed_address: Option<Box<AddressParseData>>,

    pub mac_address_size: Option<AddressSize>,
    pub zone: Option<String>,
}

impl AddressParseData {
    pub fn empty() -> Self {
        Self {
            kind: AddressKind::Empty,
            segments: Vec::new(),
            is_single_segment: false,
            is_zoned: false,
            is_base85_zoned: false,
            is_base85: false,
            has_prefix_separator: false,
            consecutive_separator_index: None,
            consecutive_separator_segment_index: None,
            address_end_index: 0,
            qualifier_index: None,
            mixed_parsed_address: None,
            mac_address_size: None,
            zone: None,
        }
    }

    pub fn all(address_end_index: usize) -> Self {
        Self {
            kind: AddressKind::All,
            address_end_index,
            ..Self::empty()
        }
    }

    pub fn new(kind: AddressKind, segments: Vec<Segment>, address_end_index: usize) -> Self {
        Self {
            kind,
            segments,
            address_end_index,
            ..Self::empty()
        }
    }

    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    pub fn has_range(&self) -> bool {
        self.segments.iter().any(|s| s.is_range() || s.flags.contains(SegmentFlags::WILDCARD))
    }
}
