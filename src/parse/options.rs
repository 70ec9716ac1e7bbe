//! Parse option records (spec §3 "Parse options").
//!
//! These are plain configuration data, not read from environment or files.
//! Each family (IPv4 / IPv6 / MAC / host) gets its own struct so callers can
//! be precise about which notations they want to accept, mirroring the
//! per-family constants already carried in `core.rs`.

/// How a segment may express a range of values.
///
/// Several of these can be meaningful together (e.g. a dash range that is
/// also allowed to be written in reverse), so this is a small set of flags
/// rather than a strict enum, even though the spec describes it as
/// enumerated presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeOptions {
    pub allow_wildcard: bool,
    pub allow_dash_range: bool,
    pub allow_reverse_range: bool,
    pub allow_single_wildcard: bool,
    pub allow_inferred_boundary: bool,
}

impl RangeOptions {
    pub const fn none() -> Self {
        Self {
            allow_wildcard: false,
            allow_dash_range: false,
            allow_reverse_range: false,
            allow_single_wildcard: false,
            allow_inferred_boundary: false,
        }
    }

    pub const fn wildcard_only() -> Self {
        Self {
            allow_wildcard: true,
            ..Self::none()
        }
    }

    pub const fn dash_only() -> Self {
        Self {
            allow_dash_range: true,
            ..Self::none()
        }
    }

    pub const fn wildcard_and_dash() -> Self {
        Self {
            allow_wildcard: true,
            allow_dash_range: true,
            ..Self::none()
        }
    }

    pub const fn full() -> Self {
        Self {
            allow_wildcard: true,
            allow_dash_range: true,
            allow_reverse_range: true,
            allow_single_wildcard: true,
            allow_inferred_boundary: true,
        }
    }

    pub const fn any_range(&self) -> bool {
        self.allow_wildcard || self.allow_dash_range
    }
}

impl Default for RangeOptions {
    fn default() -> Self {
        Self::none()
    }
}

/// MAC / EUI address width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressSize {
    Mac48,
    Eui64,
}

/// IPv4-specific format parameters (spec §3, §4.3.2).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ipv4Options {
    pub allow_leading_zeros: bool,
    pub allow_unlimited_leading_zeros: bool,
    pub allow_wildcarded_separator: bool,
    pub allow_binary: bool,
    pub inet_aton_hex: bool,
    pub inet_aton_octal: bool,
    pub inet_aton_leading_zeros: bool,
    pub inet_aton_joined_segments: bool,
    pub inet_aton_single_segment_mask: bool,
    pub inet_aton_extraneous_digits: bool,
    pub range_options: RangeOptions,
}

impl Default for Ipv4Options {
    fn default() -> Self {
        Self {
            allow_leading_zeros: true,
            allow_unlimited_leading_zeros: false,
            allow_wildcarded_separator: true,
            allow_binary: false,
            inet_aton_hex: false,
            inet_aton_octal: false,
            inet_aton_leading_zeros: false,
            inet_aton_joined_segments: false,
            inet_aton_single_segment_mask: false,
            inet_aton_extraneous_digits: false,
            range_options: RangeOptions::none(),
        }
    }
}

impl Ipv4Options {
    /// All `inet_aton` extensions enabled (classic BSD `inet_aton` semantics).
    pub fn inet_aton() -> Self {
        Self {
            allow_leading_zeros: true,
            allow_unlimited_leading_zeros: false,
            allow_wildcarded_separator: true,
            allow_binary: true,
            inet_aton_hex: true,
            inet_aton_octal: true,
            inet_aton_leading_zeros: true,
            inet_aton_joined_segments: true,
            inet_aton_single_segment_mask: true,
            inet_aton_extraneous_digits: true,
            range_options: RangeOptions::none(),
        }
    }

    /// Strict `inet_pton` semantics: exactly four decimal octets, no leading zeros.
    pub fn inet_pton() -> Self {
        Self {
            allow_leading_zeros: false,
            allow_unlimited_leading_zeros: false,
            allow_wildcarded_separator: false,
            allow_binary: false,
            inet_aton_hex: false,
            inet_aton_octal: false,
            inet_aton_leading_zeros: false,
            inet_aton_joined_segments: false,
            inet_aton_single_segment_mask: false,
            inet_aton_extraneous_digits: false,
            range_options: RangeOptions::none(),
        }
    }
}

/// IPv6-specific format parameters (spec §3, §4.3.3).
#[derive(Debug, Clone)]
pub struct Ipv6Options {
    pub allow_leading_zeros: bool,
    pub allow_unlimited_leading_zeros: bool,
    pub allow_wildcarded_separator: bool,
    pub allow_binary: bool,
    pub allow_mixed: bool,
    pub allow_zone: bool,
    pub allow_empty_zone: bool,
    pub allow_base85: bool,
    pub range_options: RangeOptions,
    pub mixed_parameters: Box<Ipv4Options>,
}

impl Default for Ipv6Options {
    fn default() -> Self {
        Self {
            allow_leading_zeros: true,
            allow_unlimited_leading_zeros: false,
            allow_wildcarded_separator: true,
            allow_binary: false,
            allow_mixed: true,
            allow_zone: true,
            allow_empty_zone: false,
            allow_base85: false,
            range_options: RangeOptions::none(),
            mixed_parameters: Box::new(Ipv4Options::default()),
        }
    }
}

/// MAC / EUI-64 specific format parameters (spec §3, §4.3.6).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MacOptions {
    pub address_size: AddressSize,
    pub allow_dashed: bool,
    pub allow_colon_delimited: bool,
    pub allow_dotted: bool,
    pub allow_space_delimited: bool,
    pub allow_single_dashed: bool,
    pub allow_short_segments: bool,
    pub range_options: RangeOptions,
}

impl Default for MacOptions {
    fn default() -> Self {
        Self {
            address_size: AddressSize::Mac48,
            allow_dashed: true,
            allow_colon_delimited: true,
            allow_dotted: true,
            allow_space_delimited: true,
            allow_single_dashed: true,
            allow_short_segments: false,
            range_options: RangeOptions::none(),
        }
    }
}

/// Host-specific parameters (spec §3, §4.5).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostOptions {
    pub allow_port: bool,
    pub allow_service: bool,
    pub allow_bracketed_ipv4: bool,
    pub allow_empty: bool,
    pub allow_ipaddress: bool,
    pub normalize_to_lowercase: bool,
    pub expect_port: bool,
}

impl Default for HostOptions {
    fn default() -> Self {
        Self {
            allow_port: true,
            allow_service: false,
            allow_bracketed_ipv4: false,
            allow_empty: false,
            allow_ipaddress: true,
            normalize_to_lowercase: true,
            expect_port: false,
        }
    }
}

/// Top-level parse options (spec §3).
#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub allow_ipv4: bool,
    pub allow_ipv6: bool,
    pub allow_empty: bool,
    pub allow_all: bool,
    pub allow_single_segment: bool,
    pub allow_prefix: bool,
    pub allow_mask: bool,
    pub allow_prefix_only: bool,
    pub allow_prefixes_beyond_address_size: bool,
    pub allow_prefix_length_leading_zeros: bool,
    pub empty_is_loopback: bool,

    pub ipv4: Ipv4Options,
    pub ipv6: Ipv6Options,
    pub mac: MacOptions,
    pub host: HostOptions,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            allow_ipv4: true,
            allow_ipv6: true,
            allow_empty: false,
            allow_all: false,
            allow_single_segment: false,
            allow_prefix: true,
            allow_mask: true,
            allow_prefix_only: false,
            allow_prefixes_beyond_address_size: false,
            allow_prefix_length_leading_zeros: false,
            empty_is_loopback: false,
            ipv4: Ipv4Options::default(),
            ipv6: Ipv6Options::default(),
            mac: MacOptions::default(),
            host: HostOptions::default(),
        }
    }
}

impl ParseOptions {
    pub fn max_bits(&self, is_ipv6: bool) -> u32 {
        if is_ipv6 {
            128
        } else {
            32
        }
    }
}
