//! Unified address/host string validator and parser.
//!
//! This module is the core described by the specification this crate
//! implements: a single-pass validator that classifies a string as IPv4,
//! IPv6, MAC/EUI-64, base-85, empty, or "all", and a host-name layer built
//! on top of it. It hands a frozen [`data::AddressParseData`] (or, for
//! hosts, a [`host::ParsedHost`]) to the rest of the crate; concrete value
//! construction and arithmetic stay in `ip::` and `eui::` as before.

pub mod build;
pub mod chars;
pub mod data;
pub mod error;
pub mod host;
mod mega;
pub mod options;
pub mod provider;
pub mod qualifier;

pub use data::{AddressKind, AddressParseData};
pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use host::ParsedHost;
pub use options::ParseOptions;
pub use provider::AddressProvider;
pub use qualifier::Qualifier;

/// Parse a single address token, including its qualifier suffix (spec
/// §4.3/§4.4), then run it through provider selection (spec §4.6). A zone
/// (`%text`) is not split here: it's lexically part of the address token
/// itself and is consumed inside `mega::parse`'s IPv6 handling.
pub fn parse_address(options: &ParseOptions, input: &str) -> ParseResult<AddressProvider> {
    if input.is_empty() {
        return provider::select(options, AddressParseData::empty(), Qualifier::default());
    }

    let (addr_part, suffix, suffix_offset) = qualifier::split_suffix(options, input);

    // A bare qualifier with no address at all (`/24`): spec §3
    // `allow_prefix_only`.
    if addr_part.is_empty() {
        let qualifier = qualifier::parse(options, input, suffix, suffix_offset, false)?;
        return provider::select(options, AddressParseData::empty(), qualifier);
    }

    match mega::parse(options, addr_part, false) {
        Ok(mut data) => {
            let is_ipv6 = data.kind == AddressKind::Ipv6;
            let qualifier = qualifier::parse(options, input, suffix, suffix_offset, is_ipv6)?;
            if !suffix.is_empty() {
                data.qualifier_index = Some(suffix_offset);
            }
            provider::select(options, data, qualifier)
        }
        Err(addr_err) => {
            // The split may have cut at a colon that wasn't really a
            // qualifier boundary (e.g. a MAC/IPv6 token with exactly one
            // `:` where a port was never intended); retry the whole string
            // as a bare address before giving up.
            if suffix.starts_with(':') {
                if let Ok(data) = mega::parse(options, input, false) {
                    return provider::select(options, data, Qualifier::default());
                }
            }
            Err(addr_err)
        }
    }
}

/// Parse a host string (spec §4.5), returning the driver's own
/// [`ParsedHost`] classification rather than collapsing straight to a
/// provider, since a host may also be a domain name.
pub fn parse_host(options: &ParseOptions, input: &str) -> ParseResult<ParsedHost> {
    host::parse(options, input)
}
