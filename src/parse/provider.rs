//! Provider selection (spec §4.6): turns a parsed address plus its
//! qualifier into one of a small set of tagged outcomes.
//!
//! Grounded on spec §9's "tagged variants replacing the Java class
//! hierarchy" note: the source's `Empty`/`Loopback`/`All`/`Mask`/`Concrete`
//! provider class hierarchy becomes a plain sum type here, since Rust has no
//! use for the parent class the source needed only to dispatch virtual
//! calls.

use super::data::{AddressKind, AddressParseData};
use super::error::{ParseError, ParseErrorKind, ParseResult};
use super::options::ParseOptions;
use super::qualifier::Qualifier;

/// The outcome of parsing one address token plus its qualifier.
#[derive(Debug, Clone)]
pub enum AddressProvider {
    /// An empty string with no qualifier.
    Empty,
    /// An empty string parsed under `empty_is_loopback`.
    Loopback,
    /// A bare `/nnn` with no address (spec §3 `allow_prefix_only`).
    Mask { prefix_length: u32 },
    /// The literal `*`, version left to the caller/qualifier to resolve.
    AllAddresses { qualifier: Qualifier },
    /// A concrete, frozen address plus its qualifier.
    Concrete {
        data: AddressParseData,
        qualifier: Qualifier,
    },
}

/// Apply the spec §4.6 cross-cutting validations and choose a provider.
pub fn select(options: &ParseOptions, data: AddressParseData, qualifier: Qualifier) -> ParseResult<AddressProvider> {
    match data.kind {
        AddressKind::Empty => {
            if qualifier.prefix_length.is_some() && data.segments.is_empty() {
                if !options.allow_prefix_only {
                    return Err(ParseError::new(ParseErrorKind::PrefixOnlyNotAllowed, "", 0));
                }
                return Ok(AddressProvider::Mask {
                    prefix_length: qualifier.prefix_length.unwrap(),
                });
            }
            if !qualifier.is_empty() {
                return Err(ParseError::new(ParseErrorKind::OnlyZone, "", 0));
            }
            if options.empty_is_loopback {
                Ok(AddressProvider::Loopback)
            } else {
                Ok(AddressProvider::Empty)
            }
        }
        AddressKind::All => Ok(AddressProvider::AllAddresses { qualifier }),
        AddressKind::Ipv4 => {
            validate_ipv4(options, &data)?;
            Ok(AddressProvider::Concrete { data, qualifier })
        }
        AddressKind::Ipv6 => {
            validate_ipv6(&data)?;
            Ok(AddressProvider::Concrete { data, qualifier })
        }
        AddressKind::Mac => Ok(AddressProvider::Concrete { data, qualifier }),
    }
}

fn validate_ipv4(options: &ParseOptions, data: &AddressParseData) -> ParseResult<()> {
    let count = data.segment_count();
    if !data.is_single_segment {
        if count == 0 || count > 4 {
            return Err(ParseError::new(ParseErrorKind::TooManySegments, "", data.address_end_index));
        }
        if count < 4 && !options.ipv4.inet_aton_joined_segments {
            return Err(ParseError::new(ParseErrorKind::TooFewSegments, "", data.address_end_index));
        }
        let missing = 4 - count;
        let max = super::mega::ipv4_max_value(missing);
        if let Some(last) = data.segments.last() {
            if last.upper > max {
                return Err(ParseError::new(ParseErrorKind::Ipv4SegmentTooLarge, "", data.address_end_index));
            }
        }
    }
    if data.is_zoned {
        return Err(ParseError::new(ParseErrorKind::ZoneOnIpv4, "", data.address_end_index));
    }
    Ok(())
}

fn validate_ipv6(data: &AddressParseData) -> ParseResult<()> {
    if data.is_single_segment {
        return Ok(());
    }
    let count = data.segment_count();
    if count == 8 {
        return Ok(());
    }
    if count < 8 && data.consecutive_separator_index.is_some() {
        return Ok(());
    }
    if count < 8 {
        return Err(ParseError::new(ParseErrorKind::TooFewSegments, "", data.address_end_index));
    }
    Err(ParseError::new(ParseErrorKind::TooManySegments, "", data.address_end_index))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::mega;

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn concrete_ipv4() {
        let data = mega::parse(&opts(), "192.168.0.1", false).unwrap();
        let provider = select(&opts(), data, Qualifier::default()).unwrap();
        assert!(matches!(provider, AddressProvider::Concrete { .. }));
    }

    #[test]
    fn empty_is_loopback() {
        let mut o = opts();
        o.allow_empty = true;
        o.empty_is_loopback = true;
        let provider = select(&o, AddressParseData::empty(), Qualifier::default()).unwrap();
        assert!(matches!(provider, AddressProvider::Loopback));
    }

    #[test]
    fn all_addresses() {
        let mut o = opts();
        o.allow_all = true;
        let data = mega::parse(&o, "*", false).unwrap();
        let provider = select(&o, data, Qualifier::default()).unwrap();
        assert!(matches!(provider, AddressProvider::AllAddresses { .. }));
    }

    #[test]
    fn zoned_ipv4_rejected() {
        let mut data = mega::parse(&opts(), "192.168.0.1", false).unwrap();
        data.is_zoned = true;
        assert!(select(&opts(), data, Qualifier::default()).is_err());
    }
}
