//! IPv4 header decoding
//!
//! The fixed twenty bytes are decoded field by field with `sequence`; the
//! options that follow are sized by the IHL field through `chain`.

use crate::binary::{Bits, Endianness, bits, take, u8, u16, u32};
use crate::chain::ChainExt;
use crate::constant::fail;
use crate::error::{GrammarError, ParseError};
use crate::map::MapExt;
use crate::parser::{BoxedExt, BoxedParser, Parser};
use crate::sequence::sequence;
use serde::Serialize;
use std::net::Ipv4Addr;

/// Header length in 32-bit words when there are no options
const MINIMUM_IHL: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ipv4Header {
    pub version: u8,
    pub ihl: u8,
    pub dscp: u8,
    pub ecn: u8,
    pub total_length: u16,
    pub identification: u16,
    pub flags: u8,
    pub fragment_offset: u16,
    pub ttl: u8,
    pub protocol: u8,
    pub checksum: u16,
    pub source: Ipv4Addr,
    pub destination: Ipv4Addr,
    pub options: Vec<u8>,
}

impl Ipv4Header {
    /// Header length in bytes, options included
    pub fn header_len(&self) -> usize {
        usize::from(self.ihl) * 4
    }
}

type Version = (u32, u32, u32, u32, u16);
type Fragmentation = (u16, u32, u32, u8, u8, u16);
type Addresses = (u32, u32);

fn with_options(
    (version, fragmentation, addresses): (Version, Fragmentation, Addresses),
) -> BoxedParser<u8, Ipv4Header> {
    let (version, ihl, dscp, ecn, total_length) = version;
    let (identification, flags, fragment_offset, ttl, protocol, checksum) = fragmentation;
    let (source, destination) = addresses;

    // Every bit field is masked to at most 13 bits
    let ihl = ihl as u8;
    if ihl < MINIMUM_IHL {
        return fail(format!("IHL {ihl} is below the minimum of {MINIMUM_IHL}")).boxed();
    }

    let header = Ipv4Header {
        version: version as u8,
        ihl,
        dscp: dscp as u8,
        ecn: ecn as u8,
        total_length,
        identification,
        flags: flags as u8,
        fragment_offset: fragment_offset as u16,
        ttl,
        protocol,
        checksum,
        source: Ipv4Addr::from(source),
        destination: Ipv4Addr::from(destination),
        options: Vec::new(),
    };

    let option_bytes = usize::from(ihl - MINIMUM_IHL) * 4;
    take(option_bytes)
        .map(move |options| Ipv4Header {
            options,
            ..header.clone()
        })
        .boxed()
}

/// Parser for one IPv4 header, options included
///
/// Fails with a custom error when IHL is below 5.
pub fn ipv4_header()
-> Result<impl Parser<Element = u8, Output = Ipv4Header, Error = ParseError> + Clone, GrammarError>
{
    let version = sequence((
        bits(0xF0)?.increment(false),
        bits(0x0F)?,
        bits(0xFC)?.increment(false),
        bits(0x03)?,
        u16(Endianness::Big),
    ));
    let fragmentation = sequence((
        u16(Endianness::Big),
        Bits::with_width(0xE000, 2)?.increment(false),
        Bits::with_width(0x1FFF, 2)?,
        u8(),
        u8(),
        u16(Endianness::Big),
    ));
    let addresses = sequence((u32(Endianness::Big), u32(Endianness::Big)));

    Ok(sequence((version, fragmentation, addresses)).chain(with_options))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PACKET: [u8; 20] = [
        0x45, 0x00, 0x00, 0x44, // version, IHL, DSCP, ECN, total length
        0xAD, 0x0B, 0x00, 0x00, // identification, flags, fragment offset
        0x40, 0x11, 0x72, 0x72, // TTL, protocol, checksum
        0xAC, 0x14, 0x02, 0xFD, // source
        0xAC, 0x14, 0x00, 0x06, // destination
    ];

    #[test]
    fn test_decodes_fixed_header() {
        let state = ipv4_header().unwrap().run(&PACKET);
        let header = state.result().unwrap();

        assert_eq!(header.version, 4);
        assert_eq!(header.ihl, 5);
        assert_eq!(header.dscp, 0);
        assert_eq!(header.ecn, 0);
        assert_eq!(header.total_length, 68);
        assert_eq!(header.identification, 0xAD0B);
        assert_eq!(header.flags, 0);
        assert_eq!(header.fragment_offset, 0);
        assert_eq!(header.ttl, 64);
        assert_eq!(header.protocol, 0x11);
        assert_eq!(header.checksum, 0x7272);
        assert_eq!(header.source, Ipv4Addr::new(172, 20, 2, 253));
        assert_eq!(header.destination, Ipv4Addr::new(172, 20, 0, 6));
        assert!(header.options.is_empty());
        assert_eq!(state.position(), 20);
    }

    #[test]
    fn test_options_sized_by_ihl() {
        let mut packet = PACKET.to_vec();
        packet[0] = 0x46;
        packet.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0xFF]);

        let state = ipv4_header().unwrap().run(&packet);

        assert_eq!(state.result().map(|h| h.options.clone()), Some(vec![0x01, 0x01, 0x00, 0x00]));
        assert_eq!(state.result().map(Ipv4Header::header_len), Some(24));
        assert_eq!(state.position(), 24);
    }

    #[test]
    fn test_flags_and_fragment_offset_share_a_word() {
        let mut packet = PACKET;
        packet[6] = 0x40 | 0x01;
        packet[7] = 0x23;

        let header = ipv4_header().unwrap().run(&packet).into_result().unwrap();

        assert_eq!(header.flags, 0b010);
        assert_eq!(header.fragment_offset, 0x0123);
    }

    #[test]
    fn test_ihl_below_minimum() {
        let mut packet = PACKET;
        packet[0] = 0x44;

        let state = ipv4_header().unwrap().run(&packet);
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some("IHL 4 is below the minimum of 5 at index 20".to_string())
        );
    }

    #[test]
    fn test_truncated_options() {
        let mut packet = PACKET.to_vec();
        packet[0] = 0x47;

        let state = ipv4_header().unwrap().run(&packet);
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some(
                "tried to match 8 byte(s), but got unexpected end of input at index 20".to_string()
            )
        );
    }

    #[test]
    fn test_truncated_fixed_fields() {
        let state = ipv4_header().unwrap().run(&PACKET[..10]);
        assert!(state.is_error());
        assert_eq!(state.position(), 10);
    }

    #[test]
    fn test_serializes_addresses_as_text() {
        let header = ipv4_header().unwrap().run(&PACKET).into_result().unwrap();
        let json = serde_json::to_value(&header).unwrap();

        assert_eq!(json["source"], "172.20.2.253");
        assert_eq!(json["total_length"], 68);
    }
}
