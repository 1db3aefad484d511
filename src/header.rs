use std::io::Cursor;

use bitfield::bitfield;
use bytes::Buf;
use tracing::{instrument, warn};

use crate::{DnsError, Networkable};

bitfield! {
    #[derive(Clone, Copy, Default)]
    pub struct Flags(u16);
    impl Debug;
    u8;
    // query or response
    pub qr, set_qr: 15;
    // query type
    pub opcode, set_opcode: 14, 11;
    // authoritative answerer
    pub aa, set_aa: 10;
    // truncation
    pub tc, set_tc: 9;
    // recursion desired
    pub rd, set_rd: 8;
    // recursion available
    pub ra, set_ra: 7;
    // reserved
    pub z, set_z: 6, 4;
    // response code
    pub rcode, set_rcode: 3, 0;
}

impl Networkable for Flags {
    #[instrument(level = "trace", skip_all)]
    fn to_bytes(&self) -> Vec<u8> {
        self.0.to_be_bytes().to_vec()
    }

    #[instrument(level = "trace", skip_all)]
    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        if bytes.remaining() < 2 {
            return Err(DnsError::MalformedHeader);
        }

        Ok(Self(bytes.get_u16()))
    }
}

#[derive(Debug, Default)]
pub struct Header {
    pub id: u16,
    pub flags: Flags,
    pub num_questions: u16,
    pub num_answers: u16,
    pub num_authorities: u16,
    pub num_additionals: u16,
}

impl Header {
    pub fn new(id: u16, flags: Flags) -> Self {
        Self {
            id,
            flags,
            ..Default::default()
        }
    }
}

impl Networkable for Header {
    #[instrument(level = "trace", skip_all)]
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = Vec::with_capacity(12);
        ret.extend_from_slice(&self.id.to_be_bytes());
        ret.extend_from_slice(&self.flags.to_bytes());
        ret.extend_from_slice(&self.num_questions.to_be_bytes());
        ret.extend_from_slice(&self.num_answers.to_be_bytes());
        ret.extend_from_slice(&self.num_authorities.to_be_bytes());
        ret.extend_from_slice(&self.num_additionals.to_be_bytes());

        ret
    }

    #[instrument(level = "trace", skip_all)]
    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        if bytes.remaining() < 12 {
            warn!("insufficient remaining bytes for header");
            return Err(DnsError::MalformedHeader);
        }

        let id = bytes.get_u16();
        let flags = Flags::from_bytes(bytes)?;
        let num_questions = bytes.get_u16();
        let num_answers = bytes.get_u16();
        let num_authorities = bytes.get_u16();
        let num_additionals = bytes.get_u16();

        Ok(Self {
            id,
            flags,
            num_questions,
            num_answers,
            num_authorities,
            num_additionals,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_flags_set_recursion_only() {
        let mut flags = Flags::default();
        flags.set_rd(true);

        assert_eq!(flags.to_bytes(), [0x01, 0x00]);
        assert!(!flags.qr());
    }

    #[test]
    fn parses_response_flags() {
        let buf = [0x81, 0x80];
        let mut cursor = Cursor::new(&buf[..]);
        let flags = Flags::from_bytes(&mut cursor).unwrap();

        assert!(flags.qr());
        assert!(flags.rd());
        assert!(flags.ra());
        assert!(!flags.tc());
        assert_eq!(flags.rcode(), 0);
    }

    #[test]
    fn round_trips_header() {
        let mut header = Header::new(0x1234, Flags::default());
        header.num_questions = 1;
        header.num_answers = 2;

        let encoded = header.to_bytes();
        assert_eq!(encoded.len(), 12);

        let mut cursor = Cursor::new(&encoded[..]);
        let decoded = Header::from_bytes(&mut cursor).unwrap();

        assert_eq!(decoded.id, 0x1234);
        assert_eq!(decoded.num_questions, 1);
        assert_eq!(decoded.num_answers, 2);
        assert_eq!(decoded.num_authorities, 0);
        assert_eq!(decoded.num_additionals, 0);
        assert_eq!(cursor.position(), 12);
    }

    #[test]
    fn rejects_short_header() {
        let buf = [0u8; 11];
        let mut cursor = Cursor::new(&buf[..]);

        assert!(matches!(
            Header::from_bytes(&mut cursor),
            Err(DnsError::MalformedHeader)
        ));
    }
}
