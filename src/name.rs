use std::fmt::Display;
use std::io::Cursor;

use bytes::Buf;

use crate::{DnsError, Networkable};

/// Longest label a single length byte can describe.
const MAX_LABEL_LEN: usize = 63;
/// Longest presentation-form name accepted for encoding.
const MAX_NAME_LEN: usize = 253;
/// Pointer chases allowed while decoding one name; exceeding this means a
/// pointer cycle.
const MAX_POINTER_HOPS: usize = 16;

/// A domain name in presentation form, e.g. `www.example.com`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct Name(pub String);

impl Name {
    pub fn new(name: &str) -> Result<Self, DnsError> {
        if name.len() > MAX_NAME_LEN {
            return Err(DnsError::Encoding(name.to_owned()));
        }

        for label in name.split('.') {
            if label.is_empty() || label.len() > MAX_LABEL_LEN || !label.is_ascii() {
                return Err(DnsError::Encoding(name.to_owned()));
            }
        }

        Ok(Self(name.to_owned()))
    }
}

impl Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl Networkable for Name {
    fn to_bytes(&self) -> Vec<u8> {
        let mut ret = Vec::new();

        for section in self.0.split('.') {
            ret.push(section.len() as u8);
            ret.extend_from_slice(section.as_bytes());
        }

        ret.push(0);

        ret
    }

    fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        let buf_len = bytes.get_ref().len() as u64;
        let mut parts: Vec<String> = Vec::new();
        let mut hops = 0;
        // Position just past the name's bytes in the current record,
        // recorded at the first pointer. The bytes at a jump target belong
        // to an earlier part of the message, so they never count towards
        // this name's span.
        let mut resume_at = None;

        loop {
            if bytes.remaining() < 1 {
                return Err(DnsError::MalformedName);
            }

            let len = bytes.get_u8() as usize;
            if len == 0 {
                break;
            }

            if (len & 0b1100_0000) >> 6 == 0b11 {
                // Compressed
                if bytes.remaining() < 1 {
                    return Err(DnsError::MalformedName);
                }

                let pointer = (((len & 0b0011_1111) as u64) << 8) | (bytes.get_u8() as u64);
                if pointer >= buf_len {
                    return Err(DnsError::MalformedName);
                }

                hops += 1;
                if hops > MAX_POINTER_HOPS {
                    return Err(DnsError::CompressionLoop);
                }

                if resume_at.is_none() {
                    resume_at = Some(bytes.position());
                }
                bytes.set_position(pointer);
            } else {
                // Uncompressed
                if bytes.remaining() < len {
                    return Err(DnsError::MalformedName);
                }

                let chars = bytes.copy_to_bytes(len);
                let s = std::str::from_utf8(&chars).or(Err(DnsError::MalformedName))?;
                parts.push(s.to_owned());
            }
        }

        if let Some(position) = resume_at {
            bytes.set_position(position);
        }

        Ok(Self(parts.join(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_labels() {
        let name = Name::new("example.com").unwrap();

        assert_eq!(name.to_bytes(), b"\x07example\x03com\x00");
    }

    #[test]
    fn decodes_inline_name() {
        let buf = b"\x07example\x03com\x00";
        let mut cursor = Cursor::new(&buf[..]);
        let name = Name::from_bytes(&mut cursor).unwrap();

        assert_eq!(name.0, "example.com");
        assert_eq!(cursor.position(), 13);
    }

    #[test]
    fn round_trips() {
        let name = Name::new("www.google.com").unwrap();
        let encoded = name.to_bytes();
        let mut cursor = Cursor::new(&encoded[..]);

        assert_eq!(Name::from_bytes(&mut cursor).unwrap(), name);
        assert_eq!(cursor.position(), encoded.len() as u64);
    }

    #[test]
    fn resolves_pointer() {
        let mut buf = b"\x07example\x03com\x00".to_vec();
        buf.extend_from_slice(&[0xC0, 0x00]);

        let mut cursor = Cursor::new(&buf[..]);
        cursor.set_position(13);
        let name = Name::from_bytes(&mut cursor).unwrap();

        assert_eq!(name.0, "example.com");
        // The name's own span is the two pointer bytes, not the target's.
        assert_eq!(cursor.position(), 15);
    }

    #[test]
    fn resolves_pointer_after_labels() {
        let mut buf = b"\x07example\x03com\x00".to_vec();
        buf.extend_from_slice(b"\x03www\xC0\x00");

        let mut cursor = Cursor::new(&buf[..]);
        cursor.set_position(13);
        let name = Name::from_bytes(&mut cursor).unwrap();

        assert_eq!(name.0, "www.example.com");
        assert_eq!(cursor.position(), 19);
    }

    #[test]
    fn rejects_truncated_label() {
        let buf = b"\x07exam";
        let mut cursor = Cursor::new(&buf[..]);

        assert!(matches!(
            Name::from_bytes(&mut cursor),
            Err(DnsError::MalformedName)
        ));
    }

    #[test]
    fn rejects_missing_terminator() {
        let buf = b"\x03com";
        let mut cursor = Cursor::new(&buf[..]);

        assert!(matches!(
            Name::from_bytes(&mut cursor),
            Err(DnsError::MalformedName)
        ));
    }

    #[test]
    fn rejects_pointer_past_end() {
        let buf = [0xC0, 0x20];
        let mut cursor = Cursor::new(&buf[..]);

        assert!(matches!(
            Name::from_bytes(&mut cursor),
            Err(DnsError::MalformedName)
        ));
    }

    #[test]
    fn detects_pointer_cycle() {
        // A pointer targeting its own offset re-reads itself forever
        // without the hop bound.
        let buf = [0xC0, 0x00];
        let mut cursor = Cursor::new(&buf[..]);

        assert!(matches!(
            Name::from_bytes(&mut cursor),
            Err(DnsError::CompressionLoop)
        ));
    }

    #[test]
    fn rejects_oversized_label() {
        let long = "a".repeat(64);

        assert!(matches!(Name::new(&long), Err(DnsError::Encoding(_))));
    }

    #[test]
    fn rejects_empty_label() {
        assert!(Name::new("example..com").is_err());
        assert!(Name::new("").is_err());
    }

    #[test]
    fn rejects_oversized_name() {
        let long = ["abcdefgh"; 32].join(".");

        assert!(Name::new(&long).is_err());
    }
}
