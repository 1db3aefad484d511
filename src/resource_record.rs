use std::io::Cursor;
use std::net::Ipv4Addr;

use bytes::Buf;
use tracing::{debug, instrument};

use crate::{DnsError, Name, Networkable, RecordType};

#[derive(Debug, Clone)]
pub struct ResourceRecord {
    pub name: Name,
    pub type_: RecordType,
    pub class: u16,
    pub ttl: u32,
    pub rd_length: u16,
    pub data: RecordData,
}

#[derive(Debug, Clone)]
pub enum RecordData {
    A(Ipv4Addr),
    Cname(Name),
    Soa {
        mname: Name,
        rname: Name,
        serial: u32,
        refresh: u32,
        retry: u32,
        expire: u32,
        minimum: u32,
    },
    Unknown(Vec<u8>),
}

impl ResourceRecord {
    #[instrument(level = "trace", skip_all)]
    pub fn from_bytes(bytes: &mut Cursor<&[u8]>) -> Result<Self, DnsError> {
        let name = Name::from_bytes(bytes)?;

        if bytes.remaining() < 10 {
            return Err(DnsError::TruncatedRecord);
        }

        let type_ = RecordType::from(bytes.get_u16());
        let class = bytes.get_u16();
        let ttl = bytes.get_u32();
        let rd_length = bytes.get_u16();

        if bytes.remaining() < rd_length as usize {
            return Err(DnsError::TruncatedRecord);
        }

        // A compressed name in the data can leave the cursor short of the
        // declared length; the next record starts after RDLENGTH bytes
        // either way.
        let data_end = bytes.position() + rd_length as u64;
        let data = RecordData::from_bytes(type_, rd_length, bytes)?;
        bytes.set_position(data_end);

        Ok(Self {
            name,
            type_,
            class,
            ttl,
            rd_length,
            data,
        })
    }
}

impl RecordData {
    pub fn from_bytes(
        type_: RecordType,
        rd_length: u16,
        bytes: &mut Cursor<&[u8]>,
    ) -> Result<Self, DnsError> {
        match type_ {
            RecordType::A => {
                if rd_length != 4 {
                    return Err(DnsError::TruncatedRecord);
                }

                Ok(Self::A(Ipv4Addr::from(bytes.get_u32())))
            }

            RecordType::Cname => Ok(Self::Cname(Name::from_bytes(bytes)?)),

            RecordType::Soa => {
                let mname = Name::from_bytes(bytes)?;
                let rname = Name::from_bytes(bytes)?;

                if bytes.remaining() < 20 {
                    return Err(DnsError::TruncatedRecord);
                }

                let serial = bytes.get_u32();
                let refresh = bytes.get_u32();
                let retry = bytes.get_u32();
                let expire = bytes.get_u32();
                let minimum = bytes.get_u32();

                Ok(Self::Soa {
                    mname,
                    rname,
                    serial,
                    refresh,
                    retry,
                    expire,
                    minimum,
                })
            }

            RecordType::Unknown(code) => {
                debug!("keeping record data of unhandled type {} raw", code);

                Ok(Self::Unknown(
                    bytes.copy_to_bytes(rd_length as usize).to_vec(),
                ))
            }
        }
    }
}
