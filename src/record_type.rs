use std::fmt::Display;

/// Record types this crate decodes, plus a catch-all keeping the numeric
/// code of anything else for opaque reporting.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    Cname,
    Soa,
    Unknown(u16),
}

impl RecordType {
    pub fn to_u16(self) -> u16 {
        match self {
            Self::A => 1,
            Self::Cname => 5,
            Self::Soa => 6,
            Self::Unknown(code) => code,
        }
    }
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        match code {
            1 => Self::A,
            5 => Self::Cname,
            6 => Self::Soa,
            code => Self::Unknown(code),
        }
    }
}

impl Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::A => f.write_str("A"),
            Self::Cname => f.write_str("CNAME"),
            Self::Soa => f.write_str("SOA"),
            Self::Unknown(code) => write!(f, "TYPE{}", code),
        }
    }
}
