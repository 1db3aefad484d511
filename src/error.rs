use thiserror::Error;

#[derive(Debug, Error)]
pub enum DnsError {
    #[error("invalid hostname label in {0:?}")]
    Encoding(String),

    #[error("malformed domain name")]
    MalformedName,

    #[error("compression pointer loop")]
    CompressionLoop,

    #[error("message shorter than the 12 byte header")]
    MalformedHeader,

    #[error("message truncated")]
    TruncatedMessage,

    #[error("resource record truncated")]
    TruncatedRecord,

    #[error("no response within the deadline")]
    Timeout,

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
