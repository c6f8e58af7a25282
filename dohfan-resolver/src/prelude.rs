use dohfan_proto::buffer::{ReaderError, WriterError};
use dohfan_proto::packet::{Record, RecordType};

/// Per-call knobs, forwarded untouched to every per-server client.
#[derive(Clone, Debug)]
pub struct ResolveOptions {
    pub recursion_desired: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            recursion_desired: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportError {
    Connection(String),
    Status(u16),
}

impl TransportError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Connection(_) => "ECONNECTION",
            Self::Status(_) => "ESTATUS",
        }
    }
}

impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Connection(message) => write!(f, "connection failed: {message}"),
            Self::Status(status) => write!(f, "server answered with status {status}"),
        }
    }
}

/// The injected https exchange. One call performs a single GET request and
/// hands back the raw response body.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str) -> Result<Vec<u8>, TransportError>;
}

/// Failure of a single server's query, carrying enough to be logged as a
/// code and message pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryError {
    Transport(TransportError),
    Encode(WriterError),
    Decode(ReaderError),
}

impl QueryError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Transport(inner) => inner.code(),
            Self::Encode(_) => "EENCODE",
            Self::Decode(_) => "EDECODE",
        }
    }
}

impl std::fmt::Display for QueryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(inner) => inner.fmt(f),
            Self::Encode(inner) => write!(f, "unable to encode query: {inner}"),
            Self::Decode(inner) => write!(f, "unable to decode response: {inner}"),
        }
    }
}

impl From<TransportError> for QueryError {
    fn from(value: TransportError) -> Self {
        Self::Transport(value)
    }
}

impl From<WriterError> for QueryError {
    fn from(value: WriterError) -> Self {
        Self::Encode(value)
    }
}

impl From<ReaderError> for QueryError {
    fn from(value: ReaderError) -> Self {
        Self::Decode(value)
    }
}

/// One query against one server. Implementations return the raw answer
/// section, the coordinator does the per-type filtering.
#[async_trait::async_trait]
pub trait QueryClient: Send + Sync {
    async fn query(
        &self,
        domain: &str,
        rtype: RecordType,
        options: &ResolveOptions,
    ) -> Result<Vec<Record>, QueryError>;
}

/// Builds a fresh client bound to a single server descriptor. The resolver
/// calls this once per server on every resolution.
pub trait ClientFactory: Send + Sync {
    fn create(&self, server: &str) -> Box<dyn QueryClient>;
}
