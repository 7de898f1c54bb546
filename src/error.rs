use std::{io, sync::Arc};

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Clones share the underlying I/O error.
#[derive(Clone, Debug, thiserror::Error)]
pub enum Error {
    /// Source ran out (or failed) before the requested number of bytes arrived.
    #[error("short read: {0}")]
    ShortRead(#[source] Arc<io::Error>),
    /// Sink did not accept the bytes.
    #[error("sink failure: {0}")]
    SinkFailure(#[source] Arc<io::Error>),
}

impl Error {
    pub fn short_read(e: io::Error) -> Self {
        Self::ShortRead(Arc::new(e))
    }

    pub fn sink_failure(e: io::Error) -> Self {
        Self::SinkFailure(Arc::new(e))
    }

    pub fn is_short_read(&self) -> bool {
        matches!(self, Self::ShortRead(_))
    }

    pub fn is_sink_failure(&self) -> bool {
        matches!(self, Self::SinkFailure(_))
    }

    /// Kind of the underlying I/O error.
    pub fn io_kind(&self) -> io::ErrorKind {
        match self {
            Self::ShortRead(e) | Self::SinkFailure(e) => e.kind(),
        }
    }

    /// Whether both errors come from the same underlying failure.
    pub fn same_failure(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::ShortRead(a), Self::ShortRead(b))
            | (Self::SinkFailure(a), Self::SinkFailure(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    pub(crate) fn short(wanted: u64, got: u64) -> Self {
        Self::short_read(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("wanted {wanted} bytes, source delivered {got}"),
        ))
    }
}
