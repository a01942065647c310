use std::io;
use thiserror::Error;

/// Errors from record parsing.
#[derive(Debug, Error)]
pub enum ReaderError {
    #[error("I/O error while processing input row at byte {position}: {source}")]
    Io {
        position: u64,
        #[source]
        source: io::Error,
    },

    #[cfg(feature = "dates")]
    #[error("timestamp {seconds} is outside the representable date range")]
    TimestampOutOfRange { seconds: i64 },

    #[cfg(feature = "dates")]
    #[error("date formatting failed: {0}")]
    DateFormat(#[from] time::error::Format),
}

impl ReaderError {
    pub(crate) fn io(position: u64, source: io::Error) -> Self {
        Self::Io { position, source }
    }
}
