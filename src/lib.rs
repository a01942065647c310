//! Streaming CSV record parser that can read a large file as independent byte-range
//! splits without losing or duplicating records at split boundaries.

#[cfg(feature = "dates")]
pub mod date;
mod error;
mod options;
mod reader;
mod record;
mod split;
mod state;

pub use error::ReaderError;
pub use options::{LineEnding, ReaderOptions};
pub use reader::CsvReader;
pub use record::{Field, Record};
pub use split::SplitReader;
pub use state::{Action, FIELD_DELIMITER, QUOTE, QuoteState, RECORD_DELIMITER};
