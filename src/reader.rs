use std::io::{BufRead, BufReader, ErrorKind, Read};

use tracing::trace;

use crate::error::ReaderError;
use crate::options::ReaderOptions;
use crate::record::{Record, RecordBuilder};
use crate::state::{Action, QuoteState};

/// Streaming CSV record parser.
///
/// Fields are split on `,`, records on `\n`, and `"` quotes fields that contain
/// either. A record that is not terminated by `\n` before end of stream is dropped.
pub struct CsvReader<R> {
    reader: BufReader<R>,
    position: u64,
    state: QuoteState,
    builder: RecordBuilder,
}

impl<R: Read> CsvReader<R> {
    /// Creates a reader with default options.
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, ReaderOptions::default())
    }

    pub fn with_options(reader: R, options: ReaderOptions) -> Self {
        Self::at_position(reader, 0, options)
    }

    /// Creates a reader over a stream whose next byte sits at absolute offset `position`
    /// of the underlying file.
    pub fn at_position(reader: R, position: u64, options: ReaderOptions) -> Self {
        Self {
            reader: BufReader::with_capacity(options.buffer_capacity.max(1), reader),
            position,
            state: QuoteState::Unquoted,
            builder: RecordBuilder::new(options.line_ending.strips_carriage_return()),
        }
    }

    /// Absolute offset of the next byte the parser will look at.
    pub fn position(&self) -> u64 {
        self.position
    }

    /// Returns the underlying stream. Bytes already buffered are not reflected in its
    /// own read position.
    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    /// Returns the next record, or `None` at end of stream.
    pub fn next_record(&mut self) -> Option<Result<Record, ReaderError>> {
        loop {
            let buf = match self.reader.fill_buf() {
                Ok(b) => b,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Some(Err(ReaderError::io(self.position, e))),
            };

            if buf.is_empty() {
                if self.builder.has_partial() || self.state.is_quoted() {
                    trace!(
                        position = self.position,
                        quoted = self.state.is_quoted(),
                        "discarding unterminated record at end of stream"
                    );
                }
                self.builder.discard();
                self.state = QuoteState::Unquoted;
                return None;
            }

            let (consumed, record) = feed(&mut self.state, &mut self.builder, buf);
            self.reader.consume(consumed);
            self.position += consumed as u64;

            if let Some(record) = record {
                return Some(Ok(record));
            }
        }
    }
}

impl<R: Read> Iterator for CsvReader<R> {
    type Item = Result<Record, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

/// Runs `buf` through the state machine until a record completes or the buffer is
/// exhausted. Returns the number of bytes used.
fn feed(
    state: &mut QuoteState,
    builder: &mut RecordBuilder,
    buf: &[u8],
) -> (usize, Option<Record>) {
    let mut pos = 0;

    while pos < buf.len() {
        let run = state.literal_run_len(&buf[pos..]);
        if run > 0 {
            builder.push_bytes(&buf[pos..pos + run]);
            pos += run;
            continue;
        }

        let (next, action) = state.step(buf[pos]);
        *state = next;
        pos += 1;

        match action {
            Action::Append(b) => builder.push_byte(b),
            Action::Skip => {}
            Action::EndField => builder.finish_field(),
            Action::EndRecord => return (pos, Some(builder.finish_record())),
        }
    }

    (pos, None)
}
