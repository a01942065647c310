use std::io::{Read, Seek, SeekFrom};

use tracing::debug;

use crate::error::ReaderError;
use crate::options::ReaderOptions;
use crate::reader::CsvReader;
use crate::record::Record;

/// Reads the records belonging to one byte range `[offset, end)` of a larger file.
///
/// A split that does not start at byte 0 skips its first (possibly partial) record,
/// and every split keeps reading until the record that crosses `end` is complete.
/// Together, contiguous splits produce each record of the file exactly once.
pub struct SplitReader<R> {
    resource: String,
    offset: u64,
    end: u64,
    reader: CsvReader<R>,
    exhausted: bool,
}

impl<R: Read> SplitReader<R> {
    /// Binds to a stream already positioned at `offset`.
    ///
    /// Fails if the leading record cannot be skipped because of an I/O error.
    pub fn bind(
        resource: impl Into<String>,
        reader: R,
        offset: u64,
        end: u64,
        options: ReaderOptions,
    ) -> Result<Self, ReaderError> {
        let resource = resource.into();
        debug!(resource = %resource, offset, end, "binding split");

        let mut split = Self {
            resource,
            offset,
            end,
            reader: CsvReader::at_position(reader, offset, options),
            exhausted: false,
        };

        if offset != 0 {
            // The record under `offset` is finished by the preceding split.
            match split.reader.next_record() {
                Some(Ok(skipped)) => debug!(
                    resource = %split.resource,
                    fields = skipped.len(),
                    resume_at = split.reader.position(),
                    "skipped leading record"
                ),
                Some(Err(e)) => return Err(e),
                None => debug!(resource = %split.resource, "no complete record after split offset"),
            }
        }

        Ok(split)
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn offset(&self) -> u64 {
        self.offset
    }

    pub fn end(&self) -> u64 {
        self.end
    }

    /// Absolute offset of the next unread byte.
    pub fn position(&self) -> u64 {
        self.reader.position()
    }

    /// Returns the next record of this split, or `None` once the position has passed
    /// `end` or the stream has ended.
    pub fn next_record(&mut self) -> Option<Result<Record, ReaderError>> {
        if self.reader.position() > self.end {
            if !self.exhausted {
                self.exhausted = true;
                debug!(
                    resource = %self.resource,
                    position = self.reader.position(),
                    end = self.end,
                    "split range exhausted"
                );
            }
            return None;
        }
        self.reader.next_record()
    }
}

impl<R: Read + Seek> SplitReader<R> {
    /// Seeks `reader` to `offset` and binds to it.
    pub fn open(
        resource: impl Into<String>,
        mut reader: R,
        offset: u64,
        end: u64,
        options: ReaderOptions,
    ) -> Result<Self, ReaderError> {
        reader
            .seek(SeekFrom::Start(offset))
            .map_err(|e| ReaderError::io(offset, e))?;
        Self::bind(resource, reader, offset, end, options)
    }
}

impl<R: Read> Iterator for SplitReader<R> {
    type Item = Result<Record, ReaderError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}
