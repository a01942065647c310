const DEFAULT_BUFFER_SIZE: usize = 128 * 1024;

/// How lines end in the input.
///
/// With [`LineEnding::CrLf`] a single trailing `\r` is stripped from every field
/// before it is stored. With [`LineEnding::Lf`] fields keep their bytes verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The convention of the platform this process runs on.
    pub fn native() -> Self {
        if cfg!(windows) {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }

    pub(crate) fn strips_carriage_return(self) -> bool {
        self == LineEnding::CrLf
    }
}

impl Default for LineEnding {
    fn default() -> Self {
        Self::native()
    }
}

/// Reader configuration, fixed at construction.
///
/// # Examples
///
/// ```rust
/// use splitcsv::{LineEnding, ReaderOptions};
///
/// let options = ReaderOptions::new()
///     .with_line_ending(LineEnding::CrLf)
///     .with_buffer_capacity(8 * 1024);
/// assert_eq!(options.line_ending, LineEnding::CrLf);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Line-ending convention. Defaults to [`LineEnding::native`].
    pub line_ending: LineEnding,

    /// Capacity of the internal read buffer in bytes. Defaults to 128 KiB.
    pub buffer_capacity: usize,
}

impl ReaderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            line_ending: LineEnding::native(),
            buffer_capacity: DEFAULT_BUFFER_SIZE,
        }
    }
}
