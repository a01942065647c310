pub const FIELD_DELIMITER: u8 = b',';
pub const RECORD_DELIMITER: u8 = b'\n';
pub const QUOTE: u8 = b'"';
pub const CARRIAGE_RETURN: u8 = b'\r';

/// What the assembler does with the byte that drove a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Append(u8),
    Skip,
    EndField,
    EndRecord,
}

/// Quoting state of the field under construction.
///
/// A closing quote followed by the record delimiter ends the field but *not* the
/// record: the next line is read as further fields of the same record. So
/// `"a"\nb\n` is one record `["a", "b"]`, while `a\nb\n` is two.
///
/// With CRLF input a closing quote is followed by `\r`, which is not a delimiter, so
/// the quote is dropped as stray and the field stays open across the line break:
/// `"x"\r\n"y",z\r\n` is one record `["x\r\ny", "z"]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuoteState {
    #[default]
    Unquoted,
    /// Inside quotes with no pending quote byte.
    Quoted,
    /// Inside quotes, the previous byte was a quote whose meaning depends on this one.
    QuotedSawQuote,
    /// Inside quotes, a doubled quote was just written out as one literal quote. The
    /// next byte is plain content; a quote starts a new pending quote instead of
    /// pairing with the one already consumed.
    QuotedSawQuotePairConsumed,
}

impl QuoteState {
    pub fn step(self, byte: u8) -> (QuoteState, Action) {
        use QuoteState::*;

        match (self, byte) {
            (Unquoted, QUOTE) => (Quoted, Action::Skip),
            (Unquoted, FIELD_DELIMITER) => (Unquoted, Action::EndField),
            (Unquoted, RECORD_DELIMITER) => (Unquoted, Action::EndRecord),
            (Unquoted, b) => (Unquoted, Action::Append(b)),

            (Quoted, QUOTE) => (QuotedSawQuote, Action::Skip),
            (Quoted, b) => (Quoted, Action::Append(b)),

            (QuotedSawQuote, QUOTE) => (QuotedSawQuotePairConsumed, Action::Append(QUOTE)),
            (QuotedSawQuote, FIELD_DELIMITER | RECORD_DELIMITER) => (Unquoted, Action::EndField),
            (QuotedSawQuote, b) => (Quoted, Action::Append(b)),

            // A third quote in a row is swallowed and treated like a fresh pending quote.
            (QuotedSawQuotePairConsumed, QUOTE) => (QuotedSawQuote, Action::Skip),
            (QuotedSawQuotePairConsumed, b) => (Quoted, Action::Append(b)),
        }
    }

    pub fn is_quoted(self) -> bool {
        !matches!(self, QuoteState::Unquoted)
    }

    /// Length of the prefix of `buf` that is appended verbatim without a state change.
    pub(crate) fn literal_run_len(self, buf: &[u8]) -> usize {
        match self {
            QuoteState::Unquoted => {
                memchr::memchr3(QUOTE, FIELD_DELIMITER, RECORD_DELIMITER, buf).unwrap_or(buf.len())
            }
            QuoteState::Quoted => memchr::memchr(QUOTE, buf).unwrap_or(buf.len()),
            QuoteState::QuotedSawQuote | QuoteState::QuotedSawQuotePairConsumed => 0,
        }
    }
}
