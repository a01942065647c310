use bstr::BString;

/// A single field: `None` for an empty field, otherwise its raw bytes.
pub type Field = Option<BString>;

/// An ordered sequence of fields from one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    fields: Vec<Field>,
}

impl Record {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Returns the bytes of field `index`, or `None` if it is null or out of range.
    pub fn get(&self, index: usize) -> Option<&[u8]> {
        self.fields.get(index)?.as_ref().map(|f| f.as_slice())
    }

    pub fn is_null(&self, index: usize) -> bool {
        matches!(self.fields.get(index), Some(None))
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn into_fields(self) -> Vec<Field> {
        self.fields
    }
}

impl From<Vec<Field>> for Record {
    fn from(fields: Vec<Field>) -> Self {
        Self { fields }
    }
}

impl FromIterator<Field> for Record {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for Record {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Record {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

/// Accumulates bytes into fields and fields into records.
#[derive(Debug)]
pub(crate) struct RecordBuilder {
    field: Vec<u8>,
    fields: Vec<Field>,
    strip_carriage_return: bool,
}

impl RecordBuilder {
    pub(crate) fn new(strip_carriage_return: bool) -> Self {
        Self {
            field: Vec::with_capacity(4096),
            fields: Vec::new(),
            strip_carriage_return,
        }
    }

    pub(crate) fn push_byte(&mut self, byte: u8) {
        self.field.push(byte);
    }

    pub(crate) fn push_bytes(&mut self, bytes: &[u8]) {
        self.field.extend_from_slice(bytes);
    }

    pub(crate) fn finish_field(&mut self) {
        let mut value = self.field.as_slice();
        if self.strip_carriage_return {
            if let [rest @ .., crate::state::CARRIAGE_RETURN] = value {
                value = rest;
            }
        }
        let field = if value.is_empty() {
            None
        } else {
            Some(BString::from(value))
        };
        self.fields.push(field);
        self.field.clear();
    }

    pub(crate) fn finish_record(&mut self) -> Record {
        self.finish_field();
        Record::from(std::mem::take(&mut self.fields))
    }

    pub(crate) fn has_partial(&self) -> bool {
        !self.field.is_empty() || !self.fields.is_empty()
    }

    /// Drops everything accumulated since the last finished record.
    pub(crate) fn discard(&mut self) {
        self.field.clear();
        self.fields.clear();
    }
}
