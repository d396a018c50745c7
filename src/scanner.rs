use err::ScanError;
use MAX_SENTENCE_LENGTH;

/// A comma delimited field inside a sentence buffer.
///
/// Zero length spans are valid; they stand for a field the receiver left
/// blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpan {
    start: usize,
    len: usize,
}

impl FieldSpan {
    #[inline]
    pub fn new(start: usize, len: usize) -> Self {
        FieldSpan { start, len }
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The bytes of this field in `buffer`. A span that does not fit the
    /// buffer yields an empty slice.
    #[inline]
    pub fn get<'a>(&self, buffer: &'a [u8]) -> &'a [u8] {
        buffer.get(self.start..self.end()).unwrap_or(&[])
    }
}

/// Iterator over the field spans of a sentence.
///
/// Yields one span per `,` and a final span for the field closed by `*`.
/// If valid data ends first, a single `ScanError::Truncated` is yielded
/// instead of the final span. A NUL, CR or LF byte ends valid data, as does
/// the sentence length limit.
#[derive(Debug, Clone)]
pub struct FieldScanner<'a> {
    buffer: &'a [u8],
    start: usize,
    pos: usize,
    done: bool,
}

impl<'a> FieldScanner<'a> {
    pub fn new(buffer: &'a [u8], start: usize) -> Self {
        FieldScanner {
            buffer,
            start,
            pos: start,
            done: false,
        }
    }

    /// Rewind to the offset the scanner was created with.
    pub fn restart(&mut self) {
        self.pos = self.start;
        self.done = false;
    }

    #[inline]
    fn limit(&self) -> usize {
        self.buffer.len().min(MAX_SENTENCE_LENGTH)
    }
}

impl<'a> Iterator for FieldScanner<'a> {
    type Item = Result<FieldSpan, ScanError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let field_start = self.pos;
        let limit = self.limit();
        while self.pos < limit {
            match self.buffer[self.pos] {
                b',' => {
                    let span = FieldSpan::new(field_start, self.pos - field_start);
                    self.pos += 1;
                    return Some(Ok(span));
                }
                b'*' => {
                    self.done = true;
                    return Some(Ok(FieldSpan::new(field_start, self.pos - field_start)));
                }
                0 | b'\r' | b'\n' => break,
                _ => self.pos += 1,
            }
        }

        self.done = true;
        Some(Err(ScanError::Truncated(self.pos)))
    }
}

/// Scan `buffer` for fields, beginning at `start`.
#[inline]
pub fn scan_fields(buffer: &[u8], start: usize) -> FieldScanner {
    FieldScanner::new(buffer, start)
}
