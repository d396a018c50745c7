//! Reading GGA fixes from a byte stream, e.g. a serial port.
//!
//! The reader only does what the core parser leaves to the transport:
//! resynchronizing on `$`, cutting lines, and optionally checking the
//! checksum. Every assembled sentence goes through
//! [`map`](../parser/fn.map.html).

use arrayvec::ArrayVec;
use std::io;

use checksum;
use err::{FrameError, MapError, ReadError};
use parser::{self, FixRecord};
use MAX_SENTENCE_LENGTH;

// arrayvec 0.4 has no Array impl for 82
const LINE_CAPACITY: usize = 96;
/// Longest sentence without its `\r\n` line ending.
const LINE_LIMIT: usize = MAX_SENTENCE_LENGTH - 2;

/// Options for [`GgaReader`](struct.GgaReader.html).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderConfig {
    /// Reject sentences whose checksum does not match.
    pub verify_checksum: bool,
    /// Skip sentences of other types instead of yielding
    /// `FrameError::WrongSentenceType`.
    pub skip_foreign_sentences: bool,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        ReaderConfig {
            verify_checksum: true,
            skip_foreign_sentences: true,
        }
    }
}

impl ReaderConfig {
    pub fn with_checksum(mut self, verify: bool) -> Self {
        self.verify_checksum = verify;
        self
    }

    pub fn with_foreign_sentences_skipped(mut self, skip: bool) -> Self {
        self.skip_foreign_sentences = skip;
        self
    }
}

/// Iterator over the GGA fixes in `input`.
pub struct GgaReader<R> {
    input: io::Bytes<R>,
    config: ReaderConfig,
    line: ArrayVec<[u8; LINE_CAPACITY]>,
    /// A `$` was read while assembling the previous line.
    anchored: bool,
}

impl<R: io::Read> GgaReader<R> {
    /// Create a new reader with the default configuration.
    pub fn new(input: R) -> Self {
        GgaReader::with_config(input, ReaderConfig::default())
    }

    pub fn with_config(input: R, config: ReaderConfig) -> Self {
        GgaReader {
            input: input.bytes(),
            config,
            line: ArrayVec::new(),
            anchored: false,
        }
    }

    #[inline]
    pub fn config(&self) -> ReaderConfig {
        self.config
    }

    /// Skips and consumes all bytes till the next `$`.
    /// Returns `false` if EOF has been reached.
    fn jump_to_anchor(&mut self) -> Result<bool, io::Error> {
        if self.anchored {
            self.anchored = false;
            return Ok(true);
        }
        loop {
            match self.input.next() {
                None => return Ok(false),
                Some(Err(e)) => return Err(e),
                Some(Ok(b'$')) => return Ok(true),
                Some(Ok(_)) => (),
            }
        }
    }

    /// Assemble the next line, starting at `$` and ending before `\r\n`.
    /// A `$` in the middle of a line ends it early; the partial line is
    /// handed to the mapper, which reports the truncation.
    /// Returns `false` if EOF has been reached before any `$`.
    ///
    /// The same limit applies whether the line ends in `\n`, `\r\n`, `$`
    /// or EOF: at most `MAX_SENTENCE_LENGTH - 2` bytes without the line
    /// ending.
    fn read_line(&mut self) -> Result<bool, ReadError> {
        self.line.clear();
        if !self.jump_to_anchor()? {
            return Ok(false);
        }
        let _ = self.line.try_push(b'$');

        loop {
            match self.input.next() {
                None => return self.finish_line(),
                Some(Err(e)) => return Err(e.into()),
                Some(Ok(b'\n')) => {
                    if self.line.last() == Some(&b'\r') {
                        self.line.pop();
                    }
                    return self.finish_line();
                }
                Some(Ok(b'$')) => {
                    self.anchored = true;
                    return self.finish_line();
                }
                Some(Ok(c)) => {
                    // one byte of slack for a trailing '\r'
                    if self.line.len() > LINE_LIMIT || self.line.try_push(c).is_err() {
                        return self.overlong();
                    }
                }
            }
        }
    }

    fn finish_line(&self) -> Result<bool, ReadError> {
        if self.line.len() > LINE_LIMIT {
            return self.overlong();
        }
        Ok(true)
    }

    fn overlong(&self) -> Result<bool, ReadError> {
        warn!("discarding sentence longer than {} bytes", MAX_SENTENCE_LENGTH);
        Err(ReadError::Overlong(MAX_SENTENCE_LENGTH))
    }

    /// Map the assembled line. `None` means the line was skipped.
    fn map_line(&self) -> Option<Result<FixRecord, ReadError>> {
        let line = &self.line[..];
        let fix = match parser::map(line) {
            Ok(fix) => fix,
            Err(MapError::Frame(FrameError::WrongSentenceType)) if self.config.skip_foreign_sentences => {
                trace!("skipping sentence {:?}", String::from_utf8_lossy(line));
                return None;
            }
            Err(e) => {
                debug!("rejected sentence: {}", e);
                return Some(Err(e.into()));
            }
        };

        if self.config.verify_checksum {
            if let Err(e) = checksum::verify(line) {
                warn!("rejected {} sentence: {}", fix.talker, e);
                return Some(Err(e.into()));
            }
        }
        Some(Ok(fix))
    }
}

impl<R: io::Read> Iterator for GgaReader<R> {
    type Item = Result<FixRecord, ReadError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if !try_some!(self.read_line()) {
                return None;
            }
            if let Some(result) = self.map_line() {
                return Some(result);
            }
        }
    }
}
