//! Error types returned by the framer, scanner, mapper, checksum verifier and
//! stream reader.
//!
//! None of these represent a program fault. Misaligned, foreign or truncated
//! sentences are routine on an asynchronous serial link; the caller decides
//! whether to wait for the next one.

use std::io;

quick_error! {
    /// Rejection of a buffer before any field is looked at.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum FrameError {
        NotAnchored {
            description("Sentence is not anchored")
            display("Buffer does not start with '$', resynchronize on the next sentence")
        }
        WrongSentenceType {
            description("Wrong sentence type")
            display("Encountered a sentence type other than GGA")
        }
        BufferTooShort(len: usize) {
            description("Buffer too short")
            display("Buffer of {} bytes cannot hold '$' and a sentence tag", len)
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ScanError {
        Truncated(at: usize) {
            description("Truncated sentence")
            display("Valid data ended at offset {} before the '*' checksum delimiter", at)
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum MapError {
        Frame(err: FrameError) {
            from()
            description("Framing error")
            display("Could not map due to a framing error: {}", err)
            cause(err)
        }
        Scan(err: ScanError) {
            from()
            description("Scanning error")
            display("Could not map due to an error in the field scanner: {}", err)
            cause(err)
        }
        InsufficientFields(found: usize) {
            description("Insufficient fields")
            display("Found {} fields, a GGA sentence needs {}", found, ::GGA_FIELD_COUNT)
        }
        FieldDecodeFailed { field_index: usize } {
            description("Field decode failed")
            display("Could not decode field {} of the GGA sentence", field_index)
        }
    }
}

quick_error! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum ChecksumError {
        Missing {
            description("Missing checksum")
            display("Sentence has no '*' checksum delimiter")
        }
        Malformed {
            description("Malformed checksum")
            display("Checksum is not two hexadecimal digits")
        }
        Mismatch(expected: u8, actual: u8) {
            description("Invalid checksum")
            display("Expected checksum \"{:02X}\", found checksum \"{:02X}\"", expected, actual)
        }
    }
}

// Quick error can't handle from for tuples
impl From<(u8, u8)> for ChecksumError {
    fn from((expected, actual): (u8, u8)) -> Self {
        ChecksumError::Mismatch(expected, actual)
    }
}

quick_error! {
    #[derive(Debug)]
    pub enum ReadError {
        Io(err: io::Error) {
            from()
            description("I/O error")
            display("Encountered I/O error while reading: {}", err)
            cause(err)
        }
        Map(err: MapError) {
            from()
            description("Mapping error")
            display("{}", err)
            cause(err)
        }
        Checksum(err: ChecksumError) {
            from()
            description("Checksum error")
            display("{}", err)
            cause(err)
        }
        Overlong(len: usize) {
            description("Overlong sentence")
            display("Discarded sentence of more than {} bytes", len)
        }
    }
}

impl From<FrameError> for ReadError {
    fn from(err: FrameError) -> Self {
        ReadError::Map(err.into())
    }
}

impl From<ScanError> for ReadError {
    fn from(err: ScanError) -> Self {
        ReadError::Map(err.into())
    }
}
