//! Accepts or rejects a buffer as the start of a GGA sentence.

use std::fmt;
use std::str;

use err::FrameError;

/// Length of the talker id, e.g. `GN` or `GP`.
pub const TALKER_LENGTH: usize = 2;
/// Length of talker id plus sentence type, e.g. `GNGGA`.
pub const TAG_LENGTH: usize = TALKER_LENGTH + 3;
/// Offset of the byte right after `$` and the tag.
pub const TAG_END: usize = 1 + TAG_LENGTH;

const SENTENCE_TYPE: &[u8] = b"GGA";

/// The talker id of an accepted GGA sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TalkerTag {
    talker_id: [u8; TALKER_LENGTH],
}

impl TalkerTag {
    #[inline]
    pub fn talker_id(&self) -> [u8; TALKER_LENGTH] {
        self.talker_id
    }

    /// The talker id as text. Only uppercase ASCII is ever accepted by
    /// [`frame`](fn.frame.html), so this never falls back in practice.
    pub fn as_str(&self) -> &str {
        str::from_utf8(&self.talker_id).unwrap_or("??")
    }
}

impl fmt::Display for TalkerTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}GGA", self.as_str())
    }
}

/// Check that `buffer` begins with `$`, a two letter talker id and `GGA`.
///
/// The talker id must be two uppercase ASCII letters; lowercase or numeric
/// talker ids are rejected as `WrongSentenceType`.
///
/// The tag must be followed by the first field delimiter, the checksum
/// delimiter, or the end of valid data (buffer end, NUL, CR or LF);
/// `$GNGGAX,...` is not a GGA sentence.
pub fn frame(buffer: &[u8]) -> Result<TalkerTag, FrameError> {
    if buffer.len() < TAG_END {
        return Err(FrameError::BufferTooShort(buffer.len()));
    }
    if buffer[0] != b'$' {
        return Err(FrameError::NotAnchored);
    }

    let (talker, sentence_type) = buffer[1..TAG_END].split_at(TALKER_LENGTH);
    if sentence_type != SENTENCE_TYPE || !talker.iter().all(u8::is_ascii_uppercase) {
        return Err(FrameError::WrongSentenceType);
    }
    match buffer.get(TAG_END) {
        None | Some(&b',') | Some(&b'*') => (),
        // end of valid data, the mapper reports the truncation
        Some(&0) | Some(&b'\r') | Some(&b'\n') => (),
        Some(_) => return Err(FrameError::WrongSentenceType),
    }

    let mut talker_id = [0u8; TALKER_LENGTH];
    talker_id.copy_from_slice(talker);
    Ok(TalkerTag { talker_id })
}
