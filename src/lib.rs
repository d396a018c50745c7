//! Parser for the *GGA* sentence of the *NMEA 0183* protocol, working on one
//! receive buffer at a time.
//!
//! A buffer goes through four stages: the [framer](framer/index.html) checks
//! for `$ttGGA`, the [scanner](scanner/index.html) finds the comma delimited
//! fields, the [decoder](decoder/index.html) turns single fields into
//! numbers and the [parser](parser/index.html) assembles a
//! [`FixRecord`](parser/struct.FixRecord.html).
//!
//! ```
//! let fix = ggafix::map(
//!     b"$GNGGA,040143.000,3149.334166,N,11706.941670,E,2,36,0.48,61.496,M,-0.335,M,,*58",
//! ).unwrap();
//! assert_eq!(fix.satellites, Some(36));
//! ```

#[cfg(test)]
#[macro_use]
extern crate assert_matches;
extern crate arrayvec;
extern crate chrono;
#[macro_use]
extern crate log;
#[macro_use]
extern crate quick_error;

/// The longest sentence NMEA 0183 allows, including `$` and `\r\n`.
pub const MAX_SENTENCE_LENGTH: usize = 82;
/// Number of fields following the `$ttGGA` tag.
pub const GGA_FIELD_COUNT: usize = 14;

pub mod err;
#[macro_use]
mod macros;
pub mod cache;
pub mod checksum;
pub mod decoder;
pub mod framer;
pub mod parser;
pub mod reader;
pub mod scanner;

pub use cache::LastFix;
pub use err::{ChecksumError, FrameError, MapError, ReadError, ScanError};
pub use framer::{frame, TalkerTag};
pub use parser::{map, FixQuality, FixRecord};
pub use reader::{GgaReader, ReaderConfig};
pub use scanner::{scan_fields, FieldSpan};
