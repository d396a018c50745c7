//! This module maps the fields of a *GGA* sentence of the *NMEA 0183*
//! protocol onto a [FixRecord](struct.FixRecord.html).
//!
//! Mapping is a pure function of the buffer: nothing is cached between calls
//! and the buffer is only ever read.

use arrayvec::ArrayVec;
use chrono::NaiveTime;

use decoder::{self, Absence, Axis, Decoded};
use err::{MapError, ScanError};
use framer::{self, TalkerTag, TAG_END};
use scanner::{self, FieldSpan};
use GGA_FIELD_COUNT;

/// Offset of the first field, right after `$ttGGA,`.
const FIELDS_START: usize = TAG_END + 1;
/// Length of the fixed width `hhmmss` prefix of the UTC field.
const UTC_DIGITS: usize = 6;
const NANOS_PER_SECOND: f64 = 1_000_000_000.0;

const UTC: usize = 0;
const LAT: usize = 1;
const LAT_DIR: usize = 2;
const LONG: usize = 3;
const LONG_DIR: usize = 4;
const QUALITY: usize = 5;
const SATELLITES: usize = 6;
const ALTITUDE: usize = 8;

const FIELD_NAMES: [&str; GGA_FIELD_COUNT] = [
    "utc",
    "latitude",
    "N/S",
    "longitude",
    "E/W",
    "quality",
    "satellites",
    "hdop",
    "altitude",
    "altitude unit",
    "geoidal separation",
    "separation unit",
    "dgps age",
    "dgps station",
];

/// Indicator of the quality of gps data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixQuality {
    NoFix,
    Gps,
    Dgps,
    Pps,
    RealTimeKinematic,
    FloatRtk,
    Estimated,
    ManualInput,
    Simulation,
    /// A code outside `0..=8` reported by a non-standard receiver.
    Unknown(u8),
}

impl FixQuality {
    /// Takes the numeric code of the quality field. Returns `None` for
    /// values that do not fit a `u8`.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => FixQuality::NoFix,
            1 => FixQuality::Gps,
            2 => FixQuality::Dgps,
            3 => FixQuality::Pps,
            4 => FixQuality::RealTimeKinematic,
            5 => FixQuality::FloatRtk,
            6 => FixQuality::Estimated,
            7 => FixQuality::ManualInput,
            8 => FixQuality::Simulation,
            9..=255 => FixQuality::Unknown(code as u8),
            _ => return None,
        })
    }

    pub fn code(self) -> u8 {
        match self {
            FixQuality::NoFix => 0,
            FixQuality::Gps => 1,
            FixQuality::Dgps => 2,
            FixQuality::Pps => 3,
            FixQuality::RealTimeKinematic => 4,
            FixQuality::FloatRtk => 5,
            FixQuality::Estimated => 6,
            FixQuality::ManualInput => 7,
            FixQuality::Simulation => 8,
            FixQuality::Unknown(c) => c,
        }
    }

    #[inline]
    pub fn has_position(self) -> bool {
        self != FixQuality::NoFix
    }
}

/// A position fix extracted from one GGA sentence.
///
/// Every field is `None` when the sentence left it blank or it could not be
/// decoded; there are no sentinel values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixRecord {
    /// Talker id contained in the header of the sentence.
    pub talker: TalkerTag,
    /// UTC hour, `0..=23`.
    pub hour: Option<u8>,
    /// UTC minute, `0..=59`.
    pub minute: Option<u8>,
    /// UTC second, `0..=59`.
    pub second: Option<u8>,
    /// Fractional part of the UTC second in nanoseconds.
    pub nanosecond: Option<u32>,
    /// Latitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the northern hemisphere.
    /// A negative value indicates that the coordinate is in the southern hemisphere.
    pub latitude: Option<f64>,
    /// Longitude in decimal degrees.
    /// A positive value indicates that the coordinate is in the eastern hemisphere.
    /// A negative value indicates that the coordinate is in the western hemisphere.
    pub longitude: Option<f64>,
    /// Indicates the quality of the gps data.
    pub quality: Option<FixQuality>,
    /// Number of satellites used for the fix.
    pub satellites: Option<u8>,
    /// Antenna altitude above/below mean-sea-level (geoid) in meters.
    pub altitude: Option<f64>,
}

impl FixRecord {
    /// The time of day of the fix, if hour, minute and second are all present.
    pub fn utc_time(&self) -> Option<NaiveTime> {
        match (self.hour, self.minute, self.second) {
            (Some(h), Some(m), Some(s)) => NaiveTime::from_hms_nano_opt(
                u32::from(h),
                u32::from(m),
                u32::from(s),
                self.nanosecond.unwrap_or(0),
            ),
            _ => None,
        }
    }

    /// A blank quality field means the receiver has no fix.
    #[inline]
    pub fn quality_or_no_fix(&self) -> FixQuality {
        self.quality.unwrap_or(FixQuality::NoFix)
    }

    /// Latitude and longitude, if both are present.
    pub fn position(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(long)) => Some((lat, long)),
            _ => None,
        }
    }
}

/// Map a buffer holding one GGA sentence onto a `FixRecord`.
///
/// The checksum is not verified here, see
/// [`checksum::verify`](../checksum/fn.verify.html).
pub fn map(buffer: &[u8]) -> Result<FixRecord, MapError> {
    let talker = framer::frame(buffer)?;
    let fields = collect_fields(buffer)?;
    let field = |index: usize| fields[index].get(buffer);

    let (hour, minute, second, nanosecond) = decode_utc(field(UTC));
    let latitude = decode_position(&field, Axis::Latitude, LAT, LAT_DIR)?;
    let longitude = decode_position(&field, Axis::Longitude, LONG, LONG_DIR)?;

    let quality = noted(
        QUALITY,
        decoder::decode_integer(field(QUALITY)).try_map(FixQuality::from_code),
    );
    let satellites = noted(
        SATELLITES,
        decoder::decode_integer(field(SATELLITES)).try_map(|n| {
            if 0 <= n && n <= i64::from(u8::max_value()) {
                Some(n as u8)
            } else {
                None
            }
        }),
    );
    let altitude = noted(ALTITUDE, decoder::decode_decimal(field(ALTITUDE)));

    Ok(FixRecord {
        talker,
        hour,
        minute,
        second,
        nanosecond,
        latitude,
        longitude,
        quality,
        satellites,
        altitude,
    })
}

/// Collect the spans of the first `GGA_FIELD_COUNT` fields. The whole
/// sentence is scanned so that truncation is reported even when enough
/// fields were found.
fn collect_fields(buffer: &[u8]) -> Result<ArrayVec<[FieldSpan; GGA_FIELD_COUNT]>, MapError> {
    match buffer.get(TAG_END) {
        Some(&b',') => (),
        None | Some(&0) | Some(&b'\r') | Some(&b'\n') => {
            return Err(ScanError::Truncated(TAG_END).into())
        }
        // the framer only lets '*' through otherwise
        Some(_) => return Err(MapError::InsufficientFields(0)),
    }

    let mut fields = ArrayVec::<[FieldSpan; GGA_FIELD_COUNT]>::new();
    let mut found = 0;
    for span in scanner::scan_fields(buffer, FIELDS_START) {
        let span = span?;
        found += 1;
        // Fields past the standard layout are ignored.
        let _ = fields.try_push(span);
    }

    if found < GGA_FIELD_COUNT {
        debug!("GGA sentence has only {} of {} fields", found, GGA_FIELD_COUNT);
        return Err(MapError::InsufficientFields(found));
    }
    Ok(fields)
}

/// Split the `hhmmss.sss` UTC field at fixed offsets. The `hhmmss` prefix is
/// fixed width by protocol; the fraction is optional.
fn decode_utc(utc: &[u8]) -> (Option<u8>, Option<u8>, Option<u8>, Option<u32>) {
    if utc.len() < UTC_DIGITS {
        if !utc.is_empty() {
            debug!("GGA field {} ({}) is shorter than hhmmss", UTC, FIELD_NAMES[UTC]);
        }
        return (None, None, None, None);
    }

    let (hms, fraction) = utc.split_at(UTC_DIGITS);
    let hour = noted(UTC, time_part(&hms[0..2], 23));
    let minute = noted(UTC, time_part(&hms[2..4], 59));
    let second = noted(UTC, time_part(&hms[4..6], 59));

    let nanosecond = match fraction.first() {
        None => Some(0),
        Some(&b'.') => noted(
            UTC,
            decoder::decode_decimal(fraction).try_map(|f| {
                let nanos = (f * NANOS_PER_SECOND).round();
                if nanos < NANOS_PER_SECOND {
                    Some(nanos as u32)
                } else {
                    None
                }
            }),
        ),
        Some(_) => noted::<u32>(UTC, Decoded::Absent(Absence::Invalid)),
    };

    (hour, minute, second, nanosecond)
}

#[inline]
fn time_part(digits: &[u8], max: u64) -> Decoded<u8> {
    decoder::decode_unsigned(digits).try_map(|v| if v <= max { Some(v as u8) } else { None })
}

/// Combine a coordinate field with its hemisphere field.
///
/// A blank hemisphere makes the coordinate absent. A hemisphere letter that
/// is neither blank nor valid for `axis` fails the whole sentence, since
/// guessing would risk reporting a coordinate with the wrong sign.
fn decode_position<'a, F>(
    field: &F,
    axis: Axis,
    coord_index: usize,
    dir_index: usize,
) -> Result<Option<f64>, MapError>
where
    F: Fn(usize) -> &'a [u8],
{
    let dir = match decoder::decode_hemisphere(field(dir_index), axis) {
        Decoded::Value(d) => Some(d),
        Decoded::Absent(Absence::Empty) => None,
        Decoded::Absent(Absence::Invalid) => {
            debug!(
                "GGA field {} ({}) is not a hemisphere",
                dir_index, FIELD_NAMES[dir_index]
            );
            return Err(MapError::FieldDecodeFailed {
                field_index: dir_index,
            });
        }
    };

    let magnitude = noted(coord_index, decoder::decode_coordinate(field(coord_index), axis));
    Ok(match (magnitude, dir) {
        (Some(m), Some(d)) => Some(m * d.sign()),
        (Some(_), None) => {
            debug!(
                "GGA field {} ({}) has no hemisphere",
                coord_index, FIELD_NAMES[coord_index]
            );
            None
        }
        (None, _) => None,
    })
}

/// Log why a field is absent and reduce it to an `Option`.
fn noted<T>(index: usize, decoded: Decoded<T>) -> Option<T> {
    match decoded.absence() {
        Some(Absence::Empty) => trace!("GGA field {} ({}) is empty", index, FIELD_NAMES[index]),
        Some(Absence::Invalid) => debug!("GGA field {} ({}) is invalid", index, FIELD_NAMES[index]),
        None => (),
    }
    decoded.value()
}

#[cfg(test)]
mod tests {
    use super::*;
    use err::FrameError;

    const EPSILON: f64 = 1e-6;

    const QUECTEL: &[u8] =
        b"$GNGGA,040143.000,3149.334166,N,11706.941670,E,2,36,0.48,61.496,M,-0.335,M,,*58";
    const ALL_EMPTY: &[u8] = b"$GNGGA,,,,,,,,,,,,,,*78";

    fn assert_close(actual: Option<f64>, expected: f64) {
        match actual {
            Some(v) => assert!((v - expected).abs() < EPSILON, "{} != {}", v, expected),
            None => panic!("expected {}, found None", expected),
        }
    }

    #[test]
    fn maps_full_sentence() {
        let fix = map(QUECTEL).unwrap();
        assert_eq!(&fix.talker.talker_id(), b"GN");
        assert_eq!((fix.hour, fix.minute, fix.second), (Some(4), Some(1), Some(43)));
        assert_eq!(fix.nanosecond, Some(0));
        assert_close(fix.latitude, 31.822236);
        assert_close(fix.longitude, 117.115694);
        assert_eq!(fix.quality, Some(FixQuality::Dgps));
        assert_eq!(fix.satellites, Some(36));
        assert_close(fix.altitude, 61.496);
        assert_eq!(fix.utc_time(), Some(NaiveTime::from_hms(4, 1, 43)));
    }

    #[test]
    fn maps_southern_western_gps_talker() {
        let fix = map(b"$GPGGA,092750.250,5321.6802,S,00630.3372,W,1,8,1.03,61.7,M,55.2,M,,*6B").unwrap();
        assert_eq!(&fix.talker.talker_id(), b"GP");
        assert_close(fix.latitude, -(53.0 + 21.6802 / 60.0));
        assert_close(fix.longitude, -(6.0 + 30.3372 / 60.0));
        assert_eq!(fix.quality, Some(FixQuality::Gps));
        assert_eq!(fix.satellites, Some(8));
        assert_eq!(fix.nanosecond, Some(250_000_000));
        assert_eq!(fix.utc_time(), Some(NaiveTime::from_hms_milli(9, 27, 50, 250)));
    }

    #[test]
    fn all_empty_fields_still_map() {
        let fix = map(ALL_EMPTY).unwrap();
        assert_eq!(fix.hour, None);
        assert_eq!(fix.minute, None);
        assert_eq!(fix.second, None);
        assert_eq!(fix.latitude, None);
        assert_eq!(fix.longitude, None);
        assert_eq!(fix.quality, None);
        assert_eq!(fix.satellites, None);
        assert_eq!(fix.altitude, None);
        assert_eq!(fix.utc_time(), None);
        assert_eq!(fix.position(), None);
        assert_eq!(fix.quality_or_no_fix(), FixQuality::NoFix);
        assert!(!fix.quality_or_no_fix().has_position());
    }

    #[test]
    fn zero_fields_are_values() {
        let fix = map(b"$GLGGA,000000.00,0000.0000,N,00000.0000,E,0,00,,0,M,,M,,*5F").unwrap();
        assert_eq!((fix.hour, fix.minute, fix.second), (Some(0), Some(0), Some(0)));
        assert_eq!(fix.position(), Some((0.0, 0.0)));
        assert_eq!(fix.quality, Some(FixQuality::NoFix));
        assert_eq!(fix.satellites, Some(0));
        assert_eq!(fix.altitude, Some(0.0));
    }

    #[test]
    fn bad_checksum_is_not_corrected() {
        // real checksum is 47
        let good = map(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*47").unwrap();
        let bad = map(b"$GPGGA,123519,4807.038,N,01131.000,E,1,08,0.9,545.4,M,46.9,M,,*00").unwrap();
        assert_eq!(good, bad);
        assert_eq!((bad.hour, bad.minute, bad.second), (Some(12), Some(35), Some(19)));
        assert_close(bad.latitude, 48.1173);
        assert_close(bad.longitude, 11.0 + 31.0 / 60.0);
        assert_close(bad.altitude, 545.4);
    }

    #[test]
    fn unanchored_buffers() {
        assert_matches!(
            map(&QUECTEL[10..]),
            Err(MapError::Frame(FrameError::NotAnchored))
        );
        assert_matches!(
            map(b"\r\n$GNGGA,,,,,,,,,,,,,,*78"),
            Err(MapError::Frame(FrameError::NotAnchored))
        );
    }

    #[test]
    fn other_sentence_types() {
        assert_matches!(
            map(b"$GPGSV,3,1,11,03,03,111,00,04,15,270,00,06,01,010,00,13,06,292,00*74"),
            Err(MapError::Frame(FrameError::WrongSentenceType))
        );
        assert_matches!(
            map(b"$GN"),
            Err(MapError::Frame(FrameError::BufferTooShort(3)))
        );
    }

    #[test]
    fn truncated_sentences() {
        assert_matches!(
            map(b"$GNGGA,040143.000,3149.33"),
            Err(MapError::Scan(ScanError::Truncated(25)))
        );
        assert_matches!(
            map(&QUECTEL[..QUECTEL.len() - 3]),
            Err(MapError::Scan(ScanError::Truncated(_)))
        );
        assert_matches!(map(b"$GNGGA"), Err(MapError::Scan(ScanError::Truncated(6))));
    }

    #[test]
    fn tag_followed_by_end_of_data_is_truncated() {
        let mut rx = [0u8; ::MAX_SENTENCE_LENGTH];
        rx[..6].copy_from_slice(b"$GNGGA");
        assert_matches!(map(&rx), Err(MapError::Scan(ScanError::Truncated(6))));
        assert_matches!(
            map(b"$GNGGA\r\n"),
            Err(MapError::Scan(ScanError::Truncated(6)))
        );
        assert_matches!(
            map(b"$GNGGA\n"),
            Err(MapError::Scan(ScanError::Truncated(6)))
        );
    }

    #[test]
    fn shortened_sentences() {
        assert_matches!(
            map(b"$GNGGA,040143.000,3149.334166,N*58"),
            Err(MapError::InsufficientFields(3))
        );
        assert_matches!(map(b"$GNGGA*56"), Err(MapError::InsufficientFields(0)));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let fix = map(b"$GNGGA,040143.000,3149.334166,N,11706.941670,E,2,36,0.48,61.496,M,-0.335,M,,,1*00")
            .unwrap();
        assert_eq!(fix.satellites, Some(36));
    }

    #[test]
    fn invalid_hemisphere_fails() {
        assert_matches!(
            map(b"$GNGGA,040143.000,3149.334166,X,11706.941670,E,2,36,0.48,61.496,M,-0.335,M,,*58"),
            Err(MapError::FieldDecodeFailed { field_index: 2 })
        );
        assert_matches!(
            map(b"$GNGGA,040143.000,3149.334166,N,11706.941670,N,2,36,0.48,61.496,M,-0.335,M,,*58"),
            Err(MapError::FieldDecodeFailed { field_index: 4 })
        );
    }

    #[test]
    fn missing_hemisphere_drops_coordinate() {
        let fix = map(b"$GNGGA,040143.000,3149.334166,,11706.941670,E,2,36,0.48,61.496,M,-0.335,M,,*58")
            .unwrap();
        assert_eq!(fix.latitude, None);
        assert_close(fix.longitude, 117.115694);
    }

    #[test]
    fn invalid_numbers_are_absent() {
        let fix = map(b"$GNGGA,04x143.000,3149.3x4166,N,11706.941670,E,x,-3,0.48,6l.496,M,-0.335,M,,*58")
            .unwrap();
        assert_eq!(fix.hour, Some(4));
        assert_eq!(fix.minute, None);
        assert_eq!(fix.second, Some(43));
        assert_eq!(fix.latitude, None);
        assert_close(fix.longitude, 117.115694);
        assert_eq!(fix.quality, None);
        assert_eq!(fix.satellites, None);
        assert_eq!(fix.altitude, None);
    }

    #[test]
    fn out_of_range_time_parts_are_absent_individually() {
        let fix = map(b"$GNGGA,246075,,,,,,,,,,,,,*00").unwrap();
        assert_eq!(fix.hour, None);
        assert_eq!(fix.minute, None);
        assert_eq!(fix.second, None);

        let fix = map(b"$GNGGA,2359,,,,,,,,,,,,,*00").unwrap();
        assert_eq!((fix.hour, fix.minute, fix.second), (None, None, None));

        let fix = map(b"$GNGGA,235960,,,,,,,,,,,,,*00").unwrap();
        assert_eq!((fix.hour, fix.minute, fix.second), (Some(23), Some(59), None));
    }

    #[test]
    fn unknown_quality_codes() {
        let fix = map(b"$GNGGA,,,,,,9,,,,,,,,*00").unwrap();
        assert_eq!(fix.quality, Some(FixQuality::Unknown(9)));
        assert_eq!(fix.quality.map(FixQuality::code), Some(9));
        let fix = map(b"$GNGGA,,,,,,256,,,,,,,,*00").unwrap();
        assert_eq!(fix.quality, None);
    }

    #[test]
    fn zero_filled_receive_buffer() {
        let mut rx = [0u8; ::MAX_SENTENCE_LENGTH];
        rx[..QUECTEL.len()].copy_from_slice(QUECTEL);
        rx[QUECTEL.len()..QUECTEL.len() + 2].copy_from_slice(b"\r\n");
        assert_eq!(map(&rx).unwrap(), map(QUECTEL).unwrap());
    }

    #[test]
    fn mapping_is_idempotent() {
        let buf = QUECTEL.to_vec();
        let first = map(&buf).unwrap();
        let second = map(&buf).unwrap();
        assert_eq!(first, second);
        assert_eq!(buf, QUECTEL);
    }
}
