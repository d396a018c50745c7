//! Conversion of single ASCII fields into numbers.
//!
//! Every decoder distinguishes between a field that was left blank and one
//! that holds something unparsable. Both are reported as
//! [`Decoded::Absent`](enum.Decoded.html), and neither is ever confused with
//! a legitimate `0`.

use std::str::{self, FromStr};

const MINUTES_PER_DEGREE: f64 = 60.0;

/// Why a field did not produce a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Absence {
    /// The field had no characters at all.
    Empty,
    /// The field had characters that do not form a valid value.
    Invalid,
}

/// A decoded value or the reason there is none.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Decoded<T> {
    Value(T),
    Absent(Absence),
}

impl<T> Decoded<T> {
    #[inline]
    pub fn value(self) -> Option<T> {
        match self {
            Decoded::Value(v) => Some(v),
            Decoded::Absent(_) => None,
        }
    }

    #[inline]
    pub fn absence(&self) -> Option<Absence> {
        match *self {
            Decoded::Value(_) => None,
            Decoded::Absent(a) => Some(a),
        }
    }

    #[inline]
    pub fn is_absent(&self) -> bool {
        self.absence().is_some()
    }

    /// Convert the value with `f`. A `None` from `f` turns the result into
    /// `Absent(Invalid)`; an existing absence is passed through.
    pub fn try_map<U, F>(self, f: F) -> Decoded<U>
    where
        F: FnOnce(T) -> Option<U>,
    {
        match self {
            Decoded::Value(v) => match f(v) {
                Some(u) => Decoded::Value(u),
                None => Decoded::Absent(Absence::Invalid),
            },
            Decoded::Absent(a) => Decoded::Absent(a),
        }
    }
}

/// The cardinal directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardDir {
    North,
    South,
    East,
    West,
}

impl CardDir {
    #[inline]
    pub fn sign(self) -> f64 {
        match self {
            CardDir::North | CardDir::East => 1.0,
            CardDir::South | CardDir::West => -1.0,
        }
    }
}

/// Which coordinate a field holds. Determines the number of degree digits
/// in front of the minutes and the largest magnitude allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Latitude,
    Longitude,
}

impl Axis {
    #[inline]
    fn degree_digits(self) -> usize {
        match self {
            Axis::Latitude => 2,
            Axis::Longitude => 3,
        }
    }

    #[inline]
    fn max_degrees(self) -> f64 {
        match self {
            Axis::Latitude => 90.0,
            Axis::Longitude => 180.0,
        }
    }
}

/// Decode an optionally signed integer, e.g. `8`, `-12` or `+3`.
pub fn decode_integer(field: &[u8]) -> Decoded<i64> {
    if field.is_empty() {
        return Decoded::Absent(Absence::Empty);
    }
    let digits = strip_sign(field);
    if digits.is_empty() || !digits.iter().all(u8::is_ascii_digit) {
        return Decoded::Absent(Absence::Invalid);
    }
    parse(field)
}

/// Decode an optionally signed decimal with at most one decimal point,
/// e.g. `61.496`, `-0.335`, `7` or `.5`.
pub fn decode_decimal(field: &[u8]) -> Decoded<f64> {
    if field.is_empty() {
        return Decoded::Absent(Absence::Empty);
    }

    let mut digits = 0;
    let mut dots = 0;
    for b in strip_sign(field) {
        match *b {
            b'0'..=b'9' => digits += 1,
            b'.' => dots += 1,
            _ => return Decoded::Absent(Absence::Invalid),
        }
    }
    if digits == 0 || dots > 1 {
        return Decoded::Absent(Absence::Invalid);
    }
    parse(field)
}

/// Decode a run of digits without a sign.
pub fn decode_unsigned(field: &[u8]) -> Decoded<u64> {
    if field.is_empty() {
        return Decoded::Absent(Absence::Empty);
    }
    if !field.iter().all(u8::is_ascii_digit) {
        return Decoded::Absent(Absence::Invalid);
    }
    parse(field)
}

/// Decode an unsigned `ddmm.mmmm` (latitude) or `dddmm.mmmm` (longitude)
/// field into decimal degrees. The sign is never taken from the field; it
/// comes from the hemisphere, see [`decode_hemisphere`](fn.decode_hemisphere.html).
pub fn decode_coordinate(field: &[u8], axis: Axis) -> Decoded<f64> {
    if field.is_empty() {
        return Decoded::Absent(Absence::Empty);
    }
    match coordinate_magnitude(field, axis) {
        Some(deg) => Decoded::Value(deg),
        None => Decoded::Absent(Absence::Invalid),
    }
}

fn coordinate_magnitude(field: &[u8], axis: Axis) -> Option<f64> {
    let split = axis.degree_digits();
    // This check is needed to ensure split_at doesn't panic
    if field.len() <= split {
        return None;
    }

    let (deg, min) = field.split_at(split);
    if !min[0].is_ascii_digit() {
        return None;
    }
    let degrees = decode_unsigned(deg).value()? as f64;
    let minutes = decode_decimal(min).value()?;
    if minutes >= MINUTES_PER_DEGREE {
        return None;
    }

    let dec_deg = degrees + minutes / MINUTES_PER_DEGREE;
    if dec_deg > axis.max_degrees() {
        return None;
    }
    Some(dec_deg)
}

/// Decode the single letter hemisphere following a coordinate: `N`/`S` for
/// latitude, `E`/`W` for longitude.
pub fn decode_hemisphere(field: &[u8], axis: Axis) -> Decoded<CardDir> {
    match (field, axis) {
        (b"", _) => Decoded::Absent(Absence::Empty),
        (b"N", Axis::Latitude) => Decoded::Value(CardDir::North),
        (b"S", Axis::Latitude) => Decoded::Value(CardDir::South),
        (b"E", Axis::Longitude) => Decoded::Value(CardDir::East),
        (b"W", Axis::Longitude) => Decoded::Value(CardDir::West),
        _ => Decoded::Absent(Absence::Invalid),
    }
}

#[inline]
fn strip_sign(field: &[u8]) -> &[u8] {
    match field.first() {
        Some(&b'-') | Some(&b'+') => &field[1..],
        _ => field,
    }
}

/// Parse a field whose characters were already validated.
#[inline]
fn parse<T: FromStr>(field: &[u8]) -> Decoded<T> {
    match str::from_utf8(field).ok().and_then(|s| T::from_str(s).ok()) {
        Some(v) => Decoded::Value(v),
        None => Decoded::Absent(Absence::Invalid),
    }
}
