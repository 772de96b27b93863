//! Input side: one line of the flight-planner CSV export.
//!
//! The export has the following columns, only three of which are of interest for us:
//!
//! `Waypoint Number, X [m], Y [m], Alt. ASL [m], Alt. AGL [m], xcoord, ycoord, ...`
//!
//! - `$3`, `Alt. ASL [m]` is the altitude
//! - `$5`, `xcoord` is the longitude
//! - `$6`, `ycoord` is the latitude
//!
//! Anything after `ycoord` is ignored.  Every failure here is per-line: the caller logs it and
//! moves on to the next line.
//!

use std::num::ParseFloatError;

use csv::{ReaderBuilder, StringRecord};
use thiserror::Error;
use tracing::trace;

/// Header line as exported by the flight planner, compared field by field.
pub const SOURCE_HEADER: [&str; 7] = [
    "Waypoint Number",
    "X [m]",
    "Y [m]",
    "Alt. ASL [m]",
    "Alt. AGL [m]",
    "xcoord",
    "ycoord",
];

const ALTITUDE_IDX: usize = 3;
const LONGITUDE_IDX: usize = 5;
const LATITUDE_IDX: usize = 6;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("bad CSV record: {0}")]
    Csv(#[from] csv::Error),
    #[error("bad CSV record: {reason} at byte {pos}")]
    Quoting { pos: usize, reason: &'static str },
    #[error("missing {field} (column {index})")]
    Missing { field: &'static str, index: usize },
    #[error("bad {field} {value:?}: {source}")]
    BadNumber {
        field: &'static str,
        value: String,
        source: ParseFloatError,
    },
    #[error("{field} {value} out of range (min: {min}, max: {max})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
}

impl RecordError {
    /// Name of the field at fault, if any.
    ///
    pub fn field(&self) -> Option<&'static str> {
        match self {
            RecordError::Csv(_) | RecordError::Quoting { .. } => None,
            RecordError::Missing { field, .. }
            | RecordError::BadNumber { field, .. }
            | RecordError::OutOfRange { field, .. } => Some(field),
        }
    }
}

/// Validated position extracted from one line.
///
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fix {
    /// Degrees, in [-180, 180]
    pub longitude: f64,
    /// Degrees, in [-90, 90]
    pub latitude: f64,
    /// Meters, never negative
    pub altitude: f64,
}

/// What a single input line turned out to be.
///
#[derive(Debug, PartialEq)]
pub enum Line {
    /// The flight-planner header, dropped.
    Header,
    /// Nothing on that line.
    Blank,
    /// Good data.
    Fix(Fix),
}

/// Parse a number and check it is within `[min, max]`.  NaN never is.
///
fn bounded(field: &'static str, value: &str, min: f64, max: f64) -> Result<f64, RecordError> {
    let v: f64 = value.parse().map_err(|source| RecordError::BadNumber {
        field,
        value: value.to_string(),
        source,
    })?;
    if !(min..=max).contains(&v) {
        return Err(RecordError::OutOfRange {
            field,
            value: v,
            min,
            max,
        });
    }
    Ok(v)
}

#[inline]
pub fn longitude(value: &str) -> Result<f64, RecordError> {
    bounded("longitude", value, -180., 180.)
}

#[inline]
pub fn latitude(value: &str) -> Result<f64, RecordError> {
    bounded("latitude", value, -90., 90.)
}

/// There is no upper limit on altitude, only the largest `f64` there is.
///
#[inline]
pub fn altitude(value: &str) -> Result<f64, RecordError> {
    bounded("altitude", value, 0., f64::MAX)
}

fn column<'a>(
    rec: &'a StringRecord,
    field: &'static str,
    index: usize,
) -> Result<&'a str, RecordError> {
    rec.get(index).ok_or(RecordError::Missing { field, index })
}

impl TryFrom<&StringRecord> for Fix {
    type Error = RecordError;

    /// Fields are checked in the order longitude, latitude, altitude and the first bad one wins.
    ///
    fn try_from(rec: &StringRecord) -> Result<Self, Self::Error> {
        let longitude = longitude(column(rec, "longitude", LONGITUDE_IDX)?)?;
        let latitude = latitude(column(rec, "latitude", LATITUDE_IDX)?)?;
        let altitude = altitude(column(rec, "altitude", ALTITUDE_IDX)?)?;
        Ok(Fix {
            longitude,
            latitude,
            altitude,
        })
    }
}

/// Where we are in a field while checking quotes.
///
#[derive(Clone, Copy, Debug, PartialEq)]
enum Quote {
    /// Right after a delimiter or at the start of the line
    Start,
    Bare,
    Quoted,
    /// Just seen a `"` inside a quoted field, either closing or first half of `""`
    Closing,
}

/// The `csv` reader happily accepts stray quotes, we do not.
///
/// A `"` may only open a field, a closing one must be followed by a delimiter or the end of the
/// line and `""` is the only way to have a quote inside a quoted field.
///
fn check_quoting(line: &[u8]) -> Result<(), RecordError> {
    let mut state = Quote::Start;

    for (pos, c) in line.iter().copied().enumerate() {
        state = match (state, c) {
            (Quote::Start, b'"') => Quote::Quoted,
            (Quote::Start | Quote::Bare | Quote::Closing, b',' | b'\r' | b'\n') => Quote::Start,
            (Quote::Bare, b'"') => {
                return Err(RecordError::Quoting {
                    pos,
                    reason: "bare \" in non-quoted field",
                })
            }
            (Quote::Start | Quote::Bare, _) => Quote::Bare,
            (Quote::Quoted, b'"') => Quote::Closing,
            (Quote::Quoted, _) => Quote::Quoted,
            (Quote::Closing, b'"') => Quote::Quoted,
            (Quote::Closing, _) => {
                return Err(RecordError::Quoting {
                    pos,
                    reason: "extraneous or missing \" in quoted field",
                })
            }
        };
    }

    if state == Quote::Quoted {
        return Err(RecordError::Quoting {
            pos: line.len(),
            reason: "unterminated quoted field",
        });
    }
    Ok(())
}

/// Parse exactly one CSV record out of `line`, `None` if there is nothing there.
///
pub fn parse_record(line: &[u8]) -> Result<Option<StringRecord>, RecordError> {
    check_quoting(line)?;

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(line);

    let mut rec = StringRecord::new();
    if rdr.read_record(&mut rec)? {
        Ok(Some(rec))
    } else {
        Ok(None)
    }
}

/// Exact, case-sensitive match on the first seven columns.
///
pub fn is_header(rec: &StringRecord) -> bool {
    rec.len() >= SOURCE_HEADER.len() && rec.iter().zip(SOURCE_HEADER).all(|(a, b)| a == b)
}

/// Turn one raw input line into something the converter can act upon.
///
pub fn classify(line: &[u8]) -> Result<Line, RecordError> {
    let rec = match parse_record(line)? {
        Some(rec) => rec,
        None => return Ok(Line::Blank),
    };
    trace!("rec={:?}", rec);

    if is_header(&rec) {
        return Ok(Line::Header);
    }
    Ok(Line::Fix(Fix::try_from(&rec)?))
}
