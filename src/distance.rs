//! Photo distance interval given on the command line with `-d`.
//!
//! The value is a number (exponent notation included) followed by a unit, `m` for meters or `ft`
//! for feet, like `20ft`, `15m` or `1e3m`.  A bare number is taken as meters so that the default
//! `0` stays valid.
//!
//! The Litchi mission declares every distance in meters, so whatever is given here ends up
//! converted through [`Distance::meters()`] before being written out.
//!

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use strum::{EnumString, VariantNames};
use thiserror::Error;

/// One international foot, in meters.
const FOOT_IN_METERS: f64 = 0.3048;

/// Units accepted after the number.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, EnumString, VariantNames, strum::Display)]
pub enum Unit {
    #[default]
    #[strum(serialize = "m")]
    Meters,
    #[strum(serialize = "ft")]
    Feet,
}

#[derive(Debug, Error, PartialEq)]
pub enum DistanceError {
    #[error("empty distance")]
    Empty,
    #[error("bad distance value {0:?}")]
    BadValue(String),
    #[error("distance can not be negative: {0}")]
    Negative(f64),
    #[error("unknown unit {0:?}, use one of {units:?}", units = Unit::VARIANTS)]
    BadUnit(String),
}

/// Distance setting for a whole run, immutable once parsed.
///
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Distance {
    pub value: f64,
    pub unit: Unit,
}

impl Distance {
    pub fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    /// Value converted into meters, whatever the original unit was.
    ///
    #[inline]
    pub fn meters(&self) -> f64 {
        match self.unit {
            Unit::Meters => self.value,
            Unit::Feet => self.value * FOOT_IN_METERS,
        }
    }
}

impl FromStr for Distance {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DistanceError::Empty);
        }

        // The unit is the trailing run of letters, so that `1e3m` still works
        //
        let pos = s.trim_end_matches(|c: char| c.is_ascii_alphabetic()).len();
        let (num, unit) = s.split_at(pos);
        let (num, unit) = (num.trim(), unit.trim());

        let value: f64 = num
            .parse()
            .map_err(|_| DistanceError::BadValue(num.to_string()))?;
        if !value.is_finite() {
            return Err(DistanceError::BadValue(num.to_string()));
        }
        if value < 0. {
            return Err(DistanceError::Negative(value));
        }

        let unit = if unit.is_empty() {
            Unit::Meters
        } else {
            Unit::from_str(unit).map_err(|_| DistanceError::BadUnit(unit.to_string()))?
        };
        Ok(Distance { value, unit })
    }
}

impl Display for Distance {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.value, self.unit)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[test]
    fn test_distance_default() {
        let d = Distance::default();
        assert_eq!(0., d.meters());
        assert_eq!(Unit::Meters, d.unit);
    }

    #[rstest]
    #[case("0", 0., Unit::Meters)]
    #[case("20m", 20., Unit::Meters)]
    #[case("20ft", 20., Unit::Feet)]
    #[case("12.5 m", 12.5, Unit::Meters)]
    #[case(" 7ft ", 7., Unit::Feet)]
    #[case("1e3m", 1000., Unit::Meters)]
    #[case("2.5e1ft", 25., Unit::Feet)]
    #[case("1e2", 100., Unit::Meters)]
    fn test_distance_parse(#[case] inp: &str, #[case] value: f64, #[case] unit: Unit) {
        let d: Distance = inp.parse().unwrap();
        assert_eq!(Distance::new(value, unit), d);
    }

    #[rstest]
    #[case("", DistanceError::Empty)]
    #[case("ft", DistanceError::BadValue(String::new()))]
    #[case("abc", DistanceError::BadValue(String::new()))]
    #[case("20yd", DistanceError::BadUnit("yd".to_string()))]
    #[case("20FT", DistanceError::BadUnit("FT".to_string()))]
    #[case("1e", DistanceError::BadUnit("e".to_string()))]
    #[case("-3m", DistanceError::Negative(-3.))]
    fn test_distance_parse_bad(#[case] inp: &str, #[case] err: DistanceError) {
        assert_eq!(Err(err), inp.parse::<Distance>());
    }

    #[test]
    fn test_distance_parse_infinite() {
        assert!(matches!(
            "inf".parse::<Distance>(),
            Err(DistanceError::BadValue(_))
        ));
    }

    #[test]
    fn test_distance_feet_to_meters() {
        let d: Distance = "20ft".parse().unwrap();
        assert!((d.meters() - 6.096).abs() < 1e-9);
    }

    #[test]
    fn test_distance_meters_unchanged() {
        let d: Distance = "15m".parse().unwrap();
        assert_eq!(15., d.meters());
    }

    #[test]
    fn test_distance_display() {
        assert_eq!("20ft", Distance::new(20., Unit::Feet).to_string());
        assert_eq!("2.5m", Distance::new(2.5, Unit::Meters).to_string());
    }
}
