//! Output side: one waypoint of a Litchi mission.
//!
//! Litchi wants every column filled in, so a [`Waypoint`] starts from the defaults below and
//! only gets its position, altitude, gimbal pitch and photo distance interval from us.
//!
//! - heading 360 means "keep the current one"
//! - action type -1 means "no action" for all 15 slots
//! - altitude mode 1 is "above ground"
//! - photo time interval -1 means disabled
//!
//! All distances are in meters, speed in m/s.
//!

use std::fmt::{Display, Formatter, LowerExp};

use crate::{Distance, Fix};

/// Number of action slots per waypoint.
pub const ACTIONS: usize = 15;

/// Number of columns in a mission line.
pub const COLUMNS: usize = 16 + 2 * ACTIONS;

/// Header line of a Litchi mission, written once before any waypoint.
pub const HEADER: &str = concat!(
    "latitude, longitude, altitude(m), heading(deg), curvesize(m), rotationdir, gimbalmode, ",
    "gimbalpitchangle, actiontype1, actionparam1, actiontype2, actionparam2, actiontype3, ",
    "actionparam3, actiontype4, actionparam4, actiontype5, actionparam5, actiontype6, ",
    "actionparam6, actiontype7, actionparam7, actiontype8, actionparam8, actiontype9, ",
    "actionparam9, actiontype10, actionparam10, actiontype11, actionparam11, actiontype12, ",
    "actionparam12, actiontype13, actionparam13, actiontype14, actionparam14, actiontype15, ",
    "actionparam15, altitudemode, speed(m/s), poi_latitude, poi_longitude, poi_altitude(m), ",
    "poi_altitudemode, photo_timeinterval, photo_distinterval"
);

/// Camera pointing straight down.
const GIMBAL_PITCH_DOWN: f32 = -90.;

/// One camera action slot.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Action {
    pub kind: i8,
    pub param: i8,
}

impl Default for Action {
    fn default() -> Self {
        Action { kind: -1, param: 0 }
    }
}

/// A complete Litchi waypoint, in column order.
///
#[derive(Clone, Debug, PartialEq)]
pub struct Waypoint {
    pub latitude: f64,
    pub longitude: f64,
    // meters
    pub altitude: f64,
    pub heading: f32,
    // meters
    pub curve_size: f32,
    pub rotation_dir: i8,
    pub gimbal_mode: i8,
    pub gimbal_pitch: f32,
    pub actions: [Action; ACTIONS],
    pub altitude_mode: i8,
    // m/s
    pub speed: f32,
    pub poi_latitude: f64,
    pub poi_longitude: f64,
    // meters
    pub poi_altitude: f64,
    pub poi_altitude_mode: i8,
    pub photo_time_interval: f32,
    // meters
    pub photo_dist_interval: f64,
}

impl Default for Waypoint {
    fn default() -> Self {
        Waypoint {
            latitude: 0.,
            longitude: 0.,
            altitude: 0.,
            heading: 360.,
            curve_size: 0.,
            rotation_dir: 0,
            gimbal_mode: 0,
            gimbal_pitch: 0.,
            actions: [Action::default(); ACTIONS],
            altitude_mode: 1,
            speed: 0.,
            poi_latitude: 0.,
            poi_longitude: 0.,
            poi_altitude: 0.,
            poi_altitude_mode: 0,
            photo_time_interval: -1.,
            photo_dist_interval: 0.,
        }
    }
}

impl Waypoint {
    /// Build a fresh waypoint for `fix`.  The flight plan carries no gimbal data so the camera
    /// always points down.
    ///
    pub fn build(fix: &Fix, distance: &Distance) -> Self {
        Waypoint {
            latitude: fix.latitude,
            longitude: fix.longitude,
            altitude: fix.altitude,
            gimbal_pitch: GIMBAL_PITCH_DOWN,
            photo_dist_interval: distance.meters(),
            ..Default::default()
        }
    }
}

/// Float written the shortest way, switching to `d.ddde±XX` when the decimal exponent is below
/// -4 or at least 6, so `1e+06` and `1e-07` but `123456` and `0.0001`.
///
#[derive(Clone, Copy, Debug)]
pub struct General<T>(pub T);

impl<T: Display + LowerExp> Display for General<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let sci = format!("{:e}", self.0);
        let parts = sci
            .split_once('e')
            .and_then(|(mantissa, exp)| Some((mantissa, exp.parse::<i32>().ok()?)));

        match parts {
            Some((mantissa, exp)) if !(-4..6).contains(&exp) => {
                let sign = if exp < 0 { '-' } else { '+' };
                write!(f, "{}e{}{:02}", mantissa, sign, exp.abs())
            }
            _ => write!(f, "{}", self.0),
        }
    }
}

impl Display for Waypoint {
    /// Comma-space separated, same order as [`HEADER`], no line terminator.
    ///
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}, {}, {}, {}, {}, {}, {}, {}",
            General(self.latitude),
            General(self.longitude),
            General(self.altitude),
            General(self.heading),
            General(self.curve_size),
            self.rotation_dir,
            self.gimbal_mode,
            General(self.gimbal_pitch)
        )?;
        for action in &self.actions {
            write!(f, ", {}, {}", action.kind, action.param)?;
        }
        write!(
            f,
            ", {}, {}, {}, {}, {}, {}, {}, {}",
            self.altitude_mode,
            General(self.speed),
            General(self.poi_latitude),
            General(self.poi_longitude),
            General(self.poi_altitude),
            self.poi_altitude_mode,
            General(self.photo_time_interval),
            General(self.photo_dist_interval)
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::Unit;

    fn fix() -> Fix {
        Fix {
            longitude: -122.41,
            latitude: 37.77,
            altitude: 50.0,
        }
    }

    #[test]
    fn test_header_columns() {
        assert_eq!(COLUMNS, HEADER.split(", ").count());
        assert!(HEADER.starts_with("latitude, longitude, altitude(m), "));
        assert!(HEADER.ends_with("photo_timeinterval, photo_distinterval"));
    }

    #[test]
    fn test_waypoint_default() {
        let wp = Waypoint::default();
        assert_eq!(360., wp.heading);
        assert_eq!(1, wp.altitude_mode);
        assert_eq!(-1., wp.photo_time_interval);
        assert!(wp.actions.iter().all(|a| *a == Action { kind: -1, param: 0 }));
    }

    #[test]
    fn test_waypoint_build() {
        let wp = Waypoint::build(&fix(), &Distance::new(20., Unit::Feet));
        assert_eq!(-122.41, wp.longitude);
        assert_eq!(37.77, wp.latitude);
        assert_eq!(50.0, wp.altitude);
        assert_eq!(-90., wp.gimbal_pitch);
        assert!((wp.photo_dist_interval - 6.096).abs() < 1e-9);
        assert_eq!(Waypoint::default().actions, wp.actions);
    }

    #[rstest]
    #[case(Distance::default())]
    #[case(Distance::new(15., Unit::Meters))]
    #[case(Distance::new(100., Unit::Feet))]
    fn test_waypoint_gimbal_always_down(#[case] distance: Distance) {
        let wp = Waypoint::build(&fix(), &distance);
        assert_eq!(GIMBAL_PITCH_DOWN, wp.gimbal_pitch);
        assert_eq!(distance.meters(), wp.photo_dist_interval);
    }

    #[test]
    fn test_waypoint_display() {
        let wp = Waypoint::build(&fix(), &Distance::new(15., Unit::Meters));
        let line = wp.to_string();
        let fields: Vec<_> = line.split(", ").collect();

        assert_eq!(COLUMNS, fields.len());
        assert_eq!(["37.77", "-122.41", "50", "360", "0", "0", "0", "-90"], fields[..8]);
        assert!(fields[8..38].chunks(2).all(|c| c == ["-1", "0"]));
        assert_eq!(["1", "0", "0", "0", "0", "0", "-1", "15"], fields[38..]);
    }

    #[rstest]
    #[case(50.0, "50")]
    #[case(-122.41, "-122.41")]
    #[case(0.0, "0")]
    #[case(123456.0, "123456")]
    #[case(1234567.0, "1.234567e+06")]
    #[case(1e25, "1e+25")]
    #[case(1e100, "1e+100")]
    #[case(0.0001, "0.0001")]
    #[case(1e-7, "1e-07")]
    #[case(-2.5e-5, "-2.5e-05")]
    fn test_general_f64(#[case] v: f64, #[case] out: &str) {
        assert_eq!(out, General(v).to_string());
    }

    #[rstest]
    #[case(360., "360")]
    #[case(-90., "-90")]
    #[case(0.1, "0.1")]
    #[case(-1., "-1")]
    fn test_general_f32(#[case] v: f32, #[case] out: &str) {
        assert_eq!(out, General(v).to_string());
    }

    #[test]
    fn test_waypoint_display_exponent() {
        let f = Fix {
            longitude: 1e-7,
            latitude: 0.,
            altitude: 1e25,
        };
        let line = Waypoint::build(&f, &Distance::default()).to_string();
        assert!(line.starts_with("0, 1e-07, 1e+25, 360, "));
    }

    #[test]
    fn test_waypoint_display_keeps_precision() {
        let f = Fix {
            longitude: 2.3522219,
            latitude: 48.856614,
            altitude: 35.25,
        };
        let line = Waypoint::build(&f, &Distance::default()).to_string();
        assert!(line.starts_with("48.856614, 2.3522219, 35.25, "));
    }
}
