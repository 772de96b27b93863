//! Convert waypoints exported by a flight planner into a [Litchi] mission.
//!
//! The input is the planner CSV export, one waypoint per line, from which we only keep the
//! position (`xcoord`, `ycoord`) and the altitude above sea level.  The output is the CSV
//! mission format Litchi imports, every column Litchi knows about being filled with its
//! default value.
//!
//! The pipeline is:
//!
//! - [`LineReader`] pulls lines from the input
//! - [`classify()`] parses and validates each one into a [`Fix`]
//! - [`Waypoint::build()`] turns it into a full waypoint, written by the [`Converter`]
//!
//! [Litchi]: https://flylitchi.com/
//!

use clap::{crate_name, crate_version};

pub use convert::*;
pub use distance::*;
pub use logging::*;
pub use source::*;
pub use waypoint::*;

mod convert;
mod distance;
mod logging;
mod source;
mod waypoint;

pub(crate) const VERSION: &str = crate_version!();
pub(crate) const NAME: &str = crate_name!();

/// Returns the library version
///
pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}
