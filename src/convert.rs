//! The conversion itself: read lines, keep the good ones, write waypoints.
//!
//! Everything is sequential, one line is fully processed before the next one is read.  A bad
//! line is logged and skipped; only I/O errors on either stream stop the run.
//!

use std::fmt::{Display, Formatter};
use std::io::{BufRead, Write};
use std::time::Instant;

use eyre::{Result, WrapErr};
use tracing::{debug, info, trace, warn};

use crate::{classify, Distance, Line, Waypoint, HEADER};

/// Pull raw lines (terminator included) out of a reader until EOF.
///
/// Lines are kept as bytes, invalid UTF-8 is caught later on by the CSV parser and only costs
/// that line.
///
pub struct LineReader<R> {
    inner: R,
    num: usize,
}

impl<R: BufRead> LineReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, num: 0 }
    }
}

impl<R: BufRead> Iterator for LineReader<R> {
    /// 1-based line number and content.
    type Item = std::io::Result<(usize, Vec<u8>)>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut buf = vec![];
        match self.inner.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(_) => {
                self.num += 1;
                Some(Ok((self.num, buf)))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// What happened during a run.
///
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Stats {
    /// Lines read
    pub lines: usize,
    /// Flight-planner headers dropped
    pub headers: usize,
    /// Empty lines
    pub blanks: usize,
    /// Lines rejected by the parser
    pub rejected: usize,
    /// Waypoints written
    pub emitted: usize,
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} lines read, {} waypoints, {} rejected, {} headers, {} blank",
            self.lines, self.emitted, self.rejected, self.headers, self.blanks
        )
    }
}

/// Converter for one run, the distance setting is fixed at creation.
///
#[derive(Debug)]
pub struct Converter {
    distance: Distance,
}

impl Converter {
    pub fn new(distance: Distance) -> Self {
        Self { distance }
    }

    /// Convert everything from `input` into `output`.
    ///
    /// The mission header is always written first, even if no waypoint follows.
    ///
    #[tracing::instrument(skip(input, output))]
    pub fn run<R, W>(&self, input: R, mut output: W) -> Result<Stats>
    where
        R: BufRead,
        W: Write,
    {
        trace!("enter");
        let now = Instant::now();
        let mut stats = Stats::default();

        writeln!(output, "{}", HEADER).wrap_err("can not write header")?;

        for line in LineReader::new(input) {
            let (num, line) = line.wrap_err("error reading input")?;
            stats.lines += 1;

            match classify(&line) {
                Ok(Line::Fix(fix)) => {
                    let wp = Waypoint::build(&fix, &self.distance);
                    writeln!(output, "{}", wp)
                        .wrap_err_with(|| format!("can not write waypoint from line {num}"))?;
                    stats.emitted += 1;
                }
                Ok(Line::Header) => {
                    debug!("line {}: header skipped", num);
                    stats.headers += 1;
                }
                Ok(Line::Blank) => {
                    trace!("line {}: blank", num);
                    stats.blanks += 1;
                }
                Err(e) => {
                    match e.field() {
                        Some(field) => warn!("line {}: error parsing {}: {}", num, field, e),
                        None => warn!("line {}: {}", num, e),
                    }
                    stats.rejected += 1;
                }
            }
        }
        output.flush().wrap_err("can not flush output")?;

        info!("{} in {}ms", stats, now.elapsed().as_millis());
        Ok(stats)
    }
}
