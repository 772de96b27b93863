//! Read the waypoints of a flight plan exported as CSV and turn them into a [Litchi] mission.
//!
//! ```text
//! fp2litchi -d 20ft < plan.csv > mission.csv
//! ```
//!
//! Lines that can not be used are reported on stderr and skipped, the run goes on.  Only an I/O
//! error on the input or output stops it.
//!
//! Author: Ollivier Robert <ollivier.robert@eurocontrol.int>
//! Copyright: (c) 2026 by Ollivier Robert
//!
//! [Litchi]: https://flylitchi.com/
//!
use std::fs::File;
use std::io::{stderr, stdin, stdout, BufReader, BufWriter, Write};

use clap::Parser;
use eyre::{Result, WrapErr};
use tracing::{info, trace};

use fp2litchi::{init_logging, version, Converter};

use crate::cli::{check_args, Opts};

mod cli;

fn main() -> Result<()> {
    let opts: Opts = Opts::parse();

    // Add banner
    //
    if !opts.quiet || opts.version {
        writeln!(stderr(), "{}", version())?;
    }

    // Exit if needed
    //
    if opts.version {
        return Ok(());
    }

    check_args(&opts)?;

    // Prepare logging.
    //
    init_logging(opts.verbose)?;
    trace!("Logging initialised.");

    info!("Photo distance interval is {}", opts.distance);
    let conv = Converter::new(opts.distance);

    let output: Box<dyn Write> = match &opts.output {
        Some(fname) => {
            info!("Writing to {:?}", fname);
            let fh = File::create(fname).wrap_err_with(|| format!("can not create {:?}", fname))?;
            Box::new(BufWriter::new(fh))
        }
        None => Box::new(stdout().lock()),
    };

    let stats = match opts.input_file() {
        Some(fname) => {
            info!("Reading from {:?}", fname);
            let fh = File::open(fname).wrap_err_with(|| format!("can not open {:?}", fname))?;
            conv.run(BufReader::new(fh), output)?
        }
        None => conv.run(stdin().lock(), output)?,
    };
    trace!("stats={:?}", stats);

    Ok(())
}
