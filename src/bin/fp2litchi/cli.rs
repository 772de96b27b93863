use std::path::PathBuf;

use clap::{crate_authors, crate_description, crate_name, crate_version, Parser};
use eyre::{eyre, Result};

use fp2litchi::Distance;

/// CLI options
#[derive(Parser, Debug)]
#[command(disable_version_flag = true)]
#[clap(name = crate_name!(), about = crate_description!())]
#[clap(version = crate_version!(), author = crate_authors!())]
pub struct Opts {
    /// Photo interval distance, in meters 'm' or feet 'ft'. Example: -d 20ft
    #[clap(short = 'd', long, default_value = "0")]
    pub distance: Distance,
    /// Output file (default is stdout).
    #[clap(short = 'o', long)]
    pub output: Option<PathBuf>,
    /// quiet mode.
    #[clap(short = 'q', long = "quiet")]
    pub quiet: bool,
    /// Verbose mode.
    #[clap(short = 'v', long, action = clap::ArgAction::Count)]
    pub verbose: u8,
    /// Display utility full version.
    #[clap(short = 'V', long)]
    pub version: bool,
    /// Input file, default or '-' is stdin.
    pub input: Option<PathBuf>,
}

impl Opts {
    /// Input file if there is one, `None` means stdin.
    ///
    pub fn input_file(&self) -> Option<&PathBuf> {
        self.input.as_ref().filter(|p| p.as_os_str() != "-")
    }
}

/// Check the presence and validity of some of the arguments
///
pub fn check_args(opts: &Opts) -> Result<()> {
    if let (Some(input), Some(output)) = (opts.input_file(), &opts.output) {
        if input == output {
            return Err(eyre!("Input and output can not be the same file"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use fp2litchi::Unit;

    #[test]
    fn test_opts_default_distance() {
        let opts = Opts::try_parse_from(["fp2litchi"]).unwrap();
        assert_eq!(Distance::default(), opts.distance);
        assert!(opts.input_file().is_none());
    }

    #[test]
    fn test_opts_distance_feet() {
        let opts = Opts::try_parse_from(["fp2litchi", "-d", "20ft"]).unwrap();
        assert_eq!(Distance::new(20., Unit::Feet), opts.distance);
    }

    #[test]
    fn test_opts_bad_distance() {
        assert!(Opts::try_parse_from(["fp2litchi", "-d", "20yd"]).is_err());
    }

    #[test]
    fn test_opts_dash_is_stdin() {
        let opts = Opts::try_parse_from(["fp2litchi", "-"]).unwrap();
        assert!(opts.input_file().is_none());
    }

    #[test]
    fn test_check_args_same_file() {
        let opts = Opts::try_parse_from(["fp2litchi", "-o", "plan.csv", "plan.csv"]).unwrap();
        assert!(check_args(&opts).is_err());
    }

    #[test]
    fn test_check_args_ok() {
        let opts = Opts::try_parse_from(["fp2litchi", "-o", "mission.csv", "plan.csv"]).unwrap();
        assert!(check_args(&opts).is_ok());
    }
}
