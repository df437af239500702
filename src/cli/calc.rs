// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The `calc` subcommand: one full pass of the calculator.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info, trace};
use serde::{Deserialize, Serialize};
use vec1::Vec1;

use super::common::{
    display_warnings, ArgsError, BackgroundArgs, InfoPrinter, SourceArgs, ARG_FILE_HELP,
};
use super::EtcError;
use crate::background::{canonical_iso, ResolvedBackground};
use crate::constants::DEFAULT_SNR;
use crate::instrument::Bandpass;
use crate::sensitivity::{band_ab_mag, exptime_grid_min, get_limmag};
use crate::source::SourceSpectrum;

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct CalcArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "background")]
    #[serde(default)]
    pub(super) background: BackgroundArgs,

    #[clap(flatten)]
    #[serde(rename = "source")]
    #[serde(default)]
    pub(super) source: SourceArgs,

    /// The target signal-to-noise ratio of the detection. Default: 5
    #[clap(long)]
    pub(super) snr: Option<f64>,

    /// The directory to write the chart PNGs into. Default: the current
    /// directory.
    #[clap(short = 'o', long, help_heading = "OUTPUT FILES")]
    pub(super) output_dir: Option<PathBuf>,

    /// Don't render the charts; only print the limiting-magnitude table.
    #[clap(long, help_heading = "OUTPUT FILES")]
    #[serde(default)]
    pub(super) no_plots: bool,
}

impl CalcArgs {
    /// Both command-line and file arguments overlap in terms of what is
    /// available; this function consolidates everything that was specified
    /// into a single struct. Where applicable, it will prefer CLI parameters
    /// over those in the file.
    pub(super) fn merge(self) -> Result<CalcArgs, EtcError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            // Read in the file arguments. Ensure all of the file args are
            // accounted for by pattern matching.
            let CalcArgs {
                args_file: _,
                background,
                source,
                snr,
                output_dir,
                no_plots,
            } = unpack_arg_file!(arg_file);

            // Merge all the arguments, preferring the CLI args when available.
            Ok(CalcArgs {
                args_file: None,
                background: cli_args.background.merge(background),
                source: cli_args.source.merge(source),
                snr: cli_args.snr.or(snr),
                output_dir: cli_args.output_dir.or(output_dir),
                no_plots: cli_args.no_plots || no_plots,
            })
        } else {
            Ok(cli_args)
        }
    }

    /// Resolve the arguments into parameters. Everything the user typed is
    /// validated here, before any computation happens.
    pub(super) fn parse(self) -> Result<CalcParams, EtcError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            background,
            source,
            snr,
            output_dir,
            no_plots,
        } = self;

        let bg = background.parse()?;
        let source = source.parse()?;

        let snr = snr.unwrap_or(DEFAULT_SNR);
        if !snr.is_finite() || snr <= 0.0 {
            return Err(ArgsError::NonPositiveSnr(snr).into());
        }

        let mut printer = InfoPrinter::new("Sky background".into());
        printer.push_line(format!("Time: {}", canonical_iso(bg.time)).into());
        printer.push_line(
            format!(
                "Coords: {} ({})",
                bg.coord.to_hmsdms_string(),
                bg.coord.to_decimal_string()
            )
            .into(),
        );
        printer.push_line(
            format!(
                "Helio-ecliptic longitude {:.1}°, ecliptic latitude {:.1}°",
                bg.helio_lon.to_degrees(),
                bg.ecl_lat.to_degrees()
            )
            .into(),
        );
        printer.push_line(if bg.night { "Orbit night" } else { "Orbit day" }.into());
        printer.display();

        let mut printer = InfoPrinter::new("Source model".into());
        printer.push_line(source.describe().into());
        if let Some(m) = band_ab_mag(&source, Bandpass::nuv()) {
            printer.push_line(format!("AB magnitude through the bandpass: {m:.2}").into());
        }
        printer.display();

        display_warnings();

        Ok(CalcParams {
            source,
            bg,
            snr,
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
            no_plots,
        })
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), EtcError> {
        debug!("Converting arguments into parameters");
        trace!("{:#?}", self);
        let params = self.parse()?;

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        params.run()?;
        Ok(())
    }
}

#[derive(Debug)]
pub(super) struct CalcParams {
    pub(super) source: SourceSpectrum,
    pub(super) bg: ResolvedBackground,
    pub(super) snr: f64,
    pub(super) output_dir: PathBuf,
    pub(super) no_plots: bool,
}

impl CalcParams {
    pub(super) fn run(&self) -> Result<(), EtcError> {
        let bandpass = Bandpass::nuv();
        let exptimes = exptime_grid_min();
        let limmags: Vec1<f64> =
            get_limmag(&self.source, &exptimes, self.snr, bandpass, &self.bg)?;

        // The limiting-magnitude table goes on stdout, one row per exposure
        // time, so it can be piped and grepped.
        println!("Exposure time [min]  Limiting magnitude [AB]");
        for (t, m) in exptimes.iter().zip(limmags.iter()) {
            println!("{t:>19.0}  {m:>23.2}");
        }

        if self.no_plots {
            return Ok(());
        }

        #[cfg(feature = "plotting")]
        {
            use crate::sensitivity::spectrum_table;

            std::fs::create_dir_all(&self.output_dir)?;

            let table = spectrum_table(&self.source, bandpass);
            let spectrum_png = self.output_dir.join("spectrum.png");
            crate::plot::plot_spectrum(&table, &spectrum_png)?;
            info!("Wrote {}", spectrum_png.display());

            let sensitivity_png = self.output_dir.join("sensitivity.png");
            crate::plot::plot_sensitivity(
                &exptimes,
                limmags.as_slice(),
                self.snr,
                &sensitivity_png,
            )?;
            info!("Wrote {}", sensitivity_png.display());
        }

        #[cfg(not(feature = "plotting"))]
        log::warn!("Compiled without the \"plotting\" feature; not writing charts");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_snr_is_rejected() {
        let args = CalcArgs {
            snr: Some(0.0),
            no_plots: true,
            ..Default::default()
        };
        let err = args.parse().unwrap_err();
        assert!(err.to_string().contains("signal-to-noise"));
    }

    #[test]
    fn negative_snr_is_rejected() {
        let args = CalcArgs {
            snr: Some(-5.0),
            no_plots: true,
            ..Default::default()
        };
        assert!(args.parse().is_err());
    }

    #[test]
    fn nan_snr_is_rejected() {
        let args = CalcArgs {
            snr: Some(f64::NAN),
            no_plots: true,
            ..Default::default()
        };
        assert!(args.parse().is_err());
    }
}
