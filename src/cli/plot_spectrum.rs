// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! The `plot-spectrum` subcommand: render only the spectrum/bandpass chart.

use std::path::PathBuf;

use clap::Parser;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use super::common::{display_warnings, InfoPrinter, SourceArgs, ARG_FILE_HELP};
use super::EtcError;

#[derive(Parser, Debug, Clone, Default, Serialize, Deserialize)]
pub(super) struct PlotSpectrumArgs {
    #[clap(name = "ARGUMENTS_FILE", help = ARG_FILE_HELP.as_str(), parse(from_os_str))]
    pub(super) args_file: Option<PathBuf>,

    #[clap(flatten)]
    #[serde(rename = "source")]
    #[serde(default)]
    pub(super) source: SourceArgs,

    /// The file to write the chart to. Default: spectrum.png
    #[clap(short = 'o', long, help_heading = "OUTPUT FILES")]
    pub(super) output: Option<PathBuf>,
}

impl PlotSpectrumArgs {
    pub(super) fn merge(self) -> Result<PlotSpectrumArgs, EtcError> {
        debug!("Merging command-line arguments with the argument file");

        let cli_args = self;

        if let Some(arg_file) = cli_args.args_file {
            let PlotSpectrumArgs {
                args_file: _,
                source,
                output,
            } = unpack_arg_file!(arg_file);

            Ok(PlotSpectrumArgs {
                args_file: None,
                source: cli_args.source.merge(source),
                output: cli_args.output.or(output),
            })
        } else {
            Ok(cli_args)
        }
    }

    pub(super) fn run(self, dry_run: bool) -> Result<(), EtcError> {
        debug!("{:#?}", self);

        let Self {
            args_file: _,
            source,
            output,
        } = self;

        let source = source.parse()?;
        let mut printer = InfoPrinter::new("Source model".into());
        printer.push_line(source.describe().into());
        printer.display();
        display_warnings();

        if dry_run {
            info!("Dry run -- exiting now.");
            return Ok(());
        }

        #[cfg(not(feature = "plotting"))]
        {
            let _ = output;
            Err(PlotSpectrumError::NoPlottingFeature.into())
        }

        #[cfg(feature = "plotting")]
        {
            use crate::instrument::Bandpass;
            use crate::sensitivity::spectrum_table;

            let table = spectrum_table(&source, Bandpass::nuv());
            let output = output.unwrap_or_else(|| PathBuf::from("spectrum.png"));
            crate::plot::plot_spectrum(&table, &output)?;
            info!("Wrote {}", output.display());
            Ok(())
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub(super) enum PlotSpectrumError {
    #[cfg(not(feature = "plotting"))]
    #[error("Can't plot the spectrum; the \"plotting\" feature was not enabled when compiling")]
    NoPlottingFeature,
}
