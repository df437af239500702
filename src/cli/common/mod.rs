// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Argument types and helpers shared by the subcommands.
//!
//! All booleans must have `#[serde(default)]` annotated, and anything that
//! isn't a boolean must be optional. This allows all arguments to be
//! optional *and* usable in an arguments file.

mod printers;

pub(crate) use printers::{display_warnings, InfoPrinter, Warn};

use clap::Args;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};
use thiserror::Error;

use crate::background::{resolve_default, resolve_specific, ResolvedBackground, ZodiLevel};
use crate::constants::{DEFAULT_TEMPERATURE_K, MAX_TEMPERATURE_K};
use crate::source::{SourceSpectrum, SpectrumModel};

use super::EtcError;

/// The time assumed for a "specific" background when none is given.
pub(super) const DEFAULT_SPECIFIC_TIME: &str = "2025-03-01 12:00:00";

/// The sky position assumed for a "specific" background when none is given.
pub(super) const DEFAULT_SPECIFIC_COORDS: &str = "NGC 4993";

lazy_static::lazy_static! {
    pub(super) static ref ARG_FILE_TYPES_COMMA_SEPARATED: String = ArgFileTypes::iter().join(", ");

    pub(super) static ref ARG_FILE_HELP: String =
        format!("All arguments may be specified in a file. Any CLI arguments override arguments set in the file. Supported formats: {}", *ARG_FILE_TYPES_COMMA_SEPARATED);

    pub(super) static ref ZODI_LEVEL_TYPES_COMMA_SEPARATED: String = ZodiLevel::iter().join(", ");

    pub(super) static ref ZODI_LEVEL_HELP: String =
        format!("The zodiacal-light background level. 'specific' resolves the background for a time and sky position. Valid levels are: {}. Default: low", *ZODI_LEVEL_TYPES_COMMA_SEPARATED);

    pub(super) static ref SPECTRUM_MODEL_TYPES_COMMA_SEPARATED: String = SpectrumModel::iter().join(", ");

    pub(super) static ref SPECTRUM_MODEL_HELP: String =
        format!("The source spectral model. Valid models are: {}. Default: thermal", *SPECTRUM_MODEL_TYPES_COMMA_SEPARATED);
}

#[derive(Debug, Display, EnumIter, EnumString)]
pub(super) enum ArgFileTypes {
    #[strum(serialize = "toml")]
    Toml,
    #[strum(serialize = "json")]
    Json,
}

macro_rules! unpack_arg_file {
    ($arg_file:expr) => {{
        use std::{fs::File, io::Read, str::FromStr};

        use crate::cli::common::{ArgFileTypes, ARG_FILE_TYPES_COMMA_SEPARATED};
        use crate::cli::EtcError;

        debug!("Attempting to parse argument file {}", $arg_file.display());

        let mut contents = String::new();
        let arg_file_type = $arg_file
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .and_then(|e| ArgFileTypes::from_str(&e).ok());

        match arg_file_type {
            Some(ArgFileTypes::Toml) => {
                debug!("Parsing toml file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match toml::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(EtcError::ArgFile(format!(
                            "Couldn't decode toml structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            Some(ArgFileTypes::Json) => {
                debug!("Parsing json file...");
                let mut fh = File::open(&$arg_file)?;
                fh.read_to_string(&mut contents)?;
                match serde_json::from_str(&contents) {
                    Ok(p) => p,
                    Err(err) => {
                        return Err(EtcError::ArgFile(format!(
                            "Couldn't decode json structure from {:?}:\n{err}",
                            $arg_file
                        )))
                    }
                }
            }
            _ => {
                return Err(EtcError::ArgFile(format!(
                    "Argument file '{:?}' doesn't have a recognised file extension! Valid extensions are: {}",
                    $arg_file,
                    *ARG_FILE_TYPES_COMMA_SEPARATED
                )))
            }
        }
    }};
}

/// Arguments for the sky background.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub(super) struct BackgroundArgs {
    #[clap(long, help = ZODI_LEVEL_HELP.as_str(), help_heading = "SKY BACKGROUND")]
    pub(super) zodi: Option<String>,

    /// The UTC time of the observation, e.g. '2025-03-01 12:00:00'. Only
    /// used when --zodi is 'specific'.
    #[clap(long, help_heading = "SKY BACKGROUND")]
    pub(super) time: Option<String>,

    /// The sky position of the target: an object name (e.g. 'NGC 4993') or
    /// equatorial coordinates (e.g. '13h09m47.7s -23d23m02s' or
    /// '197.45 -23.38'). Only used when --zodi is 'specific'.
    #[clap(long, help_heading = "SKY BACKGROUND")]
    pub(super) coords: Option<String>,

    /// Assume the observation happens during orbit day, where airglow is
    /// much brighter. The default is orbit night.
    #[clap(long, help_heading = "SKY BACKGROUND")]
    #[serde(default)]
    pub(super) day: bool,
}

impl BackgroundArgs {
    /// Merge two sets of arguments, preferring `self` (the CLI).
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            zodi: self.zodi.or(other.zodi),
            time: self.time.or(other.time),
            coords: self.coords.or(other.coords),
            day: self.day || other.day,
        }
    }

    /// Turn the arguments into a resolved background. The qualitative levels
    /// ignore any supplied time and coordinates (with a warning).
    pub(super) fn parse(&self) -> Result<ResolvedBackground, EtcError> {
        let level = match self.zodi.as_deref() {
            None => ZodiLevel::Low,
            Some(text) => text
                .parse()
                .map_err(|_| ArgsError::UnknownZodiLevel(text.to_string()))?,
        };
        let night = !self.day;

        match level {
            ZodiLevel::Specific => {
                let time = self.time.as_deref().unwrap_or(DEFAULT_SPECIFIC_TIME);
                let coords = self.coords.as_deref().unwrap_or(DEFAULT_SPECIFIC_COORDS);
                Ok(resolve_specific(time, coords, night)?)
            }

            _ => {
                if self.time.is_some() || self.coords.is_some() {
                    format!(
                        "--time and --coords are ignored unless --zodi is 'specific'; using the fixed '{level}' background"
                    )
                    .warn();
                }
                Ok(resolve_default(level, night))
            }
        }
    }
}

/// Arguments for the source spectral model.
#[derive(Debug, Clone, Default, Args, Serialize, Deserialize)]
pub(super) struct SourceArgs {
    #[clap(long, help = SPECTRUM_MODEL_HELP.as_str(), help_heading = "SOURCE MODEL")]
    pub(super) spectrum: Option<String>,

    /// The blackbody temperature [K]. Only used with the 'thermal' spectral
    /// model. Default: 10000
    #[clap(long, help_heading = "SOURCE MODEL")]
    pub(super) temperature: Option<u32>,
}

impl SourceArgs {
    /// Merge two sets of arguments, preferring `self` (the CLI).
    pub(super) fn merge(self, other: Self) -> Self {
        Self {
            spectrum: self.spectrum.or(other.spectrum),
            temperature: self.temperature.or(other.temperature),
        }
    }

    /// Turn the arguments into a source spectrum.
    pub(super) fn parse(&self) -> Result<SourceSpectrum, EtcError> {
        let model = match self.spectrum.as_deref() {
            None => SpectrumModel::Thermal,
            Some(text) => text
                .parse()
                .map_err(|_| ArgsError::UnknownSpectrumModel(text.to_string()))?,
        };

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE_K);
        if temperature > MAX_TEMPERATURE_K {
            return Err(ArgsError::TemperatureTooHigh {
                got: temperature,
                max: MAX_TEMPERATURE_K,
            }
            .into());
        }
        if self.temperature.is_some() && !matches!(model, SpectrumModel::Thermal) {
            "--temperature is ignored unless --spectrum is 'thermal'".warn();
        }

        Ok(SourceSpectrum::new(model, temperature))
    }
}

#[derive(Error, Debug)]
pub(super) enum ArgsError {
    #[error("Unrecognised zodiacal light level '{0}'; valid levels are: {}", *ZODI_LEVEL_TYPES_COMMA_SEPARATED)]
    UnknownZodiLevel(String),

    #[error("Unrecognised spectral model '{0}'; valid models are: {}", *SPECTRUM_MODEL_TYPES_COMMA_SEPARATED)]
    UnknownSpectrumModel(String),

    #[error("The blackbody temperature {got} K is above the supported maximum ({max} K)")]
    TemperatureTooHigh { got: u32, max: u32 },

    #[error("The target signal-to-noise ratio must be positive, got {0}")]
    NonPositiveSnr(f64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_args_merge_prefers_cli() {
        let cli = BackgroundArgs {
            zodi: Some("high".to_string()),
            ..Default::default()
        };
        let file = BackgroundArgs {
            zodi: Some("low".to_string()),
            time: Some("2025-03-01".to_string()),
            day: true,
            ..Default::default()
        };
        let merged = cli.merge(file);
        assert_eq!(merged.zodi.as_deref(), Some("high"));
        assert_eq!(merged.time.as_deref(), Some("2025-03-01"));
        assert!(merged.day);
    }

    #[test]
    fn default_background_is_low_and_night() {
        let bg = BackgroundArgs::default().parse().unwrap();
        assert!(bg.night);
        assert!((bg.ecl_lat.to_degrees() - 90.0).abs() < 1e-9);
    }

    #[test]
    fn specific_background_uses_defaults() {
        let args = BackgroundArgs {
            zodi: Some("specific".to_string()),
            ..Default::default()
        };
        let bg = args.parse().unwrap();
        // NGC 4993 at noon on the reference date.
        assert!((bg.coord.ra.to_degrees() - 197.44875).abs() < 1e-3);
    }

    #[test]
    fn unknown_zodi_level_is_rejected() {
        let args = BackgroundArgs {
            zodi: Some("extreme".to_string()),
            ..Default::default()
        };
        let err = args.parse().unwrap_err();
        assert!(err.to_string().contains("extreme"));
    }

    #[test]
    fn bad_time_text_surfaces_the_exact_message() {
        let args = BackgroundArgs {
            zodi: Some("specific".to_string()),
            time: Some("sometime tomorrow".to_string()),
            ..Default::default()
        };
        let err = args.parse().unwrap_err();
        assert_eq!(err.to_string(), "Did not understand time format");
    }

    #[test]
    fn bad_coord_text_surfaces_the_exact_message() {
        let args = BackgroundArgs {
            zodi: Some("specific".to_string()),
            coords: Some("somewhere over there".to_string()),
            ..Default::default()
        };
        let err = args.parse().unwrap_err();
        assert_eq!(err.to_string(), "Did not understand coordinate format");
    }

    #[test]
    fn default_source_is_a_10000_k_blackbody() {
        let s = SourceArgs::default().parse().unwrap();
        assert_eq!(
            s,
            SourceSpectrum::Thermal {
                temperature_k: 10000.0
            }
        );
    }

    #[test]
    fn excessive_temperature_is_rejected() {
        let args = SourceArgs {
            temperature: Some(25000),
            ..Default::default()
        };
        let err = args.parse().unwrap_err();
        assert!(err.to_string().contains("25000"));
    }

    #[test]
    fn source_args_merge_prefers_cli() {
        let cli = SourceArgs {
            temperature: Some(5000),
            ..Default::default()
        };
        let file = SourceArgs {
            spectrum: Some("flat-nu".to_string()),
            temperature: Some(8000),
        };
        let merged = cli.merge(file);
        assert_eq!(merged.spectrum.as_deref(), Some("flat-nu"));
        assert_eq!(merged.temperature, Some(5000));
    }
}
