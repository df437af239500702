// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Error type for all calculator-related errors. This should be the *only*
//! error enum that is publicly visible.

use thiserror::Error;

use super::{common::ArgsError, plot_spectrum::PlotSpectrumError};
use crate::{background::BackgroundError, sensitivity::SensitivityError};

/// The *only* publicly visible error from the calculator.
#[derive(Error, Debug)]
pub enum EtcError {
    /// An error related to resolving the sky background.
    #[error("{0}")]
    Background(String),

    /// An error related to the source spectral model.
    #[error("{0}")]
    Source(String),

    /// An error from the sensitivity model.
    #[error("{0}")]
    Sensitivity(String),

    /// An error related to chart rendering.
    #[error("{0}")]
    Plot(String),

    /// An error related to argument files.
    #[error("{0}")]
    ArgFile(String),

    /// A generic error that can't be clarified further, e.g. IO errors.
    #[error("{0}")]
    Generic(String),
}

impl From<ArgsError> for EtcError {
    fn from(e: ArgsError) -> Self {
        let s = e.to_string();
        match e {
            ArgsError::UnknownZodiLevel(_) => Self::Background(s),
            ArgsError::UnknownSpectrumModel(_) | ArgsError::TemperatureTooHigh { .. } => {
                Self::Source(s)
            }
            ArgsError::NonPositiveSnr(_) => Self::Sensitivity(s),
        }
    }
}

impl From<BackgroundError> for EtcError {
    fn from(e: BackgroundError) -> Self {
        Self::Background(e.to_string())
    }
}

impl From<SensitivityError> for EtcError {
    fn from(e: SensitivityError) -> Self {
        Self::Sensitivity(e.to_string())
    }
}

impl From<PlotSpectrumError> for EtcError {
    fn from(e: PlotSpectrumError) -> Self {
        Self::Plot(e.to_string())
    }
}

#[cfg(feature = "plotting")]
impl From<crate::plot::DrawError> for EtcError {
    fn from(e: crate::plot::DrawError) -> Self {
        Self::Plot(e.to_string())
    }
}

impl From<std::io::Error> for EtcError {
    fn from(e: std::io::Error) -> Self {
        Self::Generic(e.to_string())
    }
}
