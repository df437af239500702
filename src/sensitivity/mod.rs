// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The sensitivity model.

Count rates for the source and the sky backgrounds are integrated over the
instrument bandpass, then the CCD equation is inverted for the source scale
that reaches the target signal-to-noise ratio at each exposure time. The
limiting-magnitude entry point is batched: it takes the whole grid of
exposure times and returns one AB magnitude per entry, index-aligned.
 */

pub(crate) mod zodi;

use ndarray::Array1;
use thiserror::Error;
use vec1::Vec1;

use crate::background::ResolvedBackground;
use crate::constants::{AB_ZERO_POINT_F_NU, NM_PER_CM, PLANCK_ERG_S, VEL_C_CM_S};
use crate::instrument::{Bandpass, DARK_CURRENT, NPIX, READ_NOISE};
use crate::math::trapezoid;
use crate::source::SourceSpectrum;

/// Airglow count rate in orbit night \[electron / s / pixel\]. Dominated by
/// the O I 247.1 nm line redistributed over the extraction region.
const AIRGLOW_NIGHT_RATE: f64 = 1.2e-3;

/// Day-side airglow enhancement over orbit night.
const AIRGLOW_DAY_FACTOR: f64 = 35.0;

/// The fixed exposure-time grid \[minutes\]: the integers 1..=19,
/// ascending, always.
pub fn exptime_grid_min() -> Vec<f64> {
    (1..=19).map(f64::from).collect()
}

#[derive(Error, Debug)]
pub enum SensitivityError {
    #[error("The source spectrum has no flux in the instrument bandpass")]
    NoSourceFlux,

    #[error("No exposure times were supplied")]
    NoExposureTimes,
}

/// The per-wavelength table behind the spectrum/bandpass chart: the
/// bandpass's native grid, the effective collecting area and the source
/// flux density on that grid.
#[derive(Debug, Clone)]
pub struct SpectrumTable {
    /// Wavelength \[nm\]
    pub wavelength_nm: Array1<f64>,
    /// Effective collecting area \[cm^2\]
    pub effective_area_cm2: Array1<f64>,
    /// Source flux density \[erg / s / cm^2 / nm\]
    pub source_flux_density: Array1<f64>,
}

/// Sample the bandpass and the source spectrum on the bandpass's native
/// wavelength grid.
pub fn spectrum_table(source: &SourceSpectrum, bandpass: &Bandpass) -> SpectrumTable {
    let grid = bandpass.wavelengths_nm();
    SpectrumTable {
        wavelength_nm: Array1::from_iter(grid.iter().copied()),
        effective_area_cm2: Array1::from_iter(
            grid.iter().map(|&nm| bandpass.effective_area_cm2(nm)),
        ),
        source_flux_density: Array1::from_iter(grid.iter().map(|&nm| source.flux_density(nm))),
    }
}

/// Source count rate through the bandpass \[electron / s\].
pub(crate) fn source_count_rate(source: &SourceSpectrum, bandpass: &Bandpass) -> f64 {
    let hc = PLANCK_ERG_S * VEL_C_CM_S;
    let grid = bandpass.wavelengths_nm();
    let integrand: Vec<f64> = grid
        .iter()
        .map(|&nm| {
            let lambda_cm = nm / NM_PER_CM;
            source.flux_density(nm) * bandpass.effective_area_cm2(nm) / (hc / lambda_cm)
        })
        .collect();
    trapezoid(grid, &integrand)
}

/// The source template's AB magnitude through the bandpass: the
/// photon-weighted mean flux density relative to the AB zero point.
pub fn band_ab_mag(source: &SourceSpectrum, bandpass: &Bandpass) -> Option<f64> {
    let grid = bandpass.wavelengths_nm();

    // F_ν T / λ and T / λ, integrated over the grid.
    let numerator: Vec<f64> = grid
        .iter()
        .map(|&nm| {
            let lambda_cm = nm / NM_PER_CM;
            let f_nu = source.flux_density(nm) * NM_PER_CM * lambda_cm * lambda_cm / VEL_C_CM_S;
            f_nu * bandpass.at(nm) / nm
        })
        .collect();
    let denominator: Vec<f64> = grid.iter().map(|&nm| bandpass.at(nm) / nm).collect();

    let mean_f_nu = trapezoid(grid, &numerator) / trapezoid(grid, &denominator);
    (mean_f_nu > 0.0).then(|| -2.5 * (mean_f_nu / AB_ZERO_POINT_F_NU).log10())
}

/// Airglow count rate in the photometry aperture \[electron / s\].
pub(crate) fn airglow_count_rate(night: bool) -> f64 {
    let per_pixel = if night {
        AIRGLOW_NIGHT_RATE
    } else {
        AIRGLOW_NIGHT_RATE * AIRGLOW_DAY_FACTOR
    };
    per_pixel * NPIX
}

/// Total sky background count rate in the photometry aperture
/// \[electron / s\].
pub(crate) fn background_count_rate(bandpass: &Bandpass, bg: &ResolvedBackground) -> f64 {
    zodi::count_rate(bandpass, bg.helio_lon, bg.ecl_lat) + airglow_count_rate(bg.night)
}

/// The limiting AB magnitude of the instrument for the given source
/// template and background, at the target signal-to-noise ratio, for each
/// exposure time.
///
/// The output is index-aligned with `exptimes_min` and has the same length.
pub fn get_limmag(
    source: &SourceSpectrum,
    exptimes_min: &[f64],
    snr: f64,
    bandpass: &Bandpass,
    bg: &ResolvedBackground,
) -> Result<Vec1<f64>, SensitivityError> {
    let source_rate = source_count_rate(source, bandpass);
    let source_mag = band_ab_mag(source, bandpass);
    let (source_rate, source_mag) = match (source_rate > 0.0, source_mag) {
        (true, Some(m)) => (source_rate, m),
        _ => return Err(SensitivityError::NoSourceFlux),
    };

    let bg_rate = background_count_rate(bandpass, bg) + DARK_CURRENT * NPIX;

    let limmags: Vec<f64> = exptimes_min
        .iter()
        .map(|&minutes| {
            let t = minutes * 60.0;
            // Background counts plus the read-noise variance over the
            // extraction region.
            let noise_counts = bg_rate * t + READ_NOISE * READ_NOISE * NPIX;
            // Invert SNR = x / sqrt(x + C) for the limiting source counts x.
            let x = 0.5 * snr * (snr + (snr * snr + 4.0 * noise_counts).sqrt());
            // The template scale that yields x counts in t seconds.
            let scale = x / (source_rate * t);
            source_mag - 2.5 * scale.log10()
        })
        .collect();

    Vec1::try_from_vec(limmags).map_err(|_| SensitivityError::NoExposureTimes)
}
