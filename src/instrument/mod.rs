// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
The instrument fixture: the NUV bandpass and the physical and detector
constants the sensitivity model needs. None of this is user-controllable;
the bandpass is a fixed, versioned transmission curve over its native
wavelength grid.
 */

use lazy_static::lazy_static;

use crate::constants::PI;
use crate::math::interp;

/// Telescope aperture diameter \[cm\]
pub const APERTURE_DIAMETER_CM: f64 = 13.0;

/// Unobscured collecting area \[cm^2\]
pub const APERTURE_AREA_CM2: f64 =
    PI * APERTURE_DIAMETER_CM * APERTURE_DIAMETER_CM / 4.0;

/// Detector plate scale \[arcsec / pixel\]
pub const PLATE_SCALE_ARCSEC: f64 = 4.35;

/// Number of pixels in the aperture-photometry extraction region.
pub const NPIX: f64 = 16.0;

/// Dark current \[electron / s / pixel\]
pub const DARK_CURRENT: f64 = 8.0e-4;

/// Read noise \[electron rms / pixel\]
pub const READ_NOISE: f64 = 3.0;

/// The NUV bandpass's native wavelength grid \[nm\]
const BANDPASS_WAVELENGTHS_NM: [f64; 29] = [
    160.0, 165.0, 170.0, 175.0, 180.0, 185.0, 190.0, 195.0, 200.0, 205.0, 210.0, 215.0, 220.0,
    225.0, 230.0, 235.0, 240.0, 245.0, 250.0, 255.0, 260.0, 265.0, 270.0, 275.0, 280.0, 285.0,
    290.0, 295.0, 300.0,
];

/// End-to-end throughput (optics × filter × detector quantum efficiency) on
/// the native grid, dimensionless.
const BANDPASS_TRANSMISSION: [f64; 29] = [
    0.000, 0.002, 0.008, 0.020, 0.050, 0.090, 0.130, 0.160, 0.180, 0.185, 0.180, 0.170, 0.155,
    0.140, 0.120, 0.100, 0.085, 0.070, 0.055, 0.042, 0.032, 0.023, 0.016, 0.010, 0.006, 0.003,
    0.0015, 0.0005, 0.000,
];

/// A fixed instrument transmission curve over a wavelength grid.
#[derive(Debug)]
pub struct Bandpass {
    wavelengths_nm: &'static [f64],
    transmission: &'static [f64],
}

lazy_static! {
    static ref NUV: Bandpass = Bandpass {
        wavelengths_nm: &BANDPASS_WAVELENGTHS_NM,
        transmission: &BANDPASS_TRANSMISSION,
    };
}

impl Bandpass {
    /// The instrument's NUV bandpass.
    pub fn nuv() -> &'static Bandpass {
        &NUV
    }

    /// The bandpass's native wavelength grid \[nm\].
    pub fn wavelengths_nm(&self) -> &[f64] {
        self.wavelengths_nm
    }

    /// Throughput samples aligned with [Bandpass::wavelengths_nm].
    pub fn transmission(&self) -> &[f64] {
        self.transmission
    }

    /// Throughput at an arbitrary wavelength; zero outside the grid.
    pub fn at(&self, wavelength_nm: f64) -> f64 {
        interp(wavelength_nm, self.wavelengths_nm, self.transmission).unwrap_or(0.0)
    }

    /// Effective collecting area at a wavelength: throughput × aperture area
    /// \[cm^2\].
    pub fn effective_area_cm2(&self, wavelength_nm: f64) -> f64 {
        self.at(wavelength_nm) * APERTURE_AREA_CM2
    }
}
