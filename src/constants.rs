// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Useful constants.

All constants *must* be double precision. `uvetc` should do as many
calculations as possible in double precision.
 */

pub use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Speed of light \[cm/s\]
pub const VEL_C_CM_S: f64 = 2.99792458e10;

/// The Planck constant \[erg s\]
pub const PLANCK_ERG_S: f64 = 6.62607015e-27;

/// The Boltzmann constant \[erg/K\]
pub const BOLTZMANN_ERG_K: f64 = 1.380649e-16;

/// One Jansky in CGS units \[erg / s / cm^2 / Hz\]
pub const JANSKY_CGS: f64 = 1e-23;

/// Zero point of the AB magnitude system \[erg / s / cm^2 / Hz\]
pub const AB_ZERO_POINT_F_NU: f64 = 3631.0 * JANSKY_CGS;

/// Zero point of the ST magnitude system \[erg / s / cm^2 / nm\]
///
/// The canonical definition is 3.631e-9 erg / s / cm^2 / Angstrom.
pub const ST_ZERO_POINT_F_LAM: f64 = 3.631e-8;

/// Nanometres per centimetre.
pub const NM_PER_CM: f64 = 1e7;

/// Solid angle subtended by a star of one solar radius at a distance of
/// 1 kpc \[sr\]. This is the normalisation applied to the thermal source
/// template, matching the convention of normalised blackbody spectra in
/// synthetic photometry.
pub const THERMAL_NORM_SOLID_ANGLE_SR: f64 = {
    // R_sun = 6.957e10 cm, 1 kpc = 3.0857e21 cm
    let ratio = 6.957e10 / 3.0857e21;
    PI * ratio * ratio
};

/// The target signal-to-noise ratio used when none is specified.
pub const DEFAULT_SNR: f64 = 5.0;

/// The default blackbody temperature \[K\]
pub const DEFAULT_TEMPERATURE_K: u32 = 10000;

/// The largest blackbody temperature accepted \[K\]
pub const MAX_TEMPERATURE_K: u32 = 20000;
