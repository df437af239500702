// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Zodiacal-light sky background.

The spectral shape is the tabulated "high" zodiacal-light sky of the HST
STIS instrument handbook (Table 6.4), which is also the reference spectrum
used by NUV mission sensitivity tools. Position dependence is a smooth
scale factor over helio-ecliptic longitude and ecliptic latitude, after
Leinert et al. (1998), normalised to 1 at the anti-solar point on the
ecliptic.
 */

use crate::constants::{NM_PER_CM, PLANCK_ERG_S, VEL_C_CM_S};
use crate::instrument::{Bandpass, NPIX, PLATE_SCALE_ARCSEC};
use crate::math::{interp, trapezoid};

/// Wavelength grid of the STIS sky table \[nm\]
const STIS_WAVELENGTHS_NM: [f64; 59] = [
    100.0, 110.0, 120.0, 130.0, 140.0, 150.0, 160.0, 170.0, 180.0, 190.0, 200.0, 210.0, 220.0,
    230.0, 240.0, 250.0, 260.0, 270.0, 280.0, 290.0, 300.0, 310.0, 320.0, 330.0, 340.0, 350.0,
    360.0, 370.0, 380.0, 390.0, 400.0, 425.0, 450.0, 475.0, 500.0, 525.0, 550.0, 575.0, 600.0,
    625.0, 650.0, 675.0, 700.0, 725.0, 750.0, 775.0, 800.0, 825.0, 850.0, 875.0, 900.0, 925.0,
    950.0, 975.0, 1000.0, 1025.0, 1050.0, 1075.0, 1100.0,
];

/// "High" zodiacal-light surface brightness
/// \[erg / s / cm^2 / Angstrom / arcsec^2\]
const STIS_SURFACE_BRIGHTNESS: [f64; 59] = [
    9.69e-29, 1.04e-26, 1.08e-25, 6.59e-25, 2.55e-24, 9.73e-24, 2.35e-22, 7.21e-21, 1.53e-20,
    2.25e-20, 3.58e-20, 1.23e-19, 2.21e-19, 1.81e-19, 1.83e-19, 2.53e-19, 3.06e-19, 1.01e-18,
    2.88e-19, 2.08e-18, 1.25e-18, 1.50e-18, 2.30e-18, 2.95e-18, 2.86e-18, 2.79e-18, 2.74e-18,
    3.32e-18, 3.12e-18, 3.34e-18, 4.64e-18, 4.65e-18, 5.58e-18, 5.46e-18, 5.15e-18, 5.37e-18,
    5.34e-18, 5.40e-18, 5.25e-18, 5.02e-18, 4.92e-18, 4.79e-18, 4.55e-18, 4.43e-18, 4.23e-18,
    4.04e-18, 3.92e-18, 3.76e-18, 3.50e-18, 3.43e-18, 3.23e-18, 3.07e-18, 2.98e-18, 2.86e-18,
    2.78e-18, 2.67e-18, 2.56e-18, 2.41e-18, 2.31e-18,
];

/// Helio-ecliptic longitude grid of the scale table \[degrees\]
const SCALE_LON_DEG: [f64; 5] = [0.0, 45.0, 90.0, 135.0, 180.0];

/// Ecliptic latitude grid of the scale table \[degrees\]
const SCALE_LAT_DEG: [f64; 7] = [0.0, 15.0, 30.0, 45.0, 60.0, 75.0, 90.0];

/// Brightness relative to the anti-solar point on the ecliptic, rows are
/// latitudes, columns longitudes. The strong forward peak towards the Sun
/// and the factor-of-two-ish drop towards the ecliptic poles follow the
/// Leinert maps.
const SCALE_TABLE: [[f64; 5]; 7] = [
    [6.00, 2.60, 1.60, 1.15, 1.00],
    [4.00, 2.10, 1.35, 1.00, 0.89],
    [2.30, 1.50, 1.05, 0.83, 0.76],
    [1.45, 1.05, 0.80, 0.67, 0.62],
    [0.95, 0.78, 0.65, 0.57, 0.54],
    [0.71, 0.63, 0.56, 0.51, 0.49],
    [0.56, 0.56, 0.56, 0.56, 0.56],
];

/// Zodiacal surface brightness at a wavelength for the "high" sky
/// \[erg / s / cm^2 / nm / arcsec^2\]. Zero outside the tabulated range.
pub(crate) fn surface_brightness(wavelength_nm: f64) -> f64 {
    // Table values are per Angstrom.
    interp(wavelength_nm, &STIS_WAVELENGTHS_NM, &STIS_SURFACE_BRIGHTNESS).unwrap_or(0.0) * 10.0
}

/// Position scale factor relative to the "high" sky. `helio_lon` is the
/// ecliptic longitude relative to the Sun folded to \[0, π\]; `ecl_lat` is
/// the ecliptic latitude. Both in radians.
pub(crate) fn position_scale(helio_lon: f64, ecl_lat: f64) -> f64 {
    let lon = helio_lon.to_degrees().clamp(0.0, 180.0);
    let lat = ecl_lat.to_degrees().abs().clamp(0.0, 90.0);

    let i = SCALE_LAT_DEG.partition_point(|&v| v <= lat).clamp(1, 6);
    let j = SCALE_LON_DEG.partition_point(|&v| v <= lon).clamp(1, 4);

    let (lat0, lat1) = (SCALE_LAT_DEG[i - 1], SCALE_LAT_DEG[i]);
    let (lon0, lon1) = (SCALE_LON_DEG[j - 1], SCALE_LON_DEG[j]);
    let ty = (lat - lat0) / (lat1 - lat0);
    let tx = (lon - lon0) / (lon1 - lon0);

    let f = |iy: usize, jx: usize| SCALE_TABLE[iy][jx];
    let top = f(i - 1, j - 1) * (1.0 - tx) + f(i - 1, j) * tx;
    let bottom = f(i, j - 1) * (1.0 - tx) + f(i, j) * tx;
    top * (1.0 - ty) + bottom * ty
}

/// Zodiacal-light count rate in the photometry aperture
/// \[electron / s\].
pub(crate) fn count_rate(bandpass: &Bandpass, helio_lon: f64, ecl_lat: f64) -> f64 {
    let hc = PLANCK_ERG_S * VEL_C_CM_S;
    let grid = bandpass.wavelengths_nm();

    // Photon rate per arcsec^2 through the effective area.
    let integrand: Vec<f64> = grid
        .iter()
        .map(|&nm| {
            let lambda_cm = nm / NM_PER_CM;
            surface_brightness(nm) * bandpass.effective_area_cm2(nm) / (hc / lambda_cm)
        })
        .collect();
    let rate_per_arcsec2 = trapezoid(grid, &integrand);

    let aperture_arcsec2 = PLATE_SCALE_ARCSEC * PLATE_SCALE_ARCSEC * NPIX;
    rate_per_arcsec2 * aperture_arcsec2 * position_scale(helio_lon, ecl_lat)
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;
    use crate::constants::{FRAC_PI_2, PI};

    #[test]
    fn surface_brightness_interpolates_per_nm() {
        // 5.15e-18 erg/s/cm²/Å/arcsec² at 500 nm, i.e. ten times that per nm.
        assert_relative_eq!(surface_brightness(500.0), 5.15e-17, max_relative = 1e-9);
        assert_eq!(surface_brightness(50.0), 0.0);
        assert_eq!(surface_brightness(2000.0), 0.0);
    }

    #[test]
    fn scale_is_normalised_at_the_antisolar_point() {
        assert_abs_diff_eq!(position_scale(PI, 0.0), 1.0);
    }

    #[test]
    fn scale_orders_the_qualitative_levels() {
        let high = position_scale(PI, 0.0);
        let medium = position_scale(PI, 30f64.to_radians());
        let low = position_scale(PI, FRAC_PI_2);
        assert!(high > medium);
        assert!(medium > low);
    }

    #[test]
    fn scale_brightens_towards_the_sun() {
        let antisolar = position_scale(PI, 0.0);
        let quadrature = position_scale(FRAC_PI_2, 0.0);
        let near_sun = position_scale(0.0, 0.0);
        assert!(near_sun > quadrature);
        assert!(quadrature > antisolar);
    }

    #[test]
    fn scale_is_symmetric_in_latitude() {
        let north = position_scale(PI, 0.4);
        let south = position_scale(PI, -0.4);
        assert_abs_diff_eq!(north, south);
    }

    #[test]
    fn count_rate_is_positive_and_scales() {
        let bp = Bandpass::nuv();
        let high = count_rate(bp, PI, 0.0);
        let low = count_rate(bp, PI, FRAC_PI_2);
        assert!(high > 0.0);
        assert_relative_eq!(low / high, 0.56, max_relative = 1e-6);
    }
}
