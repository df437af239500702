// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Solar-position and ecliptic-frame services.

The Sun's geometric ecliptic longitude comes from the low-accuracy series of
Meeus' *Astronomical Algorithms* (chapter 25), good to well under an arcminute
over the next few centuries. That is far more than enough for placing a
synthetic zodiacal-light background on the sky. The ecliptic frame used
throughout is the true ecliptic of date.
 */

use hifitime::Epoch;

use crate::constants::TAU;
use crate::coord::RADec;
use crate::math::normalise_rad;

/// Julian centuries of TDB-ish time since J2000.0. The difference between
/// UTC and TT is irrelevant at the accuracy needed here.
fn julian_centuries(time: Epoch) -> f64 {
    (time.as_jde_utc_days() - 2451545.0) / 36525.0
}

/// The Sun's geometric (true) ecliptic longitude \[radians\].
pub fn sun_ecliptic_longitude(time: Epoch) -> f64 {
    let t = julian_centuries(time);

    // Geometric mean longitude and mean anomaly [degrees].
    let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
    let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();

    // Equation of the centre [degrees].
    let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
        + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
        + 0.000289 * (3.0 * m).sin();

    normalise_rad((l0 + c).to_radians())
}

/// Mean obliquity of the ecliptic \[radians\].
pub fn mean_obliquity(time: Epoch) -> f64 {
    let t = julian_centuries(time);
    (23.439291111 - 0.0130042 * t - 1.64e-7 * t * t + 5.036e-7 * t * t * t).to_radians()
}

/// Convert ecliptic-of-date coordinates (longitude, latitude; radians) to
/// equatorial coordinates.
pub fn ecliptic_to_equatorial(lon: f64, lat: f64, time: Epoch) -> RADec {
    let eps = mean_obliquity(time);
    let (s_lon, c_lon) = lon.sin_cos();
    let (s_lat, c_lat) = lat.sin_cos();
    let (s_eps, c_eps) = eps.sin_cos();

    let dec = (s_lat * c_eps + c_lat * s_eps * s_lon).asin();
    let ra = f64::atan2(s_lon * c_eps - s_lat / c_lat * s_eps, c_lon);
    RADec::new(normalise_rad(ra), dec)
}

/// Convert equatorial coordinates to ecliptic-of-date (longitude, latitude;
/// radians). Longitude is normalised to \[0, 2π).
pub fn equatorial_to_ecliptic(radec: RADec, time: Epoch) -> (f64, f64) {
    let eps = mean_obliquity(time);
    let (s_ra, c_ra) = radec.ra.sin_cos();
    let (s_dec, c_dec) = radec.dec.sin_cos();
    let (s_eps, c_eps) = eps.sin_cos();

    let lat = (s_dec * c_eps - c_dec * s_eps * s_ra).asin();
    let lon = f64::atan2(s_ra * c_eps + s_dec / c_dec * s_eps, c_ra);
    (normalise_rad(lon), lat)
}

/// The helio-ecliptic longitude of a position: its ecliptic longitude
/// relative to the Sun's at `time` \[radians, 0..2π).
pub fn helio_ecliptic_longitude(lon: f64, time: Epoch) -> f64 {
    let mut rel = normalise_rad(lon - sun_ecliptic_longitude(time));
    // Fold to [0, π]; zodiacal light is symmetric about the Sun-antisun line.
    if rel > std::f64::consts::PI {
        rel = TAU - rel;
    }
    rel
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    fn march_2025() -> Epoch {
        Epoch::from_gregorian_utc(2025, 3, 1, 0, 0, 0, 0)
    }

    #[test]
    fn sun_longitude_early_march() {
        // Independently evaluated from the same Meeus series.
        let lon = sun_ecliptic_longitude(march_2025()).to_degrees();
        assert_abs_diff_eq!(lon, 340.658, epsilon = 0.1);
    }

    #[test]
    fn obliquity_is_about_23_4_degrees() {
        let eps = mean_obliquity(march_2025()).to_degrees();
        assert_abs_diff_eq!(eps, 23.436, epsilon = 0.001);
    }

    #[test]
    fn ecliptic_axis_points() {
        let t = march_2025();
        // The ecliptic's ascending node on the equator.
        let origin = ecliptic_to_equatorial(0.0, 0.0, t);
        assert_abs_diff_eq!(origin.ra, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(origin.dec, 0.0, epsilon = 1e-9);

        // The summer solstice point sits at RA 90 deg, Dec = obliquity.
        let solstice = ecliptic_to_equatorial(std::f64::consts::FRAC_PI_2, 0.0, t);
        assert_abs_diff_eq!(solstice.ra.to_degrees(), 90.0, epsilon = 1e-6);
        assert_abs_diff_eq!(
            solstice.dec.to_degrees(),
            mean_obliquity(t).to_degrees(),
            epsilon = 1e-6
        );
    }

    #[test]
    fn equatorial_ecliptic_round_trip() {
        let t = march_2025();
        for &(lon_deg, lat_deg) in &[(10.0_f64, 5.0_f64), (160.7, 30.0), (340.0, -60.0), (200.0, 89.0)] {
            let radec = ecliptic_to_equatorial(lon_deg.to_radians(), lat_deg.to_radians(), t);
            let (lon, lat) = equatorial_to_ecliptic(radec, t);
            assert_abs_diff_eq!(lon.to_degrees(), lon_deg, epsilon = 1e-8);
            assert_abs_diff_eq!(lat.to_degrees(), lat_deg, epsilon = 1e-8);
        }
    }

    #[test]
    fn helio_ecliptic_folds_symmetrically() {
        let t = march_2025();
        let sun = sun_ecliptic_longitude(t);
        let ahead = helio_ecliptic_longitude(sun + 0.5, t);
        let behind = helio_ecliptic_longitude(sun - 0.5, t);
        assert_abs_diff_eq!(ahead, 0.5, epsilon = 1e-9);
        assert_abs_diff_eq!(behind, 0.5, epsilon = 1e-9);
    }
}
