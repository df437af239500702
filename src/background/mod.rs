// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Sky background resolution.

The zodiacal-light level is either one of three qualitative choices, which
map onto fixed ecliptic latitudes at the anti-solar point on a reference
date, or "specific", in which case a free-text time and sky position are
resolved. The output of either path is a [ResolvedBackground]: everything
the sensitivity model needs to know about the sky.
 */

mod error;

pub use error::BackgroundError;

use chrono::{NaiveDate, NaiveDateTime};
use hifitime::Epoch;
use lazy_static::lazy_static;
use log::debug;
use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::PI;
use crate::coord::{resolve_coord, RADec};
use crate::ephem::{
    ecliptic_to_equatorial, equatorial_to_ecliptic, helio_ecliptic_longitude,
    sun_ecliptic_longitude,
};

/// The reference date used for the qualitative background levels. The sky
/// background truly depends on the time of year; pinning the date is an
/// intentional simplification so that Low/Medium/High give reproducible
/// results.
pub const REFERENCE_DATE: (i32, u8, u8) = (2025, 3, 1);

lazy_static! {
    /// [REFERENCE_DATE] as an [Epoch] (midnight UTC).
    pub static ref REFERENCE_EPOCH: Epoch = {
        let (y, m, d) = REFERENCE_DATE;
        Epoch::from_gregorian_utc(y, m, d, 0, 0, 0, 0)
    };
}

/// The zodiacal-light background level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ZodiLevel {
    Low,
    Medium,
    High,
    /// Resolve the background for a specific time and sky position.
    Specific,
}

impl ZodiLevel {
    /// The ecliptic latitude representing this qualitative level
    /// \[degrees\]. `Specific` has no fixed latitude.
    pub fn ecliptic_latitude_deg(self) -> Option<f64> {
        match self {
            ZodiLevel::Low => Some(90.0),
            ZodiLevel::Medium => Some(30.0),
            ZodiLevel::High => Some(0.0),
            ZodiLevel::Specific => None,
        }
    }
}

/// A fully-resolved sky background, ready for the sensitivity model.
#[derive(Debug, Clone, Copy)]
pub struct ResolvedBackground {
    /// The instant the background applies to.
    pub time: Epoch,

    /// The equatorial sky position.
    pub coord: RADec,

    /// Is the instrument in Earth's shadow (low airglow)?
    pub night: bool,

    /// Ecliptic longitude of the position relative to the Sun, folded to
    /// \[0, π\] \[radians\].
    pub helio_lon: f64,

    /// Ecliptic latitude of the position \[radians\].
    pub ecl_lat: f64,
}

/// Resolve one of the qualitative background levels. This is a pure function
/// of the level: the position is the anti-solar point on [REFERENCE_DATE] at
/// the level's ecliptic latitude.
///
/// # Panics
///
/// If given [ZodiLevel::Specific]; that path needs user text and goes
/// through [resolve_specific].
pub fn resolve_default(level: ZodiLevel, night: bool) -> ResolvedBackground {
    let lat_deg = level
        .ecliptic_latitude_deg()
        .expect("qualitative zodiacal light level");
    let time = *REFERENCE_EPOCH;

    let lon = sun_ecliptic_longitude(time) + PI;
    let lat = lat_deg.to_radians();
    let coord = ecliptic_to_equatorial(lon, lat, time);

    ResolvedBackground {
        time,
        coord,
        night,
        // Anti-solar by construction.
        helio_lon: PI,
        ecl_lat: lat,
    }
}

/// Resolve a "specific time and place" background from free text.
pub fn resolve_specific(
    time_text: &str,
    coord_text: &str,
    night: bool,
) -> Result<ResolvedBackground, BackgroundError> {
    let time = parse_time(time_text)?;
    let coord = match resolve_coord(coord_text) {
        Ok(c) => c,
        Err(e) => {
            debug!("Coordinate resolution failed: {e}");
            return Err(BackgroundError::CoordFormat);
        }
    };

    let (lon, lat) = equatorial_to_ecliptic(coord, time);
    Ok(ResolvedBackground {
        time,
        coord,
        night,
        helio_lon: helio_ecliptic_longitude(lon, time),
        ecl_lat: lat,
    })
}

/// Parse an ISO-like timestamp. Accepted forms: `YYYY-MM-DD HH:MM:SS[.f]`
/// (with a space or a `T`), `YYYY-MM-DD HH:MM` and a bare `YYYY-MM-DD`
/// (midnight).
pub fn parse_time(text: &str) -> Result<Epoch, BackgroundError> {
    const FORMATS: [&str; 4] = [
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M",
    ];

    let text = text.trim();
    let naive = FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(text, f).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(text, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        });
    match naive {
        Some(t) => Ok(naive_to_epoch(t)),
        None => {
            debug!("Could not parse '{text}' as a timestamp");
            Err(BackgroundError::TimeFormat)
        }
    }
}

fn naive_to_epoch(t: NaiveDateTime) -> Epoch {
    use chrono::{Datelike, Timelike};
    Epoch::from_gregorian_utc(
        t.year(),
        t.month() as u8,
        t.day() as u8,
        t.hour() as u8,
        t.minute() as u8,
        t.second() as u8,
        t.nanosecond(),
    )
}

/// The canonical ISO form of an instant, e.g. `2025-03-01T12:00:00.000`.
pub fn canonical_iso(time: Epoch) -> String {
    let (y, mo, d, h, mi, s, ns) = time.as_gregorian_utc();
    format!(
        "{y:04}-{mo:02}-{d:02}T{h:02}:{mi:02}:{s:02}.{:03}",
        ns / 1_000_000
    )
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;
    use crate::constants::FRAC_PI_2;

    #[test]
    fn qualitative_latitudes_are_fixed() {
        assert_eq!(ZodiLevel::Low.ecliptic_latitude_deg(), Some(90.0));
        assert_eq!(ZodiLevel::Medium.ecliptic_latitude_deg(), Some(30.0));
        assert_eq!(ZodiLevel::High.ecliptic_latitude_deg(), Some(0.0));
        assert_eq!(ZodiLevel::Specific.ecliptic_latitude_deg(), None);
    }

    #[test]
    fn zodi_level_parses_case_insensitively() {
        use std::str::FromStr;
        assert_eq!(ZodiLevel::from_str("low").unwrap(), ZodiLevel::Low);
        assert_eq!(ZodiLevel::from_str("Medium").unwrap(), ZodiLevel::Medium);
        assert_eq!(
            ZodiLevel::from_str("SPECIFIC").unwrap(),
            ZodiLevel::Specific
        );
        assert!(ZodiLevel::from_str("extreme").is_err());
    }

    #[test]
    fn default_backgrounds_are_deterministic() {
        let a = resolve_default(ZodiLevel::Medium, true);
        let b = resolve_default(ZodiLevel::Medium, true);
        // Bit-identical across runs.
        assert_eq!(a.time, b.time);
        assert_eq!(a.coord, b.coord);
        assert_eq!(a.helio_lon.to_bits(), b.helio_lon.to_bits());
        assert_eq!(a.ecl_lat.to_bits(), b.ecl_lat.to_bits());
    }

    #[test]
    fn default_background_is_anti_solar() {
        let bg = resolve_default(ZodiLevel::High, true);
        assert_abs_diff_eq!(bg.helio_lon, PI);
        assert_abs_diff_eq!(bg.ecl_lat, 0.0);
        assert_eq!(bg.time, *REFERENCE_EPOCH);

        let low = resolve_default(ZodiLevel::Low, false);
        assert_abs_diff_eq!(low.ecl_lat, FRAC_PI_2);
        assert!(!low.night);
    }

    #[test]
    fn time_parsing_round_trips() {
        let t = parse_time("2025-03-01 12:00:00").unwrap();
        assert_eq!(canonical_iso(t), "2025-03-01T12:00:00.000");

        let t = parse_time("2025-03-01T12:00:00").unwrap();
        assert_eq!(canonical_iso(t), "2025-03-01T12:00:00.000");

        let t = parse_time("2025-03-01").unwrap();
        assert_eq!(canonical_iso(t), "2025-03-01T00:00:00.000");

        let t = parse_time("2025-03-01 12:34:56.25").unwrap();
        assert_eq!(canonical_iso(t), "2025-03-01T12:34:56.250");
    }

    #[test]
    fn bad_time_is_a_time_format_error() {
        let err = parse_time("not-a-time").unwrap_err();
        assert_eq!(err.to_string(), "Did not understand time format");
    }

    #[test]
    fn specific_background_from_name_and_time() {
        let bg = resolve_specific("2025-03-01 12:00:00", "NGC 4993", true).unwrap();
        assert_abs_diff_eq!(bg.coord.ra.to_degrees(), 197.44875, epsilon = 1e-4);
        // NGC 4993 sits a little south of the ecliptic.
        assert!(bg.ecl_lat.to_degrees() < 0.0);
        assert!(bg.helio_lon >= 0.0 && bg.helio_lon <= PI);
    }

    #[test]
    fn specific_background_bad_coords() {
        let err = resolve_specific("2025-03-01", "not a place", true).unwrap_err();
        assert_eq!(err.to_string(), "Did not understand coordinate format");
    }
}
