// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Parse free-text coordinate expressions. Sexagesimal (`13h09m47.706s
//! -23d23'01.79"`), colon-separated (`13:09:47.706 -23:23:01.79`, first
//! component in hours) and decimal-degree (`197.45 -23.38`) forms are
//! accepted.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

use super::RADec;

lazy_static! {
    static ref DECIMAL_RE: Regex =
        Regex::new(r"^([+-]?\d+(?:\.\d+)?)\s+([+-]?\d+(?:\.\d+)?)$").unwrap();
    static ref HMSDMS_RE: Regex = Regex::new(
        r#"(?ix)^
        (\d{1,2}) h \s* (\d{1,2}) m \s* (\d{1,2}(?:\.\d+)?) s?
        \s+
        ([+-]?\d{1,2}) d \s* (\d{1,2}) ['m] \s* (\d{1,2}(?:\.\d+)?) ["s]?
        $"#
    )
    .unwrap();
    static ref COLON_RE: Regex = Regex::new(
        r#"(?x)^
        (\d{1,2}) : (\d{1,2}) : (\d{1,2}(?:\.\d+)?)
        \s+
        ([+-]?\d{1,2}) : (\d{1,2}) : (\d{1,2}(?:\.\d+)?)
        $"#
    )
    .unwrap();
}

#[derive(Error, Debug)]
pub enum ParseCoordError {
    #[error("'{0}' is not a recognised object name or coordinate expression")]
    Unrecognised(String),

    #[error("Right ascension {0}° is outside [0, 360)")]
    RaOutOfRange(f64),

    #[error("Declination {0}° is outside [-90, 90]")]
    DecOutOfRange(f64),
}

/// Parse a coordinate expression directly (no name lookup).
pub fn parse_coord(text: &str) -> Result<RADec, ParseCoordError> {
    let text = text.trim();

    if let Some(c) = HMSDMS_RE.captures(text).or_else(|| COLON_RE.captures(text)) {
        // Unwraps are fine; the regexes only match digit groups.
        let f = |i: usize| c.get(i).unwrap().as_str().parse::<f64>().unwrap();
        let ra_deg = 15.0 * (f(1) + f(2) / 60.0 + f(3) / 3600.0);
        let dec_field = c.get(4).unwrap().as_str();
        let dec_mag = dec_field.trim_start_matches(['+', '-']).parse::<f64>().unwrap()
            + f(5) / 60.0
            + f(6) / 3600.0;
        let dec_deg = if dec_field.starts_with('-') {
            -dec_mag
        } else {
            dec_mag
        };
        return checked(ra_deg, dec_deg);
    }

    if let Some(c) = DECIMAL_RE.captures(text) {
        let ra_deg = c.get(1).unwrap().as_str().parse::<f64>().unwrap();
        let dec_deg = c.get(2).unwrap().as_str().parse::<f64>().unwrap();
        return checked(ra_deg, dec_deg);
    }

    Err(ParseCoordError::Unrecognised(text.to_string()))
}

fn checked(ra_deg: f64, dec_deg: f64) -> Result<RADec, ParseCoordError> {
    if !(0.0..360.0).contains(&ra_deg) {
        return Err(ParseCoordError::RaOutOfRange(ra_deg));
    }
    if !(-90.0..=90.0).contains(&dec_deg) {
        return Err(ParseCoordError::DecOutOfRange(dec_deg));
    }
    Ok(RADec::from_degrees(ra_deg, dec_deg))
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn parse_hmsdms() {
        let c = parse_coord("13h09m47.706s -23d23'01.79\"").unwrap();
        assert_abs_diff_eq!(c.ra.to_degrees(), 197.448775, epsilon = 1e-5);
        assert_abs_diff_eq!(c.dec.to_degrees(), -23.383831, epsilon = 1e-5);
    }

    #[test]
    fn parse_colon_separated() {
        let c = parse_coord("13:09:47.706 -23:23:01.79").unwrap();
        assert_abs_diff_eq!(c.ra.to_degrees(), 197.448775, epsilon = 1e-5);
        assert_abs_diff_eq!(c.dec.to_degrees(), -23.383831, epsilon = 1e-5);
    }

    #[test]
    fn parse_decimal_degrees() {
        let c = parse_coord(" 197.45 -23.38 ").unwrap();
        assert_abs_diff_eq!(c.ra.to_degrees(), 197.45, epsilon = 1e-9);
        assert_abs_diff_eq!(c.dec.to_degrees(), -23.38, epsilon = 1e-9);
    }

    #[test]
    fn negative_dec_minutes_are_negative() {
        // The sign applies to the whole sexagesimal declination, not only
        // its degree field.
        let c = parse_coord("00h00m00s -00d30'00\"").unwrap();
        assert_abs_diff_eq!(c.dec.to_degrees(), -0.5, epsilon = 1e-9);
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(parse_coord("not a place").is_err());
        assert!(parse_coord("").is_err());
        assert!(parse_coord("13h09m47.706s").is_err());
    }

    #[test]
    fn out_of_range_values_are_rejected() {
        assert!(matches!(
            parse_coord("400.0 10.0"),
            Err(ParseCoordError::RaOutOfRange(_))
        ));
        assert!(matches!(
            parse_coord("100.0 95.0"),
            Err(ParseCoordError::DecOutOfRange(_))
        ));
    }
}
