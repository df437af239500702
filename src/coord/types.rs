// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

/// An equatorial sky position. All units are in radians.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RADec {
    /// Right ascension \[radians\]
    pub ra: f64,
    /// Declination \[radians\]
    pub dec: f64,
}

impl RADec {
    pub fn new(ra: f64, dec: f64) -> Self {
        Self { ra, dec }
    }

    pub fn from_degrees(ra: f64, dec: f64) -> Self {
        Self {
            ra: ra.to_radians(),
            dec: dec.to_radians(),
        }
    }

    /// Format as sexagesimal, e.g. `13h09m47.71s -23d23'01.8"`.
    pub fn to_hmsdms_string(self) -> String {
        let ra_hours = self.ra.to_degrees() / 15.0;
        let h = ra_hours.floor();
        let m = ((ra_hours - h) * 60.0).floor();
        let s = (ra_hours - h - m / 60.0) * 3600.0;

        let sign = if self.dec.is_sign_negative() { '-' } else { '+' };
        let dec_abs = self.dec.to_degrees().abs();
        let d = dec_abs.floor();
        let dm = ((dec_abs - d) * 60.0).floor();
        let ds = (dec_abs - d - dm / 60.0) * 3600.0;

        format!(
            "{:02}h{:02}m{:05.2}s {}{:02}d{:02}'{:04.1}\"",
            h as u32, m as u32, s, sign, d as u32, dm as u32, ds
        )
    }

    /// Format as decimal degrees, e.g. `197.4488 -23.3839`.
    pub fn to_decimal_string(self) -> String {
        format!(
            "{:.4} {:.4}",
            self.ra.to_degrees(),
            self.dec.to_degrees()
        )
    }
}

impl std::fmt::Display for RADec {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "({:.4}°, {:.4}°)",
            self.ra.to_degrees(),
            self.dec.to_degrees()
        )
    }
}
