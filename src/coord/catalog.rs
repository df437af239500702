// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Offline object-name resolution. The calculator performs no network I/O,
//! so name lookups are served from a small built-in catalog of positions
//! (ICRS, decimal degrees) covering the objects the tool's documentation
//! mentions plus a handful of common calibrators.

use std::collections::HashMap;

use lazy_static::lazy_static;

use super::RADec;

/// (name, RA [deg], Dec [deg]). Names are matched case-insensitively with
/// whitespace collapsed, so "ngc4993" finds "NGC 4993".
const CATALOG: &[(&str, f64, f64)] = &[
    ("NGC 4993", 197.44875, -23.38389),
    ("NGC 253", 11.88806, -25.28822),
    ("M 1", 83.63308, 22.01450),
    ("CRAB NEBULA", 83.63308, 22.01450),
    ("M 31", 10.68471, 41.26906),
    ("M 87", 187.70593, 12.39112),
    ("M 101", 210.80243, 54.34875),
    ("VEGA", 279.23474, 38.78369),
    ("SIRIUS", 101.28716, -16.71612),
    ("SN 1987A", 83.86663, -69.26975),
    ("47 TUC", 6.02236, -72.08128),
    ("LMC", 80.89417, -69.75611),
    ("SMC", 13.15833, -72.80028),
];

lazy_static! {
    static ref CATALOG_MAP: HashMap<String, RADec> = CATALOG
        .iter()
        .map(|&(name, ra, dec)| (normalise(name), RADec::from_degrees(ra, dec)))
        .collect();
}

fn normalise(name: &str) -> String {
    name.split_whitespace()
        .collect::<String>()
        .to_ascii_uppercase()
}

/// Look up an object name, returning its catalogued position if known.
pub fn resolve_name(name: &str) -> Option<RADec> {
    CATALOG_MAP.get(&normalise(name)).copied()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn lookup_is_case_and_whitespace_insensitive() {
        for name in ["NGC 4993", "ngc 4993", "NGC4993", "  ngc  4993 "] {
            let c = resolve_name(name).unwrap();
            assert_abs_diff_eq!(c.ra.to_degrees(), 197.44875, epsilon = 1e-9);
            assert_abs_diff_eq!(c.dec.to_degrees(), -23.38389, epsilon = 1e-9);
        }
    }

    #[test]
    fn aliases_agree() {
        assert_eq!(resolve_name("M1"), resolve_name("Crab Nebula"));
    }

    #[test]
    fn unknown_names_are_none() {
        assert!(resolve_name("not a place").is_none());
        assert!(resolve_name("").is_none());
    }
}
