// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Idealised source spectral templates.

Three closed-form shapes are supported: a normalised blackbody with an
adjustable temperature, a spectrum flat in frequency (AB magnitude 0 by
construction) and a spectrum flat in wavelength (ST magnitude 0 by
construction). Each template is a flux-density function over wavelength;
there are no error paths, as the inputs are a closed set of choices and a
bounded temperature.
 */

use strum_macros::{Display, EnumIter, EnumString};

use crate::constants::{
    AB_ZERO_POINT_F_NU, BOLTZMANN_ERG_K, NM_PER_CM, PLANCK_ERG_S, ST_ZERO_POINT_F_LAM,
    THERMAL_NORM_SOLID_ANGLE_SR, VEL_C_CM_S,
};

/// The spectral shape choices offered by the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "kebab-case", ascii_case_insensitive)]
pub enum SpectrumModel {
    Thermal,
    /// Flat in frequency (AB mag = const).
    FlatNu,
    /// Flat in wavelength (ST mag = const).
    FlatLambda,
}

/// A source spectral template: flux density as a function of wavelength.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceSpectrum {
    /// Blackbody at the given temperature, normalised to the solid angle of
    /// a one-solar-radius star at 1 kpc.
    Thermal { temperature_k: f64 },

    /// Constant flux per unit frequency, normalised so AB mag = 0.
    FlatFrequency,

    /// Constant flux per unit wavelength, normalised so ST mag = 0.
    FlatWavelength,
}

impl SourceSpectrum {
    pub fn new(model: SpectrumModel, temperature_k: u32) -> Self {
        match model {
            SpectrumModel::Thermal => SourceSpectrum::Thermal {
                temperature_k: f64::from(temperature_k),
            },
            SpectrumModel::FlatNu => SourceSpectrum::FlatFrequency,
            SpectrumModel::FlatLambda => SourceSpectrum::FlatWavelength,
        }
    }

    /// Spectral flux density F_λ at `wavelength_nm` \[erg / s / cm^2 / nm\].
    pub fn flux_density(&self, wavelength_nm: f64) -> f64 {
        if wavelength_nm <= 0.0 {
            return 0.0;
        }
        match *self {
            SourceSpectrum::Thermal { temperature_k } => {
                planck_f_lambda(wavelength_nm, temperature_k) * THERMAL_NORM_SOLID_ANGLE_SR
            }
            SourceSpectrum::FlatFrequency => {
                // F_λ = F_ν c / λ^2, converted to per-nm.
                let lambda_cm = wavelength_nm / NM_PER_CM;
                AB_ZERO_POINT_F_NU * VEL_C_CM_S / (lambda_cm * lambda_cm) / NM_PER_CM
            }
            SourceSpectrum::FlatWavelength => ST_ZERO_POINT_F_LAM,
        }
    }

    /// One-line description for run summaries.
    pub fn describe(&self) -> String {
        match *self {
            SourceSpectrum::Thermal { temperature_k } => {
                format!("Thermal ({temperature_k} K blackbody)")
            }
            SourceSpectrum::FlatFrequency => "Flat in frequency (AB mag = 0)".to_string(),
            SourceSpectrum::FlatWavelength => "Flat in wavelength (ST mag = 0)".to_string(),
        }
    }
}

/// The Planck function B_λ \[erg / s / cm^2 / nm / sr\].
fn planck_f_lambda(wavelength_nm: f64, temperature_k: f64) -> f64 {
    if temperature_k <= 0.0 {
        return 0.0;
    }
    let lambda_cm = wavelength_nm / NM_PER_CM;
    let hc = PLANCK_ERG_S * VEL_C_CM_S;
    let x = hc / (lambda_cm * BOLTZMANN_ERG_K * temperature_k);
    // exp(x) overflows f64 well before this; the flux is zero to double
    // precision anyway.
    if x > 700.0 {
        return 0.0;
    }
    let b_per_cm =
        2.0 * hc * VEL_C_CM_S / lambda_cm.powi(5) / (x.exp() - 1.0);
    b_per_cm / NM_PER_CM
}

#[cfg(test)]
mod tests {
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    use super::*;

    #[test]
    fn spectrum_model_parses() {
        use std::str::FromStr;
        assert_eq!(
            SpectrumModel::from_str("thermal").unwrap(),
            SpectrumModel::Thermal
        );
        assert_eq!(
            SpectrumModel::from_str("flat-nu").unwrap(),
            SpectrumModel::FlatNu
        );
        assert_eq!(
            SpectrumModel::from_str("FLAT-LAMBDA").unwrap(),
            SpectrumModel::FlatLambda
        );
        assert!(SpectrumModel::from_str("power-law").is_err());
    }

    #[test]
    fn flat_frequency_flux_density() {
        let s = SourceSpectrum::FlatFrequency;
        // F_λ(200 nm) = 3631 Jy * c / λ² = 2.7216e-7 erg / s / cm² / nm.
        assert_relative_eq!(s.flux_density(200.0), 2.7216e-7, max_relative = 1e-3);
        // F_λ falls as λ²: four times smaller at twice the wavelength.
        assert_relative_eq!(
            s.flux_density(200.0) / s.flux_density(400.0),
            4.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn flat_wavelength_is_constant() {
        let s = SourceSpectrum::FlatWavelength;
        assert_abs_diff_eq!(s.flux_density(150.0), s.flux_density(900.0));
        assert_abs_diff_eq!(s.flux_density(200.0), 3.631e-8);
    }

    #[test]
    fn thermal_peaks_near_wien_wavelength() {
        // λ_max ≈ 2.898e6 nm K / T ≈ 290 nm at 10000 K.
        let s = SourceSpectrum::Thermal {
            temperature_k: 10000.0,
        };
        let peak = s.flux_density(290.0);
        assert!(peak > s.flux_density(150.0));
        assert!(peak > s.flux_density(600.0));
        assert!(peak > 0.0);
    }

    #[test]
    fn hotter_blackbody_is_brighter_everywhere() {
        let cool = SourceSpectrum::Thermal {
            temperature_k: 5000.0,
        };
        let hot = SourceSpectrum::Thermal {
            temperature_k: 15000.0,
        };
        for nm in [160.0, 200.0, 250.0, 300.0] {
            assert!(hot.flux_density(nm) > cool.flux_density(nm));
        }
    }

    #[test]
    fn zero_temperature_has_zero_flux() {
        let s = SourceSpectrum::new(SpectrumModel::Thermal, 0);
        assert_eq!(s.flux_density(200.0), 0.0);
    }
}
