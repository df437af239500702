// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Chart rendering. Only available when compiled with the "plotting"
//! feature.

use std::path::Path;

use plotters::prelude::*;
use thiserror::Error;

use crate::sensitivity::SpectrumTable;

/// The number of X pixels on the charts.
const X_PIXELS: u32 = 1200;
/// The number of Y pixels on the charts.
const Y_PIXELS: u32 = 800;

/// The two-colour colourblind-safe palette (seaborn "colorblind").
const SOURCE_COLOUR: RGBColor = RGBColor(0x01, 0x73, 0xB2);
const AEFF_COLOUR: RGBColor = RGBColor(0xDE, 0x8F, 0x05);

#[derive(Error, Debug)]
pub enum DrawError {
    #[error("While plotting: {0}")]
    Plotters(Box<dyn std::error::Error + Send + Sync>),

    #[error(transparent)]
    IO(#[from] std::io::Error),
}

/// The range spanned by the positive, finite entries of `values`, padded
/// for a log axis. Falls back to an arbitrary decade when nothing is
/// plottable (e.g. a 0 K blackbody).
fn log_range(values: &[f64]) -> (f64, f64) {
    let positive = values.iter().copied().filter(|v| v.is_finite() && *v > 0.0);
    let (min, max) = positive.fold((f64::INFINITY, 0.0_f64), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min.is_finite() && max > 0.0 {
        (min / 2.0, max * 2.0)
    } else {
        (1e-30, 1e-20)
    }
}

/// Render the spectrum/bandpass chart: source flux density and effective
/// area against wavelength, log-log, with independent y-axes.
pub fn plot_spectrum(table: &SpectrumTable, output: &Path) -> Result<(), DrawError> {
    let root = BitMapBackend::new(output, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    // Axis titles, coloured to match their series (the left axis hides its
    // tick labels, so the titles carry the association).
    let title_font = ("sans-serif", 24).into_font();
    root.draw_text(
        "Spectral flux density (erg s⁻¹ cm⁻² nm⁻¹)",
        &title_font.clone().color(&SOURCE_COLOUR),
        (60, 10),
    )
    .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    root.draw_text(
        "Effective area (cm²)",
        &title_font.color(&AEFF_COLOUR),
        (X_PIXELS as i32 - 260, 10),
    )
    .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    let wavelengths = table.wavelength_nm.as_slice().unwrap_or(&[]);
    let (x_min, x_max) = match (wavelengths.first(), wavelengths.last()) {
        (Some(&lo), Some(&hi)) if lo > 0.0 && hi > lo => (lo, hi),
        _ => (100.0, 1000.0),
    };
    let source = table.source_flux_density.as_slice().unwrap_or(&[]);
    let aeff = table.effective_area_cm2.as_slice().unwrap_or(&[]);
    let (s_min, s_max) = log_range(source);
    let (a_min, a_max) = log_range(aeff);

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .margin_top(50)
        .x_label_area_size(60)
        .y_label_area_size(70)
        .right_y_label_area_size(70)
        .build_cartesian_2d((x_min..x_max).log_scale(), (s_min..s_max).log_scale())
        .map_err(|e| DrawError::Plotters(Box::new(e)))?
        .set_secondary_coord((x_min..x_max).log_scale(), (a_min..a_max).log_scale());

    chart
        .configure_mesh()
        .x_desc("Wavelength (nm)")
        // No tick labels on the left; the coloured title carries the
        // association instead.
        .y_label_formatter(&|_| String::new())
        .draw()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    chart
        .configure_secondary_axes()
        .draw()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    chart
        .draw_series(LineSeries::new(
            wavelengths
                .iter()
                .zip(source.iter())
                .filter(|(_, &f)| f.is_finite() && f > 0.0)
                .map(|(&nm, &f)| (nm, f)),
            SOURCE_COLOUR.stroke_width(2),
        ))
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    chart
        .draw_secondary_series(LineSeries::new(
            wavelengths
                .iter()
                .zip(aeff.iter())
                .filter(|(_, &a)| a.is_finite() && a > 0.0)
                .map(|(&nm, &a)| (nm, a)),
            AEFF_COLOUR.stroke_width(2),
        ))
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    root.present().map_err(|e| DrawError::Plotters(Box::new(e)))?;
    Ok(())
}

/// Render the sensitivity chart: limiting AB magnitude against exposure
/// time. The magnitude axis is reversed (brighter at the top) and not
/// zero-based, following the astronomical convention.
pub fn plot_sensitivity(
    exptimes_min: &[f64],
    limmags: &[f64],
    snr: f64,
    output: &Path,
) -> Result<(), DrawError> {
    let root = BitMapBackend::new(output, (X_PIXELS, Y_PIXELS)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;
    let root = root
        .titled(
            &format!("{snr}-sigma limiting magnitude"),
            ("sans-serif", 30),
        )
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    let (x_min, x_max) = match (exptimes_min.first(), exptimes_min.last()) {
        (Some(&lo), Some(&hi)) if hi > lo => (lo, hi),
        _ => (0.0, 20.0),
    };
    let (m_min, m_max) = limmags
        .iter()
        .copied()
        .filter(|m| m.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), m| {
            (lo.min(m), hi.max(m))
        });
    let (m_min, m_max) = if m_min.is_finite() {
        (m_min - 0.2, m_max + 0.2)
    } else {
        (20.0, 25.0)
    };

    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(70)
        // Reversed: brighter (numerically smaller) magnitudes at the top.
        .build_cartesian_2d(x_min..x_max, m_max..m_min)
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    chart
        .configure_mesh()
        .x_desc("Exposure time (min)")
        .y_desc("Limiting magnitude (AB)")
        .draw()
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    chart
        .draw_series(LineSeries::new(
            exptimes_min
                .iter()
                .zip(limmags.iter())
                .map(|(&t, &m)| (t, m)),
            SOURCE_COLOUR.stroke_width(2),
        ))
        .map_err(|e| DrawError::Plotters(Box::new(e)))?;

    root.present().map_err(|e| DrawError::Plotters(Box::new(e)))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::instrument::Bandpass;
    use crate::sensitivity::{exptime_grid_min, spectrum_table};
    use crate::source::SourceSpectrum;

    #[test]
    fn log_range_ignores_nonpositive_values() {
        let (lo, hi) = log_range(&[0.0, 1e-3, f64::NAN, 2e-2]);
        assert!(lo < 1e-3 && lo > 0.0);
        assert!(hi > 2e-2);
    }

    #[test]
    fn log_range_falls_back_when_empty() {
        let (lo, hi) = log_range(&[0.0, 0.0]);
        assert!(lo > 0.0 && hi > lo);
    }

    #[test]
    fn charts_render_to_files() {
        let dir = tempfile::tempdir().unwrap();

        let table = spectrum_table(&SourceSpectrum::FlatFrequency, Bandpass::nuv());
        let spectrum_png = dir.path().join("spectrum.png");
        plot_spectrum(&table, &spectrum_png).unwrap();
        assert!(spectrum_png.exists());

        let grid = exptime_grid_min();
        let limmags: Vec<f64> = grid.iter().map(|t| 20.0 + t.log10()).collect();
        let sens_png = dir.path().join("sensitivity.png");
        plot_sensitivity(&grid, &limmags, 5.0, &sens_png).unwrap();
        assert!(sens_png.exists());
    }

    #[test]
    fn zero_flux_spectrum_still_renders() {
        let dir = tempfile::tempdir().unwrap();
        let table = spectrum_table(
            &SourceSpectrum::Thermal { temperature_k: 0.0 },
            Bandpass::nuv(),
        );
        let png = dir.path().join("spectrum.png");
        plot_spectrum(&table, &png).unwrap();
        assert!(png.exists());
    }
}
