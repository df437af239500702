// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Exposure time calculator for a near-ultraviolet space telescope instrument.

The calculator reports the 5-sigma limiting AB magnitude as a function of
exposure time for a handful of idealised source spectral models and sky
background conditions. One invocation of the CLI is one pass of the
calculation: resolve the background, build the source spectrum, tabulate the
bandpass and the limiting magnitudes, then render the charts and the table.
 */

pub mod background;
pub mod cli;
pub mod constants;
pub mod coord;
pub mod ephem;
pub mod instrument;
pub(crate) mod math;
#[cfg(feature = "plotting")]
pub mod plot;
pub mod sensitivity;
pub mod source;

// Re-exports.
pub use cli::{EtcError, UvEtc};
