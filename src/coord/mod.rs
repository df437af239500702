// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Sky coordinates: the [RADec] type, free-text parsing and offline
//! object-name resolution.

mod catalog;
mod parse;
mod types;

pub use catalog::resolve_name;
pub use parse::{parse_coord, ParseCoordError};
pub use types::RADec;

/// Resolve a free-text sky position. Object-name lookup is attempted first;
/// if the text is not a known name it is parsed as a coordinate expression.
pub fn resolve_coord(text: &str) -> Result<RADec, ParseCoordError> {
    match resolve_name(text) {
        Some(radec) => Ok(radec),
        None => parse_coord(text),
    }
}
