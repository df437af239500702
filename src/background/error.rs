// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

/// Errors from resolving a user-supplied background time and place. The
/// messages are deliberately short; they are shown verbatim to the user, and
/// the underlying parse detail is logged at debug level instead.
#[derive(Error, Debug)]
pub enum BackgroundError {
    #[error("Did not understand time format")]
    TimeFormat,

    #[error("Did not understand coordinate format")]
    CoordFormat,
}
