// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/// Pretty printers for reporting information.
use std::{borrow::Cow, sync::Mutex};

const UP_AND_RIGHT: char = '└';
const VERTICAL_AND_RIGHT: char = '├';

lazy_static::lazy_static! {
    static ref QUEUED_WARNINGS: Mutex<Vec<Cow<'static, str>>> = Mutex::new(vec![]);
}

/// An info-level block: a bold title followed by box-drawn lines.
pub(crate) struct InfoPrinter {
    title: Cow<'static, str>,
    lines: Vec<Cow<'static, str>>,
}

impl InfoPrinter {
    pub(crate) fn new(title: Cow<'static, str>) -> Self {
        Self {
            title,
            lines: vec![],
        }
    }

    pub(crate) fn push_line(&mut self, line: Cow<'static, str>) {
        self.lines.push(line);
    }

    pub(crate) fn display(self) {
        log::info!("{}", console::style(self.title).bold());
        let num_lines = self.lines.len();
        for (i, line) in self.lines.into_iter().enumerate() {
            let symbol = if i + 1 == num_lines {
                UP_AND_RIGHT
            } else {
                VERTICAL_AND_RIGHT
            };
            log::info!("{symbol} {line}");
        }
        log::info!("");
    }
}

/// Queue a warning to be displayed later, so that warnings appear together
/// after the info blocks rather than interleaved with them.
pub(crate) trait Warn {
    fn warn(self);
}

impl Warn for &'static str {
    fn warn(self) {
        QUEUED_WARNINGS.lock().unwrap().push(self.into());
    }
}

impl Warn for String {
    fn warn(self) {
        QUEUED_WARNINGS.lock().unwrap().push(self.into());
    }
}

/// Drain and print any queued warnings.
pub(crate) fn display_warnings() {
    let mut warnings = QUEUED_WARNINGS.lock().unwrap();
    if warnings.is_empty() {
        return;
    }

    log::warn!("{}", console::style("Warnings").bold());
    let num_lines = warnings.len();
    for (i, line) in warnings.drain(..).enumerate() {
        let symbol = if i + 1 == num_lines {
            UP_AND_RIGHT
        } else {
            VERTICAL_AND_RIGHT
        };
        log::warn!("{symbol} {line}");
    }
    log::warn!("");
}
