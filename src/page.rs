//! Reference page dimensions and the line-sequence helper used by layout
//! drivers.
//!
//! Pagination itself (deciding when a page is full and committing lines to
//! it) lives in the driver, not here. This module only carries the constants
//! the driver shares with [Line](crate::Line) (footnote separator rules are
//! sized against [PAGE_WIDTH]) and the helper that keeps a growing sequence
//! of lines ending in an open one.

use crate::line::{Justification, Line};
use crate::units::Pt;

/// Reference page width, in points
pub const PAGE_WIDTH: Pt = Pt(800.0);
/// Reference page height, in points
pub const PAGE_HEIGHT: Pt = Pt(1280.0);

/// Parameters a driver applies to every line it creates.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LineParams {
    /// Maximum width of a line's content
    pub max_width: Pt,
    /// Default alignment for new lines
    pub justification: Justification,
}

impl LineParams {
    pub fn new(max_width: Pt, justification: Justification) -> LineParams {
        LineParams {
            max_width,
            justification,
        }
    }
}

/// Return the last line of `lines` if it is still open for appending,
/// otherwise push a fresh line built from `params` and return that.
pub fn last_line<'a>(lines: &'a mut Vec<Line>, params: LineParams) -> &'a mut Line {
    if lines.last().map_or(true, Line::committed) {
        lines.push(Line::new(params.max_width, params.justification));
    }
    let last = lines.len() - 1;
    &mut lines[last]
}
