use crate::error::RenderError;
use crate::style::{DisplayMode, TextStyle};
use crate::units::Pt;

/// An opaque drawing target for line elements.
///
/// A [Line](crate::Line) never inspects the surface it renders to; it only
/// passes the surface through to each element, which issues absolute-position
/// drawing commands. Implementations range from bitmap canvases to test
/// recorders; any failure they report aborts the render of the current line.
pub trait Surface {
    /// Draw a run of text with its left edge at `x` and its baseline at `y`
    fn draw_text(
        &mut self,
        text: &str,
        x: Pt,
        y: Pt,
        style: TextStyle,
        mode: DisplayMode,
    ) -> Result<(), RenderError>;

    /// Draw a horizontal rule spanning `x..x + width` with its vertical
    /// centre at `y`
    fn draw_rule(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        thickness: Pt,
        mode: DisplayMode,
    ) -> Result<(), RenderError>;
}
