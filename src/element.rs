use crate::error::RenderError;
use crate::style::{DisplayMode, TextStyle};
use crate::surface::Surface;
use crate::units::Pt;

/// Stroke thickness used by [HorizontalRule]
pub const RULE_THICKNESS: Pt = Pt(1.0);

/// How an element participates in justification, decided at construction.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ElementKind {
    /// Whitespace whose width is fixed at creation and never stretched
    FixedSpace,
    /// Whitespace that absorbs an equal share of leftover width when the
    /// line is justified
    FlexSpace,
    /// Visible content: text, rules, and anything else a line can carry
    Content,
}

/// An atomic renderable unit placed horizontally within a [Line](crate::Line).
///
/// Elements report their own extents and draw themselves; the containing
/// line only tracks a running cursor. [render](LineElement::render) returns
/// the horizontal advance to apply to that cursor after the element.
pub trait LineElement: Send + Sync {
    /// Width the element contributes to the line's accumulated width
    fn width(&self) -> Pt;

    /// Height of the element; the line's height is the maximum over its
    /// elements
    fn height(&self) -> Pt;

    /// How the element is classified when the line is justified
    fn kind(&self) -> ElementKind {
        ElementKind::Content
    }

    /// Draw the element with its left edge at `x` and the line's baseline at
    /// `y`, returning the horizontal advance.
    ///
    /// `spacing` is the per-gap stretch computed for justified lines; only
    /// flexible whitespace consumes it. `left` and `right` are the horizontal
    /// bounds of the containing block, passed through for elements that size
    /// or clip themselves against them.
    #[allow(clippy::too_many_arguments)]
    fn render(
        &self,
        surface: &mut dyn Surface,
        x: Pt,
        y: Pt,
        spacing: Pt,
        left: Pt,
        right: Pt,
        mode: DisplayMode,
    ) -> Result<Pt, RenderError>;
}

/// Fixed-width blank space.
///
/// Also the synthetic inset that left-pads centred and right-aligned lines;
/// in that role its width may be negative when the line overflows its box.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FixedWhiteSpace {
    width: Pt,
    height: Pt,
}

impl FixedWhiteSpace {
    pub fn new(width: Pt, height: Pt) -> FixedWhiteSpace {
        FixedWhiteSpace { width, height }
    }
}

impl LineElement for FixedWhiteSpace {
    fn width(&self) -> Pt {
        self.width
    }

    fn height(&self) -> Pt {
        self.height
    }

    fn kind(&self) -> ElementKind {
        ElementKind::FixedSpace
    }

    fn render(
        &self,
        _surface: &mut dyn Surface,
        _x: Pt,
        _y: Pt,
        _spacing: Pt,
        _left: Pt,
        _right: Pt,
        _mode: DisplayMode,
    ) -> Result<Pt, RenderError> {
        Ok(self.width)
    }
}

/// Inter-word space that stretches when the line is justified.
///
/// The stretch is not baked into the element: the line hands the computed
/// spacing to every flexible space at render time, so the advance is
/// `width + spacing`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct FlexWhiteSpace {
    width: Pt,
    height: Pt,
}

impl FlexWhiteSpace {
    pub fn new(width: Pt, height: Pt) -> FlexWhiteSpace {
        FlexWhiteSpace { width, height }
    }
}

impl LineElement for FlexWhiteSpace {
    fn width(&self) -> Pt {
        self.width
    }

    fn height(&self) -> Pt {
        self.height
    }

    fn kind(&self) -> ElementKind {
        ElementKind::FlexSpace
    }

    fn render(
        &self,
        _surface: &mut dyn Surface,
        _x: Pt,
        _y: Pt,
        spacing: Pt,
        _left: Pt,
        _right: Pt,
        _mode: DisplayMode,
    ) -> Result<Pt, RenderError> {
        Ok(self.width + spacing)
    }
}

/// A measured run of text in a single style.
///
/// Runs arrive pre-measured: `width` and `height` must already account for
/// the style's font metrics, which are computed by the font layer before
/// layout. The run draws itself through [Surface::draw_text] and advances by
/// its own width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    text: String,
    width: Pt,
    height: Pt,
    style: TextStyle,
}

impl TextRun {
    pub fn new<S: ToString>(text: S, width: Pt, height: Pt, style: TextStyle) -> TextRun {
        TextRun {
            text: text.to_string(),
            width,
            height,
            style,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn style(&self) -> TextStyle {
        self.style
    }
}

impl LineElement for TextRun {
    fn width(&self) -> Pt {
        self.width
    }

    fn height(&self) -> Pt {
        self.height
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        x: Pt,
        y: Pt,
        _spacing: Pt,
        _left: Pt,
        _right: Pt,
        mode: DisplayMode,
    ) -> Result<Pt, RenderError> {
        surface.draw_text(&self.text, x, y, self.style, mode)?;
        Ok(self.width)
    }
}

/// A thin horizontal rule, drawn centred on the upper half of its box.
///
/// Used as the separator above footnote sub-lines.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HorizontalRule {
    width: Pt,
    height: Pt,
}

impl HorizontalRule {
    pub fn new(width: Pt, height: Pt) -> HorizontalRule {
        HorizontalRule { width, height }
    }
}

impl LineElement for HorizontalRule {
    fn width(&self) -> Pt {
        self.width
    }

    fn height(&self) -> Pt {
        self.height
    }

    fn render(
        &self,
        surface: &mut dyn Surface,
        x: Pt,
        y: Pt,
        _spacing: Pt,
        _left: Pt,
        _right: Pt,
        mode: DisplayMode,
    ) -> Result<Pt, RenderError> {
        surface.draw_rule(x, y - self.height / 2.0, self.width, RULE_THICKNESS, mode)?;
        Ok(self.width)
    }
}
