use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::trace;

use crate::element::{ElementKind, FixedWhiteSpace, HorizontalRule, LineElement};
use crate::error::RenderError;
use crate::page;
use crate::style::{DisplayMode, TextStyle};
use crate::surface::Surface;
use crate::units::Pt;

/// Horizontal alignment policy for a [Line].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Justification {
    /// Pack elements against the left edge
    Left,
    /// Push elements flush against the right edge
    Right,
    /// Centre elements between the bounds
    Center,
    /// Stretch flexible whitespace so the line fills its full width
    Justify,
}

/// Heading metadata the markup layer can attach to a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMarker {
    pub text: String,
    pub level: u8,
}

impl TitleMarker {
    pub fn new<S: ToString>(text: S, level: u8) -> TitleMarker {
        TitleMarker {
            text: text.to_string(),
            level,
        }
    }
}

/// Layout progress of a line.
///
/// `Open` lines accept appends and a justification mode; committing locks the
/// mode; justifying fixes the geometry. Recycling is orthogonal and valid
/// from any state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum LineState {
    Open,
    Committed,
    Justified,
}

/// Shared signal that aborts an in-flight [Line::render].
///
/// Handles are cheap clones of the line's recycle flag. Raising the flag from
/// any thread (typically a memory-pressure evictor) makes a rendering thread
/// stop before its next element. The flag is write-once: it moves from false
/// to true and never resets. Storage itself is released by [Line::recycle] on
/// the owning thread.
#[derive(Debug, Clone)]
pub struct RecycleHandle(Arc<AtomicBool>);

impl RecycleHandle {
    /// Raise the recycle flag, aborting any in-flight render of the line
    pub fn recycle(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_recycled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// An ordered, mutable collection of line elements with incremental
/// width/height accumulation, deferred one-shot justification, and rendering
/// delegated to each element.
///
/// A line is built by one producer through [append](Line::append) and
/// [apply_justification](Line::apply_justification), rendered (possibly from
/// another thread) through [render](Line::render), and torn down through
/// [recycle](Line::recycle). Appends and justification calls must be
/// serialized with renders by the caller; the recycle flag is the only field
/// shared across threads.
pub struct Line {
    elements: Vec<Box<dyn LineElement>>,
    width: Pt,
    height: Pt,
    flex_count: usize,
    has_content: bool,
    space_width: Pt,
    state: LineState,
    justification: Justification,
    max_width: Pt,
    footnotes: Option<Vec<Line>>,
    title: Option<TitleMarker>,
    recycled: Arc<AtomicBool>,
}

impl Line {
    /// Create an empty line bounded by `max_width`, to be aligned with
    /// `justification` unless [apply_justification](Line::apply_justification)
    /// overrides it before the line is committed
    pub fn new(max_width: Pt, justification: Justification) -> Line {
        Line {
            elements: Vec::new(),
            width: Pt(0.0),
            height: Pt(0.0),
            flex_count: 0,
            has_content: false,
            space_width: Pt(0.0),
            state: LineState::Open,
            justification,
            max_width,
            footnotes: None,
            title: None,
            recycled: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Append `element` to the end of the line, growing the width aggregate
    /// by the element's width and the height aggregate to the maximum element
    /// height. Returns `self` for chaining.
    ///
    /// Flexible whitespace increments the flex count used to distribute
    /// justify spacing; content marks the line as visibly non-empty; fixed
    /// whitespace does neither. No bound is enforced against `max_width`:
    /// keeping content within the line is the caller's concern, and overfull
    /// lines are handled (not corrected) at justification time.
    ///
    /// Precondition: the line has not been justified yet. Appending after
    /// justification leaves the computed geometry stale.
    pub fn append(&mut self, element: Box<dyn LineElement>) -> &mut Line {
        debug_assert!(
            self.state != LineState::Justified,
            "append to a justified line"
        );
        self.height = self.height.max(element.height());
        self.width += element.width();
        match element.kind() {
            ElementKind::FixedSpace => {}
            ElementKind::FlexSpace => self.flex_count += 1,
            ElementKind::Content => self.has_content = true,
        }
        self.elements.push(element);
        self
    }

    /// Whether more elements may be appended. Always true for now; kept as a
    /// seam for future line-full logic rather than hardcoded at call sites.
    pub fn appendable(&self) -> bool {
        true
    }

    /// Lock in an alignment mode. The first call wins: once the line has
    /// been committed (or already justified) the call is silently ignored.
    pub fn apply_justification(&mut self, justification: Justification) {
        if self.state != LineState::Open {
            return;
        }
        self.justification = justification;
        self.state = LineState::Committed;
    }

    /// Compute the justification geometry exactly once; later calls return
    /// immediately.
    ///
    /// Center and Right insert a synthetic fixed whitespace at index 0 whose
    /// width is the (half) leftover; the insert bypasses
    /// [append](Line::append) so the aggregates keep describing appended
    /// content only. Justify distributes the leftover equally over the
    /// flexible spaces, falling back to zero spacing when there are none.
    /// A line wider than `max_width` yields a negative inset or negative
    /// spacing and will visually overrun its box; nothing downstream corrects
    /// overflow, so it is surfaced rather than hidden.
    pub fn ensure_justification(&mut self) {
        if self.state == LineState::Justified {
            return;
        }
        match self.justification {
            Justification::Left => {}
            Justification::Center => {
                let inset = (self.max_width - self.width) / 2.0;
                self.elements
                    .insert(0, Box::new(FixedWhiteSpace::new(inset, self.height)));
            }
            Justification::Right => {
                let inset = self.max_width - self.width;
                self.elements
                    .insert(0, Box::new(FixedWhiteSpace::new(inset, self.height)));
            }
            Justification::Justify => {
                self.space_width = if self.flex_count > 0 {
                    (self.max_width - self.width) / self.flex_count as f32
                } else {
                    Pt(0.0)
                };
            }
        }
        trace!(
            justification = ?self.justification,
            spacing = %self.space_width,
            "line justified"
        );
        self.state = LineState::Justified;
    }

    /// Render the line onto `surface` with its left edge at `x` and its
    /// baseline at `y`, applying justification lazily first.
    ///
    /// Elements are drawn left to right at a running cursor; each returns the
    /// advance to apply. The recycle flag is re-checked before every element,
    /// so a concurrent [RecycleHandle] stops the pass promptly without
    /// drawing further elements.
    #[allow(clippy::too_many_arguments)]
    pub fn render(
        &mut self,
        surface: &mut dyn Surface,
        x: Pt,
        y: Pt,
        left: Pt,
        right: Pt,
        mode: DisplayMode,
    ) -> Result<(), RenderError> {
        self.ensure_justification();
        let mut cursor = x;
        for element in &self.elements {
            if self.recycled.load(Ordering::Acquire) {
                break;
            }
            cursor += element.render(surface, cursor, y, self.space_width, left, right, mode)?;
        }
        Ok(())
    }

    /// Attach pre-built footnote sub-lines to this line. Empty input is
    /// silently ignored.
    ///
    /// The first call seeds the footnote list with a separator sub-line: a
    /// thin rule a quarter of the reference page width, committed
    /// left-justified so later notes cannot re-align it.
    pub fn add_note(&mut self, note_lines: Vec<Line>) {
        if note_lines.is_empty() {
            return;
        }
        if self.footnotes.is_none() {
            let rule_width = page::PAGE_WIDTH / 4.0;
            let mut separator = Line::new(rule_width, self.justification);
            separator.append(Box::new(HorizontalRule::new(
                rule_width,
                TextStyle::Footnote.size(),
            )));
            separator.apply_justification(Justification::Left);
            self.footnotes = Some(vec![separator]);
        }
        if let Some(footnotes) = &mut self.footnotes {
            footnotes.extend(note_lines);
        }
    }

    /// Own height plus the heights of at most the first two footnote
    /// sub-lines. The cap bounds the vertical space reserved for footnotes;
    /// further notes still exist but do not grow the reservation.
    pub fn total_height(&self) -> Pt {
        let mut height = self.height;
        if let Some(footnotes) = &self.footnotes {
            for note in footnotes.iter().take(2) {
                height += note.height;
            }
        }
        height
    }

    /// Release element and footnote storage. Idempotent, and safe to pair
    /// with an in-flight render on another thread via [RecycleHandle]: the
    /// flag is raised before anything is dropped.
    pub fn recycle(&mut self) {
        self.recycled.store(true, Ordering::Release);
        self.elements.clear();
        if let Some(mut footnotes) = self.footnotes.take() {
            for note in &mut footnotes {
                note.recycle();
            }
        }
        trace!("line recycled");
    }

    /// A cloneable handle onto this line's recycle flag, for aborting an
    /// in-flight render from another thread
    pub fn recycle_handle(&self) -> RecycleHandle {
        RecycleHandle(Arc::clone(&self.recycled))
    }

    pub fn is_recycled(&self) -> bool {
        self.recycled.load(Ordering::Acquire)
    }

    /// Accumulated width: the exact sum of appended element widths
    pub fn width(&self) -> Pt {
        self.width
    }

    /// Accumulated height: the maximum appended element height
    pub fn height(&self) -> Pt {
        self.height
    }

    /// Maximum width the line is allowed to occupy
    pub fn max_width(&self) -> Pt {
        self.max_width
    }

    /// Inter-word stretch for justified lines; meaningful only after
    /// justification has been applied
    pub fn space_width(&self) -> Pt {
        self.space_width
    }

    /// Whether any visible content (as opposed to whitespace) was appended
    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// Whether the alignment mode is locked, either by an explicit
    /// [apply_justification](Line::apply_justification) or by justification
    /// itself
    pub fn committed(&self) -> bool {
        self.state != LineState::Open
    }

    /// The elements currently in the line, in visual left-to-right order
    pub fn elements(&self) -> &[Box<dyn LineElement>] {
        &self.elements
    }

    /// Footnote sub-lines attached to this line, if any; the first entry is
    /// always the synthetic separator
    pub fn footnotes(&self) -> Option<&[Line]> {
        self.footnotes.as_deref()
    }

    /// Mutable access to the footnote sub-lines, for drivers that render
    /// them below the parent line
    pub fn footnotes_mut(&mut self) -> Option<&mut [Line]> {
        self.footnotes.as_deref_mut()
    }

    pub fn set_title(&mut self, title: TitleMarker) {
        self.title = Some(title);
    }

    pub fn title(&self) -> Option<&TitleMarker> {
        self.title.as_ref()
    }
}
