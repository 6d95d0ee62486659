//! End-to-end render checks against a recording surface.
//!
//! The surface records every draw command it receives, so cursor arithmetic
//! (justify spacing, centre/right insets, lazy justification through render)
//! is observable as the absolute x positions of the recorded text runs.
//! A blocking variant hands control back to the test mid-render to pin down
//! the recycle-during-render interleaving deterministically.

use std::sync::mpsc;
use std::thread;

use line_layout::page;
use line_layout::{
    DisplayMode, FixedWhiteSpace, FlexWhiteSpace, Justification, Line, LineElement, Pt,
    RenderError, Surface, TextRun, TextStyle,
};

#[derive(Default)]
struct RecordingSurface {
    texts: Vec<(String, f32)>,
    rules: Vec<(f32, f32, f32)>,
}

impl Surface for RecordingSurface {
    fn draw_text(
        &mut self,
        text: &str,
        x: Pt,
        _y: Pt,
        _style: TextStyle,
        _mode: DisplayMode,
    ) -> Result<(), RenderError> {
        self.texts.push((text.to_string(), x.0));
        Ok(())
    }

    fn draw_rule(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        _thickness: Pt,
        _mode: DisplayMode,
    ) -> Result<(), RenderError> {
        self.rules.push((x.0, y.0, width.0));
        Ok(())
    }
}

fn word(text: &str, width: f32) -> Box<dyn LineElement> {
    Box::new(TextRun::new(text, Pt(width), Pt(24.0), TextStyle::Text))
}

fn flex(width: f32) -> Box<dyn LineElement> {
    Box::new(FlexWhiteSpace::new(Pt(width), Pt(24.0)))
}

fn fixed(width: f32) -> Box<dyn LineElement> {
    Box::new(FixedWhiteSpace::new(Pt(width), Pt(24.0)))
}

fn render(line: &mut Line, surface: &mut RecordingSurface) {
    line.render(surface, Pt(0.0), Pt(24.0), Pt(0.0), Pt(800.0), DisplayMode::Day)
        .expect("render succeeds");
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn justified_line_spreads_words_to_the_full_width() {
    let mut line = Line::new(Pt(100.0), Justification::Justify);
    line.append(word("one", 30.0))
        .append(flex(5.0))
        .append(word("two", 25.0))
        .append(flex(5.0))
        .append(word("three", 20.0));

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    // leftover 15 over 2 flex spaces: each gap stretches from 5 to 12.5
    assert_eq!(line.space_width(), Pt(7.5));
    assert_eq!(surface.texts.len(), 3);
    assert!(approx(surface.texts[0].1, 0.0));
    assert!(approx(surface.texts[1].1, 42.5));
    assert!(approx(surface.texts[2].1, 80.0));
    // the last word's right edge lands exactly on the line width
    assert!(approx(surface.texts[2].1 + 20.0, 100.0));
}

#[test]
fn centered_line_is_inset_by_half_the_leftover() {
    let mut line = Line::new(Pt(100.0), Justification::Center);
    line.append(word("mid", 40.0));

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    assert_eq!(surface.texts.len(), 1);
    assert!(approx(surface.texts[0].1, 30.0));
}

#[test]
fn right_aligned_line_is_pushed_flush_right() {
    let mut line = Line::new(Pt(100.0), Justification::Right);
    line.append(word("end", 70.0));

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    assert_eq!(surface.texts.len(), 1);
    assert!(approx(surface.texts[0].1, 30.0));
}

#[test]
fn left_aligned_line_starts_at_the_render_origin() {
    let mut line = Line::new(Pt(100.0), Justification::Left);
    line.append(word("a", 30.0)).append(fixed(6.0)).append(word("b", 20.0));

    let mut surface = RecordingSurface::default();
    line.render(&mut surface, Pt(36.0), Pt(24.0), Pt(36.0), Pt(136.0), DisplayMode::Day)
        .expect("render succeeds");

    assert!(approx(surface.texts[0].1, 36.0));
    assert!(approx(surface.texts[1].1, 72.0));
}

#[test]
fn render_applies_justification_lazily() {
    let mut line = Line::new(Pt(100.0), Justification::Justify);
    line.append(word("a", 30.0)).append(flex(10.0)).append(word("b", 30.0));
    assert!(!line.committed());

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    // render computed the geometry on demand and latched it
    assert!(line.committed());
    assert_eq!(line.space_width(), Pt(30.0));
    assert!(approx(surface.texts[1].1, 70.0));
}

#[test]
fn overfull_justified_line_overlaps_instead_of_clamping() {
    let mut line = Line::new(Pt(100.0), Justification::Justify);
    line.append(word("wide", 70.0)).append(flex(0.0)).append(word("words", 50.0));

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    assert_eq!(line.space_width(), Pt(-20.0));
    // the second word backs up over the first
    assert!(approx(surface.texts[1].1, 50.0));
}

#[test]
fn footnote_separator_renders_a_quarter_page_rule() {
    let mut parent = Line::new(Pt(400.0), Justification::Left);
    parent.append(word("body", 40.0));
    let mut note = Line::new(Pt(200.0), Justification::Left);
    note.append(word("note", 30.0));
    parent.add_note(vec![note]);

    let mut surface = RecordingSurface::default();
    let footnotes = parent.footnotes_mut().expect("footnotes exist");
    for sub_line in footnotes.iter_mut() {
        sub_line
            .render(&mut surface, Pt(0.0), Pt(24.0), Pt(0.0), Pt(200.0), DisplayMode::Day)
            .expect("render succeeds");
    }

    assert_eq!(surface.rules.len(), 1);
    assert!(approx(surface.rules[0].2, page::PAGE_WIDTH.0 / 4.0));
    assert_eq!(surface.texts.len(), 1);
    assert_eq!(surface.texts[0].0, "note");
}

#[test]
fn render_after_recycle_draws_nothing() {
    let mut line = Line::new(Pt(100.0), Justification::Left);
    line.append(word("gone", 30.0));
    line.recycle();

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    assert!(surface.texts.is_empty());
}

#[test]
fn raised_handle_stops_a_render_before_it_starts() {
    let mut line = Line::new(Pt(100.0), Justification::Left);
    line.append(word("gone", 30.0)).append(word("too", 20.0));
    line.recycle_handle().recycle();

    let mut surface = RecordingSurface::default();
    render(&mut line, &mut surface);

    assert!(surface.texts.is_empty());
}

/// Blocks inside the first draw until the test has raised the recycle flag,
/// so the flag is provably observed between elements of one render pass.
struct BlockingSurface {
    drawn: usize,
    started: mpsc::Sender<()>,
    resume: mpsc::Receiver<()>,
}

impl Surface for BlockingSurface {
    fn draw_text(
        &mut self,
        _text: &str,
        _x: Pt,
        _y: Pt,
        _style: TextStyle,
        _mode: DisplayMode,
    ) -> Result<(), RenderError> {
        if self.drawn == 0 {
            let _ = self.started.send(());
            let _ = self.resume.recv();
        }
        self.drawn += 1;
        Ok(())
    }

    fn draw_rule(
        &mut self,
        _x: Pt,
        _y: Pt,
        _width: Pt,
        _thickness: Pt,
        _mode: DisplayMode,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}

#[test]
fn concurrent_recycle_aborts_an_in_flight_render() {
    let mut line = Line::new(Pt(800.0), Justification::Left);
    for i in 0..8 {
        line.append(word(&format!("w{i}"), 40.0)).append(fixed(8.0));
    }
    let handle = line.recycle_handle();

    let (started_tx, started_rx) = mpsc::channel();
    let (resume_tx, resume_rx) = mpsc::channel();

    let renderer = thread::spawn(move || {
        let mut surface = BlockingSurface {
            drawn: 0,
            started: started_tx,
            resume: resume_rx,
        };
        let result = line.render(
            &mut surface,
            Pt(0.0),
            Pt(24.0),
            Pt(0.0),
            Pt(800.0),
            DisplayMode::Day,
        );
        (result, surface.drawn, line)
    });

    // wait for the render to be mid-element, then evict
    started_rx.recv().expect("render reached the first element");
    handle.recycle();
    resume_tx.send(()).expect("renderer is still alive");

    let (result, drawn, mut line) = renderer.join().expect("renderer thread");
    assert!(result.is_ok());
    // the first element finished; the flag check stopped everything after it
    assert_eq!(drawn, 1);
    assert!(line.is_recycled());

    // the owning side's teardown is still safe afterwards
    line.recycle();
    assert!(line.elements().is_empty());
}
