//! The paint session: everything the window shell is allowed to touch.
//!
//! Owns the canvas, the gesture state, the undo history and the pen. All
//! calls happen on the event thread, one at a time.

use std::path::Path;

use image::RgbaImage;
use log::{debug, info, warn};

use crate::canvas::Canvas;
use crate::config::PaintConfig;
use crate::error::Result;
use crate::image_io;
use crate::pen::{ColorDialog, DialogOutcome, Pen, Thickness, ThicknessControl};
use crate::stroke::StrokeRenderer;
use crate::types::{FrameBuffer, Point, Rgb};
use crate::undo::UndoStore;

pub struct PaintSession {
    canvas: Canvas,
    stroke: StrokeRenderer,
    undo: UndoStore,
    pen: Pen,
    thickness_control: ThicknessControl,
}

impl Default for PaintSession {
    fn default() -> Self {
        Self::new(Canvas::default(), Pen::default(), None)
    }
}

impl PaintSession {
    pub fn new(canvas: Canvas, pen: Pen, undo_depth: Option<usize>) -> Self {
        Self {
            canvas,
            stroke: StrokeRenderer::new(),
            undo: UndoStore::with_depth(undo_depth),
            thickness_control: ThicknessControl::new(pen.thickness),
            pen,
        }
    }

    pub fn from_config(config: &PaintConfig) -> Self {
        Self::new(Canvas::new(config.width, config.height), config.pen.to_pen(), config.undo_depth)
    }

    /* ---------- pointer ---------- */

    /// Pointer pressed: snapshot for undo, then start a new stroke at `at`.
    pub fn on_press_at(&mut self, at: Point) {
        self.push_undo();
        self.stroke.press(at);
        debug!("Stroke started at ({:.1}, {:.1})", at.x, at.y);
    }

    /// Pointer dragged: extend the current stroke. Ignored without a press.
    pub fn on_drag_to(&mut self, to: Point) {
        self.stroke.drag(&mut self.canvas, &self.pen, to);
    }

    /// Pointer released.
    pub fn end_stroke(&mut self) {
        self.stroke.release();
    }

    pub fn is_drawing(&self) -> bool {
        self.stroke.is_dragging()
    }

    /* ---------- pen ---------- */

    pub fn pen(&self) -> &Pen {
        &self.pen
    }

    pub fn set_color(&mut self, color: Rgb) {
        self.pen.color = color;
        info!("Pen color set to {color}");
    }

    /// Open the RGB picker seeded with the current color.
    pub fn color_dialog(&self) -> ColorDialog {
        ColorDialog::seeded(self.pen.color)
    }

    /// Apply how the picker was closed. Cancel keeps the current color.
    pub fn finish_color_dialog(&mut self, outcome: DialogOutcome) {
        match outcome {
            DialogOutcome::Accepted(color) => self.set_color(color),
            DialogOutcome::Cancelled => debug!("Color dialog cancelled"),
        }
    }

    /// Slider path: any integer is pinned into 1..=100.
    pub fn set_thickness(&mut self, value: i64) -> Thickness {
        let thickness = Thickness::clamped(value);
        self.pen.thickness = thickness;
        self.thickness_control.notify(thickness);
        debug!("Pen thickness set to {thickness}");
        thickness
    }

    /// The slider + text field pair, as last synchronised.
    pub fn thickness_control(&self) -> &ThicknessControl {
        &self.thickness_control
    }

    pub fn thickness_control_mut(&mut self) -> &mut ThicknessControl {
        &mut self.thickness_control
    }

    /// Text path: commit `text` if it is an integer in 1..=100. Otherwise
    /// the field reverts to the current thickness and the pen is unchanged.
    pub fn submit_thickness_text(&mut self, text: &str) -> Result<Thickness> {
        match text.parse::<Thickness>() {
            Ok(thickness) => Ok(self.set_thickness(thickness.get() as i64)),
            Err(e) => {
                warn!("{e}; keeping thickness {}", self.pen.thickness);
                self.thickness_control.notify(self.pen.thickness);
                Err(e)
            }
        }
    }

    /// Submit whatever is currently typed in the text field.
    pub fn submit_thickness_field(&mut self) -> Result<Thickness> {
        let text = self.thickness_control.text().to_owned();
        self.submit_thickness_text(&text)
    }

    /* ---------- canvas commands ---------- */

    /// Wipe to white. Undoable.
    pub fn clear(&mut self) {
        self.push_undo();
        self.canvas.clear();
        info!("Canvas cleared");
    }

    /// Restore the newest snapshot. Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        match self.undo.pop() {
            Some(snapshot) => {
                self.canvas.restore(snapshot);
                self.stroke.release();
                info!("Undo ({} left)", self.undo.len());
                true
            }
            None => {
                debug!("Undo requested with empty history");
                false
            }
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        image_io::save(&self.canvas, path)
    }

    /// Replace the canvas with the image at `path`. Not undoable: the undo
    /// history is dropped since older snapshots may have another size.
    /// On failure nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        let canvas = image_io::load(path)?;
        self.canvas = canvas;
        self.undo.clear();
        self.stroke.release();
        Ok(())
    }

    /* ---------- repaint ---------- */

    pub fn current_frame(&self) -> &RgbaImage {
        self.canvas.image()
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Composite the canvas into the window's frame buffer.
    pub fn compose_into(&self, frame: &mut FrameBuffer) {
        self.canvas.compose_into(frame);
    }

    fn push_undo(&mut self) {
        self.undo.push(self.canvas.snapshot());
    }
}
