// Turns pointer samples into line segments on the canvas.
// Visual: pressing starts a stroke, each drag sample extends it with a
// straight segment from the previous sample.

use log::trace;

use crate::canvas::Canvas;
use crate::pen::Pen;
use crate::types::Point;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    Dragging { last: Point },
}

#[derive(Debug, Default)]
pub struct StrokeRenderer {
    gesture: Gesture,
}

impl StrokeRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn gesture(&self) -> Gesture {
        self.gesture
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.gesture, Gesture::Dragging { .. })
    }

    /// Begin a stroke at `at`. Any previous stroke is forgotten.
    /// Nothing is drawn until the first drag sample arrives.
    pub fn press(&mut self, at: Point) {
        self.gesture = Gesture::Dragging { last: at };
    }

    /// Extend the stroke to `to`. Returns false (and draws nothing) when idle.
    pub fn drag(&mut self, canvas: &mut Canvas, pen: &Pen, to: Point) -> bool {
        let Gesture::Dragging { last } = self.gesture else {
            return false;
        };
        trace!("segment ({:.1},{:.1}) -> ({:.1},{:.1})", last.x, last.y, to.x, to.y);
        canvas.draw_segment(last, to, pen.color, pen.thickness);
        self.gesture = Gesture::Dragging { last: to };
        true
    }

    /// Pointer released.
    pub fn release(&mut self) {
        self.gesture = Gesture::Idle;
    }
}
