//! pen-paint: a minimal raster paint program.
//!
//! The library is the whole drawing core (canvas, strokes, undo, PNG I/O,
//! pen state) behind [`session::PaintSession`]; the binary is only the
//! window shell around it.

pub mod canvas;
pub mod config;
pub mod draw;
pub mod error;
pub mod gamma;
pub mod image_io;
pub mod pen;
pub mod session;
pub mod stroke;
pub mod types;
pub mod undo;

pub use canvas::Canvas;
pub use config::PaintConfig;
pub use error::{Error, Result};
pub use pen::{Pen, Thickness};
pub use session::PaintSession;
pub use types::{FrameBuffer, Point, Rgb};
