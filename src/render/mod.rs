//! Drawing surface, in-memory canvas and the terminal renderer

pub mod canvas;
pub mod renderer;
pub mod surface;

pub use canvas::Canvas;
pub use renderer::{Controls, DialogView, Hud, Renderer, View};
pub use surface::{Rgb, Surface, TextRun, palette};
