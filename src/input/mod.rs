pub mod handler;

pub use handler::{DialogAction, InputHandler, KeyAction};
