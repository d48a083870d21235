//! Drawing surface abstraction used by the grid and the game engine

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Colors of the playfield
pub mod palette {
    use super::Rgb;

    pub const GRID: Rgb = Rgb(0xcf, 0xcf, 0xcf);
    pub const SNAKE: Rgb = Rgb(0x2e, 0x8b, 0x57);
    pub const SNAKE_HEAD: Rgb = Rgb(0x24, 0xb7, 0x30);
    pub const SNAKE_CRASH: Rgb = Rgb(0xe5, 0x73, 0x73);
    pub const FOOD: Rgb = Rgb(0xf4, 0x43, 0x36);
    pub const LOSE_TEXT: Rgb = Rgb(0x60, 0x7d, 0x8b);
}

/// A run of text drawn centered on `(x, y)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub font_px: u32,
    pub color: Rgb,
}

/// A 2D drawing surface
///
/// Coordinates are in pixels with the origin in the top-left corner. Shapes
/// falling partly outside the surface are clipped.
pub trait Surface {
    /// Set the surface dimensions, discarding its contents
    fn resize(&mut self, width: u32, height: u32);

    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Clear the whole surface, text included
    fn clear(&mut self) {
        let (width, height) = (self.width(), self.height());
        self.clear_rect(0, 0, width, height);
    }

    /// Clear a rectangle back to transparent
    fn clear_rect(&mut self, x: i32, y: i32, width: u32, height: u32);

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb);

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb);

    /// Draw text centered horizontally on `x` with its baseline near `y`
    fn fill_text(&mut self, text: &str, x: i32, y: i32, font_px: u32, color: Rgb);
}
