use super::surface::{Rgb, Surface, TextRun};

/// In-memory pixel raster implementing [`Surface`]
///
/// Pixels start transparent (`None`). Text is not rasterized; it is kept as
/// a list of [`TextRun`]s for the terminal renderer to lay out.
#[derive(Debug, Clone, Default)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Option<Rgb>>,
    texts: Vec<TextRun>,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        let mut canvas = Self::default();
        canvas.resize(width, height);
        canvas
    }

    /// Color at a pixel, `None` when transparent or out of bounds
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb> {
        self.index(x, y).and_then(|i| self.pixels[i])
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Number of painted pixels with the given color
    pub fn count(&self, color: Rgb) -> usize {
        self.pixels.iter().filter(|p| **p == Some(color)).count()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Clip a rectangle to the surface, returning pixel ranges
    fn clip(&self, x: i32, y: i32, width: u32, height: u32) -> (i64, i64, i64, i64) {
        let x0 = i64::from(x).max(0);
        let y0 = i64::from(y).max(0);
        let x1 = (i64::from(x) + i64::from(width)).min(i64::from(self.width));
        let y1 = (i64::from(y) + i64::from(height)).min(i64::from(self.height));
        (x0, y0, x1, y1)
    }

    fn paint(&mut self, x: i32, y: i32, width: u32, height: u32, color: Option<Rgb>) {
        let (x0, y0, x1, y1) = self.clip(x, y, width, height);
        let stride = self.width as usize;
        for py in y0..y1 {
            let row = py as usize * stride;
            for px in x0..x1 {
                self.pixels[row + px as usize] = color;
            }
        }
    }
}

impl Surface for Canvas {
    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels = vec![None; width as usize * height as usize];
        self.texts.clear();
    }

    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn clear_rect(&mut self, x: i32, y: i32, width: u32, height: u32) {
        self.paint(x, y, width, height, None);
        let (x0, y0, x1, y1) = self.clip(x, y, width, height);
        self.texts.retain(|run| {
            let (tx, ty) = (i64::from(run.x), i64::from(run.y));
            !(tx >= x0 && tx < x1 && ty >= y0 && ty < y1)
        });
    }

    fn fill_rect(&mut self, x: i32, y: i32, width: u32, height: u32, color: Rgb) {
        self.paint(x, y, width, height, Some(color));
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: u32, color: Rgb) {
        let r = i64::from(radius);
        let (cx, cy) = (i64::from(cx), i64::from(cy));
        let (x0, y0, x1, y1) = self.clip(
            (cx - r).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            (cy - r).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32,
            (2 * r) as u32,
            (2 * r) as u32,
        );
        let stride = self.width as usize;
        // Pixel centers sit at +0.5; compare doubled coordinates to stay integral.
        for py in y0..y1 {
            let dy = 2 * py + 1 - 2 * cy;
            for px in x0..x1 {
                let dx = 2 * px + 1 - 2 * cx;
                if dx * dx + dy * dy <= 4 * r * r {
                    self.pixels[py as usize * stride + px as usize] = Some(color);
                }
            }
        }
    }

    fn fill_text(&mut self, text: &str, x: i32, y: i32, font_px: u32, color: Rgb) {
        self.texts.push(TextRun {
            text: text.to_string(),
            x,
            y,
            font_px,
            color,
        });
    }
}
