use crate::foundation::core::{Circle, Rect};

/// Premultiplied RGBA8 pixel buffer, row-major, `width * height * 4` bytes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Fully transparent frame.
    pub fn transparent(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Bytes of pixel `(x, y)`. Panics when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let i = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }
}

/// Geometry of one overlay fill.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FillShape {
    Rect(Rect),
    Circle(Circle),
}

/// Onscreen surface the reveal is painted into.
///
/// Implementations may batch fills; everything issued since the last [`RenderTarget::clear`]
/// must be visible after [`RenderTarget::present`].
pub trait RenderTarget {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// `false` while the surface cannot accept drawing (zero size, destroyed).
    fn can_render(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    /// Change the pixel size. Content is discarded.
    fn resize(&mut self, width: u32, height: u32);

    /// Clear the whole surface to transparent.
    fn clear(&mut self);

    /// Draw a premultiplied frame with its top-left corner at `(x, y)`, clipped to the surface.
    fn draw_image(&mut self, image: &FrameRGBA, x: i32, y: i32);

    /// Fill `shape` with a straight RGBA colour.
    fn fill(&mut self, shape: FillShape, rgba: [u8; 4]);

    /// Flush batched drawing.
    fn present(&mut self) {}

    /// Release the surface. Later drawing is ignored.
    fn destroy(&mut self);
}
