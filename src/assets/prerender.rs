use image::RgbaImage;
use image::imageops::{self, FilterType};

use crate::render::composite::premultiply_rgba8_in_place;
use crate::render::target::FrameRGBA;
use crate::tiles::extract::PixelSource;

/// Offscreen surface holding the decoded source drawn at the current size.
///
/// Keeps straight pixels for sampling and a premultiplied copy for drawing. Every
/// [`Prerender::change_size`] redraws the source and raises the content-ready flag again.
#[derive(Clone, Debug)]
pub struct Prerender {
    source: RgbaImage,
    pixels: RgbaImage,
    frame: FrameRGBA,
    ready: bool,
    destroyed: bool,
}

impl Prerender {
    /// Prerender `source` at its natural size.
    pub fn new(source: RgbaImage) -> Self {
        let (w, h) = source.dimensions();
        let mut out = Self {
            pixels: RgbaImage::new(0, 0),
            frame: FrameRGBA::transparent(0, 0),
            source,
            ready: false,
            destroyed: false,
        };
        out.draw(w, h);
        out
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Natural size of the source image.
    pub fn natural_size(&self) -> (u32, u32) {
        self.source.dimensions()
    }

    /// Straight-alpha pixels at the current size.
    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    /// Premultiplied pixels at the current size.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// `true` once content has been rendered and not yet consumed.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Consume the content-ready notification.
    pub fn take_ready(&mut self) -> bool {
        std::mem::take(&mut self.ready)
    }

    /// Redraw the source at `width x height`.
    #[tracing::instrument(skip(self))]
    pub fn change_size(&mut self, width: u32, height: u32) {
        if self.destroyed {
            return;
        }
        self.draw(width, height);
    }

    /// Drop all buffers. Later resizes are ignored.
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.ready = false;
        self.source = RgbaImage::new(0, 0);
        self.pixels = RgbaImage::new(0, 0);
        self.frame = FrameRGBA::transparent(0, 0);
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn draw(&mut self, width: u32, height: u32) {
        self.pixels = cover_fit(&self.source, width, height);
        let mut data = self.pixels.as_raw().clone();
        premultiply_rgba8_in_place(&mut data);
        self.frame = FrameRGBA {
            width,
            height,
            data,
        };
        self.ready = true;
    }
}

impl PixelSource for Prerender {
    fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels.get_pixel(x, y).0
    }
}

/// Scale `source` to cover `width x height` and crop the centre.
///
/// The crop is taken in source coordinates first, so the resampled image is never larger than
/// the output.
pub fn cover_fit(source: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (sw, sh) = source.dimensions();
    if width == 0 || height == 0 || sw == 0 || sh == 0 {
        return RgbaImage::new(width, height);
    }
    if (sw, sh) == (width, height) {
        return source.clone();
    }

    let (crop_w, crop_h) = cover_crop_size(sw, sh, width, height);
    let x = (sw - crop_w) / 2;
    let y = (sh - crop_h) / 2;
    let cropped = imageops::crop_imm(source, x, y, crop_w, crop_h).to_image();
    if (crop_w, crop_h) == (width, height) {
        return cropped;
    }
    imageops::resize(&cropped, width, height, FilterType::Triangle)
}

/// Largest centred region of a `sw x sh` source with the aspect ratio of `width x height`.
fn cover_crop_size(sw: u32, sh: u32, width: u32, height: u32) -> (u32, u32) {
    let (sw64, sh64) = (u64::from(sw), u64::from(sh));
    let (w64, h64) = (u64::from(width), u64::from(height));
    if sw64 * h64 > sh64 * w64 {
        // Source is wider: keep the full height.
        let crop_w = (sh64 * w64 + h64 / 2) / h64;
        (crop_w.clamp(1, sw64) as u32, sh)
    } else {
        let crop_h = (sw64 * h64 + w64 / 2) / w64;
        (sw, crop_h.clamp(1, sh64) as u32)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/prerender.rs"]
mod tests;
