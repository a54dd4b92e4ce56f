use kurbo::Shape;

use crate::render::composite::{blit_over, premul_over_in_place, unpremultiply_rgba8_in_place};
use crate::render::target::{FillShape, FrameRGBA, RenderTarget};

/// Render target backed by a premultiplied RGBA8 frame.
///
/// Images are composited directly into the frame. Shape fills are rasterised by `vello_cpu` into
/// an overlay pixmap and composited onto the frame on [`RenderTarget::present`].
pub struct CpuTarget {
    frame: FrameRGBA,
    ctx: Option<vello_cpu::RenderContext>,
    overlay: Option<vello_cpu::Pixmap>,
    pending: bool,
    destroyed: bool,
}

impl CpuTarget {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: FrameRGBA::transparent(width, height),
            ctx: None,
            overlay: None,
            pending: false,
            destroyed: false,
        }
    }

    /// Current premultiplied contents. Call [`RenderTarget::present`] first to include fills.
    pub fn frame(&self) -> &FrameRGBA {
        &self.frame
    }

    /// Straight-alpha snapshot, ready for PNG encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut data = self.frame.data.clone();
        unpremultiply_rgba8_in_place(&mut data);
        image::RgbaImage::from_raw(self.frame.width, self.frame.height, data)
            .unwrap_or_else(|| image::RgbaImage::new(self.frame.width, self.frame.height))
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    fn raster_size(&self) -> Option<(u16, u16)> {
        let w: u16 = self.frame.width.try_into().ok()?;
        let h: u16 = self.frame.height.try_into().ok()?;
        Some((w, h))
    }

    fn ctx_mut(&mut self, width: u16, height: u16) -> &mut vello_cpu::RenderContext {
        let ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        self.ctx.insert(ctx)
    }
}

impl RenderTarget for CpuTarget {
    fn width(&self) -> u32 {
        self.frame.width
    }

    fn height(&self) -> u32 {
        self.frame.height
    }

    fn can_render(&self) -> bool {
        if self.destroyed || self.frame.is_empty() {
            return false;
        }
        if self.raster_size().is_none() {
            tracing::debug!(
                width = self.frame.width,
                height = self.frame.height,
                max = u16::MAX,
                "target exceeds rasteriser size limit, skipping render"
            );
            return false;
        }
        true
    }

    fn resize(&mut self, width: u32, height: u32) {
        if self.destroyed {
            return;
        }
        self.frame = FrameRGBA::transparent(width, height);
        self.ctx = None;
        self.overlay = None;
        self.pending = false;
    }

    fn clear(&mut self) {
        self.frame.data.fill(0);
        if let Some(ctx) = self.ctx.as_mut() {
            ctx.reset();
        }
        self.pending = false;
    }

    fn draw_image(&mut self, image: &FrameRGBA, x: i32, y: i32) {
        if !self.can_render() {
            return;
        }
        // Keep painter's order with fills issued earlier.
        self.present();
        blit_over(&mut self.frame, image, x, y);
    }

    fn fill(&mut self, shape: FillShape, rgba: [u8; 4]) {
        if !self.can_render() || rgba[3] == 0 {
            return;
        }
        let Some((w, h)) = self.raster_size() else {
            return;
        };
        let ctx = self.ctx_mut(w, h);
        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
        ctx.set_paint(vello_cpu::peniko::Color::from_rgba8(
            rgba[0], rgba[1], rgba[2], rgba[3],
        ));
        match shape {
            FillShape::Rect(r) => {
                if r.width() <= 0.0 || r.height() <= 0.0 {
                    return;
                }
                ctx.fill_rect(&vello_cpu::kurbo::Rect::new(r.x0, r.y0, r.x1, r.y1));
            }
            FillShape::Circle(c) => {
                if c.radius <= 0.0 {
                    return;
                }
                let mut p = vello_cpu::kurbo::BezPath::new();
                for el in c.path_elements(0.1) {
                    p.push(el);
                }
                ctx.fill_path(&p);
            }
        }
        self.pending = true;
    }

    fn present(&mut self) {
        if !self.pending {
            return;
        }
        self.pending = false;
        let Some((w, h)) = self.raster_size() else {
            return;
        };
        let Some(ctx) = self.ctx.as_mut() else {
            return;
        };

        let mut overlay = match self.overlay.take() {
            Some(p) if p.width() == w && p.height() == h => p,
            _ => vello_cpu::Pixmap::new(w, h),
        };
        overlay.data_as_u8_slice_mut().fill(0);
        ctx.flush();
        ctx.render_to_pixmap(&mut overlay);
        ctx.reset();

        if let Err(err) = premul_over_in_place(&mut self.frame.data, overlay.data_as_u8_slice()) {
            tracing::debug!(%err, "skipping overlay composite");
        }
        self.overlay = Some(overlay);
    }

    fn destroy(&mut self) {
        self.destroyed = true;
        self.pending = false;
        self.ctx = None;
        self.overlay = None;
        self.frame = FrameRGBA::transparent(0, 0);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
