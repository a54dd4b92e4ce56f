use image::RgbaImage;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::foundation::core::{Rgb8, TileRect};

/// Tile size used when none (or zero) is configured.
pub const DEFAULT_TILE_SIZE: u32 = 10;

/// One grid cell of the source with its averaged colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Tile {
    pub rect: TileRect,
    pub mean: Rgb8,
}

/// Tiles in reveal order (randomised, not spatial).
pub type TileList = Vec<Tile>;

/// Readable straight-RGBA pixel grid.
pub trait PixelSource {
    fn dimensions(&self) -> (u32, u32);

    /// Pixel at `(x, y)`. Callers stay in bounds.
    fn rgba_at(&self, x: u32, y: u32) -> [u8; 4];
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn rgba_at(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

/// Partition `source` into `tile_size` cells and shuffle them with the thread RNG.
pub fn extract<S: PixelSource + ?Sized>(source: &S, tile_size: u32) -> TileList {
    extract_with_rng(source, tile_size, &mut rand::thread_rng())
}

/// [`extract`] with a caller-provided RNG.
#[tracing::instrument(skip(source, rng))]
pub fn extract_with_rng<S, R>(source: &S, tile_size: u32, rng: &mut R) -> TileList
where
    S: PixelSource + ?Sized,
    R: Rng + ?Sized,
{
    let mut tiles = grid_tiles(source, tile_size);
    tiles.shuffle(rng);
    tracing::debug!(tiles = tiles.len(), "extracted seed tiles");
    tiles
}

/// Tiles in column-major grid order, before shuffling.
///
/// The last column and row are clamped to the source bounds, so edge tiles may be smaller than
/// `tile_size`. An empty source yields no tiles.
pub fn grid_tiles<S: PixelSource + ?Sized>(source: &S, tile_size: u32) -> TileList {
    let (width, height) = source.dimensions();
    if width == 0 || height == 0 {
        return Vec::new();
    }
    let step = if tile_size == 0 {
        DEFAULT_TILE_SIZE
    } else {
        tile_size
    };

    let cols = width.div_ceil(step) as usize;
    let rows = height.div_ceil(step) as usize;
    let mut tiles = Vec::with_capacity(cols * rows);

    let mut x_end = 0u32;
    while x_end < width {
        let x_start = x_end;
        x_end = width.min(x_end.saturating_add(step));

        let mut y_end = 0u32;
        while y_end < height {
            let y_start = y_end;
            y_end = height.min(y_end.saturating_add(step));

            let rect = TileRect::new(x_start, y_start, x_end - x_start, y_end - y_start);
            tiles.push(Tile {
                rect,
                mean: mean_rgb(source, rect),
            });
        }
    }
    tiles
}

/// Arithmetic mean of the RGB channels over `rect`, rounded. Alpha is ignored.
pub fn mean_rgb<S: PixelSource + ?Sized>(source: &S, rect: TileRect) -> Rgb8 {
    let n = rect.area();
    if n == 0 {
        return Rgb8::default();
    }

    let mut sum = [0u64; 3];
    for y in rect.y..rect.y + rect.height {
        for x in rect.x..rect.x + rect.width {
            let px = source.rgba_at(x, y);
            sum[0] += u64::from(px[0]);
            sum[1] += u64::from(px[1]);
            sum[2] += u64::from(px[2]);
        }
    }
    let avg = |s: u64| ((s + n / 2) / n).min(255) as u8;
    Rgb8::new(avg(sum[0]), avg(sum[1]), avg(sum[2]))
}

#[cfg(test)]
#[path = "../../tests/unit/tiles/extract.rs"]
mod tests;
