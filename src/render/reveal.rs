use crate::animation::scope::{clamp_scope, spread_scopes};
use crate::foundation::core::Circle;
use crate::render::target::{FillShape, FrameRGBA, RenderTarget};
use crate::tiles::extract::{DEFAULT_TILE_SIZE, Tile};

/// Overlap between consecutive tile windows.
pub const DEFAULT_SPREAD: f64 = 0.9;

/// Circle radius at full local progress, relative to the tile size.
pub const CIRCLE_RADIUS_FACTOR: f64 = 0.75;

/// Overlay shape painted for each tile.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ShapeKind {
    /// Tile rectangle filled with the mean colour, alpha = local progress.
    #[default]
    Rect,
    /// Opaque disc at the tile centre, radius grows with local progress.
    Circle,
}

impl ShapeKind {
    /// Parse a shape name. Unknown names fall back to [`ShapeKind::Rect`].
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "circle" => Self::Circle,
            "rect" | "" => Self::Rect,
            other => {
                tracing::debug!(kind = other, "unknown shape kind, using rect");
                Self::Rect
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rect => "rect",
            Self::Circle => "circle",
        }
    }
}

impl From<String> for ShapeKind {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<ShapeKind> for String {
    fn from(k: ShapeKind) -> Self {
        k.as_str().to_string()
    }
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-instance reveal parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealParams {
    pub kind: ShapeKind,
    /// Configured tile size; drives the circle radius.
    pub tile_size: u32,
    pub spread: f64,
}

impl Default for RevealParams {
    fn default() -> Self {
        Self {
            kind: ShapeKind::Rect,
            tile_size: DEFAULT_TILE_SIZE,
            spread: DEFAULT_SPREAD,
        }
    }
}

/// Paint `base` and the tile overlay at global `progress`.
///
/// Returns `false` without touching the target when it cannot render. `progress` is clamped into
/// `[0, 1]`; NaN counts as 0.
#[tracing::instrument(level = "trace", skip(target, base, tiles, params), fields(tiles = tiles.len()))]
pub fn render_reveal<T: RenderTarget + ?Sized>(
    target: &mut T,
    base: &FrameRGBA,
    tiles: &[Tile],
    progress: f64,
    params: &RevealParams,
) -> bool {
    if !target.can_render() {
        tracing::debug!("render target not ready, skipping reveal");
        return false;
    }
    let progress = if progress.is_nan() {
        0.0
    } else {
        progress.clamp(0.0, 1.0)
    };

    target.clear();
    target.draw_image(base, 0, 0);

    let windows = spread_scopes(tiles.len(), params.spread);
    for (tile, window) in tiles.iter().zip(windows) {
        let local = clamp_scope(progress, window);
        if let Some((shape, rgba)) = tile_paint(tile, local, params) {
            target.fill(shape, rgba);
        }
    }

    target.present();
    true
}

/// Fill for `tile` at `local` progress, or `None` when nothing would be visible.
pub fn tile_paint(tile: &Tile, local: f64, params: &RevealParams) -> Option<(FillShape, [u8; 4])> {
    let local = local.clamp(0.0, 1.0);
    match params.kind {
        ShapeKind::Circle => {
            let tile_size = if params.tile_size == 0 {
                DEFAULT_TILE_SIZE
            } else {
                params.tile_size
            };
            let radius = f64::from(tile_size) * CIRCLE_RADIUS_FACTOR * local;
            if radius <= 0.0 {
                return None;
            }
            Some((
                FillShape::Circle(Circle::new(tile.rect.center(), radius)),
                tile.mean.with_alpha(255),
            ))
        }
        ShapeKind::Rect => {
            let alpha = (local * 255.0).round() as u8;
            if alpha == 0 || tile.rect.is_empty() {
                return None;
            }
            Some((
                FillShape::Rect(tile.rect.to_rect()),
                tile.mean.with_alpha(alpha),
            ))
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/reveal.rs"]
mod tests;
