use super::*;
use crate::foundation::core::{Rgb8, TileRect};

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Clear,
    Image(u32, u32),
    Fill(FillShape, [u8; 4]),
    Present,
}

struct RecordingTarget {
    width: u32,
    height: u32,
    ops: Vec<Op>,
}

impl RecordingTarget {
    fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
        }
    }

    fn fills(&self) -> Vec<(FillShape, [u8; 4])> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Fill(s, c) => Some((*s, *c)),
                _ => None,
            })
            .collect()
    }
}

impl RenderTarget for RecordingTarget {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    fn clear(&mut self) {
        self.ops.push(Op::Clear);
    }

    fn draw_image(&mut self, image: &FrameRGBA, _x: i32, _y: i32) {
        self.ops.push(Op::Image(image.width, image.height));
    }

    fn fill(&mut self, shape: FillShape, rgba: [u8; 4]) {
        self.ops.push(Op::Fill(shape, rgba));
    }

    fn present(&mut self) {
        self.ops.push(Op::Present);
    }

    fn destroy(&mut self) {}
}

fn quad_tiles() -> Vec<Tile> {
    [(0, 0), (10, 0), (0, 10), (10, 10)]
        .into_iter()
        .enumerate()
        .map(|(i, (x, y))| Tile {
            rect: TileRect::new(x, y, 10, 10),
            mean: Rgb8::new(i as u8 * 10, 1, 2),
        })
        .collect()
}

#[test]
fn skips_when_target_not_ready() {
    let mut t = RecordingTarget::new(0, 20);
    let base = FrameRGBA::transparent(20, 20);
    assert!(!render_reveal(&mut t, &base, &quad_tiles(), 1.0, &RevealParams::default()));
    assert!(t.ops.is_empty());
}

#[test]
fn draws_base_before_overlay() {
    let mut t = RecordingTarget::new(20, 20);
    let base = FrameRGBA::transparent(20, 20);
    assert!(render_reveal(&mut t, &base, &quad_tiles(), 1.0, &RevealParams::default()));
    assert_eq!(t.ops[0], Op::Clear);
    assert_eq!(t.ops[1], Op::Image(20, 20));
    assert_eq!(t.ops.last(), Some(&Op::Present));
    assert_eq!(t.fills().len(), 4);
}

#[test]
fn progress_zero_paints_no_overlay() {
    for kind in [ShapeKind::Rect, ShapeKind::Circle] {
        let params = RevealParams {
            kind,
            ..RevealParams::default()
        };
        let mut t = RecordingTarget::new(20, 20);
        render_reveal(&mut t, &FrameRGBA::transparent(20, 20), &quad_tiles(), 0.0, &params);
        assert!(t.fills().is_empty(), "{kind:?}");
    }
}

#[test]
fn progress_one_rect_tiles_are_opaque_mean_colour() {
    let tiles = quad_tiles();
    let mut t = RecordingTarget::new(20, 20);
    render_reveal(&mut t, &FrameRGBA::transparent(20, 20), &tiles, 1.0, &RevealParams::default());
    for ((shape, rgba), tile) in t.fills().into_iter().zip(&tiles) {
        assert_eq!(shape, FillShape::Rect(tile.rect.to_rect()));
        assert_eq!(rgba, tile.mean.with_alpha(255));
    }
}

#[test]
fn progress_one_circles_use_configured_tile_size() {
    let tiles = quad_tiles();
    let params = RevealParams {
        kind: ShapeKind::Circle,
        tile_size: 10,
        spread: DEFAULT_SPREAD,
    };
    let mut t = RecordingTarget::new(20, 20);
    render_reveal(&mut t, &FrameRGBA::transparent(20, 20), &tiles, 1.0, &params);
    for ((shape, rgba), tile) in t.fills().into_iter().zip(&tiles) {
        let FillShape::Circle(c) = shape else {
            panic!("expected circle, got {shape:?}");
        };
        assert_eq!(c.center, tile.rect.center());
        assert!((c.radius - 7.5).abs() < 1e-9);
        assert_eq!(rgba[3], 255);
    }
}

#[test]
fn earlier_tiles_reveal_first() {
    let tiles = quad_tiles();
    let params = RevealParams {
        spread: 0.0,
        ..RevealParams::default()
    };
    let mut t = RecordingTarget::new(20, 20);
    // With contiguous windows, 0.3 lands inside the second window only.
    render_reveal(&mut t, &FrameRGBA::transparent(20, 20), &tiles, 0.3, &params);
    let fills = t.fills();
    assert_eq!(fills.len(), 2);
    assert_eq!(fills[0].1[3], 255);
    assert!(fills[1].1[3] > 0 && fills[1].1[3] < 255);
}

#[test]
fn repeated_render_issues_identical_ops() {
    let tiles = quad_tiles();
    let base = FrameRGBA::transparent(20, 20);
    let mut a = RecordingTarget::new(20, 20);
    render_reveal(&mut a, &base, &tiles, 1.0, &RevealParams::default());
    let first = a.ops.clone();
    a.ops.clear();
    render_reveal(&mut a, &base, &tiles, 1.0, &RevealParams::default());
    assert_eq!(a.ops, first);
}

#[test]
fn tile_paint_scales_with_local_progress() {
    let tile = quad_tiles()[1];
    let rect = RevealParams::default();
    let (_, rgba) = tile_paint(&tile, 0.5, &rect).unwrap();
    assert_eq!(rgba[3], 128);

    let circle = RevealParams {
        kind: ShapeKind::Circle,
        tile_size: 20,
        spread: 0.9,
    };
    let (shape, _) = tile_paint(&tile, 0.5, &circle).unwrap();
    let FillShape::Circle(c) = shape else {
        panic!("expected circle");
    };
    assert!((c.radius - 7.5).abs() < 1e-9);
    assert!(tile_paint(&tile, 0.0, &circle).is_none());
}

#[test]
fn zero_tile_size_circles_use_default_radius() {
    let tile = quad_tiles()[0];
    let circle = RevealParams {
        kind: ShapeKind::Circle,
        tile_size: 0,
        spread: 0.9,
    };
    let (shape, rgba) = tile_paint(&tile, 1.0, &circle).unwrap();
    let FillShape::Circle(c) = shape else {
        panic!("expected circle");
    };
    assert!((c.radius - f64::from(DEFAULT_TILE_SIZE) * CIRCLE_RADIUS_FACTOR).abs() < 1e-9);
    assert_eq!(rgba[3], 255);
}

#[test]
fn shape_kind_parsing_defaults_to_rect() {
    assert_eq!(ShapeKind::parse("circle"), ShapeKind::Circle);
    assert_eq!(ShapeKind::parse(" CIRCLE "), ShapeKind::Circle);
    assert_eq!(ShapeKind::parse("rect"), ShapeKind::Rect);
    assert_eq!(ShapeKind::parse("hexagon"), ShapeKind::Rect);
    let k: ShapeKind = serde_json::from_str("\"triangle\"").unwrap();
    assert_eq!(k, ShapeKind::Rect);
    assert_eq!(serde_json::to_string(&ShapeKind::Circle).unwrap(), "\"circle\"");
}
