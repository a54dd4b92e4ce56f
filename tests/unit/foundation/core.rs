use super::*;

#[test]
fn tile_rect_area_and_contains() {
    let r = TileRect::new(10, 0, 5, 10);
    assert_eq!(r.area(), 50);
    assert!(r.contains(10, 0));
    assert!(r.contains(14, 9));
    assert!(!r.contains(15, 0));
    assert!(!r.contains(9, 5));
    assert!(!r.contains(12, 10));
}

#[test]
fn tile_rect_geometry_matches_kurbo() {
    let r = TileRect::new(10, 20, 4, 6);
    assert_eq!(r.center(), Point::new(12.0, 23.0));
    assert_eq!(r.to_rect(), Rect::new(10.0, 20.0, 14.0, 26.0));
    assert!(TileRect::new(0, 0, 0, 3).is_empty());
}

#[test]
fn rgb_with_alpha_keeps_channels() {
    assert_eq!(Rgb8::new(1, 2, 3).with_alpha(9), [1, 2, 3, 9]);
}
