use super::*;

const EPS: f64 = 1e-9;

#[test]
fn zero_count_is_empty() {
    assert!(spread_scopes(0, 0.9).is_empty());
}

#[test]
fn single_window_spans_everything() {
    let w = spread_scopes(1, 0.9);
    assert_eq!(w, vec![ScopeWindow::new(0.0, 1.0)]);
}

#[test]
fn windows_are_ordered_and_bounded() {
    for &n in &[2usize, 3, 7, 100, 1234] {
        for &s in &[0.0, 0.25, 0.5, 0.9, 1.0] {
            let w = spread_scopes(n, s);
            assert_eq!(w.len(), n);
            assert!(w[0].start.abs() < EPS, "n={n} s={s}");
            assert!((w[n - 1].end - 1.0).abs() < EPS, "n={n} s={s}");
            for win in &w {
                assert!(0.0 <= win.start, "n={n} s={s} {win:?}");
                assert!(win.start <= win.end, "n={n} s={s} {win:?}");
                assert!(win.end <= 1.0, "n={n} s={s} {win:?}");
            }
        }
    }
}

#[test]
fn window_centers_advance_linearly() {
    let w = spread_scopes(10, 0.9);
    let centers: Vec<f64> = w.iter().map(|s| (s.start + s.end) / 2.0).collect();
    let step = centers[1] - centers[0];
    assert!(step > 0.0);
    for pair in centers.windows(2) {
        assert!((pair[1] - pair[0] - step).abs() < 1e-9);
    }
}

#[test]
fn zero_spread_is_contiguous() {
    let w = spread_scopes(4, 0.0);
    let expected = [(0.0, 0.25), (0.25, 0.5), (0.5, 0.75), (0.75, 1.0)];
    for (win, (s, e)) in w.iter().zip(expected) {
        assert!((win.start - s).abs() < EPS);
        assert!((win.end - e).abs() < EPS);
    }
}

#[test]
fn full_spread_gives_identical_windows() {
    for win in spread_scopes(5, 1.0) {
        assert!(win.start.abs() < EPS);
        assert!((win.end - 1.0).abs() < EPS);
    }
}

#[test]
fn out_of_range_spread_is_clamped() {
    assert_eq!(spread_scopes(3, -2.0), spread_scopes(3, 0.0));
    assert_eq!(spread_scopes(3, 4.0), spread_scopes(3, 1.0));
    assert_eq!(spread_scopes(3, f64::NAN), spread_scopes(3, 0.0));
}

#[test]
fn clamp_scope_hits_exact_endpoints() {
    let win = ScopeWindow::new(0.2, 0.6);
    assert_eq!(clamp_scope(0.0, win), 0.0);
    assert_eq!(clamp_scope(0.2, win), 0.0);
    assert_eq!(clamp_scope(0.6, win), 1.0);
    assert_eq!(clamp_scope(1.0, win), 1.0);
    assert!((clamp_scope(0.4, win) - 0.5).abs() < EPS);
}

#[test]
fn clamp_scope_is_monotonic() {
    let win = ScopeWindow::new(0.1, 0.35);
    let mut prev = 0.0;
    for i in 0..=1000 {
        let p = i as f64 / 1000.0;
        let v = clamp_scope(p, win);
        assert!(v >= prev, "p={p}");
        assert!((0.0..=1.0).contains(&v));
        prev = v;
    }
}

#[test]
fn degenerate_window_is_a_step() {
    let win = ScopeWindow::new(0.5, 0.5);
    assert!(win.is_empty());
    assert_eq!(clamp_scope(0.49, win), 0.0);
    assert_eq!(clamp_scope(0.5, win), 0.0);
    assert_eq!(clamp_scope(0.51, win), 1.0);
    assert_eq!(win.local(0.51), 1.0);
}

#[test]
fn clamp_scope_nan_progress_is_zero() {
    assert_eq!(clamp_scope(f64::NAN, ScopeWindow::new(0.0, 1.0)), 0.0);
}
