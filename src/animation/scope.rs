//! Scope math: distributing one global progress sweep over many staggered sub-ranges.

/// Sub-range `[start, end]` of the global progress over which one item animates.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScopeWindow {
    /// Global progress at which the item starts.
    pub start: f64,
    /// Global progress at which the item is done.
    pub end: f64,
}

impl ScopeWindow {
    /// Create a window. No ordering is enforced here.
    pub const fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }

    /// Width of the window.
    pub fn len(self) -> f64 {
        self.end - self.start
    }

    /// Return `true` for a degenerate (zero-width) window.
    pub fn is_empty(self) -> bool {
        self.len() <= 0.0
    }

    /// Local progress of `progress` inside this window. See [`clamp_scope`].
    pub fn local(self, progress: f64) -> f64 {
        clamp_scope(progress, self)
    }
}

/// Spread `count` windows over `[0, 1]`.
///
/// Consecutive windows overlap by `spread` of their width: every window is
/// `1 / (count - spread * (count - 1))` wide and window `i` starts at `i * width * (1 - spread)`.
/// The first window starts at 0 and the last one ends at 1. `spread` is clamped into `[0, 1]`;
/// a non-finite spread counts as 0.
pub fn spread_scopes(count: usize, spread: f64) -> Vec<ScopeWindow> {
    if count == 0 {
        return Vec::new();
    }
    let spread = if spread.is_finite() {
        spread.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let n = count as f64;
    // n - spread * (n - 1) >= 1 for spread in [0, 1].
    let width = 1.0 / (n - spread * (n - 1.0));
    let step = width * (1.0 - spread);

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let start = (step * i as f64).min(1.0);
        let end = (start + width).min(1.0);
        out.push(ScopeWindow::new(start, end));
    }
    if let Some(last) = out.last_mut() {
        // Pin the tail against float drift.
        last.end = 1.0;
    }
    out
}

/// Map a global `progress` onto `window`.
///
/// Returns exactly 0 at or before `start`, exactly 1 at or after `end` and the linear
/// interpolation in between. A degenerate window behaves as a step at `start`.
pub fn clamp_scope(progress: f64, window: ScopeWindow) -> f64 {
    if progress.is_nan() || progress <= window.start {
        return 0.0;
    }
    if progress >= window.end {
        return 1.0;
    }
    let len = window.end - window.start;
    if len <= 0.0 {
        return 1.0;
    }
    ((progress - window.start) / len).clamp(0.0, 1.0)
}

#[cfg(test)]
#[path = "../../tests/unit/animation/scope.rs"]
mod tests;
