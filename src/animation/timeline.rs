use std::time::Duration;

use crate::animation::ease::Ease;

/// Direction the timeline is currently moving in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards progress 1.
    Forward,
    /// Towards progress 0.
    Backward,
}

/// One progress notification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimelineTick {
    /// Linear position in `[0, 1]`.
    pub progress: f64,
    /// `progress` mapped through the timeline's ease.
    pub eased: f64,
}

/// Play/reverse tween over a fixed duration, advanced by explicit time deltas.
///
/// Ticks are produced only by [`Timeline::advance`], so callers decide when time passes.
#[derive(Clone, Debug)]
pub struct Timeline {
    duration: Duration,
    ease: Ease,
    progress: f64,
    direction: Direction,
    running: bool,
    destroyed: bool,
}

impl Timeline {
    /// Create a paused timeline at position 0.
    pub fn new(duration: Duration, ease: Ease) -> Self {
        Self {
            duration,
            ease,
            progress: 0.0,
            direction: Direction::Forward,
            running: false,
            destroyed: false,
        }
    }

    pub fn duration(&self) -> Duration {
        self.duration
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Linear position in `[0, 1]`.
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Eased position in `[0, 1]`.
    pub fn eased(&self) -> f64 {
        self.ease.apply(self.progress)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Move forward from the current position.
    pub fn play(&mut self) {
        self.start(Direction::Forward);
    }

    /// Move backward from the current position.
    pub fn reverse(&mut self) {
        self.start(Direction::Backward);
    }

    fn start(&mut self, direction: Direction) {
        if self.destroyed {
            return;
        }
        self.direction = direction;
        self.running = !self.at_end();
    }

    fn at_end(&self) -> bool {
        match self.direction {
            Direction::Forward => self.progress >= 1.0,
            Direction::Backward => self.progress <= 0.0,
        }
    }

    /// Let `dt` pass. Returns the new position, or `None` when nothing moved.
    ///
    /// The tick that reaches either end stops the timeline.
    pub fn advance(&mut self, dt: Duration) -> Option<TimelineTick> {
        if self.destroyed || !self.running {
            return None;
        }

        let delta = if self.duration.is_zero() {
            1.0
        } else {
            dt.as_secs_f64() / self.duration.as_secs_f64()
        };
        let next = match self.direction {
            Direction::Forward => self.progress + delta,
            Direction::Backward => self.progress - delta,
        };
        self.progress = next.clamp(0.0, 1.0);
        if self.at_end() {
            self.running = false;
        }

        Some(TimelineTick {
            progress: self.progress,
            eased: self.eased(),
        })
    }

    /// Stop permanently. Later calls are no-ops.
    pub fn destroy(&mut self) {
        self.running = false;
        self.destroyed = true;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/timeline.rs"]
mod tests;
