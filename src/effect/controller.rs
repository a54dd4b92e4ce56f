use std::time::Duration;

use image::RgbaImage;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::animation::timeline::{Timeline, TimelineTick};
use crate::assets::prerender::Prerender;
use crate::effect::config::EffectConfig;
use crate::effect::events::{Listeners, PointerEvent};
use crate::foundation::error::RevealResult;
use crate::render::reveal::{RevealParams, render_reveal};
use crate::render::target::RenderTarget;
use crate::tiles::extract::{TileList, extract_with_rng};

/// Lifecycle of one effect instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectState {
    Uninitialized,
    /// Idle; the timeline is not moving.
    Ready,
    /// Pointer inside, animating towards fully covered.
    HoverIn,
    /// Pointer left, animating back towards fully revealed.
    HoverOut,
    Destroyed,
}

/// Owns the prerender surface, the render target, the tile list and the hover timeline of one
/// effect instance, and re-renders whenever one of them changes.
///
/// Resizing flows one way: target resize -> prerender resize -> re-extraction -> render.
/// Every operation after [`EffectController::destroy`] is a no-op.
pub struct EffectController<T: RenderTarget> {
    config: EffectConfig,
    params: RevealParams,
    prerender: Prerender,
    target: T,
    tiles: TileList,
    timeline: Timeline,
    listeners: Listeners,
    rng: StdRng,
    state: EffectState,
    progress: f64,
}

impl<T: RenderTarget> EffectController<T> {
    /// Prepare `image` for `target` and render it fully revealed.
    #[tracing::instrument(skip_all, fields(kind = %config.kind, seed = config.seed))]
    pub fn new(image: RgbaImage, target: T, config: EffectConfig) -> RevealResult<Self> {
        config.validate()?;
        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut this = Self {
            params: config.reveal_params(),
            timeline: Timeline::new(config.duration(), config.ease),
            prerender: Prerender::new(image),
            target,
            tiles: TileList::new(),
            listeners: Listeners::new(),
            rng,
            state: EffectState::Uninitialized,
            progress: 1.0,
            config,
        };

        this.refresh_tiles();
        this.listeners.subscribe(PointerEvent::Enter);
        this.listeners.subscribe(PointerEvent::Leave);
        this.state = EffectState::Ready;
        tracing::debug!(tiles = this.tiles.len(), "effect ready");

        // The target's initial size is its first resize.
        let (w, h) = (this.target.width(), this.target.height());
        this.resize(w, h);
        Ok(this)
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    /// Tiles in reveal order for the current size.
    pub fn tiles(&self) -> &TileList {
        &self.tiles
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn prerender(&self) -> &Prerender {
        &self.prerender
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Progress of the last render (1 = fully revealed).
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_destroyed(&self) -> bool {
        self.state == EffectState::Destroyed
    }

    /// Handle a render-target resize: resize the prerender, re-extract, render fully revealed.
    #[tracing::instrument(skip(self))]
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.is_destroyed() {
            tracing::debug!("resize after destroy ignored");
            return;
        }
        self.target.resize(width, height);
        self.prerender.change_size(width, height);
        self.refresh_tiles();
        self.render(1.0);
    }

    /// Render at `progress` without touching the timeline.
    pub fn render(&mut self, progress: f64) -> bool {
        if self.is_destroyed() {
            return false;
        }
        let drawn = render_reveal(
            &mut self.target,
            self.prerender.frame(),
            &self.tiles,
            progress,
            &self.params,
        );
        if drawn {
            self.progress = progress.clamp(0.0, 1.0);
        }
        drawn
    }

    /// Route a pointer event through the live subscriptions.
    pub fn dispatch(&mut self, event: PointerEvent) {
        if self.is_destroyed() || !self.listeners.is_subscribed(event) {
            tracing::debug!(?event, "no live subscription, event dropped");
            return;
        }
        match event {
            PointerEvent::Enter => {
                self.timeline.play();
                self.state = if self.timeline.is_running() {
                    EffectState::HoverIn
                } else {
                    EffectState::Ready
                };
            }
            PointerEvent::Leave => {
                self.timeline.reverse();
                self.state = if self.timeline.is_running() {
                    EffectState::HoverOut
                } else {
                    EffectState::Ready
                };
            }
        }
        tracing::trace!(?event, state = ?self.state, "pointer event");
    }

    pub fn pointer_enter(&mut self) {
        self.dispatch(PointerEvent::Enter);
    }

    pub fn pointer_leave(&mut self) {
        self.dispatch(PointerEvent::Leave);
    }

    /// Let `dt` pass on the hover timeline and render the resulting tick.
    pub fn advance(&mut self, dt: Duration) -> Option<TimelineTick> {
        if self.is_destroyed() {
            return None;
        }
        let tick = self.timeline.advance(dt)?;
        self.render(1.0 - tick.eased);
        if !self.timeline.is_running() {
            self.state = EffectState::Ready;
        }
        Some(tick)
    }

    /// Release surfaces, timeline and subscriptions. Safe to call more than once.
    pub fn destroy(&mut self) {
        if self.is_destroyed() {
            return;
        }
        self.listeners.remove_all();
        self.timeline.destroy();
        self.target.destroy();
        self.prerender.destroy();
        self.tiles = TileList::new();
        self.state = EffectState::Destroyed;
        tracing::debug!("effect destroyed");
    }

    fn refresh_tiles(&mut self) {
        if self.prerender.take_ready() {
            self.tiles = extract_with_rng(&self.prerender, self.params.tile_size, &mut self.rng);
        }
    }
}

impl<T: RenderTarget> Drop for EffectController<T> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effect/controller.rs"]
mod tests;
