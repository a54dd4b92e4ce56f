//! Seed-tile image reveal.
//!
//! An image is cut into a grid of fixed-size "seed" tiles, each tile is reduced to its mean
//! colour, and the tiles are painted back over the image in a random order while a single
//! progress value sweeps `[0, 1]`.
//!
//! # Pipeline overview
//!
//! 1. **Prerender**: the decoded image is drawn at the target size ([`Prerender`]).
//! 2. **Extract**: the prerendered pixels become a shuffled [`TileList`] ([`extract`]).
//! 3. **Reveal**: base image plus per-tile overlay at a global progress ([`render_reveal`]).
//! 4. **Control**: [`EffectController`] re-extracts on resize and drives the reveal from a
//!    hover [`Timeline`].
//!
//! Extraction and rendering never fail: zero-size inputs and unready targets are no-ops.
//! Errors ([`RevealError`]) only come from configuration, manifests and image decoding.
#![forbid(unsafe_code)]

mod animation;
mod assets;
mod bootstrap;
mod effect;
mod foundation;
mod render;
mod tiles;

pub use animation::ease::Ease;
pub use animation::scope::{ScopeWindow, clamp_scope, spread_scopes};
pub use animation::timeline::{Direction, Timeline, TimelineTick};
pub use assets::decode::{decode_image, load_image};
pub use assets::prerender::{Prerender, cover_fit};
pub use bootstrap::scan::{
    Container, Manifest, MountRequest, Mounted, mount_all, parse_seed_attr, scan_containers,
};
pub use effect::config::EffectConfig;
pub use effect::controller::{EffectController, EffectState};
pub use effect::events::{Listeners, PointerEvent, SubscriptionId};
pub use foundation::core::{Circle, Point, Rect, Rgb8, TileRect};
pub use foundation::error::{RevealError, RevealResult};
pub use render::cpu::CpuTarget;
pub use render::reveal::{
    CIRCLE_RADIUS_FACTOR, DEFAULT_SPREAD, RevealParams, ShapeKind, render_reveal, tile_paint,
};
pub use render::target::{FillShape, FrameRGBA, RenderTarget};
pub use tiles::extract::{
    DEFAULT_TILE_SIZE, PixelSource, Tile, TileList, extract, extract_with_rng, grid_tiles,
    mean_rgb,
};
